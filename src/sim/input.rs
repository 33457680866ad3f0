//! Input command handlers
//!
//! Pure handlers mapping pointer, keyboard, and button events onto the game
//! state. Drag-session data is an explicit value threaded through the
//! move/end handlers, not state captured in event-listener closures.

use glam::Vec2;
use rand::Rng;

use super::state::{Bounds, GameEvent, GameState};
use crate::consts::*;

/// Live drag bookkeeping: the pointer-to-ball offset captured at drag start
/// and the previous ball position for deriving throw velocity.
#[derive(Debug, Clone, Copy)]
pub struct DragSession {
    offset: Vec2,
    last: Vec2,
}

/// Begin dragging the ball. Grabbing the ball always unpauses.
pub fn drag_start(state: &mut GameState, pointer: Vec2) -> DragSession {
    state.ball.dragging = true;
    state.paused = false;
    DragSession {
        offset: pointer - state.ball.pos,
        last: state.ball.pos,
    }
}

/// Move the ball with the pointer.
///
/// Velocity becomes the single-frame displacement, so a flung release
/// carries the last frame's motion as throw momentum.
pub fn drag_move(state: &mut GameState, session: &mut DragSession, pointer: Vec2) {
    let pos = pointer - session.offset;
    state.ball.vel = pos - session.last;
    state.ball.pos = pos;
    session.last = pos;
}

/// Release the ball; it keeps whatever velocity the drag gave it.
pub fn drag_end(state: &mut GameState) {
    state.ball.dragging = false;
}

/// On-screen control buttons (mobile)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlButton {
    Left,
    Right,
    Jump,
}

/// Apply a button nudge. Buttons work even while paused.
pub fn button_press(state: &mut GameState, button: ControlButton) {
    match button {
        ControlButton::Left => state.ball.vel.x -= 2.0,
        ControlButton::Right => state.ball.vel.x += 2.0,
        ControlButton::Jump => state.ball.vel.y -= 5.0,
    }
}

/// Handle a keyboard key.
///
/// Every key, matched or not, also feeds the trigger-phrase buffer; typing
/// the phrase launches the ball with a random horizontal kick and clears
/// the buffer.
pub fn key_down(state: &mut GameState, bounds: &Bounds, key: &str) -> Vec<GameEvent> {
    let mut events = Vec::new();

    match key {
        " " => state.paused = !state.paused,
        "r" | "R" => state.reset(bounds),
        "ArrowLeft" => state.ball.vel.x -= 1.0,
        "ArrowRight" => state.ball.vel.x += 1.0,
        "ArrowUp" => state.ball.vel.y -= 3.0,
        _ => {}
    }

    state.typed.push(key);
    if state.typed.matches_trigger() {
        state.ball.vel.x = state.rng.random_range(-LAUNCH_VX_MAX..LAUNCH_VX_MAX);
        state.ball.vel.y = LAUNCH_VY;
        state.typed.clear();
        events.push(GameEvent::Meow);
    }

    events
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOUNDS: Bounds = Bounds {
        width: 1024.0,
        height: 768.0,
    };

    #[test]
    fn drag_release_keeps_last_frame_momentum() {
        let mut state = GameState::new(1, &BOUNDS);
        state.ball.pos = Vec2::new(90.0, 90.0);

        let mut session = drag_start(&mut state, Vec2::new(100.0, 100.0));
        assert!(state.ball.dragging);
        assert!(!state.paused);

        drag_move(&mut state, &mut session, Vec2::new(110.0, 100.0));
        assert_eq!(state.ball.pos, Vec2::new(100.0, 90.0));
        assert_eq!(state.ball.vel, Vec2::new(10.0, 0.0));

        drag_end(&mut state);
        assert!(!state.ball.dragging);
        assert_eq!(state.ball.vel, Vec2::new(10.0, 0.0));
    }

    #[test]
    fn drag_start_unpauses() {
        let mut state = GameState::new(1, &BOUNDS);
        state.paused = true;
        let pos = state.ball.pos;
        drag_start(&mut state, pos);
        assert!(!state.paused);
    }

    #[test]
    fn space_toggles_pause() {
        let mut state = GameState::new(1, &BOUNDS);
        key_down(&mut state, &BOUNDS, " ");
        assert!(state.paused);
        key_down(&mut state, &BOUNDS, " ");
        assert!(!state.paused);
    }

    #[test]
    fn reset_restores_initial_values() {
        let mut state = GameState::new(1, &BOUNDS);
        state.score = 7;
        state.paused = true;
        state.ball.pos = Vec2::new(500.0, 300.0);

        key_down(&mut state, &BOUNDS, "r");

        assert_eq!(state.score, 0);
        assert!(!state.paused);
        assert_eq!(state.ball.pos, Vec2::new(512.0, 384.0));
        assert_eq!(state.ball.vel, Vec2::new(2.0, -2.0));
    }

    #[test]
    fn arrows_nudge_velocity_additively() {
        let mut state = GameState::new(1, &BOUNDS);
        state.ball.vel = Vec2::new(2.0, -2.0);
        key_down(&mut state, &BOUNDS, "ArrowLeft");
        key_down(&mut state, &BOUNDS, "ArrowLeft");
        assert_eq!(state.ball.vel.x, 0.0);
        key_down(&mut state, &BOUNDS, "ArrowRight");
        assert_eq!(state.ball.vel.x, 1.0);
        key_down(&mut state, &BOUNDS, "ArrowUp");
        assert_eq!(state.ball.vel.y, -5.0);
    }

    #[test]
    fn trigger_phrase_launches_exactly_once() {
        let mut state = GameState::new(1, &BOUNDS);
        let mut meows = 0;
        for key in ["x", "m", "e", "o", "w"] {
            let events = key_down(&mut state, &BOUNDS, key);
            meows += events
                .iter()
                .filter(|e| matches!(e, GameEvent::Meow))
                .count();
        }
        assert_eq!(meows, 1);
        assert_eq!(state.ball.vel.y, LAUNCH_VY);
        assert!(state.ball.vel.x >= -LAUNCH_VX_MAX && state.ball.vel.x < LAUNCH_VX_MAX);
        assert_eq!(state.typed.as_str(), "");
    }

    #[test]
    fn unmatched_keys_are_ignored_silently() {
        let mut state = GameState::new(1, &BOUNDS);
        let before = state.ball;
        let events = key_down(&mut state, &BOUNDS, "q");
        assert!(events.is_empty());
        assert_eq!(state.ball, before);
        assert_eq!(state.typed.as_str(), "q");
    }

    #[test]
    fn buttons_nudge_even_while_paused() {
        let mut state = GameState::new(1, &BOUNDS);
        state.paused = true;
        state.ball.vel = Vec2::ZERO;
        button_press(&mut state, ControlButton::Left);
        assert_eq!(state.ball.vel.x, -2.0);
        button_press(&mut state, ControlButton::Right);
        button_press(&mut state, ControlButton::Right);
        assert_eq!(state.ball.vel.x, 2.0);
        button_press(&mut state, ControlButton::Jump);
        assert_eq!(state.ball.vel.y, -5.0);
        assert!(state.paused);
    }
}
