//! Per-frame simulation tick
//!
//! Advances the ball one tick at a time: gravity, integration, wall
//! collisions with scoring, then the cat proximity check.

use super::interaction;
use super::state::{Bounds, CatHitbox, GameEvent, GameState, WallSide};
use crate::consts::*;

/// Everything one frame of simulation produced
#[derive(Debug, Clone)]
pub struct TickOutput {
    /// Side effects for the presentation layer to realize
    pub events: Vec<GameEvent>,
    /// Ball is inside the cat's highlight band
    pub cat_near: bool,
}

/// Advance physics by one tick.
///
/// Dragging suspends gravity and integration (the drag session drives the
/// position), but wall clamping and scoring still apply. Wall checks run
/// independently per axis, so a corner hit can score twice in one tick.
pub fn step(state: &mut GameState, bounds: &Bounds, events: &mut Vec<GameEvent>) {
    if !state.ball.dragging {
        state.ball.vel.y += GRAVITY;
        state.ball.pos += state.ball.vel;
    }

    let ball = &mut state.ball;

    if ball.pos.x < 0.0 {
        ball.pos.x = 0.0;
        ball.vel.x *= -1.0;
        state.score += 1;
        events.push(GameEvent::WallHit {
            side: WallSide::Left,
            at: ball.center(),
        });
    }
    if ball.pos.x > bounds.max_x() {
        ball.pos.x = bounds.max_x();
        ball.vel.x *= -1.0;
        state.score += 1;
        events.push(GameEvent::WallHit {
            side: WallSide::Right,
            at: ball.center(),
        });
    }
    if ball.pos.y < 0.0 {
        ball.pos.y = 0.0;
        ball.vel.y *= -1.0;
        state.score += 1;
        events.push(GameEvent::WallHit {
            side: WallSide::Top,
            at: ball.center(),
        });
    }
    if ball.pos.y > bounds.max_y() {
        ball.pos.y = bounds.max_y();
        // Floor bounce dissipates energy so the ball eventually settles
        ball.vel.y *= -FLOOR_DAMPING;
        state.score += 1;
        events.push(GameEvent::WallHit {
            side: WallSide::Bottom,
            at: ball.center(),
        });
    }
}

/// One full frame update.
///
/// Physics runs only while unpaused; the cat check runs every tick
/// regardless, so the cat still swats a ball parked next to it.
pub fn tick(state: &mut GameState, bounds: &Bounds, cat: &CatHitbox) -> TickOutput {
    let mut events = Vec::new();
    if !state.paused {
        step(state, bounds, &mut events);
    }
    let cat_near = interaction::check(state, cat, &mut events);
    TickOutput { events, cat_near }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use proptest::prelude::*;

    const BOUNDS: Bounds = Bounds {
        width: 800.0,
        height: 600.0,
    };

    fn far_cat() -> CatHitbox {
        CatHitbox {
            center: Vec2::new(-10_000.0, -10_000.0),
            width: 100.0,
            height: 100.0,
        }
    }

    #[test]
    fn gravity_pulls_down() {
        let mut state = GameState::new(1, &BOUNDS);
        state.ball.vel = Vec2::ZERO;
        let mut events = Vec::new();
        step(&mut state, &BOUNDS, &mut events);
        assert_eq!(state.ball.vel.y, GRAVITY);
        assert_eq!(state.ball.pos.y, 300.0 + GRAVITY);
    }

    #[test]
    fn side_wall_reflects_exactly() {
        let mut state = GameState::new(1, &BOUNDS);
        state.ball.pos = Vec2::new(1.0, 300.0);
        state.ball.vel = Vec2::new(-5.0, 0.0);
        let mut events = Vec::new();
        step(&mut state, &BOUNDS, &mut events);
        assert_eq!(state.ball.pos.x, 0.0);
        assert_eq!(state.ball.vel.x, 5.0);
        assert_eq!(state.score, 1);
        assert!(matches!(
            events[0],
            GameEvent::WallHit {
                side: WallSide::Left,
                ..
            }
        ));
    }

    #[test]
    fn ceiling_reflects_exactly() {
        let mut state = GameState::new(1, &BOUNDS);
        state.ball.pos = Vec2::new(400.0, 1.0);
        state.ball.vel = Vec2::new(0.0, -8.0);
        let mut events = Vec::new();
        step(&mut state, &BOUNDS, &mut events);
        assert_eq!(state.ball.pos.y, 0.0);
        assert_eq!(state.ball.vel.y, -(-8.0 + GRAVITY));
        assert!(matches!(
            events[0],
            GameEvent::WallHit {
                side: WallSide::Top,
                ..
            }
        ));
    }

    #[test]
    fn floor_bounce_loses_energy() {
        let mut state = GameState::new(1, &BOUNDS);
        state.ball.pos = Vec2::new(400.0, BOUNDS.max_y() - 1.0);
        state.ball.vel = Vec2::new(0.0, 10.0);
        let mut events = Vec::new();
        step(&mut state, &BOUNDS, &mut events);
        assert_eq!(state.ball.pos.y, BOUNDS.max_y());
        assert_eq!(state.ball.vel.y, (10.0 + GRAVITY) * -FLOOR_DAMPING);
        assert!(matches!(
            events[0],
            GameEvent::WallHit {
                side: WallSide::Bottom,
                ..
            }
        ));
    }

    #[test]
    fn corner_hit_scores_both_axes() {
        let mut state = GameState::new(1, &BOUNDS);
        state.ball.pos = Vec2::new(1.0, 1.0);
        state.ball.vel = Vec2::new(-10.0, -10.0);
        let mut events = Vec::new();
        step(&mut state, &BOUNDS, &mut events);
        assert_eq!(state.score, 2);
        assert_eq!(events.len(), 2);
    }

    #[test]
    fn dragging_skips_gravity_and_integration() {
        let mut state = GameState::new(1, &BOUNDS);
        state.ball.dragging = true;
        state.ball.vel = Vec2::new(3.0, 4.0);
        let before = state.ball.pos;
        let mut events = Vec::new();
        step(&mut state, &BOUNDS, &mut events);
        assert_eq!(state.ball.pos, before);
        assert_eq!(state.ball.vel, Vec2::new(3.0, 4.0));
    }

    #[test]
    fn dragging_out_of_bounds_still_clamps_and_scores() {
        let mut state = GameState::new(1, &BOUNDS);
        state.ball.dragging = true;
        state.ball.pos = Vec2::new(-40.0, 300.0);
        state.ball.vel = Vec2::new(-2.0, 0.0);
        let mut events = Vec::new();
        step(&mut state, &BOUNDS, &mut events);
        assert_eq!(state.ball.pos.x, 0.0);
        assert_eq!(state.ball.vel.x, 2.0);
        assert_eq!(state.score, 1);
    }

    #[test]
    fn pause_freezes_position_but_not_cat() {
        let mut state = GameState::new(1, &BOUNDS);
        state.paused = true;
        state.ball.vel = Vec2::new(7.0, -3.0);
        let before = state.ball.pos;

        for _ in 0..10 {
            let out = tick(&mut state, &BOUNDS, &far_cat());
            assert!(out.events.is_empty());
            assert!(!out.cat_near);
        }
        assert_eq!(state.ball.pos, before);

        // Cat parked on top of the ball still swats it while paused
        let cat = CatHitbox {
            center: state.ball.center() + Vec2::new(10.0, 10.0),
            width: 100.0,
            height: 100.0,
        };
        let out = tick(&mut state, &BOUNDS, &cat);
        assert!(out.cat_near);
        assert!(out.events.contains(&GameEvent::Meow));
        assert_eq!(state.ball.pos, before);
    }

    proptest! {
        #[test]
        fn position_invariant_holds(
            x in -2000.0f32..4000.0,
            y in -2000.0f32..4000.0,
            vx in -50.0f32..50.0,
            vy in -50.0f32..50.0,
            ticks in 1usize..200,
        ) {
            let mut state = GameState::new(42, &BOUNDS);
            state.ball.pos = Vec2::new(x, y);
            state.ball.vel = Vec2::new(vx, vy);
            let mut events = Vec::new();
            for _ in 0..ticks {
                step(&mut state, &BOUNDS, &mut events);
                prop_assert!(state.ball.pos.x >= 0.0);
                prop_assert!(state.ball.pos.x <= BOUNDS.max_x());
                prop_assert!(state.ball.pos.y >= 0.0);
                prop_assert!(state.ball.pos.y <= BOUNDS.max_y());
            }
        }

        #[test]
        fn score_equals_wall_hit_count(
            vx in -30.0f32..30.0,
            vy in -30.0f32..30.0,
            ticks in 1usize..300,
        ) {
            let mut state = GameState::new(7, &BOUNDS);
            state.ball.vel = Vec2::new(vx, vy);
            let mut events = Vec::new();
            let mut last_score = 0;
            for _ in 0..ticks {
                step(&mut state, &BOUNDS, &mut events);
                prop_assert!(state.score >= last_score);
                last_score = state.score;
            }
            let hits = events
                .iter()
                .filter(|e| matches!(e, GameEvent::WallHit { .. }))
                .count();
            prop_assert_eq!(state.score as usize, hits);
        }
    }
}
