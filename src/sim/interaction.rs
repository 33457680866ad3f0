//! Cat proximity detection and the meow impulse

use super::state::{CatHitbox, GameEvent, GameState};
use crate::consts::*;

/// Check ball-to-cat proximity and apply the swat impulse on close contact.
///
/// Returns the near flag (the wider band, used only for the cat's visual
/// highlight). Inside the close band the ball takes a horizontal push away
/// from the cat and a vertical push that is always upward, regardless of
/// which side the ball approached from, plus a `Meow` event.
pub fn check(state: &mut GameState, cat: &CatHitbox, events: &mut Vec<GameEvent>) -> bool {
    let delta = state.ball.center() - cat.center;
    let dist = delta.length();
    if dist >= CAT_NEAR_DIST {
        return false;
    }
    if dist < CAT_CLOSE_DIST {
        state.ball.vel.x += delta.x * CAT_PUSH_SCALE;
        state.ball.vel.y += -delta.y.abs() * CAT_PUSH_SCALE;
        events.push(GameEvent::Meow);
    }
    true
}
