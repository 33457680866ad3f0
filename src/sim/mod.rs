//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - No rendering or platform dependencies
//!
//! The presentation layer drives it with one [`tick`] per animation frame
//! plus the input handlers, and realizes the returned events.

pub mod input;
pub mod interaction;
pub mod state;
pub mod tick;

pub use input::{
    ControlButton, DragSession, button_press, drag_end, drag_move, drag_start, key_down,
};
pub use state::{Ball, Bounds, CatHitbox, GameEvent, GameState, KeyBuffer, WallSide};
pub use tick::{TickOutput, step, tick};
