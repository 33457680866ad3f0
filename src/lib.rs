//! Cat & Ball - a bouncing-ball toy with a reactive cat
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, cat interaction, input commands)
//! - `audio`: Procedural sound effects via Web Audio (wasm only)
//! - `settings`: Presentation preferences (reduced motion, volume)
//!
//! The presentation glue (DOM rendering, particle divs, parallax layers)
//! lives in the wasm entry point and consumes read-only snapshots plus the
//! event list each tick returns.

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod settings;
pub mod sim;

pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Ball radius in pixels, shared by physics and rendering
    pub const BALL_RADIUS: f32 = 30.0;

    /// Downward acceleration per tick (pixels/tick^2)
    pub const GRAVITY: f32 = 0.2;

    /// Floor bounce keeps 90% of vertical speed; the other three walls
    /// reflect losslessly. Kept as a literal multiplier in the floor
    /// branch rather than a shared restitution parameter.
    pub const FLOOR_DAMPING: f32 = 0.9;

    /// Cat proximity bands (distance from ball center to cat center)
    pub const CAT_NEAR_DIST: f32 = 150.0;
    pub const CAT_CLOSE_DIST: f32 = 100.0;
    /// Impulse scale applied inside the close band
    pub const CAT_PUSH_SCALE: f32 = 0.02;

    /// Velocity the ball restarts with after a reset
    pub const RESET_VX: f32 = 2.0;
    pub const RESET_VY: f32 = -2.0;

    /// Secret phrase that launches the ball when typed
    pub const TRIGGER_PHRASE: &str = "meow";

    /// Trigger-phrase launch: horizontal speed range and fixed upward kick
    pub const LAUNCH_VX_MAX: f32 = 5.0;
    pub const LAUNCH_VY: f32 = -10.0;
}
