//! Presentation preferences
//!
//! Read once at startup. Nothing here is persisted - the toy keeps no state
//! between visits.

/// Presentation preferences
#[derive(Debug, Clone)]
pub struct Settings {
    /// Environment asked for reduced motion (prefers-reduced-motion)
    pub reduced_motion: bool,
    /// Particle effects on wall hits
    pub particles: bool,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            reduced_motion: false,
            particles: true,
            sfx_volume: 1.0,
        }
    }
}

impl Settings {
    /// Detect preferences from the environment (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn detect() -> Self {
        let reduced_motion = web_sys::window()
            .and_then(|w| w.match_media("(prefers-reduced-motion: reduce)").ok())
            .flatten()
            .map(|mq| mq.matches())
            .unwrap_or(false);

        if reduced_motion {
            log::info!("Reduced motion requested - particles disabled");
        }

        Self {
            reduced_motion,
            ..Self::default()
        }
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn detect() -> Self {
        Self::default()
    }

    /// Whether wall hits should spawn particles
    pub fn effective_particles(&self) -> bool {
        self.particles && !self.reduced_motion
    }
}
