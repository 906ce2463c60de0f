//! Session-level settings.
//!
//! Physics constants are tuned per frame and live next to the code that
//! uses them; this struct only holds what a player or launcher may change.

/// Settings for one game session.
///
/// # Default Values
///
/// - **Screen**: 800 × 600 logical pixels
/// - **TPS**: 90 (gravity and speeds are tuned to this rate)
/// - **Level time limit**: 120 s
/// - **Seed**: none (levels drawn from OS entropy)
#[derive(Clone, Debug, PartialEq)]
pub struct GameConfig {
    pub screen_width: f32,
    pub screen_height: f32,
    pub tps: u32,
    pub level_time_limit: f64,
    pub seed: Option<u64>,
}

impl GameConfig {
    pub fn new() -> Self {
        GameConfig {
            screen_width: 800.0,
            screen_height: 600.0,
            tps: 90,
            level_time_limit: 120.0,
            seed: None,
        }
    }

    /// Where the player is put on a full reset, before the level snaps it
    /// onto its starting platform.
    pub fn player_spawn(&self) -> (f32, f32) {
        (50.0, self.screen_height - 150.0)
    }

    /// # Panics
    ///
    /// Panics if `tps == 0`.
    pub fn with_tps(mut self, tps: u32) -> Self {
        assert!(tps > 0, "TPS must be positive, got {}", tps);
        self.tps = tps;
        self
    }

    /// # Panics
    ///
    /// Panics if `seconds <= 0.0`.
    pub fn with_time_limit(mut self, seconds: f64) -> Self {
        assert!(seconds > 0.0, "Time limit must be positive, got {}", seconds);
        self.level_time_limit = seconds;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}
