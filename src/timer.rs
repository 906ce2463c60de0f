//! Level countdown.
//!
//! `time_left` is always derived from an absolute start timestamp rather
//! than accumulated from frame deltas, so it stays correct when frames
//! run long or short.

#[derive(Clone, Debug, PartialEq)]
pub struct Timer {
    pub time_limit: f64,
    pub time_left: f64,
    start_ms: u64,
}

impl Timer {
    pub fn new(time_limit: f64, now_ms: u64) -> Self {
        Timer {
            time_limit,
            time_left: time_limit,
            start_ms: now_ms,
        }
    }

    pub fn update(&mut self, now_ms: u64) {
        let elapsed = now_ms.saturating_sub(self.start_ms) as f64 / 1000.0;
        self.time_left = self.time_limit - elapsed;
    }

    pub fn reset(&mut self, time_limit: f64, now_ms: u64) {
        self.time_limit = time_limit;
        self.time_left = time_limit;
        self.start_ms = now_ms;
    }

    pub fn is_expired(&self) -> bool {
        self.time_left <= 0.0
    }

    /// Whole seconds remaining, as shown on the HUD.
    pub fn whole_seconds_left(&self) -> u32 {
        self.time_left.max(0.0) as u32
    }
}
