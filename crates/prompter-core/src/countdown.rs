//! Pre-roll countdown shown before scrolling starts.
//!
//! The gate runs strictly before `ScrollEngine::start`; the engine is
//! never running while a countdown is active.

/// A whole-second countdown advanced by frame deltas.
#[derive(Debug, Clone)]
pub struct Countdown {
    total_s: u32,
    elapsed_s: f64,
}

impl Countdown {
    pub fn new(seconds: u32) -> Self {
        Self {
            total_s: seconds,
            elapsed_s: 0.0,
        }
    }

    /// Advance by `dt_seconds`. Returns `true` once the countdown is over.
    pub fn tick(&mut self, dt_seconds: f64) -> bool {
        if dt_seconds.is_finite() && dt_seconds > 0.0 {
            self.elapsed_s += dt_seconds;
        }
        self.is_done()
    }

    pub fn is_done(&self) -> bool {
        self.elapsed_s >= f64::from(self.total_s)
    }

    /// The number to display: whole seconds left, rounded up.
    pub fn remaining(&self) -> u32 {
        let left = f64::from(self.total_s) - self.elapsed_s;
        if left <= 0.0 { 0 } else { left.ceil() as u32 }
    }
}
