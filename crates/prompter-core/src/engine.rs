//! Scroll engine: position, speed and run state, advanced once per frame.
//!
//! Motion is integer pixels. Sub-pixel travel is carried in an accumulator
//! between ticks, so arbitrary real speeds advance smoothly and the error
//! never exceeds one pixel no matter how many ticks elapse.

use prompter_types::config::clamp_speed;

/// Tolerance applied before taking the integer part of the accumulator.
/// Keeps sums such as `0.1 * 10` from landing on `0.999...` and losing a pixel.
const FRACTION_EPSILON: f64 = 1e-9;

/// What a single tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollEvent {
    /// Not running, or not enough travel accumulated to move a pixel.
    Idle,
    /// Position advanced.
    Moved,
    /// Position reached the end; the engine paused itself.
    Finished,
}

/// The auto-scroll state machine.
#[derive(Debug, Clone)]
pub struct ScrollEngine {
    position: u32,
    maximum: u32,
    speed: f64,
    running: bool,
    accumulator: f64,
    at_bottom: bool,
}

impl ScrollEngine {
    /// Create an idle engine at position 0. `speed` is clamped.
    pub fn new(speed: f64) -> Self {
        Self {
            position: 0,
            maximum: 0,
            speed: clamp_speed(speed).unwrap_or(*prompter_types::config::SPEED_RANGE.start()),
            running: false,
            accumulator: 0.0,
            at_bottom: false,
        }
    }

    pub fn position(&self) -> u32 {
        self.position
    }

    pub fn maximum(&self) -> u32 {
        self.maximum
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Whether the last run ended by reaching the bottom.
    pub fn at_bottom(&self) -> bool {
        self.at_bottom
    }

    pub fn clear_at_bottom(&mut self) {
        self.at_bottom = false;
    }

    /// Begin scrolling. No-op if already running.
    pub fn start(&mut self) {
        if self.running {
            return;
        }
        self.running = true;
        self.accumulator = 0.0;
    }

    /// Stop scrolling, keeping the position.
    pub fn pause(&mut self) {
        self.running = false;
    }

    /// Pause and return to the top.
    pub fn stop(&mut self) {
        self.pause();
        self.to_top();
    }

    /// Advance by `dt_seconds` of travel at the current speed.
    pub fn tick(&mut self, dt_seconds: f64) -> ScrollEvent {
        if !self.running {
            return ScrollEvent::Idle;
        }
        let dt = if dt_seconds.is_finite() && dt_seconds > 0.0 {
            dt_seconds
        } else {
            0.0
        };

        self.accumulator += self.speed * dt;
        let whole = (self.accumulator + FRACTION_EPSILON).floor();
        self.accumulator = (self.accumulator - whole).max(0.0);

        let before = self.position;
        if whole >= 1.0 {
            let advanced = u64::from(self.position).saturating_add(whole as u64);
            self.position = advanced.min(u64::from(self.maximum)) as u32;
        }

        if self.position >= self.maximum {
            self.position = self.maximum;
            self.running = false;
            self.accumulator = 0.0;
            self.at_bottom = true;
            return ScrollEvent::Finished;
        }

        if self.position != before {
            ScrollEvent::Moved
        } else {
            ScrollEvent::Idle
        }
    }

    /// Set the speed in px/s, clamped to the valid range. Non-finite values
    /// are ignored.
    pub fn set_speed(&mut self, px_per_sec: f64) {
        if let Some(speed) = clamp_speed(px_per_sec) {
            self.speed = speed;
            log::debug!("Scroll speed set to {speed:.1} px/s");
        }
    }

    pub fn adjust_speed(&mut self, delta: f64) {
        self.set_speed(self.speed + delta);
    }

    /// Move by `delta_px`, clamped to `[0, maximum]`.
    pub fn jump(&mut self, delta_px: i64) {
        let target = i64::from(self.position).saturating_add(delta_px);
        self.position = target.clamp(0, i64::from(self.maximum)) as u32;
    }

    /// Jump to `pct` percent of the scrollable extent.
    pub fn go_to_percent(&mut self, pct: f64) {
        let pct = if pct.is_finite() {
            pct.clamp(0.0, 100.0)
        } else {
            0.0
        };
        let target = (f64::from(self.maximum) * pct / 100.0).round();
        self.position = (target as u32).min(self.maximum);
    }

    /// Return to the start of the document.
    pub fn to_top(&mut self) {
        self.position = 0;
        self.accumulator = 0.0;
    }

    /// Choose a speed that scrolls the whole extent in `target_seconds`.
    pub fn fit_to_duration(&mut self, target_seconds: f64) {
        let target = if target_seconds.is_finite() {
            target_seconds.max(1.0)
        } else {
            1.0
        };
        let distance = f64::from(self.maximum.max(1));
        self.set_speed(distance / target);
        log::debug!(
            "Fit {distance} px to {target:.0}s -> {:.2} px/s",
            self.speed
        );
    }

    /// Seconds left at the current speed. Informational only.
    pub fn remaining_time(&self) -> f64 {
        if self.speed <= 0.0 {
            return 0.0;
        }
        f64::from(self.maximum - self.position) / self.speed
    }

    /// Fraction of the extent already scrolled, in `[0, 1]`.
    pub fn progress(&self) -> f64 {
        if self.maximum == 0 {
            return 0.0;
        }
        f64::from(self.position) / f64::from(self.maximum)
    }

    /// Install a freshly computed extent and clamp the position into it.
    pub fn set_maximum(&mut self, maximum: u32) {
        self.maximum = maximum;
        self.position = self.position.min(maximum);
        if self.position < maximum {
            self.at_bottom = false;
        }
    }
}
