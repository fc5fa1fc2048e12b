//! Module: config
//!
//! Purpose: Fixed timing configuration for the edge classifier.
//!
//! All durations derive from a single dot time, the way straight-key
//! trainers are calibrated: dash and letter gap are 3x dot, word reset
//! is 10x dot. Classification thresholds sit at the 1.5x midpoints so
//! tolerance is symmetric around the nominal 1x/3x element lengths.
//!
//! Values are fixed at process start. There is no runtime mutation path.

/// Timing configuration for signal and gap classification.
///
/// Integer microsecond math throughout. Dot time is the single tunable;
/// everything else is derived.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimingConfig {
    /// Nominal dot duration in microseconds.
    pub dot_time_us: i64,
}

impl TimingConfig {
    /// Stock configuration: 100ms dot, matching the reference hardware.
    pub const DEFAULT: Self = Self::from_dot_time_ms(100);

    /// Create a config from a dot time in milliseconds.
    pub const fn from_dot_time_ms(ms: u32) -> Self {
        Self {
            dot_time_us: ms as i64 * 1000,
        }
    }

    /// Nominal dash duration (3x dot).
    #[inline]
    pub const fn dash_time_us(&self) -> i64 {
        self.dot_time_us * 3
    }

    /// Upper bound for a press to classify as a dot (1.5x dot, exclusive).
    #[inline]
    pub const fn dot_max_us(&self) -> i64 {
        self.dot_time_us * 3 / 2
    }

    /// Upper bound for a press to classify as a dash (1.5x dash, exclusive).
    ///
    /// Presses at or beyond this are discarded as overlong.
    #[inline]
    pub const fn dash_max_us(&self) -> i64 {
        self.dot_time_us * 9 / 2
    }

    /// Minimum release gap that separates letters (3x dot, inclusive).
    #[inline]
    pub const fn letter_gap_us(&self) -> i64 {
        self.dot_time_us * 3
    }

    /// Minimum release gap that latches a word reset (10x dot, inclusive).
    #[inline]
    pub const fn reset_gap_us(&self) -> i64 {
        self.dot_time_us * 10
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
