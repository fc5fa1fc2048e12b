//! Module: level
//!
//! Purpose: Button level and edge event types. Represents the raw input
//! as the core sees it: a binary level, and transitions between levels
//! carrying the elapsed time since the previous transition.
//!
//! Pin polarity stays at the HAL boundary. The button is wired active-low
//! (input pull-up, pressed = low); [`ButtonLevel::from_active_low`] is the
//! only place that mapping exists.
//!
//! Safety: Safe. No unsafe blocks. Copy types only.

/// Sampled button level.
///
/// No intermediate states: the hardware read is binary, and any bounce
/// filtering belongs to the sampling layer, not the core.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ButtonLevel {
    /// Button released.
    Idle,
    /// Button pressed.
    Active,
}

impl ButtonLevel {
    /// Map an active-low pin reading to a level (high = released).
    #[inline]
    pub const fn from_active_low(pin_high: bool) -> Self {
        if pin_high {
            ButtonLevel::Idle
        } else {
            ButtonLevel::Active
        }
    }

    /// Check if the button is pressed.
    #[inline]
    pub const fn is_active(self) -> bool {
        matches!(self, ButtonLevel::Active)
    }

    /// Check if the button is released.
    #[inline]
    pub const fn is_idle(self) -> bool {
        matches!(self, ButtonLevel::Idle)
    }
}

/// A level transition with the elapsed time since the previous one.
///
/// Produced only when a sampled level differs from the previously
/// observed level; `elapsed_us` is always >= 0.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EdgeEvent {
    /// Level before the transition.
    pub from: ButtonLevel,
    /// Level after the transition.
    pub to: ButtonLevel,
    /// Microseconds the `from` level was held.
    pub elapsed_us: i64,
}

impl EdgeEvent {
    /// Active -> Idle: the elapsed time is a signal (press) length.
    #[inline]
    pub const fn is_release(&self) -> bool {
        self.from.is_active() && self.to.is_idle()
    }

    /// Idle -> Active: the elapsed time is a gap (release) length.
    #[inline]
    pub const fn is_press(&self) -> bool {
        self.from.is_idle() && self.to.is_active()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_active_low_mapping() {
        assert_eq!(ButtonLevel::from_active_low(true), ButtonLevel::Idle);
        assert_eq!(ButtonLevel::from_active_low(false), ButtonLevel::Active);
    }

    #[test]
    fn test_level_predicates() {
        assert!(ButtonLevel::Active.is_active());
        assert!(!ButtonLevel::Active.is_idle());
        assert!(ButtonLevel::Idle.is_idle());
        assert!(!ButtonLevel::Idle.is_active());
    }

    #[test]
    fn test_edge_direction() {
        let release = EdgeEvent {
            from: ButtonLevel::Active,
            to: ButtonLevel::Idle,
            elapsed_us: 90_000,
        };
        assert!(release.is_release());
        assert!(!release.is_press());

        let press = EdgeEvent {
            from: ButtonLevel::Idle,
            to: ButtonLevel::Active,
            elapsed_us: 400_000,
        };
        assert!(press.is_press());
        assert!(!press.is_release());
    }
}
