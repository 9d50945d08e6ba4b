// Countdown clock driving auction liveness.

/// At or below this many seconds the clock is shown as urgent.
pub const URGENT_THRESHOLD_SECS: u32 = 30;

/// Result of advancing the clock by one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockTick {
    /// Still counting down; carries the new remaining time.
    Running(u32),
    /// This tick took the clock to zero.
    Expired,
    /// The clock was already at zero; nothing changed.
    AlreadyExpired,
}

/// Seconds remaining, always within `[0, max_window_secs]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountdownClock {
    remaining_secs: u32,
    max_window_secs: u32,
}

impl CountdownClock {
    pub fn new(starting_secs: u32, max_window_secs: u32) -> Self {
        CountdownClock {
            remaining_secs: starting_secs.min(max_window_secs),
            max_window_secs,
        }
    }

    pub fn tick(&mut self) -> ClockTick {
        if self.remaining_secs == 0 {
            return ClockTick::AlreadyExpired;
        }
        self.remaining_secs -= 1;
        if self.remaining_secs == 0 {
            ClockTick::Expired
        } else {
            ClockTick::Running(self.remaining_secs)
        }
    }

    /// Add `bonus_secs`, capped at the window. An expired clock stays at zero.
    pub fn extend(&mut self, bonus_secs: u32) -> u32 {
        if self.remaining_secs > 0 {
            self.remaining_secs = self
                .remaining_secs
                .saturating_add(bonus_secs)
                .min(self.max_window_secs);
        }
        self.remaining_secs
    }

    pub fn remaining(&self) -> u32 {
        self.remaining_secs
    }

    pub fn max_window(&self) -> u32 {
        self.max_window_secs
    }

    pub fn is_urgent(&self) -> bool {
        self.remaining_secs <= URGENT_THRESHOLD_SECS
    }

    /// Remaining time as a fraction of the window, for progress gauges.
    pub fn fraction_remaining(&self) -> f64 {
        if self.max_window_secs == 0 {
            return 0.0;
        }
        f64::from(self.remaining_secs) / f64::from(self.max_window_secs)
    }
}

/// Format seconds as `M:SS`.
pub fn format_clock(secs: u32) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starting_value_is_clamped_to_window() {
        let clock = CountdownClock::new(500, 180);
        assert_eq!(clock.remaining(), 180);
    }

    #[test]
    fn tick_counts_down_and_expires_once() {
        let mut clock = CountdownClock::new(2, 180);
        assert_eq!(clock.tick(), ClockTick::Running(1));
        assert_eq!(clock.tick(), ClockTick::Expired);
        assert_eq!(clock.tick(), ClockTick::AlreadyExpired);
        assert_eq!(clock.remaining(), 0);
    }

    #[test]
    fn extend_caps_at_window() {
        let mut clock = CountdownClock::new(170, 180);
        assert_eq!(clock.extend(30), 180);
        let mut clock = CountdownClock::new(100, 180);
        assert_eq!(clock.extend(30), 130);
    }

    #[test]
    fn extend_does_not_revive_expired_clock() {
        let mut clock = CountdownClock::new(1, 180);
        clock.tick();
        assert_eq!(clock.extend(30), 0);
        assert!(clock.is_urgent());
    }

    #[test]
    fn urgency_threshold() {
        assert!(!CountdownClock::new(31, 180).is_urgent());
        assert!(CountdownClock::new(30, 180).is_urgent());
    }

    #[test]
    fn fraction_remaining() {
        let clock = CountdownClock::new(90, 180);
        assert!((clock.fraction_remaining() - 0.5).abs() < f64::EPSILON);
        assert_eq!(CountdownClock::new(0, 0).fraction_remaining(), 0.0);
    }

    #[test]
    fn format_clock_pads_seconds() {
        assert_eq!(format_clock(180), "3:00");
        assert_eq!(format_clock(65), "1:05");
        assert_eq!(format_clock(9), "0:09");
        assert_eq!(format_clock(0), "0:00");
    }
}
