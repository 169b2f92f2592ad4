//! Timer Abstractions
//!
//! Stopwatches over a caller-supplied millisecond clock. The session never
//! reads a clock itself: the main loop passes `embassy_time::Instant` as
//! milliseconds, tests pass whatever time they want.

/// Milliseconds since an arbitrary epoch (usually boot)
pub type Millis = u64;

/// Stopwatch for "time since last X" measurements
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Stopwatch {
    start: Option<Millis>,
}

impl Stopwatch {
    /// Create a new stopped stopwatch
    #[must_use]
    pub const fn new() -> Self {
        Self { start: None }
    }

    /// Restart the stopwatch at `now`
    pub fn restart(&mut self, now: Millis) {
        self.start = Some(now);
    }

    /// Check if the stopwatch is running
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.start.is_some()
    }

    /// Get elapsed time (returns zero if not started)
    ///
    /// A clock that went backwards also reads as zero.
    #[must_use]
    pub fn elapsed(&self, now: Millis) -> Millis {
        self.start.map_or(0, |start| now.saturating_sub(start))
    }

    /// Check if at least `duration` has elapsed since the last restart
    ///
    /// A stopped stopwatch never expires.
    #[must_use]
    pub fn has_elapsed(&self, now: Millis, duration: Millis) -> bool {
        self.is_running() && self.elapsed(now) >= duration
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for Stopwatch {
    fn format(&self, f: defmt::Formatter) {
        match self.start {
            Some(start) => defmt::write!(f, "Stopwatch(since {}ms)", start),
            None => defmt::write!(f, "Stopwatch(stopped)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stopped_never_expires() {
        let sw = Stopwatch::new();
        assert_eq!(sw.elapsed(50_000), 0);
        assert!(!sw.has_elapsed(50_000, 1));
    }

    #[test]
    fn elapsed_is_inclusive_at_threshold() {
        let mut sw = Stopwatch::new();
        sw.restart(1_000);
        assert!(!sw.has_elapsed(2_999, 2_000));
        assert!(sw.has_elapsed(3_000, 2_000));
    }

    #[test]
    fn clock_going_backwards_reads_zero() {
        let mut sw = Stopwatch::new();
        sw.restart(500);
        assert_eq!(sw.elapsed(100), 0);
    }
}
