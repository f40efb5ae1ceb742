use crate::{
    config::CALIBRATION_OFFSET,
    error::ClockError,
    time_of_day::TimeOfDay,
    timebase::Timebase,
    trigger::{PeriodicTrigger, compare_value},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Delivery {
    Stopped,
    Running,
}

/// Wall clock facade over a [`Timebase`] and the trigger that drives it.
///
/// Reads go through [`capture_snapshot`](Clock::capture_snapshot); the
/// accessors decode the last snapshot and never touch the live counter.
/// Adjustments are only accepted while callback delivery is stopped.
pub struct Clock<'a, T> {
    trigger: T,
    timebase: &'a Timebase,
    calibration: i32,
    configured: bool,
    snapshot: TimeOfDay,
}

impl<'a, T: PeriodicTrigger> Clock<'a, T> {
    pub fn new(trigger: T, timebase: &'a Timebase) -> Self {
        Self::with_calibration(trigger, timebase, CALIBRATION_OFFSET)
    }

    pub fn with_calibration(trigger: T, timebase: &'a Timebase, calibration: i32) -> Self {
        Self {
            trigger,
            timebase,
            calibration,
            configured: false,
            snapshot: TimeOfDay::MIDNIGHT,
        }
    }

    /// Programs the trigger for one callback per second and starts delivery.
    ///
    /// Calling it again restarts the current second but keeps the time.
    pub fn configure(&mut self) -> Result<(), ClockError> {
        let compare = compare_value(self.trigger.counter_clock(), self.calibration)?;
        trace!("clock: trigger compare={} (calibration {})", compare, self.calibration);

        self.trigger.program(compare);
        self.configured = true;
        Ok(())
    }

    pub fn start(&mut self) -> Result<(), ClockError> {
        if !self.configured {
            return Err(ClockError::NotConfigured);
        }
        self.trigger.set_callback_enabled(true);
        trace!("clock: running");
        Ok(())
    }

    /// Freezes the counter at its current value.
    pub fn stop(&mut self) {
        self.trigger.set_callback_enabled(false);
        trace!("clock: stopped");
    }

    pub fn state(&self) -> Delivery {
        if self.trigger.callback_enabled() {
            Delivery::Running
        } else {
            Delivery::Stopped
        }
    }

    pub fn is_running(&self) -> bool {
        self.state() == Delivery::Running
    }

    pub fn increment_hour(&mut self) -> Result<TimeOfDay, ClockError> {
        self.adjust(TimeOfDay::next_hour)
    }

    /// Advances the minute field, wrapping 59 to 0 without touching the hour.
    pub fn increment_minute(&mut self) -> Result<TimeOfDay, ClockError> {
        self.adjust(TimeOfDay::next_minute)
    }

    pub fn reset_seconds(&mut self) -> Result<TimeOfDay, ClockError> {
        self.adjust(TimeOfDay::truncate_seconds)
    }

    fn adjust(&mut self, f: fn(TimeOfDay) -> TimeOfDay) -> Result<TimeOfDay, ClockError> {
        if self.is_running() {
            trace!("clock: adjustment rejected while running");
            return Err(ClockError::Running);
        }
        Ok(self.timebase.adjust(f))
    }

    /// Takes a consistent copy of the live counter for the accessors.
    pub fn capture_snapshot(&mut self) -> TimeOfDay {
        self.snapshot = self.timebase.snapshot();
        self.snapshot
    }

    pub fn snapshot(&self) -> TimeOfDay {
        self.snapshot
    }

    pub fn hour(&self) -> u8 {
        self.snapshot.hour()
    }

    pub fn minute(&self) -> u8 {
        self.snapshot.minute()
    }

    pub fn second(&self) -> u8 {
        self.snapshot.second()
    }

    pub fn trigger(&self) -> &T {
        &self.trigger
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockTrigger;

    fn configured(timebase: &Timebase) -> Clock<'_, MockTrigger> {
        let mut clock = Clock::new(MockTrigger::new(), timebase);
        clock.configure().unwrap();
        clock
    }

    #[test]
    fn test_starts_stopped() {
        let timebase = Timebase::new();
        let clock = Clock::new(MockTrigger::new(), &timebase);
        assert_eq!(clock.state(), Delivery::Stopped);
        assert_eq!(clock.trigger().programmed, None);
    }

    #[test]
    fn test_configure_programs_calibrated_compare() {
        let timebase = Timebase::new();
        let clock = configured(&timebase);
        assert_eq!(clock.trigger().programmed, Some((62_499 + CALIBRATION_OFFSET) as u32));
        assert_eq!(clock.trigger().program_count, 1);
        assert!(clock.is_running());
    }

    #[test]
    fn test_configure_rejects_bad_calibration() {
        let timebase = Timebase::new();
        let mut clock = Clock::with_calibration(MockTrigger::new(), &timebase, -62_499);
        assert_eq!(clock.configure(), Err(ClockError::Calibration));
        assert!(!clock.is_running());
        assert_eq!(clock.start(), Err(ClockError::NotConfigured));
    }

    #[test]
    fn test_reconfigure_keeps_time() {
        let timebase = Timebase::new();
        let mut clock = configured(&timebase);
        for _ in 0..42 {
            clock.trigger().fire(&timebase);
        }
        clock.configure().unwrap();
        assert_eq!(clock.trigger().program_count, 2);
        assert_eq!(clock.capture_snapshot().seconds(), 42);
    }

    #[test]
    fn test_start_requires_configure() {
        let timebase = Timebase::new();
        let mut clock = Clock::new(MockTrigger::new(), &timebase);
        assert_eq!(clock.start(), Err(ClockError::NotConfigured));
        assert!(!clock.is_running());
    }

    #[test]
    fn test_stop_freezes_counter() {
        let timebase = Timebase::new();
        let mut clock = configured(&timebase);
        clock.trigger().fire(&timebase);
        clock.stop();
        clock.trigger().fire(&timebase);
        clock.trigger().fire(&timebase);
        assert_eq!(clock.capture_snapshot().seconds(), 1);

        clock.start().unwrap();
        clock.trigger().fire(&timebase);
        assert_eq!(clock.capture_snapshot().seconds(), 2);
    }

    #[test]
    fn test_adjustments_rejected_while_running() {
        let timebase = Timebase::new();
        let mut clock = configured(&timebase);
        clock.trigger().fire(&timebase);

        assert_eq!(clock.increment_hour(), Err(ClockError::Running));
        assert_eq!(clock.increment_minute(), Err(ClockError::Running));
        assert_eq!(clock.reset_seconds(), Err(ClockError::Running));
        assert_eq!(clock.capture_snapshot().seconds(), 1);
    }

    #[test]
    fn test_adjustments_while_stopped() {
        let timebase = Timebase::new();
        let mut clock = configured(&timebase);
        clock.stop();

        timebase.adjust(|_| TimeOfDay::from_seconds(24_570));
        assert_eq!(clock.increment_minute().unwrap().seconds(), 21_630);

        timebase.adjust(|_| TimeOfDay::from_seconds(22_727));
        assert_eq!(clock.reset_seconds().unwrap().seconds(), 22_680);

        let t = clock.increment_hour().unwrap();
        assert_eq!((t.hour(), t.minute(), t.second()), (7, 23, 0));
    }

    #[test]
    fn test_accessors_read_snapshot_only() {
        let timebase = Timebase::new();
        let mut clock = configured(&timebase);
        for _ in 0..125 {
            clock.trigger().fire(&timebase);
        }
        clock.capture_snapshot();
        for _ in 0..3600 {
            clock.trigger().fire(&timebase);
        }

        for _ in 0..3 {
            assert_eq!((clock.hour(), clock.minute(), clock.second()), (0, 2, 5));
        }
        clock.capture_snapshot();
        assert_eq!((clock.hour(), clock.minute(), clock.second()), (1, 2, 5));
    }

    #[test]
    fn test_runs_one_hour_one_minute_one_second() {
        let timebase = Timebase::new();
        let mut clock = configured(&timebase);
        clock.start().unwrap();
        for _ in 0..3661 {
            clock.trigger().fire(&timebase);
        }
        clock.capture_snapshot();
        assert_eq!((clock.hour(), clock.minute(), clock.second()), (1, 1, 1));
    }

    #[test]
    fn test_setting_sequence_from_midnight() {
        let timebase = Timebase::new();
        let mut clock = configured(&timebase);
        clock.stop();
        for _ in 0..23 {
            clock.increment_hour().unwrap();
        }
        for _ in 0..61 {
            clock.increment_minute().unwrap();
        }
        clock.reset_seconds().unwrap();
        clock.capture_snapshot();

        // 23 hours, then 61 minute presses: the 60th wraps back to :00
        // without carrying, the 61st lands on :01.
        assert_eq!(clock.snapshot().seconds(), 82_860);
        assert_eq!((clock.hour(), clock.minute(), clock.second()), (23, 1, 0));
    }
}
