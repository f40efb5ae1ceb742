use core::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClockError {
    /// An adjustment was attempted while the periodic callback is enabled.
    Running,
    /// `start` was called before the trigger was ever programmed.
    NotConfigured,
    /// The calibrated compare value does not fit the trigger's register.
    Calibration,
}

impl fmt::Display for ClockError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClockError::Running => f.write_str("clock must be stopped before adjusting"),
            ClockError::NotConfigured => f.write_str("clock trigger not configured"),
            ClockError::Calibration => f.write_str("calibrated compare value out of range"),
        }
    }
}

impl core::error::Error for ClockError {}
