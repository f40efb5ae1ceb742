//! Hardware seam for the once-per-second trigger.

use fugit::HertzU32;

use crate::{config::TRIGGER_RATE, error::ClockError};

/// A compare-match timer that invokes the periodic callback.
///
/// Implementations only touch their own peripheral. The callback itself
/// (the interrupt handler) must call [`Timebase::increment`] and nothing else
/// that the foreground shares.
///
/// [`Timebase::increment`]: crate::Timebase::increment
pub trait PeriodicTrigger {
    /// Rate of the counting register after prescaling.
    fn counter_clock(&self) -> HertzU32;

    /// Selects compare-match mode with period `compare + 1` counts, resets the
    /// counting register, enables callback delivery, and globally enables
    /// interrupts.
    fn program(&mut self, compare: u32);

    /// Gates callback delivery without reprogramming the period.
    fn set_callback_enabled(&mut self, enabled: bool);

    fn callback_enabled(&self) -> bool;
}

/// Compare value for a [`TRIGGER_RATE`] period on a counter clocked at
/// `counter_clock`, shifted by `calibration` ticks.
pub fn compare_value(counter_clock: HertzU32, calibration: i32) -> Result<u32, ClockError> {
    let base = (counter_clock.to_Hz() / TRIGGER_RATE.to_Hz())
        .checked_sub(1)
        .ok_or(ClockError::Calibration)?;

    match base.checked_add_signed(calibration) {
        Some(compare) if compare > 0 => Ok(compare),
        _ => Err(ClockError::Calibration),
    }
}
