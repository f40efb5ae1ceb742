//! Seconds-since-midnight wall clock driven by a 1 Hz timer interrupt.
//!
//! The [`Timebase`] holds the live counter and is advanced from the interrupt
//! handler. Foreground code goes through [`Clock`], which starts and stops the
//! [`PeriodicTrigger`], applies clock-setting adjustments while stopped, and
//! decodes hour/minute/second from a critical-section snapshot.

#![cfg_attr(not(test), no_std)]

// Forwards to RTT when the `rtt` feature is on, compiles away otherwise.
macro_rules! trace {
    ($($arg:tt)*) => {{
        #[cfg(feature = "rtt")]
        rtt_target::rprintln!($($arg)*);
    }};
}

pub mod clock;
pub mod config;
pub mod error;
pub mod setting;
pub mod time_of_day;
pub mod timebase;
pub mod trigger;

#[cfg(test)]
mod mock;

pub use clock::{Clock, Delivery};
pub use error::ClockError;
pub use setting::{ButtonEvent, ButtonGate, ButtonState, ClockSetter, SetMode, indicator};
pub use time_of_day::TimeOfDay;
pub use timebase::{TIMEBASE, Timebase};
pub use trigger::{PeriodicTrigger, compare_value};
