//! The live seconds-since-midnight counter shared with the timer interrupt.
//!
//! The counter is a multi-byte value written from interrupt context, so every
//! foreground access goes through a critical section. The interrupt handler is
//! the only writer while callback delivery is enabled; [`Clock`] is the only
//! writer while it is disabled.
//!
//! [`Clock`]: crate::Clock

use core::cell::RefCell;

use critical_section::Mutex;
use portable_atomic::{AtomicBool, Ordering};

use crate::time_of_day::TimeOfDay;

/// Process-wide timebase driven by the board's timer interrupt.
pub static TIMEBASE: Timebase = Timebase::new();

pub struct Timebase {
    seconds: Mutex<RefCell<TimeOfDay>>,
    elapsed: AtomicBool,
}

impl Timebase {
    pub const fn new() -> Self {
        Self {
            seconds: Mutex::new(RefCell::new(TimeOfDay::MIDNIGHT)),
            elapsed: AtomicBool::new(false),
        }
    }

    /// Periodic callback body: advance one second and flag the foreground.
    ///
    /// Called from the timer interrupt once per second.
    pub fn increment(&self) {
        critical_section::with(|cs| {
            let mut seconds = self.seconds.borrow(cs).borrow_mut();
            *seconds = seconds.next_second();
        });
        self.elapsed.store(true, Ordering::Release);
    }

    /// Copies the live counter with interrupts masked. The previous
    /// interrupt state is restored afterwards.
    pub fn snapshot(&self) -> TimeOfDay {
        critical_section::with(|cs| *self.seconds.borrow(cs).borrow())
    }

    /// Returns true once per batch of increments since the last call.
    pub fn take_elapsed(&self) -> bool {
        self.elapsed.swap(false, Ordering::Acquire)
    }

    /// Whether [`take_elapsed`](Timebase::take_elapsed) would return true,
    /// without consuming the flag.
    pub fn is_elapsed(&self) -> bool {
        self.elapsed.load(Ordering::Acquire)
    }

    pub(crate) fn adjust(&self, f: impl FnOnce(TimeOfDay) -> TimeOfDay) -> TimeOfDay {
        critical_section::with(|cs| {
            let mut seconds = self.seconds.borrow(cs).borrow_mut();
            *seconds = f(*seconds);
            *seconds
        })
    }
}

impl Default for Timebase {
    fn default() -> Self {
        Self::new()
    }
}
