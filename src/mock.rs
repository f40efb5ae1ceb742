use fugit::HertzU32;

use crate::{timebase::Timebase, trigger::PeriodicTrigger};

/// Stands in for the timer peripheral: a 62.5 kHz counter whose interrupt is
/// raised by hand with [`fire`](MockTrigger::fire).
pub struct MockTrigger {
    pub programmed: Option<u32>,
    pub program_count: u32,
    pub enabled: bool,
}

impl MockTrigger {
    pub fn new() -> Self {
        Self {
            programmed: None,
            program_count: 0,
            enabled: false,
        }
    }

    /// One compare match. Only reaches the timebase while delivery is enabled.
    pub fn fire(&self, timebase: &Timebase) {
        if self.enabled {
            timebase.increment();
        }
    }
}

impl PeriodicTrigger for MockTrigger {
    fn counter_clock(&self) -> HertzU32 {
        HertzU32::Hz(62_500)
    }

    fn program(&mut self, compare: u32) {
        self.programmed = Some(compare);
        self.program_count += 1;
        self.enabled = true;
    }

    fn set_callback_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    fn callback_enabled(&self) -> bool {
        self.enabled
    }
}
