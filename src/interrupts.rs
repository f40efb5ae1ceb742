use cortex_m::peripheral::NVIC;
use fugit::HertzU32;
use qclock::{PeriodicTrigger, TIMEBASE, config::PRESCALER};
use stm32f0xx_hal::{
    pac::{interrupt, Interrupt, RCC, TIM2},
    rcc::Rcc,
};

/// TIM2 in upcounting mode, reloading at the compare value.
///
/// The update interrupt (`DIER.UIE`) is the callback delivery gate.
pub struct Tim2Trigger {
    tim: TIM2,
    counter_clock: HertzU32,
}

impl Tim2Trigger {
    pub fn new(tim: TIM2, rcc: &Rcc) -> Self {
        // SAFETY: single read-modify-write of the TIM2 clock enable bit,
        // before the timer interrupt exists
        let rcc_regs = unsafe { &*RCC::ptr() };
        rcc_regs.apb1enr.modify(|_, w| w.tim2en().set_bit());

        Self {
            tim,
            counter_clock: HertzU32::from_raw(rcc.clocks.pclk().0 / PRESCALER),
        }
    }
}

impl PeriodicTrigger for Tim2Trigger {
    fn counter_clock(&self) -> HertzU32 {
        self.counter_clock
    }

    fn program(&mut self, compare: u32) {
        let tim = &self.tim;

        cortex_m::interrupt::free(|_| {
            tim.cr1.modify(|_, w| w.cen().clear_bit());
            tim.psc.write(|w| unsafe { w.bits(PRESCALER - 1) });
            tim.arr.write(|w| unsafe { w.bits(compare) });
            tim.cnt.write(|w| unsafe { w.bits(0) });

            // Latch the prescaler now instead of after the first period
            tim.egr.write(|w| w.ug().set_bit());
            tim.sr.modify(|_, w| w.uif().clear_bit());

            tim.dier.modify(|_, w| w.uie().set_bit());
            tim.cr1.modify(|_, w| w.cen().set_bit());
        });

        unsafe {
            NVIC::unmask(Interrupt::TIM2);
            cortex_m::interrupt::enable();
        }
    }

    fn set_callback_enabled(&mut self, enabled: bool) {
        if enabled {
            // A match that happened while stopped would otherwise fire at once
            self.tim.sr.modify(|_, w| w.uif().clear_bit());
            self.tim.dier.modify(|_, w| w.uie().set_bit());
        } else {
            self.tim.dier.modify(|_, w| w.uie().clear_bit());
        }
    }

    fn callback_enabled(&self) -> bool {
        self.tim.dier.read().uie().bit_is_set()
    }
}

// TIM2 interrupt handler, once per second
#[interrupt]
fn TIM2() {
    // SAFETY: only the update flag is cleared here
    let tim = unsafe { &*TIM2::ptr() };
    tim.sr.modify(|_, w| w.uif().clear_bit());

    TIMEBASE.increment();
}
