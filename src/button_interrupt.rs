use embedded_hal::digital::PinState;
use portable_atomic::{AtomicBool, Ordering};
use qclock::{ButtonEvent, ButtonGate};
use stm32f0xx_hal::{
    gpio::{gpioa::PA1, gpioc::PC13, Floating, Input, PullUp},
    pac::{interrupt, Interrupt, EXTI, RCC, SYSCFG},
    prelude::*,
};

// EXTI lines of the two buttons
const MODE_LINE: u32 = 13;
const ADVANCE_LINE: u32 = 1;

static MODE_PRESSED: AtomicBool = AtomicBool::new(false);
static ADVANCE_PRESSED: AtomicBool = AtomicBool::new(false);

/// MODE on PC13 (the Nucleo user button), ADVANCE on PA1 to ground.
///
/// A press masks its own EXTI line. The line is unmasked again only once its
/// [`ButtonGate`] has seen the pin released for a full debounce period.
pub struct Buttons {
    mode: PC13<Input<Floating>>,
    advance: PA1<Input<PullUp>>,
    mode_gate: ButtonGate,
    advance_gate: ButtonGate,
}

impl Buttons {
    pub fn new(
        mode: PC13<Input<Floating>>,
        advance: PA1<Input<PullUp>>,
        syscfg: &mut SYSCFG,
        exti: &mut EXTI,
    ) -> Self {
        // SAFETY: single read-modify-write of the SYSCFG clock enable bit
        let rcc = unsafe { &*RCC::ptr() };
        rcc.apb2enr.modify(|_, w| w.syscfgen().set_bit());

        // Route PC13 to EXTI13 and PA1 to EXTI1
        syscfg.exticr4.modify(|_, w| w.exti13().pc13());
        syscfg.exticr1.modify(|_, w| w.exti1().pa1());

        // Both buttons pull their line low when pressed
        exti.ftsr.modify(|_, w| w.tr13().set_bit().tr1().set_bit());
        exti.pr.write(|w| unsafe { w.bits((1 << MODE_LINE) | (1 << ADVANCE_LINE)) });
        exti.imr.modify(|_, w| w.mr13().set_bit().mr1().set_bit());

        unsafe {
            cortex_m::peripheral::NVIC::unmask(Interrupt::EXTI4_15);
            cortex_m::peripheral::NVIC::unmask(Interrupt::EXTI0_1);
        }

        Self {
            mode,
            advance,
            mode_gate: ButtonGate::new(),
            advance_gate: ButtonGate::new(),
        }
    }

    /// Takes the next latched press, MODE first.
    pub fn take_event(&mut self) -> Option<ButtonEvent> {
        if MODE_PRESSED.swap(false, Ordering::Acquire) && self.mode_gate.pressed() {
            Some(ButtonEvent::Mode)
        } else if ADVANCE_PRESSED.swap(false, Ordering::Acquire) && self.advance_gate.pressed() {
            Some(ButtonEvent::Advance)
        } else {
            None
        }
    }

    /// Whether a press has been latched but not yet taken.
    pub fn pending(&self) -> bool {
        MODE_PRESSED.load(Ordering::Acquire) || ADVANCE_PRESSED.load(Ordering::Acquire)
    }

    /// Whether either line is still masked after a press.
    pub fn settling(&self) -> bool {
        !self.mode_gate.is_armed() || !self.advance_gate.is_armed()
    }

    /// Samples both pins after a debounce period and re-arms the lines whose
    /// button has been released.
    pub fn settle(&mut self) {
        let mode_level = PinState::from(self.mode.is_high().unwrap());
        if self.mode_gate.settled(mode_level) {
            rearm(MODE_LINE);
        }

        let advance_level = PinState::from(self.advance.is_high().unwrap());
        if self.advance_gate.settled(advance_level) {
            rearm(ADVANCE_LINE);
        }
    }
}

/// Clears an edge latched while masked and unmasks the line.
fn rearm(line: u32) {
    cortex_m::interrupt::free(|_| {
        // SAFETY: the handlers only touch the same bits inside their own
        // critical sections
        let exti = unsafe { &*EXTI::ptr() };
        exti.pr.write(|w| unsafe { w.bits(1 << line) });
        exti.imr.modify(|r, w| unsafe { w.bits(r.bits() | (1 << line)) });
    });
}

fn latch(line: u32, pressed: &AtomicBool) {
    // SAFETY: we're just reading, clearing and masking this line
    let exti = unsafe { &*EXTI::ptr() };

    if exti.pr.read().bits() & (1 << line) != 0 {
        exti.pr.write(|w| unsafe { w.bits(1 << line) });
        exti.imr.modify(|r, w| unsafe { w.bits(r.bits() & !(1 << line)) });
        pressed.store(true, Ordering::Release);
    }
}

// EXTI4_15 handles lines 4-15
#[interrupt]
fn EXTI4_15() {
    cortex_m::interrupt::free(|_| latch(MODE_LINE, &MODE_PRESSED));
}

// EXTI0_1 handles lines 0 and 1
#[interrupt]
fn EXTI0_1() {
    cortex_m::interrupt::free(|_| latch(ADVANCE_LINE, &ADVANCE_PRESSED));
}
