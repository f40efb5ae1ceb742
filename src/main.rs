#![no_std]
#![no_main]

mod button_interrupt;
mod interrupts;
mod led;

use button_interrupt::Buttons;
use interrupts::Tim2Trigger;
use led::StatusLed;

use cortex_m_rt::entry;
use panic_halt as _;
use qclock::{config::DEBOUNCE_MS, Clock, ClockSetter, TIMEBASE};
use rtt_target::{rprintln, rtt_init_print};
use stm32f0xx_hal::{
    pac,
    prelude::*,
};

#[entry]
fn main() -> ! {
    rtt_init_print!();
    rprintln!("qclock starting");

    // Get access to the device peripherals
    let mut dp = pac::Peripherals::take().unwrap();

    // 8 MHz HSI, no PLL: the timer counter runs at 8 MHz / PRESCALER
    let mut rcc = dp.RCC.configure().freeze(&mut dp.FLASH);
    let debounce_cycles = rcc.clocks.sysclk().0 / 1000 * DEBOUNCE_MS;

    let gpioa = dp.GPIOA.split(&mut rcc);
    let gpioc = dp.GPIOC.split(&mut rcc);
    let (led_pin, advance_pin, mode_pin) = cortex_m::interrupt::free(|cs| {
        (
            gpioa.pa5.into_push_pull_output(cs),
            gpioa.pa1.into_pull_up_input(cs),
            gpioc.pc13.into_floating_input(cs),
        )
    });

    let mut status_led = StatusLed::new(led_pin);
    let mut buttons = Buttons::new(mode_pin, advance_pin, &mut dp.SYSCFG, &mut dp.EXTI);

    let mut clock = Clock::new(Tim2Trigger::new(dp.TIM2, &rcc), &TIMEBASE);
    clock.configure().unwrap();
    let mut setter = ClockSetter::new();
    rprintln!("clock running, MODE on PC13, ADVANCE on PA1");

    loop {
        let mut changed = TIMEBASE.take_elapsed();

        if let Some(event) = buttons.take_event() {
            match setter.handle(event, &mut clock) {
                Ok(_) => changed = true,
                Err(e) => rprintln!("{:?} ignored: {}", event, e),
            }
        }

        if changed {
            let now = clock.capture_snapshot();
            status_led.show(setter.mode(), now);
            rprintln!("{} {:?}", now.to_hms_string(), setter.mode());
        }

        // A masked line is re-armed by polling the pin, not by an interrupt
        if buttons.settling() {
            cortex_m::asm::delay(debounce_cycles);
            buttons.settle();
            continue;
        }

        // WFI still wakes on an interrupt that becomes pending while masked,
        // so a press or tick latched after the checks above is not lost
        cortex_m::interrupt::free(|_| {
            if !buttons.pending() && !TIMEBASE.is_elapsed() {
                cortex_m::asm::wfi();
            }
        });
    }
}
