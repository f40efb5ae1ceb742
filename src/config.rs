use fugit::HertzU32;

/// Timer calibration adjustment, in counter ticks.
///
/// Negative if the clock runs too slow, positive if it runs too fast.
pub const CALIBRATION_OFFSET: i32 = -41;

/// Rate at which the periodic callback fires.
pub const TRIGGER_RATE: HertzU32 = HertzU32::Hz(1);

/// Timer prescaler. 8 MHz / 128 gives a 62.5 kHz counter.
pub const PRESCALER: u32 = 128;

/// How long a button line stays masked after a press.
pub const DEBOUNCE_MS: u32 = 50;
