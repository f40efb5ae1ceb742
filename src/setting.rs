//! Two-button clock setting: MODE cycles through the fields, ADVANCE bumps
//! the selected one.

use embedded_hal::digital::PinState;

use crate::{clock::Clock, error::ClockError, time_of_day::TimeOfDay, trigger::PeriodicTrigger};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ButtonEvent {
    Mode,
    Advance,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SetMode {
    Running,
    SetHour,
    SetMinute,
}

pub struct ClockSetter {
    mode: SetMode,
}

impl ClockSetter {
    pub const fn new() -> Self {
        Self { mode: SetMode::Running }
    }

    pub fn mode(&self) -> SetMode {
        self.mode
    }

    /// Applies one button press to `clock` and returns the new mode.
    ///
    /// Entering the setting modes stops the clock and zeroes the seconds;
    /// leaving them starts it again.
    pub fn handle<T: PeriodicTrigger>(
        &mut self,
        event: ButtonEvent,
        clock: &mut Clock<'_, T>,
    ) -> Result<SetMode, ClockError> {
        match (self.mode, event) {
            (SetMode::Running, ButtonEvent::Mode) => {
                clock.stop();
                clock.reset_seconds()?;
                self.mode = SetMode::SetHour;
            }
            (SetMode::SetHour, ButtonEvent::Mode) => {
                self.mode = SetMode::SetMinute;
            }
            (SetMode::SetMinute, ButtonEvent::Mode) => {
                clock.start()?;
                self.mode = SetMode::Running;
            }
            (SetMode::SetHour, ButtonEvent::Advance) => {
                clock.increment_hour()?;
            }
            (SetMode::SetMinute, ButtonEvent::Advance) => {
                clock.increment_minute()?;
            }
            (SetMode::Running, ButtonEvent::Advance) => {}
        }

        trace!("setting: {:?} -> {:?}", event, self.mode);
        Ok(self.mode)
    }
}

impl Default for ClockSetter {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ButtonState {
    WaitForPress,
    Debounce,
    WaitForRelease,
}

/// Press/debounce/release gate for one active-low button.
///
/// The button's edge interrupt stays masked from the accepted press until
/// the pin has read high across a full debounce period, so bounce on either
/// the press or the release cannot produce a second event.
pub struct ButtonGate {
    state: ButtonState,
}

impl ButtonGate {
    pub const fn new() -> Self {
        Self { state: ButtonState::WaitForPress }
    }

    pub fn state(&self) -> ButtonState {
        self.state
    }

    pub fn is_armed(&self) -> bool {
        self.state == ButtonState::WaitForPress
    }

    /// A falling edge was latched. Returns whether it counts as a press.
    pub fn pressed(&mut self) -> bool {
        if self.state == ButtonState::WaitForPress {
            self.state = ButtonState::Debounce;
            true
        } else {
            false
        }
    }

    /// Called after each debounce period with the sampled pin level.
    /// Returns true when the edge interrupt may be unmasked again.
    pub fn settled(&mut self, level: PinState) -> bool {
        match (self.state, level) {
            (ButtonState::WaitForPress, _) => false,
            (ButtonState::Debounce, PinState::High) => {
                self.state = ButtonState::WaitForPress;
                true
            }
            (ButtonState::Debounce, PinState::Low) => {
                self.state = ButtonState::WaitForRelease;
                false
            }
            // Released: wait one more period for the release bounce to die out
            (ButtonState::WaitForRelease, PinState::High) => {
                self.state = ButtonState::Debounce;
                false
            }
            (ButtonState::WaitForRelease, PinState::Low) => false,
        }
    }
}

impl Default for ButtonGate {
    fn default() -> Self {
        Self::new()
    }
}

/// Status LED level: blinks with the seconds while running, solid while
/// setting.
pub fn indicator(mode: SetMode, time: TimeOfDay) -> PinState {
    match mode {
        SetMode::Running => PinState::from(time.second() % 2 == 0),
        SetMode::SetHour | SetMode::SetMinute => PinState::High,
    }
}
