use core::fmt::{self, Write};

use heapless::String;

const SECONDS_PER_MINUTE: u32 = 60;
const SECONDS_PER_HOUR: u32 = 3_600;

/// Seconds since midnight, always in `0..86_400`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay(u32);

impl TimeOfDay {
    pub const SECONDS_PER_DAY: u32 = 86_400;
    pub const MIDNIGHT: Self = Self(0);

    /// Wraps `seconds` into a single day.
    pub const fn from_seconds(seconds: u32) -> Self {
        Self(seconds % Self::SECONDS_PER_DAY)
    }

    pub const fn from_hms(hour: u8, minute: u8, second: u8) -> Option<Self> {
        if hour > 23 || minute > 59 || second > 59 {
            return None;
        }

        Some(Self(
            hour as u32 * SECONDS_PER_HOUR + minute as u32 * SECONDS_PER_MINUTE + second as u32,
        ))
    }

    pub const fn seconds(self) -> u32 {
        self.0
    }

    pub const fn hour(self) -> u8 {
        (self.0 / SECONDS_PER_HOUR) as u8
    }

    pub const fn minute(self) -> u8 {
        ((self.0 % SECONDS_PER_HOUR) / SECONDS_PER_MINUTE) as u8
    }

    pub const fn second(self) -> u8 {
        (self.0 % SECONDS_PER_MINUTE) as u8
    }

    /// One second later, wrapping at midnight.
    pub const fn next_second(self) -> Self {
        Self::from_seconds(self.0 + 1)
    }

    /// One hour later, wrapping at midnight. Minutes and seconds are kept.
    pub const fn next_hour(self) -> Self {
        Self::from_seconds(self.0 + SECONDS_PER_HOUR)
    }

    /// One minute later without carrying into the hour: 6:59 becomes 6:00.
    pub const fn next_minute(self) -> Self {
        // At 23:59 the sum leaves the day; the minute field is 0 there too,
        // so taking the hour back off lands on 23:00.
        let mut seconds = self.0 + SECONDS_PER_MINUTE;
        if (seconds % SECONDS_PER_HOUR) / SECONDS_PER_MINUTE == 0 {
            seconds -= SECONDS_PER_HOUR;
        }
        Self(seconds)
    }

    /// Zeroes the seconds field, keeping hour and minute.
    pub const fn truncate_seconds(self) -> Self {
        Self(self.0 - self.0 % SECONDS_PER_MINUTE)
    }

    /// Renders `HH:MM:SS` without allocating.
    pub fn to_hms_string(self) -> String<8> {
        let mut out = String::new();
        // Eight bytes always fit.
        let _ = write!(out, "{}", self);
        out
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.hour(), self.minute(), self.second())
    }
}
