use crate::tabular::{Cell, FormatError, ParseError};
use chrono::{Duration, NaiveDate, NaiveDateTime};
use std::fmt;
use std::str::FromStr;

/// A time of a service day, written `HH:MM:SS`
///
/// It counts from midnight of the service day, so trips running after midnight
/// have hours of 24 and more. The default value is midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Time(u32);

impl Time {
    /// The time, [None] if minutes or seconds are 60 or more
    pub fn from_hms(hours: u32, minutes: u32, seconds: u32) -> Option<Time> {
        if minutes >= 60 || seconds >= 60 {
            return None;
        }
        hours
            .checked_mul(3600)
            .and_then(|h| h.checked_add(minutes * 60 + seconds))
            .map(Time)
    }

    /// The time at the given number of seconds after midnight
    pub fn from_seconds(seconds: u32) -> Time {
        Time(seconds)
    }

    /// Seconds since midnight of the service day
    pub fn seconds(&self) -> u32 {
        self.0
    }

    /// Hours, minutes and seconds, hours possibly over 23
    pub fn hms(&self) -> (u32, u32, u32) {
        (self.0 / 3600, self.0 / 60 % 60, self.0 % 60)
    }

    /// The instant on the service day `reference`
    ///
    /// `25:34:22` on the 1st of a month is the 2nd at 01:34:22.
    pub fn on(&self, reference: NaiveDate) -> Option<NaiveDateTime> {
        reference
            .and_hms_opt(0, 0, 0)?
            .checked_add_signed(Duration::seconds(i64::from(self.0)))
    }

    /// The time of `instant` on the service day `reference`, [None] if it is
    /// before that day
    pub fn from_datetime(reference: NaiveDate, instant: NaiveDateTime) -> Option<Time> {
        let elapsed = instant.signed_duration_since(reference.and_hms_opt(0, 0, 0)?);
        u32::try_from(elapsed.num_seconds()).ok().map(Time)
    }
}

impl FromStr for Time {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseError::Time(s.to_owned());
        let mut parts = s.split(':');
        let (hours, minutes, seconds) =
            match (parts.next(), parts.next(), parts.next(), parts.next()) {
                (Some(h), Some(m), Some(sec), None) => (h, m, sec),
                _ => return Err(invalid()),
            };
        let digits = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());
        if !digits(hours) || !digits(minutes) || !digits(seconds) {
            return Err(invalid());
        }
        if minutes.len() != 2 || seconds.len() != 2 {
            return Err(invalid());
        }
        match (hours.parse(), minutes.parse(), seconds.parse()) {
            (Ok(h), Ok(m), Ok(sec)) => Time::from_hms(h, m, sec).ok_or_else(invalid),
            _ => Err(invalid()),
        }
    }
}

impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let (hours, minutes, seconds) = self.hms();
        write!(f, "{:02}:{:02}:{:02}", hours, minutes, seconds)
    }
}

impl Cell for Time {
    fn decode(text: &str) -> Result<Self, ParseError> {
        text.parse()
    }

    fn encode(&self) -> Result<String, FormatError> {
        Ok(self.to_string())
    }
}
