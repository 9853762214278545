use crate::tabular::{Cell, FormatError, ParseError};
use chrono::{Datelike, NaiveDate};
use std::fmt;
use std::str::FromStr;

const SECONDS_PER_DAY: i64 = 86_400;
// 1970-01-01 counted from 0001-01-01 as day 1
const EPOCH_DAYS_FROM_CE: i32 = 719_163;

/// A calendar day, written `YYYYMMDD`
///
/// The default value is 1970-01-01 and stands for an unset date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Date(NaiveDate);

impl Date {
    /// The date, if it exists
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Date> {
        NaiveDate::from_ymd_opt(year, month, day).map(Date)
    }

    /// Is it the default, unset, date
    pub fn is_zero(&self) -> bool {
        *self == Date::default()
    }

    /// The underlying chrono date
    pub fn naive(&self) -> NaiveDate {
        self.0
    }

    /// Seconds from the unix epoch to midnight UTC of the day
    pub fn to_unix(&self) -> i64 {
        i64::from(self.0.num_days_from_ce() - EPOCH_DAYS_FROM_CE) * SECONDS_PER_DAY
    }

    /// Day holding the given unix timestamp, [None] if out of the supported range
    pub fn from_unix(seconds: i64) -> Option<Date> {
        let days = i32::try_from(seconds.div_euclid(SECONDS_PER_DAY)).ok()?;
        NaiveDate::from_num_days_from_ce_opt(EPOCH_DAYS_FROM_CE.checked_add(days)?).map(Date)
    }
}

impl From<NaiveDate> for Date {
    fn from(date: NaiveDate) -> Self {
        Date(date)
    }
}

impl FromStr for Date {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 8 || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ParseError::Date(s.to_owned()));
        }
        NaiveDate::parse_from_str(s, "%Y%m%d")
            .map(Date)
            .map_err(|_| ParseError::Date(s.to_owned()))
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{:04}{:02}{:02}",
            self.0.year(),
            self.0.month(),
            self.0.day()
        )
    }
}

impl Cell for Date {
    fn decode(text: &str) -> Result<Self, ParseError> {
        text.parse()
    }

    fn encode(&self) -> Result<String, FormatError> {
        if (0..=9999).contains(&self.0.year()) {
            Ok(self.to_string())
        } else {
            Err(FormatError::Date(self.0.to_string()))
        }
    }
}
