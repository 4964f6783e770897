use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::CoreError;

const DATE_KEY_FORMAT: &str = "%Y-%m-%d";

/// Local calendar day, rendered as `YYYY-MM-DD`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DateKey(NaiveDate);

impl DateKey {
    /// Today in the user's local timezone (not the UTC day)
    pub fn today() -> Self {
        Self(Local::now().date_naive())
    }

    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    pub fn year_month(&self) -> YearMonth {
        YearMonth {
            year: self.0.year(),
            month: self.0.month(),
        }
    }
}

impl From<NaiveDate> for DateKey {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DATE_KEY_FORMAT))
    }
}

impl FromStr for DateKey {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        // chrono accepts unpadded fields, the key format does not
        if s.len() != 10 {
            return Err(CoreError::InvalidDateKey(s.to_string()));
        }
        NaiveDate::parse_from_str(s, DATE_KEY_FORMAT)
            .map(Self)
            .map_err(|_| CoreError::InvalidDateKey(s.to_string()))
    }
}

impl Serialize for DateKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DateKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// A validated calendar month
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Result<Self, CoreError> {
        NaiveDate::from_ymd_opt(year, month, 1)
            .map(|_| Self { year, month })
            .ok_or(CoreError::InvalidMonth { year, month })
    }

    pub fn current() -> Self {
        DateKey::today().year_month()
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn contains(&self, date_key: DateKey) -> bool {
        date_key.0.year() == self.year && date_key.0.month() == self.month
    }

    /// Common prefix of every date key in this month (`YYYY-MM-`)
    pub fn key_prefix(&self) -> String {
        format!("{:04}-{:02}-", self.year, self.month)
    }

    pub fn first_day(&self) -> DateKey {
        DateKey(NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN))
    }

    pub fn days_in_month(&self) -> u32 {
        let first = self.first_day().0;
        let next = first
            .checked_add_months(chrono::Months::new(1))
            .unwrap_or(first);
        next.signed_duration_since(first).num_days().max(0) as u32
    }

    /// Every day of the month in order
    pub fn days(&self) -> impl Iterator<Item = DateKey> + use<> {
        let first = self.first_day().0;
        (0..self.days_in_month()).filter_map(move |offset| {
            first
                .checked_add_days(chrono::Days::new(u64::from(offset)))
                .map(DateKey)
        })
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}
