//! Reporting buckets derived from record dates.

use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Serialize, Serializer};

/// Calendar resolution used to bucket records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Granularity {
    Year,
    Month,
    Day,
}

impl Granularity {
    pub fn key_for(&self, date: NaiveDate) -> PeriodKey {
        match self {
            Granularity::Year => PeriodKey::Year(date.year()),
            Granularity::Month => PeriodKey::Month(date.year(), date.month()),
            Granularity::Day => PeriodKey::Day(date),
        }
    }

    /// Key of a whole calendar month. Months cannot be bucketed by day.
    pub fn key_for_month(&self, year: i32, month: u32) -> Option<PeriodKey> {
        if !(1..=12).contains(&month) {
            return None;
        }
        match self {
            Granularity::Year => Some(PeriodKey::Year(year)),
            Granularity::Month => Some(PeriodKey::Month(year, month)),
            Granularity::Day => None,
        }
    }
}

/// Identifies a reporting bucket: `YYYY`, `YYYY-MM` or `YYYY-MM-DD`.
///
/// Keys of the same granularity order chronologically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PeriodKey {
    Year(i32),
    Month(i32, u32),
    Day(NaiveDate),
}

impl PeriodKey {
    pub fn granularity(&self) -> Granularity {
        match self {
            PeriodKey::Year(_) => Granularity::Year,
            PeriodKey::Month(..) => Granularity::Month,
            PeriodKey::Day(_) => Granularity::Day,
        }
    }

    /// Calendar month number (1-12), absent for annual keys.
    pub fn month_number(&self) -> Option<u32> {
        match self {
            PeriodKey::Year(_) => None,
            PeriodKey::Month(_, month) => Some(*month),
            PeriodKey::Day(date) => Some(date.month()),
        }
    }

    /// The following bucket of the same granularity.
    pub fn next(&self) -> Option<PeriodKey> {
        match self {
            PeriodKey::Year(year) => year.checked_add(1).map(PeriodKey::Year),
            PeriodKey::Month(year, month) => {
                let (year, month) = shift_month(*year, *month, 1);
                Some(PeriodKey::Month(year, month))
            }
            PeriodKey::Day(date) => date.succ_opt().map(PeriodKey::Day),
        }
    }

    /// Monthly key `offset` months after the month containing `date`.
    pub fn month_after(date: NaiveDate, offset: i32) -> PeriodKey {
        let (year, month) = shift_month(date.year(), date.month(), offset);
        PeriodKey::Month(year, month)
    }

    /// Every key from `self` to `last` inclusive. Empty when `last` precedes `self`
    /// or the granularities differ.
    pub fn span_to(&self, last: &PeriodKey) -> Vec<PeriodKey> {
        let mut keys = Vec::new();
        if self.granularity() != last.granularity() {
            return keys;
        }
        let mut cursor = Some(*self);
        while let Some(key) = cursor {
            if key > *last {
                break;
            }
            keys.push(key);
            cursor = key.next();
        }
        keys
    }
}

impl fmt::Display for PeriodKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PeriodKey::Year(year) => write!(f, "{year:04}"),
            PeriodKey::Month(year, month) => write!(f, "{year:04}-{month:02}"),
            PeriodKey::Day(date) => write!(f, "{}", date.format("%Y-%m-%d")),
        }
    }
}

impl Serialize for PeriodKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// First and last day of a calendar month.
pub fn month_bounds(year: i32, month: u32) -> Option<(NaiveDate, NaiveDate)> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let (next_year, next_month) = shift_month(year, month, 1);
    let last = NaiveDate::from_ymd_opt(next_year, next_month, 1)?.pred_opt()?;
    Some((first, last))
}

fn shift_month(year: i32, month: u32, months: i32) -> (i32, u32) {
    let index = year * 12 + month as i32 - 1 + months;
    (index.div_euclid(12), index.rem_euclid(12) as u32 + 1)
}
