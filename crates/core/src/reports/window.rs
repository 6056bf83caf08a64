//! Report date ranges and relative windows.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Days, Month, Months, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::ReportError;

/// Date format accepted for report bounds.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// The current UTC day, the "today" every relative window is anchored on.
#[must_use]
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// The current UTC time without zone, used to stamp exports.
#[must_use]
pub fn now() -> NaiveDateTime {
    Utc::now().naive_utc()
}

/// Window anchored on today, used by budget analysis.
///
/// Every window except `today` is open-ended towards the future.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelativeWindow {
    /// The current day only.
    Today,
    /// The last 7 days.
    Week,
    /// The last month.
    #[default]
    Month,
    /// The last 3 months.
    Quarter,
    /// The last 12 months.
    Year,
}

impl RelativeWindow {
    /// Returns the label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Today => "today",
            Self::Week => "week",
            Self::Month => "month",
            Self::Quarter => "quarter",
            Self::Year => "year",
        }
    }

    /// Inclusive `(from, to)` bounds relative to `today`.
    #[must_use]
    pub fn bounds(self, today: NaiveDate) -> (NaiveDate, Option<NaiveDate>) {
        let back = |months: u32| today.checked_sub_months(Months::new(months)).unwrap_or(NaiveDate::MIN);
        match self {
            Self::Today => (today, Some(today)),
            Self::Week => (
                today.checked_sub_days(Days::new(7)).unwrap_or(NaiveDate::MIN),
                None,
            ),
            Self::Month => (back(1), None),
            Self::Quarter => (back(3), None),
            Self::Year => (back(12), None),
        }
    }
}

impl fmt::Display for RelativeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RelativeWindow {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "today" => Ok(Self::Today),
            "week" => Ok(Self::Week),
            "month" => Ok(Self::Month),
            "quarter" => Ok(Self::Quarter),
            "year" => Ok(Self::Year),
            other => Err(ReportError::InvalidWindow(other.to_string())),
        }
    }
}

/// Validated inclusive `[start_date, end_date]` for date-ranged reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    /// First day.
    pub start_date: NaiveDate,
    /// Last day.
    pub end_date: NaiveDate,
}

impl DateRange {
    /// Validates a range against `today`.
    ///
    /// # Errors
    ///
    /// `InvalidDateRange` if start is after end, `EndTooFarAhead` if end is
    /// more than one year after `today`.
    pub fn new(start_date: NaiveDate, end_date: NaiveDate, today: NaiveDate) -> Result<Self, ReportError> {
        if start_date > end_date {
            return Err(ReportError::InvalidDateRange {
                start: start_date,
                end: end_date,
            });
        }
        let horizon = today.checked_add_months(Months::new(12)).unwrap_or(NaiveDate::MAX);
        if end_date > horizon {
            return Err(ReportError::EndTooFarAhead(end_date));
        }
        Ok(Self {
            start_date,
            end_date,
        })
    }

    /// Parses `YYYY-MM-DD` bounds and validates them.
    ///
    /// # Errors
    ///
    /// `InvalidDate` for unparseable input, plus the errors of [`Self::new`].
    pub fn parse(start: &str, end: &str, today: NaiveDate) -> Result<Self, ReportError> {
        Self::new(parse_date(start)?, parse_date(end)?, today)
    }

    /// First of the current month through today.
    #[must_use]
    pub fn month_to_date(today: NaiveDate) -> Self {
        Self {
            start_date: today.with_day(1).unwrap_or(today),
            end_date: today,
        }
    }
}

/// Parses a `YYYY-MM-DD` date.
///
/// # Errors
///
/// `InvalidDate` when the input does not match.
pub fn parse_date(input: &str) -> Result<NaiveDate, ReportError> {
    NaiveDate::parse_from_str(input.trim(), DATE_FORMAT)
        .map_err(|_| ReportError::InvalidDate(input.to_string()))
}

/// English month name, e.g. `March`.
#[must_use]
pub fn month_name(month: u32) -> String {
    u8::try_from(month)
        .ok()
        .and_then(|m| Month::try_from(m).ok())
        .map(|m| m.name().to_string())
        .unwrap_or_default()
}

/// Calendar month `[first, last]`, or `None` outside the representable range.
#[must_use]
pub fn calendar_month(year: i32, month: u32) -> Option<(NaiveDate, NaiveDate)> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let last = first.checked_add_months(Months::new(1))?.pred_opt()?;
    Some((first, last))
}

/// `(year, month)` of the month before the one containing `date`.
#[must_use]
pub fn previous_month(date: NaiveDate) -> (i32, u32) {
    if date.month() == 1 {
        (date.year() - 1, 12)
    } else {
        (date.year(), date.month() - 1)
    }
}
