//! Closed date intervals a budget is in effect for.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::error::BudgetError;

/// A closed interval `[start_date, end_date]` with `start_date < end_date`.
///
/// Distinct from [`crate::reports::RelativeWindow`], which is anchored on today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BudgetInterval {
    start_date: NaiveDate,
    end_date: NaiveDate,
}

impl BudgetInterval {
    /// Creates an interval.
    ///
    /// # Errors
    ///
    /// Returns `InvalidDateRange` unless `start_date < end_date`.
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> Result<Self, BudgetError> {
        if start_date >= end_date {
            return Err(BudgetError::InvalidDateRange);
        }
        Ok(Self {
            start_date,
            end_date,
        })
    }

    /// Rebuilds an interval from a row that was validated when written.
    pub(crate) const fn from_stored(start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            start_date,
            end_date,
        }
    }

    /// First day in effect.
    #[must_use]
    pub const fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    /// Last day in effect.
    #[must_use]
    pub const fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    /// Whether `date` falls inside the interval (both ends inclusive).
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }

    /// Whether two closed intervals share at least one day.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start_date <= other.end_date && other.start_date <= self.end_date
    }
}
