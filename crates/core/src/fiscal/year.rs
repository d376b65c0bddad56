//! Fiscal year value type.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::month::FiscalMonth;

/// A fiscal year, named by the calendar year it ends in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FiscalYear(pub i32);

impl FiscalYear {
    /// Creates a fiscal year.
    #[must_use]
    pub const fn new(year: i32) -> Self {
        Self(year)
    }

    /// The year number.
    #[must_use]
    pub const fn value(self) -> i32 {
        self.0
    }

    /// Fiscal year a calendar date belongs to.
    #[must_use]
    pub fn for_date(date: NaiveDate) -> Self {
        if date.month() >= 10 {
            Self(date.year() + 1)
        } else {
            Self(date.year())
        }
    }

    /// October 1 of the previous calendar year.
    #[must_use]
    pub fn start_date(self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.0 - 1, 10, 1)
    }

    /// September 30 of the fiscal year.
    #[must_use]
    pub fn end_date(self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.0, 9, 30)
    }

    /// Returns true if `date` falls within this fiscal year.
    #[must_use]
    pub fn contains(self, date: NaiveDate) -> bool {
        Self::for_date(date) == self
    }

    /// Fiscal month of `date` if it falls within this fiscal year.
    #[must_use]
    pub fn month_of(self, date: NaiveDate) -> Option<FiscalMonth> {
        self.contains(date).then(|| FiscalMonth::from_date(date))
    }

    /// Month to treat as "current" when viewing this year on `today`.
    ///
    /// While the year runs this is the month containing `today`; once the
    /// year is over it is September, so every month is past.
    ///
    /// There is no "not started" month: before the year begins this returns
    /// October. A projection viewed then marks October as both current and
    /// past and every later month as future, which is how a year about to
    /// open is budgeted. Callers that need to tell the two apart compare
    /// `today` with `start_date()`.
    #[must_use]
    pub fn reporting_month(self, today: NaiveDate) -> FiscalMonth {
        match Self::for_date(today).cmp(&self) {
            std::cmp::Ordering::Equal => FiscalMonth::from_date(today),
            std::cmp::Ordering::Greater => FiscalMonth::SEPTEMBER,
            std::cmp::Ordering::Less => FiscalMonth::OCTOBER,
        }
    }

    /// The following fiscal year.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }

    /// The preceding fiscal year.
    #[must_use]
    pub const fn previous(self) -> Self {
        Self(self.0 - 1)
    }
}

impl std::fmt::Display for FiscalYear {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "FY{}", self.0)
    }
}

impl From<i32> for FiscalYear {
    fn from(year: i32) -> Self {
        Self(year)
    }
}
