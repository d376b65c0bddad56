//! Fiscal month index and its calendar mapping.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::error::FiscalError;

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// A fiscal month index in `0..=11`, where 0 is October.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct FiscalMonth(u8);

impl FiscalMonth {
    /// Number of months in a fiscal year.
    pub const COUNT: usize = 12;

    /// October, the first fiscal month.
    pub const OCTOBER: Self = Self(0);

    /// September, the fiscal year-end month.
    pub const SEPTEMBER: Self = Self(11);

    /// Every fiscal month in order.
    pub const ALL: [Self; 12] = [
        Self(0),
        Self(1),
        Self(2),
        Self(3),
        Self(4),
        Self(5),
        Self(6),
        Self(7),
        Self(8),
        Self(9),
        Self(10),
        Self(11),
    ];

    /// Creates a fiscal month from its index.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not in `0..=11`. An out-of-range month is a
    /// programming error; use `FiscalMonth::try_from` for untrusted input.
    #[must_use]
    pub const fn new(index: u8) -> Self {
        assert!(index < 12, "fiscal month out of range");
        Self(index)
    }

    /// Maps a 0-based calendar month (January = 0) to its fiscal month.
    ///
    /// # Panics
    ///
    /// Panics if `month0` is not in `0..=11`.
    #[must_use]
    pub const fn from_calendar_month0(month0: u32) -> Self {
        assert!(month0 < 12, "calendar month out of range");
        #[allow(clippy::cast_possible_truncation)]
        let month0 = month0 as u8;
        if month0 >= 9 {
            Self(month0 - 9)
        } else {
            Self(month0 + 3)
        }
    }

    /// Fiscal month a calendar date falls in, regardless of fiscal year.
    #[must_use]
    pub fn from_date(date: NaiveDate) -> Self {
        Self::from_calendar_month0(date.month0())
    }

    /// Index usable for the twelve-slot arrays of budgets and actuals.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Raw month number.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// 0-based calendar month (January = 0): `(fiscal_month + 9) mod 12`.
    #[must_use]
    pub const fn calendar_month0(self) -> u32 {
        (self.0 as u32 + 9) % 12
    }

    /// 1-based calendar month (January = 1).
    #[must_use]
    pub const fn calendar_month(self) -> u32 {
        self.calendar_month0() + 1
    }

    /// Calendar year of this month within `fiscal_year`.
    ///
    /// October through December belong to the previous calendar year.
    #[must_use]
    pub const fn calendar_year(self, fiscal_year: i32) -> i32 {
        if self.0 >= 3 {
            fiscal_year
        } else {
            fiscal_year - 1
        }
    }

    /// Calendar month name ("October" for month 0).
    #[must_use]
    pub const fn month_name(self) -> &'static str {
        MONTH_NAMES[self.calendar_month0() as usize]
    }

    /// "YYYY-MM" key of this month within `fiscal_year`.
    #[must_use]
    pub fn period_key(self, fiscal_year: i32) -> String {
        format!(
            "{:04}-{:02}",
            self.calendar_year(fiscal_year),
            self.calendar_month()
        )
    }

    /// First calendar day of this month within `fiscal_year`.
    #[must_use]
    pub fn first_day(self, fiscal_year: i32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.calendar_year(fiscal_year), self.calendar_month(), 1)
    }

    /// The following fiscal month, or `None` after September.
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        if self.0 < 11 { Some(Self(self.0 + 1)) } else { None }
    }

    /// Months from October through this one, inclusive.
    pub fn year_to_date(self) -> impl Iterator<Item = Self> {
        Self::ALL.into_iter().take(self.index() + 1)
    }
}

impl TryFrom<u8> for FiscalMonth {
    type Error = FiscalError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if value < 12 {
            Ok(Self(value))
        } else {
            Err(FiscalError::MonthOutOfRange(i64::from(value)))
        }
    }
}

impl TryFrom<i64> for FiscalMonth {
    type Error = FiscalError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        u8::try_from(value)
            .ok()
            .filter(|v| *v < 12)
            .map(Self)
            .ok_or(FiscalError::MonthOutOfRange(value))
    }
}

impl From<FiscalMonth> for u8 {
    fn from(month: FiscalMonth) -> Self {
        month.0
    }
}

impl std::fmt::Display for FiscalMonth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.month_name())
    }
}

/// Calendar details of one fiscal month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthInfo {
    /// The fiscal month.
    pub fiscal_month: FiscalMonth,
    /// Calendar month name.
    pub month_name: String,
    /// Calendar year the month falls in.
    pub calendar_year: i32,
    /// 1-based calendar month.
    pub calendar_month: u32,
    /// "YYYY-MM" key.
    pub period_key: String,
}

/// Describes fiscal month `fiscal_month` of `fiscal_year` in calendar terms.
///
/// # Panics
///
/// Panics if `fiscal_month` is not in `0..=11`.
#[must_use]
pub fn fiscal_month_info(fiscal_month: u8, fiscal_year: i32) -> MonthInfo {
    let month = FiscalMonth::new(fiscal_month);
    MonthInfo {
        fiscal_month: month,
        month_name: month.month_name().to_string(),
        calendar_year: month.calendar_year(fiscal_year),
        calendar_month: month.calendar_month(),
        period_key: month.period_key(fiscal_year),
    }
}

/// Fiscal month containing `today`.
///
/// Calendar months January-September map to fiscal 3-11, October-December
/// to fiscal 0-2.
#[must_use]
pub fn current_fiscal_month(today: NaiveDate) -> FiscalMonth {
    FiscalMonth::from_date(today)
}
