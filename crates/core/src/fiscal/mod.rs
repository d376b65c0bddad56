//! Fiscal calendar: October-start fiscal years and their twelve months.
//!
//! Fiscal year `Y` runs from October 1 of `Y - 1` through September 30 of `Y`.
//! Fiscal month 0 is October, fiscal month 11 is September.

pub mod error;
pub mod month;
pub mod year;


pub use error::FiscalError;
pub use month::{FiscalMonth, MonthInfo, current_fiscal_month, fiscal_month_info};
pub use year::FiscalYear;
