//! Year-end roll-forward into the next fiscal year.

pub mod error;
pub mod service;
pub mod steps;


pub use error::RolloverError;
pub use service::RolloverService;
pub use steps::{RolloverPlan, YearEndRollover};
