//! Club membership: dues, bylaw compliance, refunds and the dues ledger link.

pub mod compliance;
pub mod dues;
pub mod error;
pub mod refund;
pub mod service;
pub mod summary;
pub mod sync;
pub mod types;

pub use compliance::{
    AdmissionDecision, ComplianceReport, MAX_OUTSIDE_PERCENTAGE, ResidencyCount,
    check_bylaw_compliance, check_bylaw_compliance_with_limit, check_outside_admission,
    count_residency,
};
pub use dues::{DuesTotals, calculate_dues};
pub use error::MembershipError;
pub use refund::validate_refund;
pub use service::MembershipService;
pub use summary::MembershipSummary;
pub use sync::{DUES_CATEGORY, LedgerChange, LedgerSyncPlan, REFUND_CATEGORY, plan_ledger_sync};
pub use types::{
    DiscountItem, FeeItem, Member, MemberDues, MemberStatus, MemberType, OutsideOverride,
    Residence,
};
