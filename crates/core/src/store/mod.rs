//! Storage collaborator contract.
//!
//! The engine never performs I/O itself. Services read snapshots through
//! `ClubStore`, compute, and write results back through it. One store
//! instance serves one club; documents are keyed by fiscal year and
//! collection inside it.

mod error;
#[cfg(test)]
pub(crate) mod mock;

use std::future::Future;

use clubfin_shared::types::{CapexProjectId, MemberId, TransactionId};

use crate::budget::{Budget, CapexProject, MajorMaintenanceItem};
use crate::fiscal::FiscalYear;
use crate::ledger::Transaction;
use crate::membership::Member;
use crate::settings::ClubSettings;

pub use error::StoreError;

/// Repository trait for one club's fiscal-year documents.
///
/// This trait is implemented by the db crate to provide actual storage.
pub trait ClubStore: Send + Sync {
    /// Budget of a fiscal year, if one has been created.
    fn get_budget(
        &self,
        fiscal_year: FiscalYear,
    ) -> impl Future<Output = Result<Option<Budget>, StoreError>> + Send;

    /// Creates or replaces the budget of `budget.fiscal_year`.
    fn save_budget(&self, budget: &Budget) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// All transactions filed under a fiscal year.
    fn get_transactions(
        &self,
        fiscal_year: FiscalYear,
    ) -> impl Future<Output = Result<Vec<Transaction>, StoreError>> + Send;

    /// One transaction by id.
    fn get_transaction(
        &self,
        fiscal_year: FiscalYear,
        id: TransactionId,
    ) -> impl Future<Output = Result<Option<Transaction>, StoreError>> + Send;

    /// Adds a new transaction.
    fn add_transaction(
        &self,
        transaction: &Transaction,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Replaces an existing transaction.
    fn update_transaction(
        &self,
        transaction: &Transaction,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Deletes a transaction, returning whether it existed.
    fn delete_transaction(
        &self,
        fiscal_year: FiscalYear,
        id: TransactionId,
    ) -> impl Future<Output = Result<bool, StoreError>> + Send;

    /// Capital projects planned for a fiscal year.
    fn get_planned_capex(
        &self,
        fiscal_year: FiscalYear,
    ) -> impl Future<Output = Result<Vec<CapexProject>, StoreError>> + Send;

    /// Capital project with `id` in whichever fiscal year it is filed under.
    fn find_capex_project(
        &self,
        id: CapexProjectId,
    ) -> impl Future<Output = Result<Option<CapexProject>, StoreError>> + Send;

    /// Creates or replaces a capital project.
    fn save_capex_project(
        &self,
        project: &CapexProject,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Deletes a capital project, returning whether it existed.
    fn delete_capex_project(
        &self,
        fiscal_year: FiscalYear,
        id: CapexProjectId,
    ) -> impl Future<Output = Result<bool, StoreError>> + Send;

    /// Major maintenance items tracked for a fiscal year.
    fn get_major_maintenance_items(
        &self,
        fiscal_year: FiscalYear,
    ) -> impl Future<Output = Result<Vec<MajorMaintenanceItem>, StoreError>> + Send;

    /// Roster of a fiscal year.
    fn get_members(
        &self,
        fiscal_year: FiscalYear,
    ) -> impl Future<Output = Result<Vec<Member>, StoreError>> + Send;

    /// Creates or replaces a member.
    fn save_member(&self, member: &Member) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Deletes a member, returning whether it existed.
    fn delete_member(
        &self,
        fiscal_year: FiscalYear,
        id: MemberId,
    ) -> impl Future<Output = Result<bool, StoreError>> + Send;

    /// Club-wide settings, if saved.
    fn get_settings(&self) -> impl Future<Output = Result<Option<ClubSettings>, StoreError>> + Send;

    /// Creates or replaces the club-wide settings.
    fn update_settings(
        &self,
        settings: &ClubSettings,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;
}
