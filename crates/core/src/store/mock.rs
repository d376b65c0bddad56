//! In-memory `ClubStore` for service tests.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use clubfin_shared::types::{CapexProjectId, MemberId, TransactionId};

use super::{ClubStore, StoreError};
use crate::budget::{Budget, CapexProject, MajorMaintenanceItem};
use crate::fiscal::FiscalYear;
use crate::ledger::Transaction;
use crate::membership::Member;
use crate::settings::ClubSettings;

/// Mock store for testing.
#[derive(Default)]
pub(crate) struct MockClubStore {
    pub budgets: Mutex<HashMap<FiscalYear, Budget>>,
    pub transactions: Mutex<Vec<Transaction>>,
    pub capex: Mutex<Vec<CapexProject>>,
    pub maintenance: Mutex<Vec<MajorMaintenanceItem>>,
    pub members: Mutex<Vec<Member>>,
    pub settings: Mutex<Option<ClubSettings>>,
    pub member_writes_fail: AtomicBool,
}

impl MockClubStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_budget(self, budget: Budget) -> Self {
        self.budgets
            .lock()
            .unwrap()
            .insert(budget.fiscal_year, budget);
        self
    }

    pub fn with_transactions(self, transactions: Vec<Transaction>) -> Self {
        self.transactions.lock().unwrap().extend(transactions);
        self
    }

    pub fn with_members(self, members: Vec<Member>) -> Self {
        self.members.lock().unwrap().extend(members);
        self
    }

    pub fn with_maintenance(self, items: Vec<MajorMaintenanceItem>) -> Self {
        self.maintenance.lock().unwrap().extend(items);
        self
    }

    pub fn with_capex(self, projects: Vec<CapexProject>) -> Self {
        self.capex.lock().unwrap().extend(projects);
        self
    }

    /// Makes every `save_member` fail until switched off again.
    pub fn fail_member_writes(&self, fail: bool) {
        self.member_writes_fail.store(fail, Ordering::SeqCst);
    }

    pub fn budget(&self, fiscal_year: FiscalYear) -> Option<Budget> {
        self.budgets.lock().unwrap().get(&fiscal_year).cloned()
    }

    pub fn all_transactions(&self) -> Vec<Transaction> {
        self.transactions.lock().unwrap().clone()
    }

    pub fn all_members(&self) -> Vec<Member> {
        self.members.lock().unwrap().clone()
    }
}

impl ClubStore for MockClubStore {
    async fn get_budget(&self, fiscal_year: FiscalYear) -> Result<Option<Budget>, StoreError> {
        Ok(self.budget(fiscal_year))
    }

    async fn save_budget(&self, budget: &Budget) -> Result<(), StoreError> {
        self.budgets
            .lock()
            .unwrap()
            .insert(budget.fiscal_year, budget.clone());
        Ok(())
    }

    async fn get_transactions(
        &self,
        fiscal_year: FiscalYear,
    ) -> Result<Vec<Transaction>, StoreError> {
        Ok(self
            .transactions
            .lock()
            .unwrap()
            .iter()
            .filter(|t| t.fiscal_year == fiscal_year)
            .cloned()
            .collect())
    }

    async fn get_transaction(
        &self,
        fiscal_year: FiscalYear,
        id: TransactionId,
    ) -> Result<Option<Transaction>, StoreError> {
        Ok(self
            .transactions
            .lock()
            .unwrap()
            .iter()
            .find(|t| t.fiscal_year == fiscal_year && t.id == id)
            .cloned())
    }

    async fn add_transaction(&self, transaction: &Transaction) -> Result<(), StoreError> {
        self.transactions.lock().unwrap().push(transaction.clone());
        Ok(())
    }

    async fn update_transaction(&self, transaction: &Transaction) -> Result<(), StoreError> {
        let mut transactions = self.transactions.lock().unwrap();
        let slot = transactions
            .iter_mut()
            .find(|t| t.id == transaction.id)
            .ok_or_else(|| StoreError::not_found("transactions", transaction.id))?;
        *slot = transaction.clone();
        Ok(())
    }

    async fn delete_transaction(
        &self,
        fiscal_year: FiscalYear,
        id: TransactionId,
    ) -> Result<bool, StoreError> {
        let mut transactions = self.transactions.lock().unwrap();
        let before = transactions.len();
        transactions.retain(|t| !(t.fiscal_year == fiscal_year && t.id == id));
        Ok(transactions.len() != before)
    }

    async fn get_planned_capex(
        &self,
        fiscal_year: FiscalYear,
    ) -> Result<Vec<CapexProject>, StoreError> {
        Ok(self
            .capex
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.fiscal_year == fiscal_year)
            .cloned()
            .collect())
    }

    async fn find_capex_project(
        &self,
        id: CapexProjectId,
    ) -> Result<Option<CapexProject>, StoreError> {
        Ok(self.capex.lock().unwrap().iter().find(|p| p.id == id).cloned())
    }

    async fn save_capex_project(&self, project: &CapexProject) -> Result<(), StoreError> {
        let mut capex = self.capex.lock().unwrap();
        capex.retain(|p| !(p.fiscal_year == project.fiscal_year && p.id == project.id));
        capex.push(project.clone());
        Ok(())
    }

    async fn delete_capex_project(
        &self,
        fiscal_year: FiscalYear,
        id: CapexProjectId,
    ) -> Result<bool, StoreError> {
        let mut capex = self.capex.lock().unwrap();
        let before = capex.len();
        capex.retain(|p| !(p.fiscal_year == fiscal_year && p.id == id));
        Ok(capex.len() != before)
    }

    async fn get_major_maintenance_items(
        &self,
        fiscal_year: FiscalYear,
    ) -> Result<Vec<MajorMaintenanceItem>, StoreError> {
        Ok(self
            .maintenance
            .lock()
            .unwrap()
            .iter()
            .filter(|i| i.fiscal_year == fiscal_year)
            .cloned()
            .collect())
    }

    async fn get_members(&self, fiscal_year: FiscalYear) -> Result<Vec<Member>, StoreError> {
        Ok(self
            .members
            .lock()
            .unwrap()
            .iter()
            .filter(|m| m.fiscal_year == fiscal_year)
            .cloned()
            .collect())
    }

    async fn save_member(&self, member: &Member) -> Result<(), StoreError> {
        if self.member_writes_fail.load(Ordering::SeqCst) {
            return Err(StoreError::Backend("member write failed".into()));
        }
        let mut members = self.members.lock().unwrap();
        members.retain(|m| m.id != member.id);
        members.push(member.clone());
        Ok(())
    }

    async fn delete_member(&self, fiscal_year: FiscalYear, id: MemberId) -> Result<bool, StoreError> {
        let mut members = self.members.lock().unwrap();
        let before = members.len();
        members.retain(|m| !(m.fiscal_year == fiscal_year && m.id == id));
        Ok(members.len() != before)
    }

    async fn get_settings(&self) -> Result<Option<ClubSettings>, StoreError> {
        Ok(self.settings.lock().unwrap().clone())
    }

    async fn update_settings(&self, settings: &ClubSettings) -> Result<(), StoreError> {
        *self.settings.lock().unwrap() = Some(settings.clone());
        Ok(())
    }
}
