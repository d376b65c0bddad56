//! In-memory `ClubStore` over JSON documents.

use std::collections::BTreeSet;
use std::sync::Arc;

use dashmap::DashMap;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use clubfin_core::budget::{Budget, CapexProject, MajorMaintenanceItem};
use clubfin_core::fiscal::FiscalYear;
use clubfin_core::ledger::{Transaction, validate_transaction};
use clubfin_core::membership::Member;
use clubfin_core::settings::ClubSettings;
use clubfin_core::store::{ClubStore, StoreError};
use clubfin_shared::types::{CapexProjectId, ClubId, MemberId, TransactionId};

use crate::document::{Collection, DocumentKey};

const BUDGET_DOC: &str = "budget";
const SETTINGS_DOC: &str = "settings";

/// Document store scoped to one club.
///
/// Clones and `for_club` scopes share the same underlying documents.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    club_id: ClubId,
    documents: Arc<DashMap<DocumentKey, Value>>,
}

impl MemoryStore {
    /// Creates an empty store for `club_id`.
    #[must_use]
    pub fn new(club_id: ClubId) -> Self {
        Self {
            club_id,
            documents: Arc::new(DashMap::new()),
        }
    }

    /// A view of the same documents scoped to another club.
    #[must_use]
    pub fn for_club(&self, club_id: ClubId) -> Self {
        Self {
            club_id,
            documents: Arc::clone(&self.documents),
        }
    }

    /// Club this store is scoped to.
    #[must_use]
    pub const fn club_id(&self) -> ClubId {
        self.club_id
    }

    /// Fiscal years that hold any document for this club, ascending.
    #[must_use]
    pub fn fiscal_years(&self) -> Vec<FiscalYear> {
        let years: BTreeSet<FiscalYear> = self
            .documents
            .iter()
            .filter(|entry| entry.key().club_id == self.club_id)
            .filter_map(|entry| entry.key().fiscal_year)
            .collect();
        years.into_iter().collect()
    }

    /// Seeds a major maintenance item.
    ///
    /// # Errors
    ///
    /// Returns an error if the item cannot be encoded.
    pub fn insert_maintenance_item(&self, item: &MajorMaintenanceItem) -> Result<(), StoreError> {
        self.put(
            self.yearly(item.fiscal_year, Collection::Maintenance, item.id),
            item,
        )
    }

    /// Stores a raw document without any checks.
    ///
    /// Used to import documents written by other tools; reads still decode
    /// and validate them.
    pub fn insert_raw(&self, key: DocumentKey, document: Value) {
        self.documents.insert(key, document);
    }

    pub(crate) fn yearly(
        &self,
        fiscal_year: FiscalYear,
        collection: Collection,
        id: impl ToString,
    ) -> DocumentKey {
        DocumentKey::yearly(self.club_id, fiscal_year, collection, id)
    }

    pub(crate) fn write_budget(&self, budget: &Budget) -> Result<(), StoreError> {
        budget
            .validate()
            .map_err(|e| StoreError::invalid(Collection::Budget.as_str(), e.to_string()))?;
        self.put(
            self.yearly(budget.fiscal_year, Collection::Budget, BUDGET_DOC),
            budget,
        )
    }

    pub(crate) fn read_budget(&self, fiscal_year: FiscalYear) -> Result<Option<Budget>, StoreError> {
        let key = self.yearly(fiscal_year, Collection::Budget, BUDGET_DOC);
        let Some(budget) = self.get::<Budget>(&key)? else {
            return Ok(None);
        };
        budget
            .validate()
            .map_err(|e| corrupt(&key, e.to_string()))?;
        Ok(Some(budget))
    }

    pub(crate) fn insert_transaction(&self, transaction: &Transaction) -> Result<(), StoreError> {
        validate_transaction(transaction)?;
        let key = self.yearly(
            transaction.fiscal_year,
            Collection::Transactions,
            transaction.id,
        );
        if self.documents.contains_key(&key) {
            return Err(StoreError::AlreadyExists {
                collection: Collection::Transactions.as_str(),
                id: key.id,
            });
        }
        self.put(key, transaction)
    }

    pub(crate) fn write_settings(&self, settings: &ClubSettings) -> Result<(), StoreError> {
        self.put(
            DocumentKey::club_wide(self.club_id, Collection::Settings, SETTINGS_DOC),
            settings,
        )
    }

    pub(crate) fn read_settings(&self) -> Result<Option<ClubSettings>, StoreError> {
        self.get(&DocumentKey::club_wide(
            self.club_id,
            Collection::Settings,
            SETTINGS_DOC,
        ))
    }

    pub(crate) fn put<T: Serialize>(&self, key: DocumentKey, document: &T) -> Result<(), StoreError> {
        let value = serde_json::to_value(document).map_err(|e| StoreError::Backend(e.to_string()))?;
        debug!(
            collection = %key.collection,
            fiscal_year = ?key.fiscal_year,
            id = %key.id,
            "Document written"
        );
        self.documents.insert(key, value);
        Ok(())
    }

    pub(crate) fn get<T: DeserializeOwned>(&self, key: &DocumentKey) -> Result<Option<T>, StoreError> {
        let Some(value) = self.documents.get(key).map(|entry| entry.value().clone()) else {
            return Ok(None);
        };
        serde_json::from_value(value)
            .map(Some)
            .map_err(|e| corrupt(key, e.to_string()))
    }

    pub(crate) fn list<T: DeserializeOwned>(
        &self,
        fiscal_year: FiscalYear,
        collection: Collection,
    ) -> Result<Vec<T>, StoreError> {
        let mut entries: Vec<(DocumentKey, Value)> = self
            .documents
            .iter()
            .filter(|entry| {
                let key = entry.key();
                key.club_id == self.club_id
                    && key.fiscal_year == Some(fiscal_year)
                    && key.collection == collection
            })
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect();
        entries.sort_by(|a, b| a.0.id.cmp(&b.0.id));

        debug!(%collection, %fiscal_year, count = entries.len(), "Documents listed");
        entries
            .into_iter()
            .map(|(key, value)| serde_json::from_value(value).map_err(|e| corrupt(&key, e.to_string())))
            .collect()
    }

    fn remove(&self, key: &DocumentKey) -> bool {
        let removed = self.documents.remove(key).is_some();
        debug!(collection = %key.collection, id = %key.id, removed, "Document deleted");
        removed
    }
}

fn corrupt(key: &DocumentKey, message: String) -> StoreError {
    StoreError::Corrupt {
        collection: key.collection.as_str(),
        id: key.id.clone(),
        message,
    }
}

impl ClubStore for MemoryStore {
    async fn get_budget(&self, fiscal_year: FiscalYear) -> Result<Option<Budget>, StoreError> {
        self.read_budget(fiscal_year)
    }

    async fn save_budget(&self, budget: &Budget) -> Result<(), StoreError> {
        self.write_budget(budget)
    }

    async fn get_transactions(
        &self,
        fiscal_year: FiscalYear,
    ) -> Result<Vec<Transaction>, StoreError> {
        self.list(fiscal_year, Collection::Transactions)
    }

    async fn get_transaction(
        &self,
        fiscal_year: FiscalYear,
        id: TransactionId,
    ) -> Result<Option<Transaction>, StoreError> {
        self.get(&self.yearly(fiscal_year, Collection::Transactions, id))
    }

    async fn add_transaction(&self, transaction: &Transaction) -> Result<(), StoreError> {
        self.insert_transaction(transaction)
    }

    async fn update_transaction(&self, transaction: &Transaction) -> Result<(), StoreError> {
        validate_transaction(transaction)?;
        let key = self.yearly(
            transaction.fiscal_year,
            Collection::Transactions,
            transaction.id,
        );
        if !self.documents.contains_key(&key) {
            return Err(StoreError::not_found(
                Collection::Transactions.as_str(),
                transaction.id,
            ));
        }
        self.put(key, transaction)
    }

    async fn delete_transaction(
        &self,
        fiscal_year: FiscalYear,
        id: TransactionId,
    ) -> Result<bool, StoreError> {
        Ok(self.remove(&self.yearly(fiscal_year, Collection::Transactions, id)))
    }

    async fn get_planned_capex(
        &self,
        fiscal_year: FiscalYear,
    ) -> Result<Vec<CapexProject>, StoreError> {
        self.list(fiscal_year, Collection::Capex)
    }

    async fn find_capex_project(
        &self,
        id: CapexProjectId,
    ) -> Result<Option<CapexProject>, StoreError> {
        let id = id.to_string();
        let key = self
            .documents
            .iter()
            .map(|entry| entry.key().clone())
            .find(|key| {
                key.club_id == self.club_id && key.collection == Collection::Capex && key.id == id
            });
        match key {
            Some(key) => self.get(&key),
            None => Ok(None),
        }
    }

    async fn save_capex_project(&self, project: &CapexProject) -> Result<(), StoreError> {
        self.put(
            self.yearly(project.fiscal_year, Collection::Capex, project.id),
            project,
        )
    }

    async fn delete_capex_project(
        &self,
        fiscal_year: FiscalYear,
        id: CapexProjectId,
    ) -> Result<bool, StoreError> {
        Ok(self.remove(&self.yearly(fiscal_year, Collection::Capex, id)))
    }

    async fn get_major_maintenance_items(
        &self,
        fiscal_year: FiscalYear,
    ) -> Result<Vec<MajorMaintenanceItem>, StoreError> {
        self.list(fiscal_year, Collection::Maintenance)
    }

    async fn get_members(&self, fiscal_year: FiscalYear) -> Result<Vec<Member>, StoreError> {
        self.list(fiscal_year, Collection::Members)
    }

    async fn save_member(&self, member: &Member) -> Result<(), StoreError> {
        self.put(
            self.yearly(member.fiscal_year, Collection::Members, member.id),
            member,
        )
    }

    async fn delete_member(&self, fiscal_year: FiscalYear, id: MemberId) -> Result<bool, StoreError> {
        Ok(self.remove(&self.yearly(fiscal_year, Collection::Members, id)))
    }

    async fn get_settings(&self) -> Result<Option<ClubSettings>, StoreError> {
        self.read_settings()
    }

    async fn update_settings(&self, settings: &ClubSettings) -> Result<(), StoreError> {
        self.write_settings(settings)
    }
}

#[cfg(test)]
#[path = "memory_tests.rs"]
mod tests;
