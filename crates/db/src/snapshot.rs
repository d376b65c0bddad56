//! JSON snapshot import and export.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use clubfin_core::budget::{Budget, CapexProject, MajorMaintenanceItem};
use clubfin_core::fiscal::FiscalYear;
use clubfin_core::ledger::Transaction;
use clubfin_core::membership::Member;
use clubfin_core::settings::ClubSettings;
use clubfin_core::store::StoreError;
use clubfin_shared::AppError;
use clubfin_shared::types::ClubId;

use crate::document::Collection;
use crate::memory::MemoryStore;

/// Errors from reading or writing snapshot files.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// File could not be read or written.
    #[error("snapshot I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// File is not a valid snapshot.
    #[error("snapshot format error: {0}")]
    Json(#[from] serde_json::Error),

    /// A document was rejected by the store.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<SnapshotError> for AppError {
    fn from(err: SnapshotError) -> Self {
        match err {
            SnapshotError::Io(e) => Self::Storage(e.to_string()),
            SnapshotError::Json(e) => Self::Validation(format!("snapshot: {e}")),
            SnapshotError::Store(e) => e.into(),
        }
    }
}

/// Everything stored for one club.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Owning club.
    pub club_id: ClubId,
    /// Club-wide settings.
    #[serde(default)]
    pub settings: Option<ClubSettings>,
    /// Per-year documents, ascending by fiscal year.
    #[serde(default)]
    pub years: Vec<YearSnapshot>,
}

/// Documents of one fiscal year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearSnapshot {
    /// Fiscal year.
    pub fiscal_year: FiscalYear,
    /// Budget, if one was created.
    #[serde(default)]
    pub budget: Option<Budget>,
    /// Ledger.
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    /// Capital projects.
    #[serde(default)]
    pub capex: Vec<CapexProject>,
    /// Major maintenance items.
    #[serde(default)]
    pub maintenance: Vec<MajorMaintenanceItem>,
    /// Roster.
    #[serde(default)]
    pub members: Vec<Member>,
}

impl YearSnapshot {
    /// An empty year.
    #[must_use]
    pub const fn empty(fiscal_year: FiscalYear) -> Self {
        Self {
            fiscal_year,
            budget: None,
            transactions: Vec::new(),
            capex: Vec::new(),
            maintenance: Vec::new(),
            members: Vec::new(),
        }
    }
}

impl Snapshot {
    /// Reads a snapshot file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SnapshotError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;
        let snapshot: Self = serde_json::from_str(&contents)?;
        info!(
            path = %path.display(),
            club_id = %snapshot.club_id,
            years = snapshot.years.len(),
            "Snapshot loaded"
        );
        Ok(snapshot)
    }

    /// Writes the snapshot as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SnapshotError> {
        let path = path.as_ref();
        let contents = serde_json::to_string_pretty(self)?;
        fs::write(path, contents)?;
        info!(path = %path.display(), club_id = %self.club_id, "Snapshot saved");
        Ok(())
    }

    /// Year entry for `fiscal_year`, if present.
    #[must_use]
    pub fn year(&self, fiscal_year: FiscalYear) -> Option<&YearSnapshot> {
        self.years.iter().find(|y| y.fiscal_year == fiscal_year)
    }
}

impl MemoryStore {
    /// Builds a store holding every document of `snapshot`.
    ///
    /// Documents pass the same checks as regular writes.
    ///
    /// # Errors
    ///
    /// Returns the first document the store rejects.
    pub fn from_snapshot(snapshot: &Snapshot) -> Result<Self, SnapshotError> {
        let store = Self::new(snapshot.club_id);
        store.import(snapshot)?;
        Ok(store)
    }

    /// Adds every document of `snapshot` to this store.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot belongs to another club or a
    /// document is rejected.
    pub fn import(&self, snapshot: &Snapshot) -> Result<(), SnapshotError> {
        if snapshot.club_id != self.club_id() {
            return Err(StoreError::invalid(
                "snapshot",
                format!(
                    "snapshot of club {} cannot be imported into club {}",
                    snapshot.club_id,
                    self.club_id()
                ),
            )
            .into());
        }

        if let Some(settings) = &snapshot.settings {
            self.write_settings(settings)?;
        }
        for year in &snapshot.years {
            if let Some(budget) = &year.budget {
                self.write_budget(budget)?;
            }
            for tx in &year.transactions {
                self.insert_transaction(tx)?;
            }
            for project in &year.capex {
                self.put(
                    self.yearly(project.fiscal_year, Collection::Capex, project.id),
                    project,
                )?;
            }
            for item in &year.maintenance {
                self.insert_maintenance_item(item)?;
            }
            for member in &year.members {
                self.put(
                    self.yearly(member.fiscal_year, Collection::Members, member.id),
                    member,
                )?;
            }
        }
        Ok(())
    }

    /// Exports every document of this club.
    ///
    /// # Errors
    ///
    /// Returns an error if a stored document cannot be decoded.
    pub fn snapshot(&self) -> Result<Snapshot, SnapshotError> {
        let years = self
            .fiscal_years()
            .into_iter()
            .map(|fy| {
                Ok(YearSnapshot {
                    fiscal_year: fy,
                    budget: self.read_budget(fy)?,
                    transactions: self.list(fy, Collection::Transactions)?,
                    capex: self.list(fy, Collection::Capex)?,
                    maintenance: self.list(fy, Collection::Maintenance)?,
                    members: self.list(fy, Collection::Members)?,
                })
            })
            .collect::<Result<Vec<_>, StoreError>>()?;

        Ok(Snapshot {
            club_id: self.club_id(),
            settings: self.read_settings()?,
            years,
        })
    }
}

#[cfg(test)]
#[path = "snapshot_tests.rs"]
mod tests;
