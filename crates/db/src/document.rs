//! Document addressing.

use clubfin_core::fiscal::FiscalYear;
use clubfin_shared::types::ClubId;

/// A collection of documents within a club's fiscal year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Collection {
    /// The year's single budget document.
    Budget,
    /// Ledger transactions.
    Transactions,
    /// Capital projects.
    Capex,
    /// Major maintenance items.
    Maintenance,
    /// Roster.
    Members,
    /// Club-wide settings; not tied to a fiscal year.
    Settings,
}

impl Collection {
    /// Collection name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Budget => "budget",
            Self::Transactions => "transactions",
            Self::Capex => "capex",
            Self::Maintenance => "maintenance",
            Self::Members => "members",
            Self::Settings => "settings",
        }
    }
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Full address of one document.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DocumentKey {
    /// Owning club.
    pub club_id: ClubId,
    /// Fiscal year; `None` for club-wide documents.
    pub fiscal_year: Option<FiscalYear>,
    /// Collection.
    pub collection: Collection,
    /// Document id within the collection.
    pub id: String,
}

impl DocumentKey {
    /// Key of a document in a fiscal-year collection.
    #[must_use]
    pub fn yearly(
        club_id: ClubId,
        fiscal_year: FiscalYear,
        collection: Collection,
        id: impl ToString,
    ) -> Self {
        Self {
            club_id,
            fiscal_year: Some(fiscal_year),
            collection,
            id: id.to_string(),
        }
    }

    /// Key of a club-wide document.
    #[must_use]
    pub fn club_wide(club_id: ClubId, collection: Collection, id: impl ToString) -> Self {
        Self {
            club_id,
            fiscal_year: None,
            collection,
            id: id.to_string(),
        }
    }
}
