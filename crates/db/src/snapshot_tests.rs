//! Tests for snapshot files.

use chrono::NaiveDate;
use rust_decimal_macros::dec;

use clubfin_core::budget::{Budget, CapexProject, MaintenanceOccurrence, MajorMaintenanceItem};
use clubfin_core::fiscal::{FiscalMonth, FiscalYear};
use clubfin_core::ledger::Transaction;
use clubfin_core::membership::{Member, MemberDues, MemberStatus, MemberType, Residence};
use clubfin_core::settings::ClubSettings;
use clubfin_core::store::{ClubStore, StoreError};
use clubfin_shared::AppError;
use clubfin_shared::types::{ClubId, MaintenanceItemId};

use super::{Snapshot, SnapshotError, YearSnapshot};
use crate::document::Collection;
use crate::memory::MemoryStore;

const FY: FiscalYear = FiscalYear::new(2025);

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn pump_rebuild() -> MajorMaintenanceItem {
    MajorMaintenanceItem {
        id: MaintenanceItemId::new(),
        fiscal_year: FY,
        name: "Pump rebuild".into(),
        budget_amount: dec!(4500),
        month: Some(FiscalMonth::new(6)),
        recurrence_years_min: 3,
        recurrence_years_max: 5,
        last_occurrence: Some(MaintenanceOccurrence {
            date: date(2022, 4, 12),
            amount: dec!(4100),
        }),
        next_due_date_min: None,
    }
}

fn populated_store() -> MemoryStore {
    let store = MemoryStore::new(ClubId::new());
    let budget = Budget::new(FY, dec!(42000), dec!(20000));
    let dues = Transaction::revenue("Membership Dues", dec!(675), date(2025, 4, 2));
    let member = Member::new(
        FY,
        "Lindqvist",
        MemberType::New,
        MemberStatus::SingleSenior,
        Residence::Outside,
        MemberDues::base(dec!(400)),
    );
    let project = CapexProject::new(FY, "Shade structure", dec!(9000), None);

    store.write_budget(&budget).unwrap();
    store.insert_transaction(&dues).unwrap();
    store.insert_maintenance_item(&pump_rebuild()).unwrap();
    store
        .put(
            store.yearly(FY, Collection::Members, member.id),
            &member,
        )
        .unwrap();
    store
        .put(
            store.yearly(FY, Collection::Capex, project.id),
            &project,
        )
        .unwrap();
    store.write_settings(&ClubSettings::default()).unwrap();
    store
}

#[tokio::test]
async fn test_file_round_trip() {
    let store = populated_store();
    let snapshot = store.snapshot().unwrap();
    assert_eq!(snapshot.years.len(), 1);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("club.json");
    snapshot.save(&path).unwrap();
    let loaded = Snapshot::load(&path).unwrap();
    assert_eq!(loaded, snapshot);

    let restored = MemoryStore::from_snapshot(&loaded).unwrap();
    assert_eq!(restored.club_id(), store.club_id());
    assert_eq!(
        restored.get_budget(FY).await.unwrap(),
        store.get_budget(FY).await.unwrap()
    );
    assert_eq!(
        restored.get_major_maintenance_items(FY).await.unwrap(),
        snapshot.years[0].maintenance
    );
    assert_eq!(restored.snapshot().unwrap(), snapshot);
}

#[test]
fn test_missing_collections_default_to_empty() {
    let club = ClubId::new();
    let raw = format!(r#"{{ "club_id": "{club}", "years": [{{ "fiscal_year": 2025 }}] }}"#);
    let snapshot: Snapshot = serde_json::from_str(&raw).unwrap();

    assert_eq!(snapshot.settings, None);
    assert_eq!(snapshot.year(FY), Some(&YearSnapshot::empty(FY)));
    assert_eq!(snapshot.year(FiscalYear::new(2026)), None);
}

#[test]
fn test_invalid_transaction_fails_import() {
    let mut year = YearSnapshot::empty(FY);
    year.transactions
        .push(Transaction::revenue("Concessions", dec!(-5), date(2025, 7, 4)));
    let snapshot = Snapshot {
        club_id: ClubId::new(),
        settings: None,
        years: vec![year],
    };

    let err = MemoryStore::from_snapshot(&snapshot).unwrap_err();
    assert!(matches!(err, SnapshotError::Store(StoreError::Invalid { .. })));
    assert!(matches!(AppError::from(err), AppError::Validation(_)));
}

#[test]
fn test_import_into_other_club_rejected() {
    let snapshot = populated_store().snapshot().unwrap();
    let other = MemoryStore::new(ClubId::new());

    assert!(other.import(&snapshot).is_err());
    assert!(other.fiscal_years().is_empty());
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = Snapshot::load(dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, SnapshotError::Io(_)));
    assert!(matches!(AppError::from(err), AppError::Storage(_)));
}
