//! Tests for the in-memory document store.

use chrono::NaiveDate;
use rust_decimal_macros::dec;
use serde_json::json;

use clubfin_core::budget::{Budget, CapexProject};
use clubfin_core::fiscal::{FiscalMonth, FiscalYear};
use clubfin_core::ledger::{ExpenseType, Transaction};
use clubfin_core::membership::{Member, MemberDues, MemberStatus, MemberType, Residence};
use clubfin_core::settings::{CategoryKind, ClubSettings};
use clubfin_core::store::{ClubStore, StoreError};
use clubfin_shared::types::{ClubId, TransactionId};

use super::MemoryStore;
use crate::document::{Collection, DocumentKey};

const FY: FiscalYear = FiscalYear::new(2025);

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn store() -> MemoryStore {
    MemoryStore::new(ClubId::new())
}

fn member(name: &str) -> Member {
    Member::new(
        FY,
        name,
        MemberType::Return,
        MemberStatus::Family,
        Residence::Inside,
        MemberDues::base(dec!(675)),
    )
}

#[tokio::test]
async fn test_budget_round_trip() {
    let store = store();
    assert_eq!(store.get_budget(FY).await.unwrap(), None);

    let mut budget = Budget::new(FY, dec!(50000), dec!(20000));
    budget.line_mut(FiscalMonth::new(8)).revenue = dec!(30000);
    store.save_budget(&budget).await.unwrap();

    assert_eq!(store.get_budget(FY).await.unwrap(), Some(budget));
    assert_eq!(store.get_budget(FiscalYear::new(2026)).await.unwrap(), None);
}

#[tokio::test]
async fn test_misordered_budget_rejected() {
    let store = store();
    let mut budget = Budget::new(FY, dec!(0), dec!(20000));
    budget.monthly_budgets.swap(0, 1);

    let err = store.save_budget(&budget).await.unwrap_err();
    assert!(matches!(err, StoreError::Invalid { collection: "budget", .. }));
}

#[tokio::test]
async fn test_transactions_listed_per_year() {
    let store = store();
    let dues = Transaction::revenue("Membership Dues", dec!(675), date(2025, 4, 2));
    let repair = Transaction::expense(ExpenseType::Opex, "Repairs", dec!(220), date(2025, 6, 9));
    let next_year = Transaction::revenue("Swim Lessons", dec!(90), date(2025, 10, 3));
    for tx in [&dues, &repair, &next_year] {
        store.add_transaction(tx).await.unwrap();
    }

    let listed = store.get_transactions(FY).await.unwrap();
    assert_eq!(listed.len(), 2);
    assert!(listed.contains(&dues));
    assert!(listed.contains(&repair));

    let later = store.get_transactions(FiscalYear::new(2026)).await.unwrap();
    assert_eq!(later, vec![next_year]);
}

#[tokio::test]
async fn test_duplicate_add_conflicts() {
    let store = store();
    let tx = Transaction::revenue("Concessions", dec!(40), date(2025, 7, 4));
    store.add_transaction(&tx).await.unwrap();

    let err = store.add_transaction(&tx).await.unwrap_err();
    assert!(matches!(err, StoreError::AlreadyExists { .. }));
}

#[tokio::test]
async fn test_invalid_transaction_rejected() {
    let store = store();
    let tx = Transaction::revenue("Concessions", dec!(0), date(2025, 7, 4));

    let err = store.add_transaction(&tx).await.unwrap_err();
    assert!(matches!(err, StoreError::Invalid { collection: "transactions", .. }));
    assert!(store.get_transactions(FY).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_update_and_delete_transaction() {
    let store = store();
    let mut tx = Transaction::expense(ExpenseType::Opex, "Chemicals", dec!(310), date(2025, 6, 1));

    let missing = store.update_transaction(&tx).await.unwrap_err();
    assert!(matches!(missing, StoreError::NotFound { .. }));

    store.add_transaction(&tx).await.unwrap();
    tx.amount = dec!(335);
    store.update_transaction(&tx).await.unwrap();
    assert_eq!(store.get_transaction(FY, tx.id).await.unwrap(), Some(tx.clone()));

    assert!(store.delete_transaction(FY, tx.id).await.unwrap());
    assert!(!store.delete_transaction(FY, tx.id).await.unwrap());
    assert_eq!(store.get_transaction(FY, TransactionId::new()).await.unwrap(), None);
}

#[tokio::test]
async fn test_members_and_capex() {
    let store = store();
    let alvarez = member("Alvarez");
    let project = CapexProject::new(FY, "Deck resurfacing", dec!(18000), Some(FiscalMonth::new(7)));
    store.save_member(&alvarez).await.unwrap();
    store.save_capex_project(&project).await.unwrap();

    assert_eq!(store.get_members(FY).await.unwrap(), vec![alvarez.clone()]);
    assert_eq!(store.get_planned_capex(FY).await.unwrap(), vec![project.clone()]);

    assert!(store.delete_member(FY, alvarez.id).await.unwrap());
    assert!(store.delete_capex_project(FY, project.id).await.unwrap());
    assert!(store.get_members(FY).await.unwrap().is_empty());
    assert!(store.get_planned_capex(FY).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_settings_are_club_wide() {
    let store = store();
    assert_eq!(store.get_settings().await.unwrap(), None);

    let mut settings = ClubSettings::default();
    assert!(settings.add_custom_category(CategoryKind::Revenue, "Swim Team"));
    store.update_settings(&settings).await.unwrap();

    assert_eq!(store.get_settings().await.unwrap(), Some(settings));
    assert!(store.fiscal_years().is_empty());
}

#[tokio::test]
async fn test_corrupt_document_reported() {
    let store = store();
    store.insert_raw(
        DocumentKey::yearly(store.club_id(), FY, Collection::Members, "broken"),
        json!({ "name": "Missing everything else" }),
    );

    let err = store.get_members(FY).await.unwrap_err();
    assert!(matches!(
        err,
        StoreError::Corrupt { collection: "members", ref id, .. } if id == "broken"
    ));
}

#[tokio::test]
async fn test_clubs_are_isolated() {
    let north = store();
    let south = north.for_club(ClubId::new());

    north.save_member(&member("Nakamura")).await.unwrap();
    north
        .save_budget(&Budget::new(FY, dec!(1000), dec!(20000)))
        .await
        .unwrap();

    assert!(south.get_members(FY).await.unwrap().is_empty());
    assert_eq!(south.get_budget(FY).await.unwrap(), None);
    assert_eq!(north.fiscal_years(), vec![FY]);
    assert!(south.fiscal_years().is_empty());
}

#[tokio::test]
async fn test_find_capex_project_across_years() {
    let store = store();
    let later = CapexProject::new(FiscalYear::new(2026), "Bathhouse roof", dec!(22000), None);
    store.save_capex_project(&later).await.unwrap();

    assert_eq!(store.find_capex_project(later.id).await.unwrap(), Some(later.clone()));
    assert_eq!(
        store.for_club(ClubId::new()).find_capex_project(later.id).await.unwrap(),
        None
    );
}
