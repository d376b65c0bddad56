//! Demo data seeder for Clubfin development and testing.
//!
//! Builds one fiscal year for a seasonal swim club through the regular
//! services (budget lines, CAPEX projects, roster with ledger sync, a few
//! operating transactions, one major maintenance item) and writes it to the
//! configured snapshot path.
//!
//! Usage: cargo run --bin seeder

use std::sync::Arc;

use anyhow::Context;
use chrono::{Days, NaiveDate, Utc};
use rust_decimal::Decimal;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use clubfin_core::budget::{
    Budget, BudgetService, CapexPlanner, CapexProject, MaintenanceOccurrence, MajorMaintenanceItem,
};
use clubfin_core::fiscal::{FiscalMonth, FiscalYear};
use clubfin_core::ledger::{ExpenseType, FlowAmounts, Transaction};
use clubfin_core::membership::{
    DiscountItem, FeeItem, Member, MemberDues, MemberStatus, MemberType, MembershipService,
    OutsideOverride, Residence,
};
use clubfin_core::settings::{CategoryKind, ClubSettings};
use clubfin_core::store::ClubStore;
use clubfin_db::MemoryStore;
use clubfin_shared::AppConfig;
use clubfin_shared::types::{ClubId, MaintenanceItemId};

/// Budgeted revenue, OPEX and G&A per fiscal month, October first.
const SEASON: [(i64, i64, i64); 12] = [
    (500, 1_500, 300),
    (0, 800, 300),
    (0, 800, 300),
    (2_000, 800, 300),
    (8_000, 900, 300),
    (20_000, 1_200, 300),
    (25_000, 2_500, 400),
    (15_000, 9_000, 500),
    (6_000, 14_000, 500),
    (3_000, 15_000, 500),
    (2_000, 13_000, 500),
    (500, 4_000, 400),
];

const STARTING_BALANCE: i64 = 38_000;
const FAMILY_DUES: i64 = 675;
const SINGLE_DUES: i64 = 400;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("failed to load configuration")?;

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log.filter)),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let fiscal_year = config
        .report
        .fiscal_year
        .map_or_else(|| FiscalYear::for_date(Utc::now().date_naive()), FiscalYear::new);
    let store = Arc::new(MemoryStore::new(ClubId::new()));

    info!(%fiscal_year, club = %config.club.name, "Seeding budget...");
    seed_budget(&store, fiscal_year, config.club.low_balance_threshold).await?;

    info!("Seeding settings...");
    seed_settings(&store).await?;

    info!("Seeding CAPEX projects...");
    seed_capex(&store, fiscal_year).await?;

    info!("Seeding major maintenance...");
    seed_maintenance(&store, fiscal_year)?;

    info!("Seeding roster...");
    seed_members(&store, fiscal_year, config.club.max_outside_percentage).await?;

    info!("Seeding operating transactions...");
    seed_transactions(&store, fiscal_year).await?;

    let path = &config.report.snapshot_path;
    if let Some(dir) = std::path::Path::new(path).parent() {
        std::fs::create_dir_all(dir)?;
    }
    store.snapshot()?.save(path)?;
    info!(%path, "Seeding complete!");

    Ok(())
}

fn day(fiscal_year: FiscalYear, month: u8, offset: u64) -> anyhow::Result<NaiveDate> {
    FiscalMonth::new(month)
        .first_day(fiscal_year.value())
        .and_then(|first| first.checked_add_days(Days::new(offset)))
        .with_context(|| format!("no calendar date for fiscal month {month} of {fiscal_year}"))
}

async fn seed_budget(
    store: &MemoryStore,
    fiscal_year: FiscalYear,
    low_balance_threshold: Decimal,
) -> anyhow::Result<()> {
    let mut budget = Budget::new(
        fiscal_year,
        Decimal::from(STARTING_BALANCE),
        low_balance_threshold,
    );
    for (month, (revenue, opex, ga)) in FiscalMonth::ALL.into_iter().zip(SEASON) {
        let amounts = FlowAmounts {
            revenue: Decimal::from(revenue),
            opex: Decimal::from(opex),
            capex: Decimal::ZERO,
            ga: Decimal::from(ga),
        };
        BudgetService::update_line(&mut budget, month, amounts, None)?;
    }
    store.save_budget(&budget).await?;
    Ok(())
}

async fn seed_settings(store: &MemoryStore) -> anyhow::Result<()> {
    let mut settings = ClubSettings::default();
    settings.add_custom_category(CategoryKind::Revenue, "Swim Team");
    settings.add_custom_category(CategoryKind::Expense, "Lifeguard Certification");
    settings.add_payment_method("Venmo");
    store.update_settings(&settings).await?;
    Ok(())
}

async fn seed_capex(store: &Arc<MemoryStore>, fiscal_year: FiscalYear) -> anyhow::Result<()> {
    let planner = CapexPlanner::new(Arc::clone(store));

    let mut deck = CapexProject::new(
        fiscal_year,
        "Deck resurfacing",
        Decimal::from(18_000),
        Some(FiscalMonth::new(5)),
    );
    deck.tracking_enabled = true;
    deck.alert_year = Some(fiscal_year);
    planner.save_project(&deck).await?;

    let shade = CapexProject::new(
        fiscal_year,
        "Shade structure",
        Decimal::from(9_500),
        Some(FiscalMonth::new(7)),
    );
    planner.save_project(&shade).await?;

    let heater = CapexProject::new(fiscal_year, "Pool heater replacement", Decimal::from(12_000), None);
    planner.save_project(&heater).await?;
    Ok(())
}

fn seed_maintenance(store: &MemoryStore, fiscal_year: FiscalYear) -> anyhow::Result<()> {
    let pump = MajorMaintenanceItem {
        id: MaintenanceItemId::new(),
        fiscal_year,
        name: "Main pump rebuild".into(),
        budget_amount: Decimal::from(4_500),
        month: Some(FiscalMonth::new(6)),
        recurrence_years_min: 3,
        recurrence_years_max: 5,
        last_occurrence: Some(MaintenanceOccurrence {
            date: day(fiscal_year.previous().previous(), 6, 11)?,
            amount: Decimal::from(4_100),
        }),
        next_due_date_min: None,
    };
    store.insert_maintenance_item(&pump)?;
    Ok(())
}

async fn seed_members(
    store: &Arc<MemoryStore>,
    fiscal_year: FiscalYear,
    max_outside_percentage: Decimal,
) -> anyhow::Result<()> {
    let service =
        MembershipService::new(Arc::clone(store)).with_outside_limit(max_outside_percentage);
    let paid_on = day(fiscal_year, 5, 14)?;

    let roster = [
        ("Okafor", MemberType::Return, MemberStatus::Family, Residence::Inside),
        ("Lindqvist", MemberType::Return, MemberStatus::SingleSenior, Residence::Inside),
        ("Alvarez", MemberType::New, MemberStatus::Family, Residence::Inside),
        ("Nakamura", MemberType::Return, MemberStatus::Family, Residence::Outside),
        ("Brennan", MemberType::New, MemberStatus::SingleSenior, Residence::Outside),
        ("Haddad", MemberType::Return, MemberStatus::Family, Residence::Outside),
    ];

    for (name, member_type, status, residence) in roster {
        let base = match status {
            MemberStatus::Family => FAMILY_DUES,
            MemberStatus::SingleSenior => SINGLE_DUES,
        };
        let mut dues = MemberDues::base(Decimal::from(base));
        if member_type == MemberType::New {
            dues.fees.push(FeeItem {
                name: "Initiation".into(),
                amount: Decimal::from(500),
                applied: true,
            });
        }
        if residence == Residence::Inside {
            dues.discounts.push(DiscountItem {
                name: "Early registration".into(),
                amount: Decimal::from(-50),
                applied: true,
            });
        }

        let member = Member::new(fiscal_year, name, member_type, status, residence, dues)
            .paid_on(paid_on);
        service.save_member(member, None).await?;
    }

    let late = Member::new(
        fiscal_year,
        "Castellanos",
        MemberType::New,
        MemberStatus::Family,
        Residence::Outside,
        MemberDues::base(Decimal::from(FAMILY_DUES)),
    );
    let approval = OutsideOverride {
        justification: "Grandfathered former resident, approved at the March board meeting".into(),
        recorded_on: paid_on,
    };
    let late = service.save_member(late, Some(approval)).await?;

    let refunded = late.paid_on(paid_on).refunded_on(
        day(fiscal_year, 7, 2)?,
        Decimal::from(300),
        "Moved out of state",
    );
    service.save_member(refunded, None).await?;
    Ok(())
}

async fn seed_transactions(store: &MemoryStore, fiscal_year: FiscalYear) -> anyhow::Result<()> {
    let transactions = [
        Transaction::expense(
            ExpenseType::Opex,
            "Insurance",
            Decimal::from(1_350),
            day(fiscal_year, 0, 9)?,
        ),
        Transaction::expense(
            ExpenseType::GeneralAdmin,
            "Professional Services",
            Decimal::from(300),
            day(fiscal_year, 0, 20)?,
        ),
        Transaction::expense(
            ExpenseType::Opex,
            "Utilities",
            Decimal::new(78_412, 2),
            day(fiscal_year, 1, 4)?,
        ),
        Transaction::revenue("Events", Decimal::from(640), day(fiscal_year, 2, 12)?)
            .with_description("Holiday social"),
        Transaction::expense(
            ExpenseType::Opex,
            "Pool Chemicals",
            Decimal::new(112_550, 2),
            day(fiscal_year, 6, 3)?,
        ),
    ];
    for tx in &transactions {
        store.add_transaction(tx).await?;
    }
    Ok(())
}
