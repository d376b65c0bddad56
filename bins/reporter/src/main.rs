//! Clubfin board report
//!
//! Loads a club snapshot and prints the fiscal year's cash-flow projection
//! together with the board report for one month.
//!
//! Usage: clubfin-report
//!
//! The snapshot path, fiscal year and month come from configuration
//! (`CLUBFIN__REPORT__SNAPSHOT_PATH`, `CLUBFIN__REPORT__FISCAL_YEAR`,
//! `CLUBFIN__REPORT__MONTH`).

use std::sync::Arc;

use anyhow::Context;
use chrono::{NaiveDate, Utc};
use serde::Serialize;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use clubfin_core::fiscal::{FiscalMonth, FiscalYear, MonthInfo, fiscal_month_info};
use clubfin_core::projection::{ProjectionService, YearOverview};
use clubfin_core::reports::{BoardReporter, ReportData};
use clubfin_db::{MemoryStore, Snapshot};
use clubfin_shared::AppConfig;
use clubfin_shared::config::ReportConfig;

/// Everything printed by one run.
#[derive(Debug, Serialize)]
struct ReportOutput {
    club: String,
    fiscal_year: FiscalYear,
    month: MonthInfo,
    overview: YearOverview,
    #[serde(skip_serializing_if = "Option::is_none")]
    board_report: Option<ReportData>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("failed to load configuration")?;

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log.filter)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let snapshot = Snapshot::load(&config.report.snapshot_path)
        .with_context(|| format!("failed to load snapshot {}", config.report.snapshot_path))?;
    let store = Arc::new(MemoryStore::from_snapshot(&snapshot)?);
    info!(club = %config.club.name, club_id = %store.club_id(), "Snapshot ready");

    let today = Utc::now().date_naive();
    let (fiscal_year, month) = reporting_period(&config.report, today)?;
    info!(%fiscal_year, month = month.month_name(), "Building report");

    let overview = ProjectionService::new(Arc::clone(&store))
        .year_overview(fiscal_year, today)
        .await?;

    let board_report = match &overview {
        YearOverview::NoBudget { .. } => {
            warn!(%fiscal_year, "No budget for fiscal year; skipping board report");
            None
        }
        YearOverview::Ready(ready) => {
            for warning in &ready.balance_warnings {
                warn!(
                    month = %warning.month_name,
                    balance = %warning.balance,
                    threshold = %warning.threshold,
                    critical = warning.is_critical,
                    "Low year-end balance"
                );
            }
            let reporter = BoardReporter::new(Arc::clone(&store))
                .with_outside_limit(config.club.max_outside_percentage)
                .with_maintenance_horizon(config.report.maintenance_horizon_days);
            Some(reporter.board_report(fiscal_year, month, today).await?)
        }
    };

    let output = ReportOutput {
        club: config.club.name,
        fiscal_year,
        month: fiscal_month_info(month.value(), fiscal_year.value()),
        overview,
        board_report,
    };
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}

/// Fiscal year and month to report on.
///
/// Unset values default to the fiscal year containing `today` and that
/// year's reporting month.
fn reporting_period(
    report: &ReportConfig,
    today: NaiveDate,
) -> anyhow::Result<(FiscalYear, FiscalMonth)> {
    let fiscal_year = report
        .fiscal_year
        .map_or_else(|| FiscalYear::for_date(today), FiscalYear::new);
    let month = match report.month {
        Some(index) => FiscalMonth::try_from(index)?,
        None => fiscal_year.reporting_month(today),
    };
    Ok((fiscal_year, month))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_defaults_follow_today() {
        let (fy, month) = reporting_period(&ReportConfig::default(), date(2025, 2, 14)).unwrap();
        assert_eq!(fy, FiscalYear::new(2025));
        assert_eq!(month, FiscalMonth::new(4));
    }

    #[test]
    fn test_past_year_reports_september() {
        let report = ReportConfig {
            fiscal_year: Some(2024),
            ..ReportConfig::default()
        };
        let (fy, month) = reporting_period(&report, date(2025, 2, 14)).unwrap();
        assert_eq!(fy, FiscalYear::new(2024));
        assert_eq!(month, FiscalMonth::SEPTEMBER);
    }

    #[test]
    fn test_out_of_range_month_rejected() {
        let report = ReportConfig {
            month: Some(12),
            ..ReportConfig::default()
        };
        assert!(reporting_period(&report, date(2025, 2, 14)).is_err());
    }
}
