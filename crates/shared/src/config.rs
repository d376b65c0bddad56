//! Application configuration management.

use rust_decimal::Decimal;
use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Club-wide financial settings.
    #[serde(default)]
    pub club: ClubConfig,
    /// Report generation settings.
    #[serde(default)]
    pub report: ReportConfig,
    /// Logging settings.
    #[serde(default)]
    pub log: LogConfig,
}

/// Club configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ClubConfig {
    /// Display name of the club.
    #[serde(default = "default_club_name")]
    pub name: String,
    /// Year-end budgeted balance below which a warning is raised.
    #[serde(default = "default_low_balance_threshold")]
    pub low_balance_threshold: Decimal,
    /// Maximum share of outside-neighborhood members allowed by the bylaws.
    #[serde(default = "default_max_outside_percentage")]
    pub max_outside_percentage: Decimal,
}

fn default_club_name() -> String {
    "Club".to_string()
}

fn default_low_balance_threshold() -> Decimal {
    Decimal::from(20_000)
}

fn default_max_outside_percentage() -> Decimal {
    Decimal::new(50, 2)
}

impl Default for ClubConfig {
    fn default() -> Self {
        Self {
            name: default_club_name(),
            low_balance_threshold: default_low_balance_threshold(),
            max_outside_percentage: default_max_outside_percentage(),
        }
    }
}

/// Report configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ReportConfig {
    /// Path to the JSON snapshot the report binary loads.
    #[serde(default = "default_snapshot_path")]
    pub snapshot_path: String,
    /// Fiscal year to report on. Defaults to the fiscal year containing today.
    #[serde(default)]
    pub fiscal_year: Option<i32>,
    /// Fiscal month (0 = October) to report on. Defaults to the reporting
    /// month of the fiscal year.
    #[serde(default)]
    pub month: Option<u8>,
    /// Days ahead to look for upcoming maintenance.
    #[serde(default = "default_horizon_days")]
    pub maintenance_horizon_days: i64,
}

fn default_snapshot_path() -> String {
    "data/snapshot.json".to_string()
}

fn default_horizon_days() -> i64 {
    365
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            snapshot_path: default_snapshot_path(),
            fiscal_year: None,
            month: None,
            maintenance_horizon_days: default_horizon_days(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// `tracing` filter directive used when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

fn default_log_filter() -> String {
    "clubfin=info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("CLUBFIN").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_defaults_without_sources() {
        temp_env::with_vars_unset(
            [
                "CLUBFIN__CLUB__NAME",
                "CLUBFIN__CLUB__LOW_BALANCE_THRESHOLD",
                "CLUBFIN__REPORT__SNAPSHOT_PATH",
            ],
            || {
                let config = AppConfig::load().unwrap();
                assert_eq!(config.club.low_balance_threshold, dec!(20000));
                assert_eq!(config.club.max_outside_percentage, dec!(0.50));
                assert_eq!(config.report.snapshot_path, "data/snapshot.json");
                assert_eq!(config.report.maintenance_horizon_days, 365);
                assert_eq!(config.log.filter, "clubfin=info");
            },
        );
    }

    #[test]
    fn test_environment_overrides() {
        temp_env::with_vars(
            [
                ("CLUBFIN__CLUB__NAME", Some("Lakeside Swim Club")),
                ("CLUBFIN__CLUB__LOW_BALANCE_THRESHOLD", Some("15000")),
                ("CLUBFIN__REPORT__FISCAL_YEAR", Some("2025")),
            ],
            || {
                let config = AppConfig::load().unwrap();
                assert_eq!(config.club.name, "Lakeside Swim Club");
                assert_eq!(config.club.low_balance_threshold, dec!(15000));
                assert_eq!(config.report.fiscal_year, Some(2025));
            },
        );
    }
}
