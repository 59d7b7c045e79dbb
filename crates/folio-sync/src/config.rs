//! Application configuration.
//!
//! Endpoints, account ids and flow parameters come from a TOML file;
//! access tokens come from the environment so they never land in a
//! committed config.

use crate::error::{AppError, AppResult};
use folio_recon::{CashFlowConfig, HoldingFlowConfig};
use serde::{Deserialize, Serialize};

/// Environment variable naming the config file.
pub const CONFIG_ENV: &str = "FOLIO_CONFIG";

/// Environment variable holding the ledger access token.
pub const LEDGER_TOKEN_ENV: &str = "FOLIO_LEDGER_TOKEN";

/// Environment variable holding the brokerage access token.
pub const BROKER_TOKEN_ENV: &str = "FOLIO_BROKER_TOKEN";

/// Brokerage endpoint configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrokerConfig {
    #[serde(default = "default_broker_url")]
    pub base_url: String,
}

fn default_broker_url() -> String {
    "https://live.trading212.com".to_string()
}

impl Default for BrokerConfig {
    fn default() -> Self {
        Self {
            base_url: default_broker_url(),
        }
    }
}

/// Quote-source endpoint configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuotesConfig {
    #[serde(default = "default_quotes_url")]
    pub base_url: String,
}

fn default_quotes_url() -> String {
    "https://query1.finance.yahoo.com".to_string()
}

impl Default for QuotesConfig {
    fn default() -> Self {
        Self {
            base_url: default_quotes_url(),
        }
    }
}

/// Ledger endpoint configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerConfig {
    #[serde(default = "default_ledger_url")]
    pub base_url: String,
    /// Budget the reconciled accounts live in.
    pub budget_id: String,
}

fn default_ledger_url() -> String {
    "https://api.ynab.com/v1".to_string()
}

/// Quote cache location.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
}

fn default_data_dir() -> String {
    "./data/cache".to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

/// Timer configuration for serve mode.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulerConfig {
    /// Seconds between scheduled runs of both flows.
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
}

fn default_interval_secs() -> u64 {
    3600
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_interval_secs(),
        }
    }
}

/// HTTP trigger configuration for serve mode.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriggerConfig {
    /// Whether the HTTP trigger/health server is started.
    #[serde(default = "default_trigger_enabled")]
    pub enabled: bool,
    #[serde(default = "default_trigger_port")]
    pub port: u16,
}

fn default_trigger_enabled() -> bool {
    true
}

fn default_trigger_port() -> u16 {
    8080
}

impl Default for TriggerConfig {
    fn default() -> Self {
        Self {
            enabled: default_trigger_enabled(),
            port: default_trigger_port(),
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub broker: BrokerConfig,
    #[serde(default)]
    pub quotes: QuotesConfig,
    pub ledger: LedgerConfig,
    pub cash: CashFlowConfig,
    pub holding: HoldingFlowConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub scheduler: SchedulerConfig,
    #[serde(default)]
    pub trigger: TriggerConfig,
}

impl AppConfig {
    /// Load from a specific file.
    pub fn from_file(path: &str) -> AppResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| AppError::Config(format!("Failed to read config {path}: {e}")))?;

        toml::from_str(&content)
            .map_err(|e| AppError::Config(format!("Failed to parse config {path}: {e}")))
    }

    /// Validate identifiers and flow parameters.
    ///
    /// Runs before any client is constructed, so a bad config never
    /// reaches the network.
    pub fn validate(&self) -> AppResult<()> {
        if self.ledger.budget_id.is_empty() {
            return Err(AppError::Config("ledger.budget_id must be set".to_string()));
        }
        self.cash.validate()?;
        self.holding.validate()?;
        if self.scheduler.interval_secs == 0 {
            return Err(AppError::Config(
                "scheduler.interval_secs must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// Access tokens, resolved from the environment.
#[derive(Debug, Clone)]
pub struct Secrets {
    pub ledger_token: Option<String>,
    pub broker_token: Option<String>,
}

impl Secrets {
    /// Read tokens from the environment. Presence is not checked here;
    /// each client rejects a missing token at construction.
    pub fn from_env() -> Self {
        Self {
            ledger_token: std::env::var(LEDGER_TOKEN_ENV).ok(),
            broker_token: std::env::var(BROKER_TOKEN_ENV).ok(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"
        [ledger]
        budget_id = "budget-1"

        [cash]
        account_id = "acct-cash"

        [holding]
        account_id = "acct-holding"
        symbol = "S27.SI"
        shares = 54
    "#;

    #[test]
    fn test_minimal_config_parses_with_defaults() {
        let config: AppConfig = toml::from_str(MINIMAL).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.broker.base_url, "https://live.trading212.com");
        assert_eq!(config.ledger.base_url, "https://api.ynab.com/v1");
        assert_eq!(config.scheduler.interval_secs, 3600);
        assert_eq!(config.trigger.port, 8080);
        assert!(config.trigger.enabled);
        assert_eq!(config.holding.fx_pair, "GBPUSD=X");
    }

    #[test]
    fn test_empty_budget_id_rejected() {
        let mut config: AppConfig = toml::from_str(MINIMAL).unwrap();
        config.ledger.budget_id.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_interval_rejected() {
        let mut config: AppConfig = toml::from_str(MINIMAL).unwrap();
        config.scheduler.interval_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_round_trips_through_toml() {
        let config: AppConfig = toml::from_str(MINIMAL).unwrap();
        let rendered = toml::to_string(&config).unwrap();
        let reparsed: AppConfig = toml::from_str(&rendered).unwrap();
        assert_eq!(reparsed.holding.shares, 54);
        assert_eq!(reparsed.cash.account_id, "acct-cash");
    }
}
