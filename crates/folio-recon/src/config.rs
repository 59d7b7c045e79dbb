//! Flow configuration.

use crate::error::{ReconError, ReconResult};
use serde::{Deserialize, Serialize};

/// Configuration for the cash reconciliation flow.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CashFlowConfig {
    /// Ledger account mirroring the brokerage cash balance.
    pub account_id: String,
}

impl CashFlowConfig {
    pub fn validate(&self) -> ReconResult<()> {
        if self.account_id.is_empty() {
            return Err(ReconError::InvalidConfig(
                "cash account_id must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Configuration for the holding reconciliation flow.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HoldingFlowConfig {
    /// Ledger account mirroring the holding's value.
    pub account_id: String,
    /// Quote symbol for the equity (e.g., "S27.SI").
    pub symbol: String,
    /// Quote symbol for the FX pair (e.g., "GBPUSD=X").
    #[serde(default = "default_fx_pair")]
    pub fx_pair: String,
    /// Number of shares held. Fixed per configuration.
    pub shares: u32,
    /// Key under which the previous quote is cached.
    #[serde(default = "default_cache_key")]
    pub cache_key: String,
}

fn default_fx_pair() -> String {
    "GBPUSD=X".to_string()
}

fn default_cache_key() -> String {
    "holding".to_string()
}

impl HoldingFlowConfig {
    pub fn validate(&self) -> ReconResult<()> {
        if self.account_id.is_empty() {
            return Err(ReconError::InvalidConfig(
                "holding account_id must not be empty".to_string(),
            ));
        }
        if self.symbol.is_empty() {
            return Err(ReconError::InvalidConfig(
                "holding symbol must not be empty".to_string(),
            ));
        }
        if self.shares == 0 {
            return Err(ReconError::InvalidConfig(
                "shares must be positive".to_string(),
            ));
        }
        if self.cache_key.is_empty() {
            return Err(ReconError::InvalidConfig(
                "cache_key must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn holding_config() -> HoldingFlowConfig {
        HoldingFlowConfig {
            account_id: "acct-holding".to_string(),
            symbol: "S27.SI".to_string(),
            fx_pair: default_fx_pair(),
            shares: 54,
            cache_key: default_cache_key(),
        }
    }

    #[test]
    fn test_valid_configs() {
        assert!(CashFlowConfig {
            account_id: "acct-cash".to_string()
        }
        .validate()
        .is_ok());
        assert!(holding_config().validate().is_ok());
    }

    #[test]
    fn test_zero_shares_rejected() {
        let config = HoldingFlowConfig {
            shares: 0,
            ..holding_config()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_ids_rejected() {
        let config = HoldingFlowConfig {
            account_id: String::new(),
            ..holding_config()
        };
        assert!(config.validate().is_err());

        let config = CashFlowConfig {
            account_id: String::new(),
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_defaults_deserialize() {
        let config: HoldingFlowConfig = toml::from_str(
            r#"
            account_id = "acct-holding"
            symbol = "S27.SI"
            shares = 54
            "#,
        )
        .unwrap();
        assert_eq!(config.fx_pair, "GBPUSD=X");
        assert_eq!(config.cache_key, "holding");
    }
}
