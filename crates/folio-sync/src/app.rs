//! Application orchestration.
//!
//! Owns the collaborator clients and the per-flow run locks, and maps
//! trigger-surface flow names onto the reconciliation runners. A flow
//! whose lock is held is rejected, not queued, so a slow run can never
//! pile up duplicate submissions behind itself.

use crate::config::{AppConfig, Secrets};
use crate::error::{AppError, AppResult};
use folio_broker::BrokerClient;
use folio_core::FlowKind;
use folio_ledger::LedgerClient;
use folio_persistence::QuoteCacheStore;
use folio_quotes::QuoteClient;
use folio_recon::{run_cash_flow, run_holding_flow, FlowReport};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{error, info, warn};

/// Main application.
pub struct Application {
    config: AppConfig,
    broker: BrokerClient,
    quotes: QuoteClient,
    ledger: LedgerClient,
    store: QuoteCacheStore,
    cash_lock: Mutex<()>,
    holding_lock: Mutex<()>,
}

impl Application {
    /// Create a new application.
    ///
    /// Client construction checks the tokens, so a missing secret
    /// fails here, before any network call.
    pub fn new(config: AppConfig, secrets: Secrets) -> AppResult<Self> {
        let broker = BrokerClient::new(&config.broker.base_url, secrets.broker_token)?;
        let quotes = QuoteClient::new(&config.quotes.base_url)?;
        let ledger = LedgerClient::new(
            &config.ledger.base_url,
            &config.ledger.budget_id,
            secrets.ledger_token,
        )?;
        let store = QuoteCacheStore::new(&config.store.data_dir);

        Ok(Self {
            config,
            broker,
            quotes,
            ledger,
            store,
            cash_lock: Mutex::new(()),
            holding_lock: Mutex::new(()),
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Run the named flow(s) sequentially.
    ///
    /// `both` runs cash first, then holding, and stops at the first
    /// failure, mirroring one scheduled tick.
    pub async fn run_flow(&self, flow: FlowKind) -> AppResult<Vec<FlowReport>> {
        match flow {
            FlowKind::Cash => Ok(vec![self.run_cash().await?]),
            FlowKind::Holding => Ok(vec![self.run_holding().await?]),
            FlowKind::Both => {
                let cash = self.run_cash().await?;
                let holding = self.run_holding().await?;
                Ok(vec![cash, holding])
            }
        }
    }

    async fn run_cash(&self) -> AppResult<FlowReport> {
        let Ok(_guard) = self.cash_lock.try_lock() else {
            warn!("Cash flow already in flight, rejecting trigger");
            return Err(AppError::FlowBusy(FlowKind::Cash));
        };

        info!("Cash reconciliation run starting");
        let report = run_cash_flow(&self.config.cash, &self.broker, &self.ledger).await?;
        info!(posted = report.posted(), "Cash reconciliation run finished");
        Ok(FlowReport::Cash(report))
    }

    async fn run_holding(&self) -> AppResult<FlowReport> {
        let Ok(_guard) = self.holding_lock.try_lock() else {
            warn!("Holding flow already in flight, rejecting trigger");
            return Err(AppError::FlowBusy(FlowKind::Holding));
        };

        info!("Holding reconciliation run starting");
        let report =
            run_holding_flow(&self.config.holding, &self.quotes, &self.ledger, &self.store)
                .await?;
        info!(
            posted = report.posted_count,
            "Holding reconciliation run finished"
        );
        Ok(FlowReport::Holding(report))
    }

    /// Run both flows on the configured interval, forever.
    ///
    /// A failed tick is logged and the next tick proceeds; the
    /// scheduler itself never stops.
    pub async fn run_scheduler(self: Arc<Self>) {
        let period = Duration::from_secs(self.config.scheduler.interval_secs);
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

        info!(interval_secs = period.as_secs(), "Scheduler started");
        loop {
            interval.tick().await;
            match self.run_flow(FlowKind::Both).await {
                Ok(reports) => info!(flows = reports.len(), "Scheduled run finished"),
                Err(e) => error!(error = %e, "Scheduled run failed"),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use folio_broker::BrokerError;
    use folio_ledger::LedgerError;

    fn config() -> AppConfig {
        toml::from_str(
            r#"
            [ledger]
            budget_id = "budget-1"

            [cash]
            account_id = "acct-cash"

            [holding]
            account_id = "acct-holding"
            symbol = "S27.SI"
            shares = 54
            "#,
        )
        .unwrap()
    }

    fn secrets() -> Secrets {
        Secrets {
            ledger_token: Some("ledger-token".to_string()),
            broker_token: Some("broker-token".to_string()),
        }
    }

    #[test]
    fn test_missing_broker_token_fails_at_construction() {
        let result = Application::new(
            config(),
            Secrets {
                broker_token: None,
                ..secrets()
            },
        );
        assert!(matches!(
            result,
            Err(AppError::Broker(BrokerError::MissingToken))
        ));
    }

    #[test]
    fn test_missing_ledger_token_fails_at_construction() {
        let result = Application::new(
            config(),
            Secrets {
                ledger_token: None,
                ..secrets()
            },
        );
        assert!(matches!(
            result,
            Err(AppError::Ledger(LedgerError::MissingToken))
        ));
    }

    #[tokio::test]
    async fn test_in_flight_flow_rejects_trigger() {
        let app = Application::new(config(), secrets()).unwrap();

        let _held = app.cash_lock.try_lock().unwrap();
        let result = app.run_cash().await;

        assert!(matches!(
            result,
            Err(AppError::FlowBusy(FlowKind::Cash))
        ));
    }
}
