//! Application error types.

use folio_core::FlowKind;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Broker error: {0}")]
    Broker(#[from] folio_broker::BrokerError),

    #[error("Quote error: {0}")]
    Quote(#[from] folio_quotes::QuoteError),

    #[error("Ledger error: {0}")]
    Ledger(#[from] folio_ledger::LedgerError),

    #[error("Reconciliation error: {0}")]
    Recon(#[from] folio_recon::ReconError),

    #[error("Flow {0} is already running")]
    FlowBusy(FlowKind),
}

pub type AppResult<T> = Result<T, AppError>;
