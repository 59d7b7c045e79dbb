//! Collaborator trait definitions.
//!
//! The reconciliation runners consume the brokerage, quote source,
//! ledger service and quote cache through these seams, so every flow
//! can be exercised against in-process fakes.

use crate::money::{FxRate, Money, Price};
use crate::types::{CorrectiveTransaction, LedgerBalance, PrevQuote};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

/// Failure surfaced by a collaborator.
///
/// Collapses each client's error into the run-level taxonomy: a
/// configuration failure aborts before any network call, an upstream
/// failure aborts the current run, a store failure aborts a holding
/// run before the cache write.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Upstream error: {0}")]
    Upstream(String),

    #[error("Store error: {0}")]
    Store(String),
}

pub type SourceResult<T> = Result<T, SourceError>;

/// Read side of the brokerage account.
#[async_trait]
pub trait CashSource: Send + Sync {
    /// Total cash value, already in the ledger currency.
    async fn cash_total(&self) -> SourceResult<Money>;
}

/// Read side of the market quote source.
#[async_trait]
pub trait QuoteSource: Send + Sync {
    /// Current price and observation time for a symbol.
    async fn quote(&self, symbol: &str) -> SourceResult<(Price, DateTime<Utc>)>;

    /// Current rate for an FX pair symbol.
    async fn fx_rate(&self, pair: &str) -> SourceResult<FxRate>;
}

/// The budget-ledger service.
#[async_trait]
pub trait LedgerService: Send + Sync {
    /// Current balance of an account.
    async fn account_balance(&self, account_id: &str) -> SourceResult<LedgerBalance>;

    /// Submit a batch of corrective transactions, returning the ids
    /// the ledger assigned.
    async fn submit(&self, transactions: &[CorrectiveTransaction]) -> SourceResult<Vec<String>>;
}

/// The previous-quote cache carried between holding runs.
pub trait QuoteStore: Send + Sync {
    /// Load the cached quote for a key; `None` means no prior data.
    fn load(&self, key: &str) -> SourceResult<Option<PrevQuote>>;

    /// Overwrite the cached quote for a key.
    fn save(&self, key: &str, quote: &PrevQuote) -> SourceResult<()>;
}
