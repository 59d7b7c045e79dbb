//! Run reports.
//!
//! Each flow returns a small serializable summary of what it saw and
//! what it posted, surfaced through the CLI and the HTTP trigger.

use folio_core::{Money, PrevQuote, QuoteSnapshot};
use serde::Serialize;

/// Outcome of one cash reconciliation run.
#[derive(Debug, Clone, Serialize)]
pub struct CashRunReport {
    /// Brokerage total, ledger currency.
    pub brokerage_total: Money,
    /// Ledger balance at run start, ledger currency.
    pub ledger_balance: Money,
    /// Signed difference `brokerage_total - ledger_balance`.
    pub difference: Money,
    /// Minor-unit amount posted, if the difference cleared the threshold.
    pub posted_minor_units: Option<i64>,
    /// Ids the ledger assigned to the posted transaction.
    pub transaction_ids: Vec<String>,
}

impl CashRunReport {
    pub fn posted(&self) -> bool {
        self.posted_minor_units.is_some()
    }
}

/// Outcome of one holding reconciliation run.
#[derive(Debug, Clone, Serialize)]
pub struct HoldingRunReport {
    /// Quote pair observed this run.
    pub snapshot: QuoteSnapshot,
    /// Quote pair the effects were computed against.
    pub previous: PrevQuote,
    /// Whether this run seeded the cache.
    pub bootstrap: bool,
    /// Price effect, ledger currency.
    pub price_effect: Money,
    /// FX effect, ledger currency.
    pub fx_effect: Money,
    /// Holding value at the current quote, ledger currency.
    pub current_value: Money,
    /// Ledger balance at run start, ledger currency.
    pub ledger_balance: Money,
    /// Number of transactions posted (0, 1 or 2).
    pub posted_count: usize,
    /// Ids the ledger assigned to the posted transactions.
    pub transaction_ids: Vec<String>,
}

impl HoldingRunReport {
    /// Drift between the holding's market value and the ledger balance
    /// at run start. Log-only diagnostic.
    pub fn drift(&self) -> Money {
        self.current_value - self.ledger_balance
    }
}

/// Report for a single triggered flow.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "flow", rename_all = "lowercase")]
pub enum FlowReport {
    Cash(CashRunReport),
    Holding(HoldingRunReport),
}
