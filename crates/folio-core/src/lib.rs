//! Core domain types for the folio-sync reconciler.
//!
//! This crate provides the fundamental types used throughout the system:
//! - `Money`, `Price`, `FxRate`: precision-safe numeric types
//! - `QuoteSnapshot`, `PrevQuote`: per-run and cross-run market data
//! - `LedgerBalance`, `CorrectiveTransaction`: the ledger-facing model
//! - `FlowKind`: trigger-surface flow names
//! - collaborator traits (`CashSource`, `QuoteSource`, `LedgerService`,
//!   `QuoteStore`) consumed by the reconciliation runners

pub mod error;
pub mod money;
pub mod sources;
pub mod types;

pub use error::{CoreError, Result};
pub use money::{FxRate, Money, Price, MINOR_UNITS_PER_UNIT};
pub use sources::{
    CashSource, LedgerService, QuoteSource, QuoteStore, SourceError, SourceResult,
};
pub use types::{
    CorrectiveTransaction, FlowKind, LedgerBalance, PrevQuote, QuoteSnapshot,
};
