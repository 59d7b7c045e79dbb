//! Budget-ledger REST client for folio-sync.
//!
//! The ledger service holds the authoritative local account balances
//! this component reconciles against. Reads are plain account lookups;
//! writes are small batches of corrective transactions.

pub mod client;
pub mod error;
pub mod types;

pub use client::LedgerClient;
pub use error::{LedgerError, LedgerResult};
pub use types::{NewTransaction, SubmissionResult};
