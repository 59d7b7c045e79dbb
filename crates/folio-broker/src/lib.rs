//! Brokerage REST client for folio-sync.
//!
//! One read-only call: the account's total cash value, reconciled
//! against the ledger by the cash flow.

pub mod client;
pub mod error;

pub use client::BrokerClient;
pub use error::{BrokerError, BrokerResult};
