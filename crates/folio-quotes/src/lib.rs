//! Quote-source REST client for folio-sync.
//!
//! Provides the two market reads a holding run needs: the equity's
//! current price (with its observation time) and the GBP/USD rate.

pub mod client;
pub mod error;

pub use client::QuoteClient;
pub use error::{QuoteError, QuoteResult};
