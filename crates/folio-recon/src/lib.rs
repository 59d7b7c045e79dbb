//! Reconciliation flows for folio-sync.
//!
//! This crate holds the only non-trivial arithmetic in the system:
//! - `delta`: cash difference, price/FX decomposition, thresholding
//! - `memo`: corrective-transaction construction with the operator
//!   memo formats
//! - `runner`: the cash and holding flows, wired to collaborators
//!   through the `folio-core` trait seams
//! - `report`: per-run summaries for the CLI and HTTP trigger

pub mod config;
pub mod delta;
pub mod error;
pub mod memo;
pub mod report;
pub mod runner;

pub use config::{CashFlowConfig, HoldingFlowConfig};
pub use delta::{cash_difference, decompose_value_change, HoldingEffects, MIN_POSTABLE};
pub use error::{ReconError, ReconResult};
pub use memo::{PAYEE_FX, PAYEE_STOCK};
pub use report::{CashRunReport, FlowReport, HoldingRunReport};
pub use runner::{run_cash_flow, run_holding_flow};
