//! folio-sync: scheduled reconciliation of brokerage positions
//! against a budget ledger.
//!
//! Two flows share one shape: read external state, diff it against
//! the ledger, post a corrective transaction when the gap clears the
//! threshold. The application layer adds per-flow run locks, a timer,
//! and an HTTP trigger/health surface.

pub mod app;
pub mod config;
pub mod error;
pub mod server;

pub use app::Application;
pub use config::{AppConfig, Secrets, BROKER_TOKEN_ENV, CONFIG_ENV, LEDGER_TOKEN_ENV};
pub use error::{AppError, AppResult};
