//! Structured logging for folio-sync.
//!
//! Run-level events (fetches, postings, threshold skips, errors) are
//! emitted as structured tracing fields so scheduled runs can be
//! audited from the log stream alone.

pub mod error;
pub mod logging;

pub use error::{TelemetryError, TelemetryResult};
pub use logging::init_logging;
