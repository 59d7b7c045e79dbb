//! Reconciliation error types.

use folio_core::SourceError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReconError {
    /// A zero FX rate reached the delta computation. Guarded before
    /// any division; treated like any other bad upstream payload.
    #[error("Zero FX rate in {0} quote")]
    ZeroFxRate(&'static str),

    #[error("Invalid flow configuration: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Source(#[from] SourceError),
}

pub type ReconResult<T> = Result<T, ReconError>;
