//! Store error types.

use folio_core::SourceError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Invalid cache key: {0}")]
    InvalidKey(String),

    #[error("Malformed cache record for {key}: {detail}")]
    MalformedRecord { key: String, detail: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

impl From<StoreError> for SourceError {
    fn from(e: StoreError) -> Self {
        SourceError::Store(e.to_string())
    }
}
