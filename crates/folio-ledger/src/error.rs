//! Ledger client error types.

use folio_core::SourceError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("Ledger access token is not set")]
    MissingToken,

    #[error("HTTP client error: {0}")]
    HttpClient(String),

    #[error("Malformed ledger payload: {0}")]
    MalformedPayload(String),
}

pub type LedgerResult<T> = Result<T, LedgerError>;

impl From<LedgerError> for SourceError {
    fn from(e: LedgerError) -> Self {
        match e {
            LedgerError::MissingToken => SourceError::Config(e.to_string()),
            LedgerError::HttpClient(_) | LedgerError::MalformedPayload(_) => {
                SourceError::Upstream(e.to_string())
            }
        }
    }
}
