//! Quote-source error types.

use folio_core::SourceError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum QuoteError {
    #[error("HTTP client error: {0}")]
    HttpClient(String),

    #[error("No quote returned for symbol {0}")]
    MissingQuote(String),

    #[error("Malformed quote payload: {0}")]
    MalformedPayload(String),

    #[error("Non-positive FX rate for pair {0}")]
    InvalidRate(String),
}

pub type QuoteResult<T> = Result<T, QuoteError>;

impl From<QuoteError> for SourceError {
    fn from(e: QuoteError) -> Self {
        SourceError::Upstream(e.to_string())
    }
}
