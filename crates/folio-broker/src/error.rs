//! Brokerage client error types.

use folio_core::SourceError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BrokerError {
    #[error("Brokerage access token is not set")]
    MissingToken,

    #[error("HTTP client error: {0}")]
    HttpClient(String),

    #[error("Malformed brokerage payload: {0}")]
    MalformedPayload(String),
}

pub type BrokerResult<T> = Result<T, BrokerError>;

impl From<BrokerError> for SourceError {
    fn from(e: BrokerError) -> Self {
        match e {
            BrokerError::MissingToken => SourceError::Config(e.to_string()),
            BrokerError::HttpClient(_) | BrokerError::MalformedPayload(_) => {
                SourceError::Upstream(e.to_string())
            }
        }
    }
}
