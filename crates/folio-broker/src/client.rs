//! HTTP client for the brokerage cash endpoint.
//!
//! Reads the account's total cash value from
//! `/api/v0/equity/account/cash`. The brokerage expects its raw access
//! token in the `Authorization` header, no scheme prefix.

use crate::error::{BrokerError, BrokerResult};
use folio_core::Money;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info};

/// Timeout bounding the cash request.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Cash summary returned by the brokerage.
///
/// Only `total` is consumed; the remaining breakdown fields are
/// accepted and ignored.
#[derive(Debug, Deserialize)]
struct CashResponse {
    total: Decimal,
}

/// Client for the brokerage cash API.
pub struct BrokerClient {
    client: Client,
    base_url: String,
    token: String,
}

impl BrokerClient {
    /// Create a new brokerage client.
    ///
    /// Fails with `MissingToken` before any network call when the
    /// token is absent or empty.
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> BrokerResult<Self> {
        let token = match token {
            Some(t) if !t.is_empty() => t,
            _ => return Err(BrokerError::MissingToken),
        };

        let client = Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .map_err(|e| BrokerError::HttpClient(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            token,
        })
    }

    /// Fetch the account's total cash value, assumed to already be in
    /// the ledger currency.
    pub async fn fetch_cash_total(&self) -> BrokerResult<Money> {
        let url = format!("{}/api/v0/equity/account/cash", self.base_url);
        debug!(%url, "Requesting brokerage cash total");

        let response = self
            .client
            .get(&url)
            .header(reqwest::header::AUTHORIZATION, &self.token)
            .send()
            .await
            .map_err(|e| BrokerError::HttpClient(format!("HTTP request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(BrokerError::HttpClient(format!("HTTP {status}: {body}")));
        }

        let cash: CashResponse = response
            .json()
            .await
            .map_err(|e| BrokerError::MalformedPayload(format!("Failed to parse response: {e}")))?;

        info!(total = %cash.total, "Fetched brokerage cash total");
        Ok(Money::new(cash.total))
    }
}

#[async_trait::async_trait]
impl folio_core::CashSource for BrokerClient {
    async fn cash_total(&self) -> folio_core::SourceResult<Money> {
        Ok(self.fetch_cash_total().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_missing_token_rejected() {
        assert!(matches!(
            BrokerClient::new("https://live.example.com", None),
            Err(BrokerError::MissingToken)
        ));
        assert!(matches!(
            BrokerClient::new("https://live.example.com", Some(String::new())),
            Err(BrokerError::MissingToken)
        ));
    }

    #[test]
    fn test_cash_response_parsing() {
        let json = r#"{
            "free": 112.05,
            "total": 4210.33,
            "ppl": -12.4,
            "invested": 4098.28,
            "pieCash": 0,
            "blocked": null
        }"#;
        let cash: CashResponse = serde_json::from_str(json).unwrap();
        assert_eq!(cash.total, dec!(4210.33));
    }
}
