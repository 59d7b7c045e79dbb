//! HTTP client for the market quote source.
//!
//! Fetches the equity's regular-market price and the GBP/USD rate from
//! the quote API's `/v7/finance/quote` endpoint. Both lookups share the
//! same wire shape; an FX pair is just a symbol like `GBPUSD=X`.

use crate::error::{QuoteError, QuoteResult};
use chrono::{DateTime, Utc};
use folio_core::{FxRate, Price};
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info};

/// Timeout bounding each quote request.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Top-level quote endpoint response.
#[derive(Debug, Deserialize)]
struct QuoteEnvelope {
    #[serde(rename = "quoteResponse")]
    quote_response: QuoteBody,
}

#[derive(Debug, Deserialize)]
struct QuoteBody {
    #[serde(default)]
    result: Vec<QuoteEntry>,
}

/// One quoted symbol. Fields beyond these are ignored.
#[derive(Debug, Deserialize)]
struct QuoteEntry {
    symbol: String,
    #[serde(rename = "regularMarketPrice")]
    regular_market_price: Option<Decimal>,
    /// Unix seconds of the observation; absent for some illiquid symbols.
    #[serde(rename = "regularMarketTime")]
    regular_market_time: Option<i64>,
}

/// Client for the market quote source.
pub struct QuoteClient {
    client: Client,
    base_url: String,
}

impl QuoteClient {
    /// Create a new quote client.
    ///
    /// # Arguments
    /// * `base_url` - Root of the quote API (e.g., "https://query1.finance.yahoo.com")
    pub fn new(base_url: impl Into<String>) -> QuoteResult<Self> {
        let client = Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .map_err(|e| QuoteError::HttpClient(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    /// Fetch the current price and observation time for a symbol.
    ///
    /// A missing observation time falls back to now; a missing price is
    /// an upstream error.
    pub async fn fetch_quote(&self, symbol: &str) -> QuoteResult<(Price, DateTime<Utc>)> {
        let entry = self.fetch_entry(symbol).await?;

        let price = entry
            .regular_market_price
            .ok_or_else(|| QuoteError::MalformedPayload(format!("{symbol}: no market price")))?;

        let observed_at = entry
            .regular_market_time
            .and_then(|secs| DateTime::from_timestamp(secs, 0))
            .unwrap_or_else(Utc::now);

        info!(symbol, %price, %observed_at, "Fetched quote");
        Ok((Price::new(price), observed_at))
    }

    /// Fetch the current rate for an FX pair symbol.
    ///
    /// A zero or negative rate is rejected here so no downstream
    /// computation ever divides by it.
    pub async fn fetch_fx_rate(&self, pair: &str) -> QuoteResult<FxRate> {
        let entry = self.fetch_entry(pair).await?;

        let rate = entry
            .regular_market_price
            .ok_or_else(|| QuoteError::MalformedPayload(format!("{pair}: no market price")))?;

        if rate <= Decimal::ZERO {
            return Err(QuoteError::InvalidRate(pair.to_string()));
        }

        info!(pair, %rate, "Fetched FX rate");
        Ok(FxRate::new(rate))
    }

    async fn fetch_entry(&self, symbol: &str) -> QuoteResult<QuoteEntry> {
        let url = format!("{}/v7/finance/quote", self.base_url);
        debug!(%url, symbol, "Requesting quote");

        let response = self
            .client
            .get(&url)
            .query(&[("symbols", symbol)])
            .send()
            .await
            .map_err(|e| QuoteError::HttpClient(format!("HTTP request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(QuoteError::HttpClient(format!("HTTP {status}: {body}")));
        }

        let envelope: QuoteEnvelope = response
            .json()
            .await
            .map_err(|e| QuoteError::MalformedPayload(format!("Failed to parse response: {e}")))?;

        envelope
            .quote_response
            .result
            .into_iter()
            .find(|entry| entry.symbol == symbol)
            .ok_or_else(|| QuoteError::MissingQuote(symbol.to_string()))
    }
}

#[async_trait::async_trait]
impl folio_core::QuoteSource for QuoteClient {
    async fn quote(&self, symbol: &str) -> folio_core::SourceResult<(Price, DateTime<Utc>)> {
        Ok(self.fetch_quote(symbol).await?)
    }

    async fn fx_rate(&self, pair: &str) -> folio_core::SourceResult<FxRate> {
        Ok(self.fetch_fx_rate(pair).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_quote_envelope_parsing() {
        let json = r#"{
            "quoteResponse": {
                "result": [
                    {"symbol": "S27.SI", "regularMarketPrice": 10.20, "regularMarketTime": 1754300000}
                ],
                "error": null
            }
        }"#;
        let envelope: QuoteEnvelope = serde_json::from_str(json).unwrap();
        let entry = &envelope.quote_response.result[0];
        assert_eq!(entry.symbol, "S27.SI");
        assert_eq!(entry.regular_market_price, Some(dec!(10.20)));
        assert_eq!(entry.regular_market_time, Some(1754300000));
    }

    #[test]
    fn test_quote_envelope_missing_fields() {
        let json = r#"{"quoteResponse": {"result": [{"symbol": "GBPUSD=X"}]}}"#;
        let envelope: QuoteEnvelope = serde_json::from_str(json).unwrap();
        let entry = &envelope.quote_response.result[0];
        assert!(entry.regular_market_price.is_none());
        assert!(entry.regular_market_time.is_none());
    }

    #[test]
    fn test_quote_envelope_empty_result() {
        let json = r#"{"quoteResponse": {"result": []}}"#;
        let envelope: QuoteEnvelope = serde_json::from_str(json).unwrap();
        assert!(envelope.quote_response.result.is_empty());
    }
}
