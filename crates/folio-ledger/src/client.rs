//! HTTP client for the budget-ledger service.
//!
//! Two calls: read an account balance, submit a batch of corrective
//! transactions. The ledger expects a Bearer token.

use crate::error::{LedgerError, LedgerResult};
use crate::types::{
    AccountEnvelope, NewTransaction, PostTransactionsRequest, SubmissionEnvelope, SubmissionResult,
};
use folio_core::{CorrectiveTransaction, LedgerBalance};
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info};

/// Timeout bounding each ledger request.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Client for the budget-ledger API.
pub struct LedgerClient {
    client: Client,
    base_url: String,
    budget_id: String,
    token: String,
}

impl LedgerClient {
    /// Create a new ledger client.
    ///
    /// Fails with `MissingToken` before any network call when the
    /// token is absent or empty.
    pub fn new(
        base_url: impl Into<String>,
        budget_id: impl Into<String>,
        token: Option<String>,
    ) -> LedgerResult<Self> {
        let token = match token {
            Some(t) if !t.is_empty() => t,
            _ => return Err(LedgerError::MissingToken),
        };

        let client = Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .map_err(|e| LedgerError::HttpClient(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            budget_id: budget_id.into(),
            token,
        })
    }

    /// Fetch the current balance of a ledger account, in minor units.
    pub async fn fetch_account_balance(&self, account_id: &str) -> LedgerResult<LedgerBalance> {
        let url = format!(
            "{}/budgets/{}/accounts/{}",
            self.base_url, self.budget_id, account_id
        );
        debug!(%url, "Requesting ledger account");

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.token)
            .send()
            .await
            .map_err(|e| LedgerError::HttpClient(format!("HTTP request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LedgerError::HttpClient(format!("HTTP {status}: {body}")));
        }

        let envelope: AccountEnvelope = response
            .json()
            .await
            .map_err(|e| LedgerError::MalformedPayload(format!("Failed to parse account: {e}")))?;

        let account = envelope.data.account;
        info!(
            account_id = %account.id,
            balance_minor_units = account.balance,
            "Fetched ledger balance"
        );

        Ok(LedgerBalance::new(account.id, account.balance))
    }

    /// Submit a batch of corrective transactions.
    ///
    /// The batch is one or two entries per run; the ledger creates all
    /// of them or rejects the request as a whole.
    pub async fn post_transactions(
        &self,
        transactions: &[CorrectiveTransaction],
    ) -> LedgerResult<SubmissionResult> {
        let url = format!("{}/budgets/{}/transactions", self.base_url, self.budget_id);
        let request = PostTransactionsRequest {
            transactions: transactions.iter().map(NewTransaction::from).collect(),
        };
        debug!(%url, count = transactions.len(), "Submitting corrective transactions");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.token)
            .json(&request)
            .send()
            .await
            .map_err(|e| LedgerError::HttpClient(format!("HTTP request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LedgerError::HttpClient(format!("HTTP {status}: {body}")));
        }

        let envelope: SubmissionEnvelope = response.json().await.map_err(|e| {
            LedgerError::MalformedPayload(format!("Failed to parse submission result: {e}"))
        })?;

        info!(
            created = envelope.data.transaction_ids.len(),
            "Ledger accepted corrective transactions"
        );

        Ok(envelope.data)
    }
}

#[async_trait::async_trait]
impl folio_core::LedgerService for LedgerClient {
    async fn account_balance(&self, account_id: &str) -> folio_core::SourceResult<LedgerBalance> {
        Ok(self.fetch_account_balance(account_id).await?)
    }

    async fn submit(
        &self,
        transactions: &[CorrectiveTransaction],
    ) -> folio_core::SourceResult<Vec<String>> {
        let result = self.post_transactions(transactions).await?;
        Ok(result.transaction_ids)
    }
}
