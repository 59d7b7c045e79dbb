//! Wire types for the budget-ledger API.
//!
//! The ledger nests every payload under a `data` envelope and counts
//! amounts in milliunits.

use chrono::NaiveDate;
use folio_core::CorrectiveTransaction;
use serde::{Deserialize, Serialize};

/// Envelope around an account read.
#[derive(Debug, Deserialize)]
pub struct AccountEnvelope {
    pub data: AccountData,
}

#[derive(Debug, Deserialize)]
pub struct AccountData {
    pub account: Account,
}

/// Account fields consumed by reconciliation. The ledger returns more
/// (name, type, cleared/uncleared split); only id and balance matter
/// here.
#[derive(Debug, Deserialize)]
pub struct Account {
    pub id: String,
    /// Balance in milliunits.
    pub balance: i64,
}

/// One transaction in a submission batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTransaction {
    pub account_id: String,
    pub date: NaiveDate,
    /// Signed milliunit amount.
    pub amount: i64,
    pub payee_name: String,
    pub memo: String,
}

impl From<&CorrectiveTransaction> for NewTransaction {
    fn from(txn: &CorrectiveTransaction) -> Self {
        Self {
            account_id: txn.account_id.clone(),
            date: txn.date,
            amount: txn.amount_minor_units,
            payee_name: txn.payee_label.clone(),
            memo: txn.memo.clone(),
        }
    }
}

/// Submission request body.
#[derive(Debug, Serialize)]
pub struct PostTransactionsRequest {
    pub transactions: Vec<NewTransaction>,
}

/// Envelope around a submission response.
#[derive(Debug, Deserialize)]
pub struct SubmissionEnvelope {
    pub data: SubmissionResult,
}

/// Outcome of a transaction submission.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmissionResult {
    /// Ids the ledger assigned to the created transactions.
    #[serde(default)]
    pub transaction_ids: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_envelope_parsing() {
        let json = r#"{
            "data": {
                "account": {
                    "id": "8d74bce4-3b5f-41eb-bb9d-976c62ba4a2b",
                    "name": "S27 Index",
                    "balance": 425310,
                    "cleared_balance": 425310
                }
            }
        }"#;
        let envelope: AccountEnvelope = serde_json::from_str(json).unwrap();
        assert_eq!(envelope.data.account.balance, 425310);
    }

    #[test]
    fn test_post_request_serialization() {
        let request = PostTransactionsRequest {
            transactions: vec![NewTransaction {
                account_id: "acct-1".to_string(),
                date: NaiveDate::from_ymd_opt(2026, 8, 6).unwrap(),
                amount: 8437,
                payee_name: "Stock".to_string(),
                memo: "Price: USD 10.20 DT: 06/08/2026 14:30".to_string(),
            }],
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["transactions"][0]["date"], "2026-08-06");
        assert_eq!(json["transactions"][0]["amount"], 8437);
        assert_eq!(json["transactions"][0]["payee_name"], "Stock");
    }

    #[test]
    fn test_submission_envelope_parsing() {
        let json = r#"{"data": {"transaction_ids": ["t-1", "t-2"], "duplicate_import_ids": []}}"#;
        let envelope: SubmissionEnvelope = serde_json::from_str(json).unwrap();
        assert_eq!(envelope.data.transaction_ids, vec!["t-1", "t-2"]);
    }
}
