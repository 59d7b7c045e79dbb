//! Domain types shared across the reconciliation flows.
//!
//! Contains the per-run quote snapshot, the ledger-side balance view,
//! the corrective transaction submitted to the ledger service, and the
//! cached previous quote carried between runs.

use crate::error::CoreError;
use crate::money::{FxRate, Money, Price};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Market data observed at the start of a holding run.
///
/// Immutable after creation; fetched fresh every run and discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteSnapshot {
    /// Per-share price in the source currency.
    pub price: Price,
    /// Source-currency units per target-currency unit.
    pub fx_rate: FxRate,
    /// When the quote source observed the price.
    pub observed_at: DateTime<Utc>,
}

impl QuoteSnapshot {
    pub fn new(price: Price, fx_rate: FxRate, observed_at: DateTime<Utc>) -> Self {
        Self {
            price,
            fx_rate,
            observed_at,
        }
    }

    /// Value of `shares` at this snapshot, in the ledger currency.
    ///
    /// Returns `None` for a zero FX rate.
    pub fn holding_value(&self, shares: u32) -> Option<Money> {
        self.fx_rate
            .to_target(Decimal::from(shares) * self.price.inner())
    }
}

/// The price/rate pair persisted between holding runs.
///
/// This is the only entity with cross-run lifetime. Absence means no
/// prior data, which is a valid first-run state rather than an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrevQuote {
    pub price: Price,
    pub fx_rate: FxRate,
}

impl PrevQuote {
    pub fn new(price: Price, fx_rate: FxRate) -> Self {
        Self { price, fx_rate }
    }

    /// Value of `shares` at the cached quote, in the ledger currency.
    ///
    /// Returns `None` for a zero FX rate.
    pub fn holding_value(&self, shares: u32) -> Option<Money> {
        self.fx_rate
            .to_target(Decimal::from(shares) * self.price.inner())
    }
}

impl From<QuoteSnapshot> for PrevQuote {
    fn from(snapshot: QuoteSnapshot) -> Self {
        Self {
            price: snapshot.price,
            fx_rate: snapshot.fx_rate,
        }
    }
}

/// An account balance as reported by the ledger service.
///
/// Read-only from this component's perspective.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerBalance {
    pub account_id: String,
    /// Integer count of currency subunits (milliunits).
    pub balance_minor_units: i64,
}

impl LedgerBalance {
    pub fn new(account_id: impl Into<String>, balance_minor_units: i64) -> Self {
        Self {
            account_id: account_id.into(),
            balance_minor_units,
        }
    }

    /// Balance in major currency units.
    pub fn balance(&self) -> Money {
        Money::from_minor_units(self.balance_minor_units)
    }
}

/// A corrective transaction to be submitted to the ledger service.
///
/// Never mutated after submission; the ledger service assigns no
/// identity this component depends on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorrectiveTransaction {
    pub account_id: String,
    pub date: NaiveDate,
    /// Signed amount in minor units; positive increases the account.
    pub amount_minor_units: i64,
    pub payee_label: String,
    pub memo: String,
}

/// Which reconciliation flow a trigger names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlowKind {
    Cash,
    Holding,
    Both,
}

impl FlowKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cash => "cash",
            Self::Holding => "holding",
            Self::Both => "both",
        }
    }
}

impl fmt::Display for FlowKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FlowKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cash" => Ok(Self::Cash),
            "holding" => Ok(Self::Holding),
            "both" => Ok(Self::Both),
            other => Err(CoreError::UnknownFlow(other.to_string())),
        }
    }
}
