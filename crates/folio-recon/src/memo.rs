//! Corrective-transaction construction.
//!
//! Memo strings and payee labels are part of the operator-facing
//! contract: the cash flow stamps the wall-clock sync time, the price
//! effect records the observed price and its timestamp, and the FX
//! effect records the rate. The two formats differ deliberately and
//! are kept as-is.

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::{Europe::London, Tz};
use folio_core::{CorrectiveTransaction, FxRate, Money, Price};

/// Payee label for the cash difference and the price effect.
pub const PAYEE_STOCK: &str = "Stock";

/// Payee label for the FX effect.
pub const PAYEE_FX: &str = "USD-GBP FX";

/// Timezone all memo timestamps and transaction dates are rendered in.
pub const MEMO_TZ: Tz = London;

fn format_local(ts: DateTime<Utc>) -> String {
    ts.with_timezone(&MEMO_TZ).format("%d/%m/%Y %H:%M").to_string()
}

/// Calendar date a transaction posted at `now` carries.
pub fn transaction_date(now: DateTime<Utc>) -> NaiveDate {
    now.with_timezone(&MEMO_TZ).date_naive()
}

/// Cash-difference transaction: the memo is just the sync time.
pub fn cash_transaction(
    account_id: &str,
    diff: Money,
    now: DateTime<Utc>,
) -> CorrectiveTransaction {
    CorrectiveTransaction {
        account_id: account_id.to_string(),
        date: transaction_date(now),
        amount_minor_units: diff.to_minor_units_rounded(),
        payee_label: PAYEE_STOCK.to_string(),
        memo: format_local(now),
    }
}

/// Price-effect transaction: the memo records the observed price and
/// its observation time.
pub fn price_effect_transaction(
    account_id: &str,
    effect: Money,
    price: Price,
    observed_at: DateTime<Utc>,
    now: DateTime<Utc>,
) -> CorrectiveTransaction {
    CorrectiveTransaction {
        account_id: account_id.to_string(),
        date: transaction_date(now),
        amount_minor_units: effect.to_minor_units_truncated(),
        payee_label: PAYEE_STOCK.to_string(),
        memo: format!(
            "Price: USD {:.2} DT: {}",
            price.inner(),
            format_local(observed_at)
        ),
    }
}

/// FX-effect transaction: the memo records the rate used.
pub fn fx_effect_transaction(
    account_id: &str,
    effect: Money,
    rate: FxRate,
    now: DateTime<Utc>,
) -> CorrectiveTransaction {
    CorrectiveTransaction {
        account_id: account_id.to_string(),
        date: transaction_date(now),
        amount_minor_units: effect.to_minor_units_truncated(),
        payee_label: PAYEE_FX.to_string(),
        memo: format!("USD/GBP: {:.5}", rate.inner()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    fn fixed_now() -> DateTime<Utc> {
        // 14:30 UTC on an August day is 15:30 in London (BST).
        Utc.with_ymd_and_hms(2026, 8, 6, 14, 30, 0).unwrap()
    }

    #[test]
    fn test_cash_transaction_memo_is_local_time() {
        let txn = cash_transaction("acct-cash", Money::new(dec!(10.33)), fixed_now());
        assert_eq!(txn.memo, "06/08/2026 15:30");
        assert_eq!(txn.payee_label, "Stock");
        assert_eq!(txn.amount_minor_units, 10330);
        assert_eq!(txn.date.to_string(), "2026-08-06");
    }

    #[test]
    fn test_price_effect_memo_format() {
        let observed = Utc.with_ymd_and_hms(2026, 8, 6, 13, 5, 0).unwrap();
        let txn = price_effect_transaction(
            "acct-holding",
            Money::new(dec!(8.4375)),
            Price::new(dec!(10.2)),
            observed,
            fixed_now(),
        );
        assert_eq!(txn.memo, "Price: USD 10.20 DT: 06/08/2026 14:05");
        assert_eq!(txn.payee_label, "Stock");
        assert_eq!(txn.amount_minor_units, 8437);
    }

    #[test]
    fn test_fx_effect_memo_format() {
        let txn = fx_effect_transaction(
            "acct-holding",
            Money::new(dec!(-6.4904)),
            FxRate::new(dec!(1.28)),
            fixed_now(),
        );
        assert_eq!(txn.memo, "USD/GBP: 1.28000");
        assert_eq!(txn.payee_label, "USD-GBP FX");
        assert_eq!(txn.amount_minor_units, -6490);
    }

    #[test]
    fn test_transaction_date_rolls_with_local_midnight() {
        // 23:30 UTC on 6 Aug is already 7 Aug in London during BST.
        let late = Utc.with_ymd_and_hms(2026, 8, 6, 23, 30, 0).unwrap();
        assert_eq!(transaction_date(late).to_string(), "2026-08-07");
    }
}
