//! Delta computation and thresholding.
//!
//! The cash flow posts the plain difference between the brokerage
//! total and the ledger balance. The holding flow decomposes the value
//! change since the previous run into a price effect (valued at the
//! current FX rate) and an FX effect (valued at the previous price):
//!
//! ```text
//! price_effect = shares * (P_curr - P_prev) / R_curr
//! fx_effect    = shares * P_prev * (1/R_curr - 1/R_prev)
//! ```
//!
//! The sum of the two effects approximates the total value change;
//! the second-order FX-times-price cross term is the residual.

use crate::error::{ReconError, ReconResult};
use folio_core::{Money, PrevQuote, QuoteSnapshot};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Minimum magnitude, in ledger-currency units, a difference must
/// reach to be posted. The boundary is inclusive.
pub const MIN_POSTABLE: Decimal = dec!(0.01);

/// Difference between the brokerage total and the ledger balance.
///
/// Positive means the ledger is behind and the corrective transaction
/// increases the account.
#[inline]
pub fn cash_difference(brokerage_total: Money, ledger_balance: Money) -> Money {
    brokerage_total - ledger_balance
}

/// The decomposed value change of a holding since the previous run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HoldingEffects {
    /// Change attributable to price movement, in the ledger currency.
    pub price_effect: Money,
    /// Change attributable to FX movement, in the ledger currency.
    pub fx_effect: Money,
    /// The previous quote the effects were computed against. On a
    /// bootstrap run this is seeded from the current snapshot.
    pub previous: PrevQuote,
    /// Whether this run seeded the cache (no prior data existed).
    pub bootstrap: bool,
}

impl HoldingEffects {
    /// Sum of both effects; approximates the total value change.
    pub fn total(&self) -> Money {
        self.price_effect + self.fx_effect
    }
}

/// Decompose the value change of `shares` between `previous` and
/// `current` into price and FX effects.
///
/// With no previous quote the current pair seeds the comparison, so
/// both effects are exactly zero by construction. A zero FX rate on
/// either side is rejected before any division.
pub fn decompose_value_change(
    shares: u32,
    current: &QuoteSnapshot,
    previous: Option<PrevQuote>,
) -> ReconResult<HoldingEffects> {
    if current.fx_rate.is_zero() {
        return Err(ReconError::ZeroFxRate("current"));
    }

    let bootstrap = previous.is_none();
    let previous = previous.unwrap_or_else(|| PrevQuote::from(*current));

    if previous.fx_rate.is_zero() {
        return Err(ReconError::ZeroFxRate("previous"));
    }

    let shares = Decimal::from(shares);
    let p_curr = current.price.inner();
    let p_prev = previous.price.inner();
    let r_curr = current.fx_rate.inner();
    let r_prev = previous.fx_rate.inner();

    let price_effect = shares * (p_curr - p_prev) / r_curr;
    let fx_effect = shares * p_prev * (Decimal::ONE / r_curr - Decimal::ONE / r_prev);

    Ok(HoldingEffects {
        price_effect: Money::new(price_effect),
        fx_effect: Money::new(fx_effect),
        previous,
        bootstrap,
    })
}
