//! The two reconciliation flows.
//!
//! A run is one sequential unit of work: fetch external state, compute
//! the delta, conditionally post, and (for the holding flow) persist
//! the quote pair for the next run. Nothing is retried; the first
//! failure aborts the run with no partial writes.

use crate::config::{CashFlowConfig, HoldingFlowConfig};
use crate::delta::{cash_difference, decompose_value_change, MIN_POSTABLE};
use crate::error::ReconResult;
use crate::memo::{cash_transaction, fx_effect_transaction, price_effect_transaction};
use crate::report::{CashRunReport, HoldingRunReport};
use chrono::Utc;
use folio_core::{CashSource, LedgerService, PrevQuote, QuoteSnapshot, QuoteSource, QuoteStore};
use tracing::info;

/// Run the cash reconciliation flow once.
///
/// Posts at most one corrective transaction, equal to the difference
/// between the brokerage total and the ledger balance.
pub async fn run_cash_flow(
    config: &CashFlowConfig,
    broker: &impl CashSource,
    ledger: &impl LedgerService,
) -> ReconResult<CashRunReport> {
    config.validate()?;

    let brokerage_total = broker.cash_total().await?;
    let balance = ledger.account_balance(&config.account_id).await?;
    let ledger_balance = balance.balance();

    let difference = cash_difference(brokerage_total, ledger_balance);
    info!(
        %brokerage_total,
        %ledger_balance,
        %difference,
        "Cash flow fetched balances"
    );

    if !difference.meets_threshold(MIN_POSTABLE) {
        info!("Difference below threshold, no transaction created");
        return Ok(CashRunReport {
            brokerage_total,
            ledger_balance,
            difference,
            posted_minor_units: None,
            transaction_ids: Vec::new(),
        });
    }

    let txn = cash_transaction(&config.account_id, difference, Utc::now());
    let amount = txn.amount_minor_units;
    let transaction_ids = ledger.submit(std::slice::from_ref(&txn)).await?;

    info!(amount_minor_units = amount, "Cash difference posted");
    Ok(CashRunReport {
        brokerage_total,
        ledger_balance,
        difference,
        posted_minor_units: Some(amount),
        transaction_ids,
    })
}

/// Run the holding reconciliation flow once.
///
/// Posts up to two corrective transactions (price effect and FX
/// effect, each independently thresholded), then overwrites the cache
/// with the current quote pair. Any earlier failure, a failed post
/// included, leaves the cache untouched so the next run recomputes
/// the same delta.
pub async fn run_holding_flow(
    config: &HoldingFlowConfig,
    quotes: &impl QuoteSource,
    ledger: &impl LedgerService,
    store: &impl QuoteStore,
) -> ReconResult<HoldingRunReport> {
    config.validate()?;

    let (price, observed_at) = quotes.quote(&config.symbol).await?;
    let fx_rate = quotes.fx_rate(&config.fx_pair).await?;
    let snapshot = QuoteSnapshot::new(price, fx_rate, observed_at);

    let balance = ledger.account_balance(&config.account_id).await?;
    let ledger_balance = balance.balance();

    let previous = store.load(&config.cache_key)?;
    let effects = decompose_value_change(config.shares, &snapshot, previous)?;

    info!(
        %price,
        %fx_rate,
        price_effect = %effects.price_effect,
        fx_effect = %effects.fx_effect,
        bootstrap = effects.bootstrap,
        "Holding flow computed effects"
    );

    let now = Utc::now();
    let mut transactions = Vec::with_capacity(2);
    if effects.price_effect.meets_threshold(MIN_POSTABLE) {
        transactions.push(price_effect_transaction(
            &config.account_id,
            effects.price_effect,
            snapshot.price,
            snapshot.observed_at,
            now,
        ));
    }
    if effects.fx_effect.meets_threshold(MIN_POSTABLE) {
        transactions.push(fx_effect_transaction(
            &config.account_id,
            effects.fx_effect,
            snapshot.fx_rate,
            now,
        ));
    }

    let transaction_ids = if transactions.is_empty() {
        info!("Both effects below threshold, no transactions created");
        Vec::new()
    } else {
        ledger.submit(&transactions).await?
    };
    let posted_count = transactions.len();

    // Cache write happens last; every abort path above skips it.
    store.save(&config.cache_key, &PrevQuote::from(snapshot))?;

    // `current_value` cannot fail here: a zero rate was rejected by
    // decompose_value_change above.
    let current_value = snapshot
        .holding_value(config.shares)
        .unwrap_or(folio_core::Money::ZERO);

    let report = HoldingRunReport {
        snapshot,
        previous: effects.previous,
        bootstrap: effects.bootstrap,
        price_effect: effects.price_effect,
        fx_effect: effects.fx_effect,
        current_value,
        ledger_balance,
        posted_count,
        transaction_ids,
    };

    info!(
        current_value = %report.current_value,
        ledger_balance = %report.ledger_balance,
        drift = %report.drift(),
        total_effect = %effects.total(),
        posted = posted_count,
        "Holding flow finished"
    );

    Ok(report)
}
