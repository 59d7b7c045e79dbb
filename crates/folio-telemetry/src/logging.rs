//! Structured logging initialization.

use crate::error::TelemetryResult;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Fallback filter when `RUST_LOG` is unset: quiet dependencies,
/// chatty reconciliation crates.
const DEFAULT_FILTER: &str = "info,folio=debug";

/// Initialize structured logging for the process.
///
/// Output is JSON when `RUST_ENV=production` (one object per line,
/// suitable for shipping), human-readable otherwise. The filter comes
/// from `RUST_LOG` with a folio-centric default.
pub fn init_logging() -> TelemetryResult<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let registry = tracing_subscriber::registry().with(env_filter);

    if production() {
        registry
            .with(fmt::layer().json().with_current_span(true))
            .init();
    } else {
        registry
            .with(fmt::layer().compact().with_target(true))
            .init();
    }

    Ok(())
}

fn production() -> bool {
    std::env::var("RUST_ENV").is_ok_and(|v| v == "production")
}
