//! Keyed previous-quote store.
//!
//! Each flow/symbol gets its own record file under the store directory,
//! so multiple holdings can be tracked without format collisions. A
//! record is two plain-decimal lines, `price` then `fx_rate`. A missing
//! record is the valid "no prior data" state, not an error.

use crate::error::{StoreError, StoreResult};
use folio_core::{FxRate, PrevQuote, Price};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// File extension for cache records.
const RECORD_EXT: &str = "prev";

/// Keyed store for the price/rate pair carried between runs.
pub struct QuoteCacheStore {
    base_dir: PathBuf,
}

impl QuoteCacheStore {
    /// Create a store rooted at `base_dir`.
    ///
    /// The directory is created lazily on first save.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Load the cached quote for `key`.
    ///
    /// Returns `Ok(None)` when no record exists, or when the record has
    /// fewer than two lines (treated as no prior data). A record whose
    /// lines fail decimal parsing is an error.
    pub fn load(&self, key: &str) -> StoreResult<Option<PrevQuote>> {
        let path = self.record_path(key)?;

        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(key, "No cached quote");
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };

        let mut lines = content.lines();
        let (Some(price_line), Some(rate_line)) = (lines.next(), lines.next()) else {
            debug!(key, "Cache record incomplete, treating as no prior data");
            return Ok(None);
        };

        let price: Price = price_line
            .trim()
            .parse()
            .map_err(|e: rust_decimal::Error| StoreError::MalformedRecord {
                key: key.to_string(),
                detail: format!("price: {e}"),
            })?;
        let fx_rate: FxRate = rate_line
            .trim()
            .parse()
            .map_err(|e: rust_decimal::Error| StoreError::MalformedRecord {
                key: key.to_string(),
                detail: format!("fx_rate: {e}"),
            })?;

        Ok(Some(PrevQuote::new(price, fx_rate)))
    }

    /// Overwrite the record for `key` with the given quote.
    pub fn save(&self, key: &str, quote: &PrevQuote) -> StoreResult<()> {
        let path = self.record_path(key)?;
        fs::create_dir_all(&self.base_dir)?;

        fs::write(&path, format!("{}\n{}\n", quote.price, quote.fx_rate))?;

        info!(key, price = %quote.price, fx_rate = %quote.fx_rate, "Saved quote cache record");
        Ok(())
    }

    /// Resolve the record file for a key, rejecting keys that would
    /// escape the store directory.
    fn record_path(&self, key: &str) -> StoreResult<PathBuf> {
        if key.is_empty()
            || key
                .chars()
                .any(|c| !(c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.')))
        {
            return Err(StoreError::InvalidKey(key.to_string()));
        }
        Ok(self.base_dir.join(format!("{key}.{RECORD_EXT}")))
    }
}

impl folio_core::QuoteStore for QuoteCacheStore {
    fn load(&self, key: &str) -> folio_core::SourceResult<Option<PrevQuote>> {
        Ok(QuoteCacheStore::load(self, key)?)
    }

    fn save(&self, key: &str, quote: &PrevQuote) -> folio_core::SourceResult<()> {
        Ok(QuoteCacheStore::save(self, key, quote)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use tempfile::TempDir;

    fn store() -> (TempDir, QuoteCacheStore) {
        let dir = TempDir::new().unwrap();
        let store = QuoteCacheStore::new(dir.path());
        (dir, store)
    }

    #[test]
    fn test_missing_record_is_none() {
        let (_dir, store) = store();
        assert!(store.load("holding-s27").unwrap().is_none());
    }

    #[test]
    fn test_save_load_round_trip() {
        let (_dir, store) = store();
        let quote = PrevQuote::new(Price::new(dec!(10.20)), FxRate::new(dec!(1.28754)));

        store.save("holding-s27", &quote).unwrap();
        let loaded = store.load("holding-s27").unwrap().unwrap();

        assert_eq!(loaded, quote);
    }

    #[test]
    fn test_record_file_format() {
        let (dir, store) = store();
        let quote = PrevQuote::new(Price::new(dec!(10.2)), FxRate::new(dec!(1.28)));
        store.save("holding-s27", &quote).unwrap();

        let content = std::fs::read_to_string(dir.path().join("holding-s27.prev")).unwrap();
        assert_eq!(content, "10.2\n1.28\n");
    }

    #[test]
    fn test_keys_do_not_collide() {
        let (_dir, store) = store();
        let a = PrevQuote::new(Price::new(dec!(1)), FxRate::new(dec!(2)));
        let b = PrevQuote::new(Price::new(dec!(3)), FxRate::new(dec!(4)));

        store.save("holding-s27", &a).unwrap();
        store.save("holding-vwrl", &b).unwrap();

        assert_eq!(store.load("holding-s27").unwrap().unwrap(), a);
        assert_eq!(store.load("holding-vwrl").unwrap().unwrap(), b);
    }

    #[test]
    fn test_overwrite_replaces_record() {
        let (_dir, store) = store();
        let first = PrevQuote::new(Price::new(dec!(10.00)), FxRate::new(dec!(1.30)));
        let second = PrevQuote::new(Price::new(dec!(10.20)), FxRate::new(dec!(1.28)));

        store.save("holding-s27", &first).unwrap();
        store.save("holding-s27", &second).unwrap();

        assert_eq!(store.load("holding-s27").unwrap().unwrap(), second);
    }

    #[test]
    fn test_short_record_is_none() {
        let (dir, store) = store();
        std::fs::write(dir.path().join("holding-s27.prev"), "10.2\n").unwrap();
        assert!(store.load("holding-s27").unwrap().is_none());
    }

    #[test]
    fn test_garbage_record_is_error() {
        let (dir, store) = store();
        std::fs::write(dir.path().join("holding-s27.prev"), "ten\n1.28\n").unwrap();
        assert!(matches!(
            store.load("holding-s27"),
            Err(StoreError::MalformedRecord { .. })
        ));
    }

    #[test]
    fn test_path_escaping_key_rejected() {
        let (_dir, store) = store();
        let quote = PrevQuote::new(Price::new(dec!(1)), FxRate::new(dec!(1)));
        assert!(matches!(
            store.save("../escape", &quote),
            Err(StoreError::InvalidKey(_))
        ));
        assert!(matches!(store.load(""), Err(StoreError::InvalidKey(_))));
    }
}
