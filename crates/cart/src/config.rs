//! Cart configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `BAKERY_CART_DIR` - Directory holding file-backed slots (default: .bakery)
//! - `BAKERY_CART_KEY` - Name of the cart slot (default: cart)
//! - `BAKERY_CURRENCY` - Display currency code (default: CAD)

use std::path::PathBuf;

use bakery_core::CurrencyCode;
use thiserror::Error;

use crate::storage::{FileStorage, validate_key};
use crate::store::DEFAULT_CART_KEY;

const DEFAULT_CART_DIR: &str = ".bakery";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Cart configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartConfig {
    /// Directory for [`FileStorage`] slots
    pub storage_dir: PathBuf,
    /// Name of the slot holding the cart
    pub slot_key: String,
    /// Currency used when formatting prices for display
    pub currency: CurrencyCode,
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            storage_dir: PathBuf::from(DEFAULT_CART_DIR),
            slot_key: DEFAULT_CART_KEY.to_string(),
            currency: CurrencyCode::default(),
        }
    }
}

impl CartConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let storage_dir = PathBuf::from(
            lookup("BAKERY_CART_DIR").unwrap_or_else(|| DEFAULT_CART_DIR.to_string()),
        );

        let slot_key = lookup("BAKERY_CART_KEY").unwrap_or_else(|| DEFAULT_CART_KEY.to_string());
        validate_key(&slot_key).map_err(|e| {
            ConfigError::InvalidEnvVar("BAKERY_CART_KEY".to_string(), e.to_string())
        })?;

        let currency = match lookup("BAKERY_CURRENCY") {
            Some(code) => code.parse::<CurrencyCode>().map_err(|e| {
                ConfigError::InvalidEnvVar("BAKERY_CURRENCY".to_string(), e.to_string())
            })?,
            None => CurrencyCode::default(),
        };

        Ok(Self {
            storage_dir,
            slot_key,
            currency,
        })
    }

    /// File-backed storage rooted at the configured directory.
    #[must_use]
    pub fn file_storage(&self) -> FileStorage {
        FileStorage::new(&self.storage_dir)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = CartConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, CartConfig::default());
        assert_eq!(config.slot_key, "cart");
        assert_eq!(config.storage_dir, PathBuf::from(".bakery"));
        assert_eq!(config.currency, CurrencyCode::CAD);
    }

    #[test]
    fn test_overrides() {
        let config = CartConfig::from_lookup(lookup(&[
            ("BAKERY_CART_DIR", "/var/lib/bakery"),
            ("BAKERY_CART_KEY", "cart_fr"),
            ("BAKERY_CURRENCY", "eur"),
        ]))
        .unwrap();

        assert_eq!(config.storage_dir, PathBuf::from("/var/lib/bakery"));
        assert_eq!(config.slot_key, "cart_fr");
        assert_eq!(config.currency, CurrencyCode::EUR);
        assert_eq!(
            config.file_storage().dir(),
            std::path::Path::new("/var/lib/bakery")
        );
    }

    #[test]
    fn test_invalid_key() {
        let err = CartConfig::from_lookup(lookup(&[("BAKERY_CART_KEY", "../cart")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(ref var, _) if var == "BAKERY_CART_KEY"));
    }

    #[test]
    fn test_invalid_currency() {
        let err = CartConfig::from_lookup(lookup(&[("BAKERY_CURRENCY", "XYZ")])).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid environment variable BAKERY_CURRENCY: unsupported currency code: XYZ"
        );
    }
}
