//! CLI configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `BASKET_STORAGE_PATH` - Local storage file (default: .basket/local_storage.json)
//! - `BASKET_CURRENCY` - Display currency code (default: INR)
//! - `BASKET_FREE_DELIVERY_THRESHOLD` - Subtotal for free delivery (default: 14000)

use std::path::PathBuf;
use std::str::FromStr;

use basket_core::CurrencyCode;
use rust_decimal::Decimal;
use thiserror::Error;

const STORAGE_PATH_VAR: &str = "BASKET_STORAGE_PATH";
const CURRENCY_VAR: &str = "BASKET_CURRENCY";
const FREE_DELIVERY_THRESHOLD_VAR: &str = "BASKET_FREE_DELIVERY_THRESHOLD";

const DEFAULT_STORAGE_PATH: &str = ".basket/local_storage.json";
const DEFAULT_CURRENCY: &str = "INR";
const DEFAULT_FREE_DELIVERY_THRESHOLD: &str = "14000";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// CLI configuration.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// File holding the persisted lists
    pub storage_path: PathBuf,
    /// Currency used when formatting prices
    pub currency: CurrencyCode,
    /// Subtotal at which delivery becomes free
    pub free_delivery_threshold: Decimal,
}

impl CliConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an unparseable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get_or_default = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let storage_path = PathBuf::from(get_or_default(STORAGE_PATH_VAR, DEFAULT_STORAGE_PATH));
        let currency: CurrencyCode = parse_var(
            CURRENCY_VAR,
            &get_or_default(CURRENCY_VAR, DEFAULT_CURRENCY),
        )?;
        let free_delivery_threshold: Decimal = parse_var(
            FREE_DELIVERY_THRESHOLD_VAR,
            &get_or_default(FREE_DELIVERY_THRESHOLD_VAR, DEFAULT_FREE_DELIVERY_THRESHOLD),
        )?;

        if free_delivery_threshold.is_sign_negative() {
            return Err(ConfigError::InvalidEnvVar(
                FREE_DELIVERY_THRESHOLD_VAR.to_string(),
                "must not be negative".to_string(),
            ));
        }

        Ok(Self {
            storage_path,
            currency,
            free_delivery_threshold,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Parse a variable's value, naming the variable on failure.
fn parse_var<T>(key: &str, value: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: ToString,
{
    value
        .trim()
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}
