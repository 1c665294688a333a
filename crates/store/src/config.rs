//! Store configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional, with defaults matching the storefront's long-standing
//! behavior:
//!
//! - `PAPERBACK_DATA_FILE` - Path of the JSON data file (no default; when
//!   unset the caller decides, typically falling back to `paperback.json`)
//! - `PAPERBACK_TAX_RATE` - Tax rate on the post-discount amount (default: 0.15)
//! - `PAPERBACK_DISCOUNT_RATE` - Discount rate over the threshold (default: 0.10)
//! - `PAPERBACK_DISCOUNT_THRESHOLD` - Subtotal above which the discount
//!   applies, strictly greater-than (default: 300)
//! - `PAPERBACK_MAX_LOGIN_ATTEMPTS` - Failed logins before lockout (default: 3)
//! - `PAPERBACK_LOCKOUT_MINUTES` - Lock window length (default: 15)

use std::path::PathBuf;

use chrono::TimeDelta;
use rust_decimal::Decimal;
use thiserror::Error;

use paperback_core::Price;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Store application configuration.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Path of the JSON data file, if configured.
    pub data_file: Option<PathBuf>,
    /// Pricing rules.
    pub pricing: PricingConfig,
    /// Login lockout rules.
    pub lockout: LockoutConfig,
}

/// Tax and discount rules for the pricing engine.
#[derive(Debug, Clone, Copy)]
pub struct PricingConfig {
    /// Tax rate applied to the post-discount (taxable) amount.
    pub tax_rate: Decimal,
    /// Discount rate applied when the subtotal exceeds the threshold.
    pub discount_rate: Decimal,
    /// Subtotal threshold; the discount applies strictly above it.
    pub discount_threshold: Price,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            tax_rate: Decimal::new(15, 2),      // 0.15
            discount_rate: Decimal::new(10, 2), // 0.10
            discount_threshold: Price::from(300),
        }
    }
}

/// Failed-attempt and lock-window rules for the lockout policy.
#[derive(Debug, Clone, Copy)]
pub struct LockoutConfig {
    /// Consecutive failures that trigger a lock.
    pub max_attempts: u32,
    /// How long a locked account rejects attempts.
    pub lock_duration: TimeDelta,
}

impl Default for LockoutConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            lock_duration: TimeDelta::minutes(15),
        }
    }
}

impl StoreConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let data_file = get_optional_env("PAPERBACK_DATA_FILE").map(PathBuf::from);

        let defaults = PricingConfig::default();
        let pricing = PricingConfig {
            tax_rate: get_parsed_or("PAPERBACK_TAX_RATE", defaults.tax_rate)?,
            discount_rate: get_parsed_or("PAPERBACK_DISCOUNT_RATE", defaults.discount_rate)?,
            discount_threshold: get_parsed_or::<Decimal>(
                "PAPERBACK_DISCOUNT_THRESHOLD",
                defaults.discount_threshold.amount(),
            )
            .map(Price::new)?,
        };

        let lockout_defaults = LockoutConfig::default();
        let lockout = LockoutConfig {
            max_attempts: get_parsed_or(
                "PAPERBACK_MAX_LOGIN_ATTEMPTS",
                lockout_defaults.max_attempts,
            )?,
            lock_duration: get_parsed_or(
                "PAPERBACK_LOCKOUT_MINUTES",
                lockout_defaults.lock_duration.num_minutes(),
            )
            .map(TimeDelta::minutes)?,
        };

        Ok(Self {
            data_file,
            pricing,
            lockout,
        })
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_file: None,
            pricing: PricingConfig::default(),
            lockout: LockoutConfig::default(),
        }
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable parsed as `T`, or the default when unset.
fn get_parsed_or<T: std::str::FromStr>(key: &str, default: T) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .parse()
            .map_err(|e: T::Err| ConfigError::InvalidEnvVar(key.to_string(), e.to_string())),
        Err(_) => Ok(default),
    }
}
