//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `TINYMART_CURRENCY` - ISO 4217 code used for display (default: INR)
//! - `TINYMART_SEED_DEMO` - Seed demo users and products (default: true)
//! - `TINYMART_HASH_MEMORY_KIB` - Argon2 memory cost in KiB (default: 19456)
//! - `TINYMART_HASH_ITERATIONS` - Argon2 iterations (default: 2)

use argon2::Params;
use thiserror::Error;

use tinymart_core::CurrencyCode;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Currency prices are displayed in
    pub currency: CurrencyCode,
    /// Whether to load the demo users and products at startup
    pub seed_demo_data: bool,
    /// Password hashing cost
    pub password_hashing: PasswordHashing,
}

/// Argon2id cost parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordHashing {
    /// Memory size in KiB
    pub memory_kib: u32,
    /// Number of passes
    pub iterations: u32,
}

impl Default for PasswordHashing {
    fn default() -> Self {
        Self {
            memory_kib: Params::DEFAULT_M_COST,
            iterations: Params::DEFAULT_T_COST,
        }
    }
}

impl PasswordHashing {
    /// The cheapest parameters argon2 accepts. Only suitable for tests.
    #[must_use]
    pub const fn minimal() -> Self {
        Self {
            memory_kib: Params::MIN_M_COST,
            iterations: Params::MIN_T_COST,
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            currency: CurrencyCode::default(),
            seed_demo_data: true,
            password_hashing: PasswordHashing::default(),
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
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let currency = match lookup("TINYMART_CURRENCY") {
            Some(value) => value
                .parse::<CurrencyCode>()
                .map_err(|e| ConfigError::InvalidEnvVar("TINYMART_CURRENCY".to_string(), e))?,
            None => defaults.currency,
        };

        let seed_demo_data = match lookup("TINYMART_SEED_DEMO") {
            Some(value) => parse_bool("TINYMART_SEED_DEMO", &value)?,
            None => defaults.seed_demo_data,
        };

        let password_hashing = PasswordHashing {
            memory_kib: parse_u32_or(
                &lookup,
                "TINYMART_HASH_MEMORY_KIB",
                defaults.password_hashing.memory_kib,
            )?,
            iterations: parse_u32_or(
                &lookup,
                "TINYMART_HASH_ITERATIONS",
                defaults.password_hashing.iterations,
            )?,
        };

        Ok(Self {
            currency,
            seed_demo_data,
            password_hashing,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Parse a boolean flag.
fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("expected a boolean, got '{other}'"),
        )),
    }
}

/// Parse an optional u32 variable, falling back to `default` when unset.
fn parse_u32_or(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: u32,
) -> Result<u32, ConfigError> {
    lookup(key).map_or(Ok(default), |value| {
        value
            .trim()
            .parse::<u32>()
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
    })
}
