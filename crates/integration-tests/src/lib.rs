//! Integration tests for Tinymart.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p tinymart-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `storefront_flow` - Login, cart and checkout through a session
//! - `catalog_index` - Category index stays equal to products grouped by category
//! - `accounts` - Registration and login rules
//!
//! The helpers here build a seeded store with cheap password hashing so the
//! tests stay fast.

use secrecy::SecretString;
use tinymart_storefront::config::PasswordHashing;
use tinymart_storefront::{Session, StoreConfig, StoreState};

/// A store seeded with the demo users and products.
///
/// # Panics
///
/// Panics if the store cannot be built.
#[must_use]
pub fn seeded_store() -> StoreState {
    store(true)
}

/// A store with no users or products.
///
/// # Panics
///
/// Panics if the store cannot be built.
#[must_use]
pub fn empty_store() -> StoreState {
    store(false)
}

fn store(seed_demo_data: bool) -> StoreState {
    let config = StoreConfig {
        seed_demo_data,
        password_hashing: PasswordHashing::minimal(),
        ..StoreConfig::default()
    };
    match StoreState::new(config) {
        Ok(state) => state,
        Err(e) => panic!("failed to build test store: {e}"),
    }
}

/// A session already logged in as `username`.
///
/// # Panics
///
/// Panics if the credentials are rejected.
#[must_use]
pub fn logged_in(state: &StoreState, username: &str, password: &str) -> Session {
    let mut session = Session::new();
    if let Err(e) = session.login(&state.accounts, username, &secret(password)) {
        panic!("login as {username} failed: {e}");
    }
    session
}

/// Wrap a test password.
#[must_use]
pub fn secret(password: &str) -> SecretString {
    SecretString::from(password)
}
