//! Application state owned by the caller.

use tracing::info;

use crate::config::StoreConfig;
use crate::db::products::Catalog;
use crate::error::Result;
use crate::services::auth::AccountStore;
use crate::services::seed;

/// The catalog and account store for one process.
///
/// Sessions are kept separately and borrow these services per call.
#[derive(Debug)]
pub struct StoreState {
    config: StoreConfig,
    /// Products and category index.
    pub catalog: Catalog,
    /// Registered accounts.
    pub accounts: AccountStore,
}

impl StoreState {
    /// Build the services described by `config`, seeding demo data if
    /// enabled.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Auth` if the password hashing parameters are
    /// invalid.
    pub fn new(config: StoreConfig) -> Result<Self> {
        let mut catalog = Catalog::new();
        let mut accounts = AccountStore::new(config.password_hashing)?;

        if config.seed_demo_data {
            seed::seed_demo_data(&mut catalog, &mut accounts)?;
        }

        info!(
            products = catalog.len(),
            accounts = accounts.len(),
            currency = %config.currency,
            "Store ready"
        );

        Ok(Self {
            config,
            catalog,
            accounts,
        })
    }

    /// Get a reference to the store configuration.
    #[must_use]
    pub const fn config(&self) -> &StoreConfig {
        &self.config
    }
}
