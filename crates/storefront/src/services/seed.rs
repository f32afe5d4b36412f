//! Demo data loaded at startup.

use secrecy::SecretString;
use tracing::info;

use tinymart_core::Price;

use crate::db::products::Catalog;
use crate::error::Result;
use crate::models::product::NewProduct;
use crate::services::auth::AccountStore;

/// Demo accounts as `(username, password)`.
pub const DEMO_USERS: &[(&str, &str)] = &[("user1", "pass1"), ("admin", "admin")];

/// Demo products as `(name, category, price, stock)`, in ID order.
pub const DEMO_PRODUCTS: &[(&str, &str, u32, u32)] = &[
    ("Laptop", "Electronics", 55000, 7),
    ("Smartphone", "Electronics", 15000, 25),
    ("Headphones", "Electronics", 1200, 50),
    ("Shirt", "Clothing", 799, 60),
    ("Jeans", "Clothing", 1299, 40),
    ("Running Shoes", "Footwear", 2499, 20),
    ("Washing Machine", "Home Appliances", 25999, 5),
];

/// Register the demo accounts and add the demo products.
///
/// # Errors
///
/// Returns `StoreError::Auth` if an account cannot be registered (for
/// example because it already exists) and `StoreError::Repository` if the
/// catalog has no IDs left.
pub fn seed_demo_data(catalog: &mut Catalog, accounts: &mut AccountStore) -> Result<()> {
    for (username, password) in DEMO_USERS {
        accounts.register(username, &SecretString::from(*password))?;
    }

    for (name, category, price, stock) in DEMO_PRODUCTS {
        catalog.add_product(NewProduct::new(
            *name,
            *category,
            Price::from_units(*price),
            *stock,
        ))?;
    }

    info!(
        users = DEMO_USERS.len(),
        products = DEMO_PRODUCTS.len(),
        "Demo data seeded"
    );
    Ok(())
}
