//! Checkout: validate the whole cart against live stock, then commit.
//!
//! Nothing is deducted unless every line fits, so a rejected checkout
//! leaves both the cart and the catalog exactly as they were.

use chrono::Utc;
use thiserror::Error;
use tracing::{info, warn};

use tinymart_core::OrderNumber;

use crate::db::RepositoryError;
use crate::db::products::Catalog;
use crate::models::receipt::{Receipt, StockShortfall};
use crate::services::cart::Cart;

/// Errors that can occur at checkout.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// There is nothing to buy.
    #[error("cart is empty")]
    EmptyCart,

    /// One or more lines ask for more than is in stock.
    #[error("insufficient stock for {} item(s)", .0.len())]
    InsufficientStock(Vec<StockShortfall>),

    /// Catalog update failed.
    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Every cart line whose quantity exceeds the product's current stock.
///
/// A product missing from the catalog counts as having no stock.
#[must_use]
pub fn find_shortfalls(cart: &Cart, catalog: &Catalog) -> Vec<StockShortfall> {
    cart.lines()
        .iter()
        .filter_map(|line| {
            let available = catalog.get_by_id(line.product_id).map_or(0, |p| p.stock);
            (line.quantity > available).then(|| StockShortfall {
                product_id: line.product_id,
                name: line.name.clone(),
                requested: line.quantity,
                available,
            })
        })
        .collect()
}

/// Pay for the cart.
///
/// On success every product's stock is reduced by its line quantity, the
/// cart is emptied and the receipt holds the paid lines and total.
///
/// # Errors
///
/// Returns `CheckoutError::EmptyCart` for an empty cart and
/// `CheckoutError::InsufficientStock` listing every offending line. In both
/// cases nothing is changed.
pub fn checkout(cart: &mut Cart, catalog: &mut Catalog) -> Result<Receipt, CheckoutError> {
    if cart.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }

    let shortfalls = find_shortfalls(cart, catalog);
    if !shortfalls.is_empty() {
        warn!(lines = shortfalls.len(), "Checkout rejected: insufficient stock");
        return Err(CheckoutError::InsufficientStock(shortfalls));
    }

    for line in cart.lines() {
        catalog.reduce_stock(line.product_id, line.quantity)?;
    }

    let total = cart.total();
    let receipt = Receipt {
        order_number: OrderNumber::generate(),
        lines: cart.take_lines(),
        total,
        placed_at: Utc::now(),
    };

    info!(
        order_number = %receipt.order_number,
        lines = receipt.lines.len(),
        total = %receipt.total,
        "Order placed"
    );

    Ok(receipt)
}
