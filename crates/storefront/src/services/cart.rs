//! The session's shopping cart.

use tracing::debug;

use tinymart_core::{Price, ProductId};

use crate::error::{StoreError, ValidationError};
use crate::models::cart::{CartLine, CartUpdate};
use crate::models::product::Product;

/// Line items for the current session, in the order first added.
///
/// A product appears on at most one line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Add `quantity` units of `product`.
    ///
    /// If the product already has a line its quantity is increased, otherwise
    /// a new line is appended. `quantity` is checked against the product's
    /// current stock on its own, not against what is already in the cart;
    /// checkout re-validates the accumulated amount.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::OutOfStock` if the product has no stock, or
    /// `ValidationError::QuantityOutOfRange` unless `1 <= quantity <= stock`.
    pub fn add_item(
        &mut self,
        product: &Product,
        quantity: u32,
    ) -> Result<CartUpdate, ValidationError> {
        if !product.is_in_stock() {
            return Err(ValidationError::OutOfStock(product.name.clone()));
        }
        if quantity == 0 || quantity > product.stock {
            return Err(ValidationError::QuantityOutOfRange {
                requested: i64::from(quantity),
                available: product.stock,
            });
        }

        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|line| line.product_id == product.id)
        {
            line.quantity = line.quantity.saturating_add(quantity);
            debug!(product_id = %product.id, quantity = line.quantity, "Cart line updated");
            return Ok(CartUpdate::Updated {
                name: line.name.clone(),
                quantity: line.quantity,
            });
        }

        self.lines.push(CartLine {
            product_id: product.id,
            name: product.name.clone(),
            unit_price: product.price,
            quantity,
        });
        debug!(product_id = %product.id, quantity, "Cart line added");

        Ok(CartUpdate::Added {
            name: product.name.clone(),
            quantity,
        })
    }

    /// Remove the line at `index` (zero-based).
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if there is no line at `index`.
    pub fn remove_item(&mut self, index: usize) -> Result<CartLine, StoreError> {
        if index >= self.lines.len() {
            return Err(StoreError::NotFound(format!("cart line {}", index + 1)));
        }
        let line = self.lines.remove(index);
        debug!(product_id = %line.product_id, "Cart line removed");
        Ok(line)
    }

    /// The lines in cart order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Quantity of `product_id` currently in the cart.
    #[must_use]
    pub fn quantity_of(&self, product_id: ProductId) -> u32 {
        self.lines
            .iter()
            .find(|line| line.product_id == product_id)
            .map_or(0, |line| line.quantity)
    }

    /// Sum of all line totals; zero for an empty cart.
    #[must_use]
    pub fn total(&self) -> Price {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Number of lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Take every line out, leaving the cart empty.
    pub(crate) fn take_lines(&mut self) -> Vec<CartLine> {
        std::mem::take(&mut self.lines)
    }
}
