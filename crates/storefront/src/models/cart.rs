//! Cart line types.

use serde::{Deserialize, Serialize};

use tinymart_core::{Price, ProductId};

/// One product-and-quantity entry in a cart.
///
/// Name and unit price are copied from the product when the line is
/// created; they never change in the catalog. Stock is always re-read from
/// the catalog at checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub product_id: ProductId,
    pub name: String,
    pub unit_price: Price,
    pub quantity: u32,
}

impl CartLine {
    /// `quantity * unit_price`.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.unit_price.times(self.quantity)
    }
}

/// What adding to the cart did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartUpdate {
    /// A new line was appended.
    Added { name: String, quantity: u32 },
    /// An existing line's quantity was increased; `quantity` is the new total.
    Updated { name: String, quantity: u32 },
}

impl std::fmt::Display for CartUpdate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Added { name, quantity } => write!(f, "Added to cart: {name} x {quantity}"),
            Self::Updated { name, quantity } => write!(f, "Updated cart: {name} x {quantity}"),
        }
    }
}
