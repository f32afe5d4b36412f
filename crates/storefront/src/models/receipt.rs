//! Checkout results.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use tinymart_core::{OrderNumber, Price, ProductId};

use super::cart::CartLine;

/// Proof of a completed checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    pub order_number: OrderNumber,
    /// The lines that were paid for, in cart order.
    pub lines: Vec<CartLine>,
    /// Sum of all line totals.
    pub total: Price,
    pub placed_at: DateTime<Utc>,
}

/// A cart line that asks for more than the catalog has.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockShortfall {
    pub product_id: ProductId,
    pub name: String,
    pub requested: u32,
    pub available: u32,
}

impl std::fmt::Display for StockShortfall {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Not enough stock for {}. Available: {}",
            self.name, self.available
        )
    }
}
