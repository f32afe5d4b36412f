//! Product domain types.

use serde::{Deserialize, Serialize};

use tinymart_core::{Price, ProductId};

use crate::error::ValidationError;

/// A product in the catalog.
///
/// Only `stock` changes after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Unique, monotonically assigned product ID.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Category bucket this product is listed under.
    pub category: String,
    /// Unit price.
    pub price: Price,
    /// Units on hand.
    pub stock: u32,
}

impl Product {
    /// Whether at least one unit is on hand.
    #[must_use]
    pub const fn is_in_stock(&self) -> bool {
        self.stock > 0
    }
}

/// Values for a product that has not been assigned an ID yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    pub name: String,
    pub category: String,
    pub price: Price,
    pub stock: u32,
}

impl NewProduct {
    /// Build a new product from already-typed values.
    #[must_use]
    pub fn new(name: impl Into<String>, category: impl Into<String>, price: Price, stock: u32) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            price,
            stock,
        }
    }
}

/// Raw text from the admin "add product" form.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProductForm<'a> {
    pub name: &'a str,
    pub category: &'a str,
    pub price: &'a str,
    pub stock: &'a str,
}

impl ProductForm<'_> {
    /// Validate the form into a [`NewProduct`].
    ///
    /// Numbers are checked before the required text fields. Name and
    /// category are trimmed.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidNumber` or `ValidationError::Negative`
    /// for a bad price or stock, and `ValidationError::Required` for an empty
    /// name or category.
    pub fn validate(&self) -> Result<NewProduct, ValidationError> {
        let price = Price::parse(self.price)
            .map_err(|e| ValidationError::from_price(e, "price"))?;
        let stock = parse_stock(self.stock)?;

        let name = self.name.trim();
        if name.is_empty() {
            return Err(ValidationError::Required("name"));
        }
        let category = self.category.trim();
        if category.is_empty() {
            return Err(ValidationError::Required("category"));
        }

        Ok(NewProduct::new(name, category, price, stock))
    }
}

fn parse_stock(raw: &str) -> Result<u32, ValidationError> {
    let trimmed = raw.trim();
    let invalid = || ValidationError::InvalidNumber {
        field: "stock",
        value: trimmed.to_owned(),
    };

    let value: i64 = trimmed.parse().map_err(|_| invalid())?;
    if value < 0 {
        return Err(ValidationError::Negative("stock"));
    }
    u32::try_from(value).map_err(|_| invalid())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn form<'a>(name: &'a str, category: &'a str, price: &'a str, stock: &'a str) -> ProductForm<'a> {
        ProductForm {
            name,
            category,
            price,
            stock,
        }
    }

    #[test]
    fn test_valid_form_trims_text() {
        let product = form("  Sandals ", " Footwear", "499.50", " 12 ")
            .validate()
            .unwrap();

        assert_eq!(product.name, "Sandals");
        assert_eq!(product.category, "Footwear");
        assert_eq!(product.price, Price::parse("499.5").unwrap());
        assert_eq!(product.stock, 12);
    }

    #[test]
    fn test_zero_price_and_stock_are_allowed() {
        let product = form("Sticker", "Misc", "0", "0").validate().unwrap();
        assert_eq!(product.price, Price::ZERO);
        assert_eq!(product.stock, 0);
    }

    #[test]
    fn test_bad_numbers() {
        assert!(matches!(
            form("A", "B", "cheap", "1").validate(),
            Err(ValidationError::InvalidNumber { field: "price", .. })
        ));
        assert!(matches!(
            form("A", "B", "1", "1.5").validate(),
            Err(ValidationError::InvalidNumber { field: "stock", .. })
        ));
        assert!(matches!(
            form("A", "B", "1", "99999999999").validate(),
            Err(ValidationError::InvalidNumber { field: "stock", .. })
        ));
    }

    #[test]
    fn test_negative_numbers() {
        assert_eq!(
            form("A", "B", "-1", "1").validate(),
            Err(ValidationError::Negative("price"))
        );
        assert_eq!(
            form("A", "B", "1", "-3").validate(),
            Err(ValidationError::Negative("stock"))
        );
    }

    #[test]
    fn test_numbers_checked_before_required_fields() {
        assert!(matches!(
            form("", "", "x", "1").validate(),
            Err(ValidationError::InvalidNumber { .. })
        ));
    }

    #[test]
    fn test_required_fields() {
        assert_eq!(
            form("   ", "Misc", "1", "1").validate(),
            Err(ValidationError::Required("name"))
        );
        assert_eq!(
            form("Pen", "", "1", "1").validate(),
            Err(ValidationError::Required("category"))
        );
    }

    #[test]
    fn test_in_stock() {
        let mut product = Product {
            id: ProductId::new(1001),
            name: "Laptop".to_string(),
            category: "Electronics".to_string(),
            price: Price::from_units(55000),
            stock: 1,
        };
        assert!(product.is_in_stock());
        product.stock = 0;
        assert!(!product.is_in_stock());
    }
}
