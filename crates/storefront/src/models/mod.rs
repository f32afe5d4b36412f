//! Domain models for the storefront.
//!
//! These are plain data; the services in [`crate::services`] own the rules
//! for creating and changing them.

pub mod cart;
pub mod product;
pub mod receipt;

pub use cart::{CartLine, CartUpdate};
pub use product::{NewProduct, Product, ProductForm};
pub use receipt::{Receipt, StockShortfall};
