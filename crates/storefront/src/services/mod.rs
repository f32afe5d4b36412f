//! Business logic services for the storefront.
//!
//! # Services
//!
//! - `auth` - Account registration and password login
//! - `cart` - Line items for the current session
//! - `checkout` - Validate-then-commit order placement
//! - `session` - Logged-in identity and screen routing
//! - `seed` - Demo users and products

pub mod auth;
pub mod cart;
pub mod checkout;
pub mod seed;
pub mod session;
