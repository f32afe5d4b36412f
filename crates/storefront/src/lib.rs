//! Tinymart Storefront library.
//!
//! In-memory services for a single-session storefront: the product
//! [`Catalog`](db::products::Catalog), the account store, the cart,
//! checkout, and the [`Session`](services::session::Session) that routes a
//! user between screens. Every service is an explicit value owned by the
//! caller; there is no global state.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod services;
pub mod state;

pub use config::StoreConfig;
pub use db::products::Catalog;
pub use error::{Result, StoreError, ValidationError};
pub use services::auth::{AccountStore, AuthError};
pub use services::cart::Cart;
pub use services::checkout::{CheckoutError, checkout};
pub use services::session::Session;
pub use state::StoreState;
