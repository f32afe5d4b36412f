//! Core types for Tinymart.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod price;
pub mod status;
pub mod username;

pub use id::*;
pub use price::{CurrencyCode, Price, PriceError};
pub use status::Screen;
pub use username::{Username, UsernameError};
