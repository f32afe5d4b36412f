//! Tinymart Core - Shared types library.
//!
//! This crate provides common types used across all Tinymart components:
//! - `storefront` - Catalog, accounts, cart, checkout and session services
//! - `cli` - Terminal shell that drives the storefront
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage, no logging.
//! This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, usernames, and screens

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
