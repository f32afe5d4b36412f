//! In-memory storage for the storefront.
//!
//! Nothing here survives a restart.
//!
//! ## Stores
//!
//! - [`products::Catalog`] - Products keyed by id plus the category index
//! - [`accounts::AccountRepository`] - Username to password hash

pub mod accounts;
pub mod products;

use thiserror::Error;

/// Errors returned by the in-memory stores.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    /// The requested record does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// A record with the same key already exists.
    #[error("conflict: {0}")]
    Conflict(String),

    /// Every ID of this kind has been assigned.
    #[error("no {0} ids left")]
    Exhausted(&'static str),
}
