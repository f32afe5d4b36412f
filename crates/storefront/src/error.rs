//! Unified error handling.
//!
//! Provides a unified `StoreError` type for every storefront operation. All
//! errors are recoverable: the caller shows [`StoreError::user_message`] and
//! lets the user retry.

use thiserror::Error;

use tinymart_core::PriceError;

use crate::db::RepositoryError;

use crate::services::auth::AuthError;
use crate::services::checkout::CheckoutError;

/// Invalid user input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field was left empty.
    #[error("{0} is required")]
    Required(&'static str),

    /// A numeric field did not parse.
    #[error("invalid {field}: '{value}'")]
    InvalidNumber {
        /// Name of the offending field.
        field: &'static str,
        /// The raw input.
        value: String,
    },

    /// A numeric field was below zero.
    #[error("{0} cannot be negative")]
    Negative(&'static str),

    /// A cart quantity outside `1..=available`.
    #[error("quantity must be between 1 and {available} (got {requested})")]
    QuantityOutOfRange {
        /// The quantity asked for.
        requested: i64,
        /// Stock on hand when the request was made.
        available: u32,
    },

    /// The product has no stock left.
    #[error("{0} is out of stock")]
    OutOfStock(String),
}

impl ValidationError {
    /// Map a price parse failure onto the form field it came from.
    #[must_use]
    pub fn from_price(err: PriceError, field: &'static str) -> Self {
        match err {
            PriceError::NotANumber(value) => Self::InvalidNumber { field, value },
            PriceError::Negative => Self::Negative(field),
        }
    }
}

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Input failed validation.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Account operation failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Checkout was rejected.
    #[error("Checkout error: {0}")]
    Checkout(#[from] CheckoutError),

    /// A store rejected the write.
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// No user is logged in.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// The logged-in user may not perform the action.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// A user is already logged in to this session.
    #[error("Already logged in as {0}")]
    AlreadyLoggedIn(String),
}

impl StoreError {
    /// The message to show the user.
    ///
    /// Internal details (hashing failures) are not exposed.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(err) => match err {
                ValidationError::Required(_) => "Name and category required.".to_string(),
                ValidationError::InvalidNumber { field: "quantity", .. } => {
                    "Invalid quantity.".to_string()
                }
                ValidationError::InvalidNumber { .. } | ValidationError::Negative(_) => {
                    "Invalid price or stock.".to_string()
                }
                ValidationError::QuantityOutOfRange { .. } => {
                    "Quantity must be >0 and <= available stock.".to_string()
                }
                ValidationError::OutOfStock(_) => "Product out of stock.".to_string(),
            },
            Self::Auth(err) => match err {
                AuthError::InvalidUsername(_) | AuthError::MissingPassword => {
                    "Enter username and password.".to_string()
                }
                AuthError::InvalidCredentials => "Invalid credentials.".to_string(),
                AuthError::UserAlreadyExists => "Username already exists.".to_string(),
                AuthError::PasswordHash | AuthError::HashParams(_) => {
                    "Authentication error".to_string()
                }
            },
            Self::Checkout(err) => match err {
                CheckoutError::EmptyCart => "Cart is empty.".to_string(),
                CheckoutError::InsufficientStock(shortfalls) => shortfalls
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join("\n"),
                CheckoutError::Repository(_) => "Internal error".to_string(),
            },
            Self::Repository(err) => match err {
                RepositoryError::NotFound(what) => format!("{what} not found."),
                RepositoryError::Exhausted(_) => "Catalog is full.".to_string(),
                RepositoryError::Conflict(_) => "Internal error".to_string(),
            },
            Self::NotFound(what) => format!("{what} not found."),
            Self::Unauthorized(_) => "Please login first.".to_string(),
            Self::Forbidden(_) => "Admin only. Login as 'admin' user.".to_string(),
            Self::AlreadyLoggedIn(_) => "Already logged in. Logout first.".to_string(),
        }
    }
}

/// Result type alias for `StoreError`.
pub type Result<T> = std::result::Result<T, StoreError>;
