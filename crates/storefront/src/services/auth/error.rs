//! Authentication error types.

use thiserror::Error;

/// Errors that can occur during account operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Username missing or malformed.
    #[error("invalid username: {0}")]
    InvalidUsername(#[from] tinymart_core::UsernameError),

    /// Password left empty.
    #[error("password is required")]
    MissingPassword,

    /// Invalid credentials (wrong password or user not found).
    #[error("invalid credentials")]
    InvalidCredentials,

    /// User already exists.
    #[error("user already exists")]
    UserAlreadyExists,

    /// Password hashing error.
    #[error("password hashing error")]
    PasswordHash,

    /// Configured hash cost rejected by argon2.
    #[error("invalid password hashing parameters: {0}")]
    HashParams(String),
}
