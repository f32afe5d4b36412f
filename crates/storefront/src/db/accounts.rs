//! Account storage.

use std::collections::HashMap;

use tinymart_core::Username;

use super::RepositoryError;

/// Username to PHC-encoded password hash.
#[derive(Debug, Default)]
pub struct AccountRepository {
    hashes: HashMap<Username, String>,
}

impl AccountRepository {
    /// Create an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new account.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the username is taken. The
    /// existing hash is left untouched.
    pub fn insert(
        &mut self,
        username: Username,
        password_hash: String,
    ) -> Result<(), RepositoryError> {
        if self.hashes.contains_key(&username) {
            return Err(RepositoryError::Conflict(format!("username {username}")));
        }
        self.hashes.insert(username, password_hash);
        Ok(())
    }

    /// Whether an account exists for `username`.
    #[must_use]
    pub fn contains(&self, username: &Username) -> bool {
        self.hashes.contains_key(username)
    }

    /// The stored password hash for `username`.
    #[must_use]
    pub fn get_password_hash(&self, username: &Username) -> Option<&str> {
        self.hashes.get(username).map(String::as_str)
    }

    /// Number of accounts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.hashes.len()
    }

    /// Whether there are no accounts.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.hashes.is_empty()
    }
}
