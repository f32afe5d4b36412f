//! Account store: registration and password login.
//!
//! Passwords are compared for an exact match, but only their Argon2id hashes
//! are kept.

mod error;

pub use error::AuthError;

use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use secrecy::{ExposeSecret, SecretString};
use tracing::{info, warn};

use tinymart_core::Username;

use crate::config::PasswordHashing;
use crate::db::RepositoryError;
use crate::db::accounts::AccountRepository;

/// Registered accounts.
pub struct AccountStore {
    accounts: AccountRepository,
    argon2: Argon2<'static>,
}

impl std::fmt::Debug for AccountStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccountStore")
            .field("accounts", &self.accounts.len())
            .finish_non_exhaustive()
    }
}

impl Default for AccountStore {
    fn default() -> Self {
        Self {
            accounts: AccountRepository::new(),
            argon2: Argon2::default(),
        }
    }
}

impl AccountStore {
    /// Create an empty account store with the given hash cost.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::HashParams` if argon2 rejects the parameters.
    pub fn new(hashing: PasswordHashing) -> Result<Self, AuthError> {
        let params = Params::new(
            hashing.memory_kib,
            hashing.iterations,
            Params::DEFAULT_P_COST,
            None,
        )
        .map_err(|e| AuthError::HashParams(e.to_string()))?;

        Ok(Self {
            accounts: AccountRepository::new(),
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        })
    }

    /// Register a new account.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidUsername` if the username is empty.
    /// Returns `AuthError::MissingPassword` if the password is empty.
    /// Returns `AuthError::UserAlreadyExists` if the username is taken; the
    /// existing password stays in force.
    pub fn register(
        &mut self,
        username: &str,
        password: &SecretString,
    ) -> Result<Username, AuthError> {
        let username = Username::parse(username)?;
        validate_password(password)?;

        if self.accounts.contains(&username) {
            warn!(username = %username, "Registration rejected: username taken");
            return Err(AuthError::UserAlreadyExists);
        }

        let password_hash = self.hash_password(password)?;

        self.accounts
            .insert(username.clone(), password_hash)
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => AuthError::UserAlreadyExists,
                RepositoryError::NotFound(_) | RepositoryError::Exhausted(_) => {
                    AuthError::InvalidCredentials
                }
            })?;

        info!(username = %username, "Account registered");
        Ok(username)
    }

    /// Check a username and password.
    ///
    /// Unknown usernames and wrong passwords produce the same error.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidUsername` / `AuthError::MissingPassword` for
    /// empty input, otherwise `AuthError::InvalidCredentials` on any mismatch.
    pub fn authenticate(
        &self,
        username: &str,
        password: &SecretString,
    ) -> Result<Username, AuthError> {
        let username = Username::parse(username)?;
        validate_password(password)?;

        let Some(password_hash) = self.accounts.get_password_hash(&username) else {
            warn!("Login failed");
            return Err(AuthError::InvalidCredentials);
        };

        if let Err(e) = self.verify_password(password, password_hash) {
            warn!("Login failed");
            return Err(e);
        }

        Ok(username)
    }

    /// Whether an account exists.
    #[must_use]
    pub fn contains(&self, username: &Username) -> bool {
        self.accounts.contains(username)
    }

    /// Number of registered accounts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    /// Whether no accounts are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Hash a password using Argon2id.
    fn hash_password(&self, password: &SecretString) -> Result<String, AuthError> {
        let salt = SaltString::generate(&mut OsRng);

        self.argon2
            .hash_password(password.expose_secret().as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|_| AuthError::PasswordHash)
    }

    /// Verify a password against a hash.
    fn verify_password(&self, password: &SecretString, hash: &str) -> Result<(), AuthError> {
        let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::InvalidCredentials)?;

        self.argon2
            .verify_password(password.expose_secret().as_bytes(), &parsed_hash)
            .map_err(|_| AuthError::InvalidCredentials)
    }
}

fn validate_password(password: &SecretString) -> Result<(), AuthError> {
    if password.expose_secret().is_empty() {
        return Err(AuthError::MissingPassword);
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn store() -> AccountStore {
        AccountStore::new(PasswordHashing::minimal()).unwrap()
    }

    fn secret(s: &str) -> SecretString {
        SecretString::from(s)
    }

    #[test]
    fn test_register_then_authenticate() {
        let mut accounts = store();
        let name = accounts.register("user1", &secret("pass1")).unwrap();

        assert_eq!(name.as_str(), "user1");
        assert_eq!(
            accounts.authenticate("user1", &secret("pass1")).unwrap(),
            name
        );
    }

    #[test]
    fn test_duplicate_registration_keeps_first_password() {
        let mut accounts = store();
        accounts.register("user1", &secret("pass1")).unwrap();

        let err = accounts.register("user1", &secret("other")).unwrap_err();
        assert!(matches!(err, AuthError::UserAlreadyExists));

        assert!(accounts.authenticate("user1", &secret("pass1")).is_ok());
        assert!(matches!(
            accounts.authenticate("user1", &secret("other")),
            Err(AuthError::InvalidCredentials)
        ));
        assert_eq!(accounts.len(), 1);
    }

    #[test]
    fn test_wrong_password_and_unknown_user_fail_identically() {
        let mut accounts = store();
        accounts.register("user1", &secret("pass1")).unwrap();

        let wrong = accounts.authenticate("user1", &secret("wrong")).unwrap_err();
        let unknown = accounts.authenticate("nouser", &secret("x")).unwrap_err();

        assert!(matches!(wrong, AuthError::InvalidCredentials));
        assert!(matches!(unknown, AuthError::InvalidCredentials));
        assert_eq!(wrong.to_string(), unknown.to_string());
    }

    #[test]
    fn test_password_match_is_exact() {
        let mut accounts = store();
        accounts.register("user1", &secret("pass1")).unwrap();

        assert!(accounts.authenticate("user1", &secret("Pass1")).is_err());
        assert!(accounts.authenticate("user1", &secret("pass1 ")).is_err());
    }

    #[test]
    fn test_long_usernames_are_accepted() {
        let mut accounts = store();
        let long = "u".repeat(65);

        let unknown = accounts.authenticate(&long, &secret("x")).unwrap_err();
        assert!(matches!(unknown, AuthError::InvalidCredentials));

        accounts.register(&long, &secret("pass1")).unwrap();
        assert_eq!(
            accounts.authenticate(&long, &secret("pass1")).unwrap().as_str(),
            long
        );
    }

    #[test]
    fn test_username_is_trimmed() {
        let mut accounts = store();
        accounts.register("  user1 ", &secret("pass1")).unwrap();
        assert!(accounts.authenticate("user1", &secret("pass1")).is_ok());
    }

    #[test]
    fn test_empty_input_rejected() {
        let mut accounts = store();
        assert!(matches!(
            accounts.register("   ", &secret("pass")),
            Err(AuthError::InvalidUsername(_))
        ));
        assert!(matches!(
            accounts.register("user", &secret("")),
            Err(AuthError::MissingPassword)
        ));
        assert!(accounts.is_empty());
    }

    #[test]
    fn test_stores_hash_not_password() {
        let mut accounts = store();
        let name = accounts.register("user1", &secret("pass1")).unwrap();

        let hash = accounts.accounts.get_password_hash(&name).unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(!hash.contains("pass1"));
    }

    #[test]
    fn test_invalid_hash_params() {
        let result = AccountStore::new(PasswordHashing {
            memory_kib: 0,
            iterations: 0,
        });
        assert!(matches!(result, Err(AuthError::HashParams(_))));
    }

    #[test]
    fn test_debug_does_not_print_hashes() {
        let mut accounts = store();
        accounts.register("user1", &secret("pass1")).unwrap();
        let debug = format!("{accounts:?}");
        assert!(!debug.contains("argon2"));
        assert!(!debug.contains("user1"));
    }
}
