//! Account store.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::credentials::{hash_password, verify_password};
use super::validation::{ValidationError, validate_username};
use crate::Result;

/// Rejected account operation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AccountError {
    /// Registration with a username that already exists.
    #[error("Username '{0}' already exists")]
    UsernameTaken(String),

    /// Registration with an invalid username.
    #[error("{0}")]
    Invalid(#[from] ValidationError),

    /// Login with a username that is not registered.
    #[error("User '{0}' does not exist")]
    UnknownUser(String),

    /// Password does not match the stored credential.
    #[error("Incorrect password")]
    WrongPassword,
}

/// Source of login attempts.
///
/// The password is only requested once the username is known to exist.
pub trait LoginPrompt {
    /// Reads the next username.
    ///
    /// # Errors
    ///
    /// Returns an error if input cannot be read.
    fn username(&mut self) -> Result<String>;

    /// Reads the password for the username just entered.
    ///
    /// # Errors
    ///
    /// Returns an error if input cannot be read.
    fn password(&mut self) -> Result<String>;

    /// Reports a failed attempt.
    ///
    /// # Errors
    ///
    /// Returns an error if output cannot be written.
    fn rejected(&mut self, reason: &AccountError) -> Result<()>;
}

/// Mapping from username to password credential.
///
/// Serialized as a flat JSON object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountStore {
    users: BTreeMap<String, String>,
}

impl AccountStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if `username` is registered.
    #[must_use]
    pub fn contains(&self, username: &str) -> bool {
        self.users.contains_key(username)
    }

    /// Number of registered accounts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.users.len()
    }

    /// Returns true if no account is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Registers a new account.
    ///
    /// # Errors
    ///
    /// Returns [`AccountError::Invalid`] or [`AccountError::UsernameTaken`]
    /// without touching the store, or a hashing error.
    pub fn register(&mut self, username: &str, password: &str) -> Result<()> {
        validate_username(username).map_err(AccountError::from)?;
        if self.contains(username) {
            return Err(AccountError::UsernameTaken(username.to_string()).into());
        }

        let credential = hash_password(password)?;
        self.users.insert(username.to_string(), credential);
        info!("Registered user {username}");
        Ok(())
    }

    /// Checks a single username/password pair.
    ///
    /// # Errors
    ///
    /// Returns [`AccountError::UnknownUser`] or [`AccountError::WrongPassword`].
    pub fn check(&self, username: &str, password: &str) -> std::result::Result<(), AccountError> {
        let stored = self
            .users
            .get(username)
            .ok_or_else(|| AccountError::UnknownUser(username.to_string()))?;

        if verify_password(password, stored) {
            Ok(())
        } else {
            Err(AccountError::WrongPassword)
        }
    }

    /// Returns true if `password` matches the credential of `username`.
    ///
    /// Unknown users never match.
    #[must_use]
    pub fn verify(&self, username: &str, password: &str) -> bool {
        self.check(username, password).is_ok()
    }

    /// Runs an interactive login of at most `max_attempts` tries.
    ///
    /// Unknown usernames and wrong passwords both use up an attempt. Returns
    /// the username on the first successful try, or `None` once all
    /// attempts are spent.
    ///
    /// # Errors
    ///
    /// Returns an error only if the prompt fails.
    pub fn authenticate(
        &self,
        max_attempts: u32,
        prompt: &mut impl LoginPrompt,
    ) -> Result<Option<String>> {
        for attempt in 1..=max_attempts {
            let username = prompt.username()?;
            if !self.contains(&username) {
                warn!("Login attempt {attempt}/{max_attempts}: unknown user {username}");
                prompt.rejected(&AccountError::UnknownUser(username))?;
                continue;
            }

            let password = prompt.password()?;
            match self.check(&username, &password) {
                Ok(()) => {
                    info!("User {username} logged in");
                    return Ok(Some(username));
                }
                Err(reason) => {
                    warn!("Login attempt {attempt}/{max_attempts}: wrong password for {username}");
                    prompt.rejected(&reason)?;
                }
            }
        }

        Ok(None)
    }

    /// Replaces the password of `username` after checking the old one.
    ///
    /// # Errors
    ///
    /// Returns [`AccountError::WrongPassword`] without touching the store if
    /// `old` does not match (or the user does not exist), or a hashing error.
    pub fn change_password(&mut self, username: &str, old: &str, new: &str) -> Result<()> {
        if !self.verify(username, old) {
            return Err(AccountError::WrongPassword.into());
        }

        let credential = hash_password(new)?;
        self.users.insert(username.to_string(), credential);
        debug!("Password changed for {username}");
        Ok(())
    }
}
