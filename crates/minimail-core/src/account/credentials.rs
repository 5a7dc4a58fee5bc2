//! Password credential hashing.
//!
//! Passwords are stored as salted Argon2 hashes in PHC string format
//! (`$argon2id$v=19$...`). Stored values that do not parse as a PHC string
//! are plaintext entries from older account files and are compared as-is.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use tracing::debug;

use crate::{Error, Result};

/// Hashes a password with a fresh random salt.
///
/// # Errors
///
/// Returns an error if Argon2 rejects the input.
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| Error::PasswordHash(e.to_string()))?;
    Ok(hash.to_string())
}

/// Checks a password against a stored credential.
#[must_use]
pub fn verify_password(password: &str, stored: &str) -> bool {
    match PasswordHash::new(stored) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => {
            debug!("Stored credential is not a PHC string, comparing as plaintext");
            stored == password
        }
    }
}
