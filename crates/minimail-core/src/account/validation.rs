//! Username validation.

/// Validation error for a new username.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    /// Username is empty.
    EmptyUsername,
    /// Username contains the recipient separator.
    ContainsComma,
    /// Username starts or ends with whitespace.
    SurroundingWhitespace,
}

impl ValidationError {
    /// Get human-readable error message.
    #[must_use]
    pub const fn message(&self) -> &'static str {
        match self {
            Self::EmptyUsername => "Username cannot be empty",
            Self::ContainsComma => "Username cannot contain ','",
            Self::SurroundingWhitespace => "Username cannot start or end with whitespace",
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ValidationError {}

/// Validate a username for registration.
///
/// # Errors
///
/// Returns the first rule the username breaks.
pub fn validate_username(username: &str) -> Result<(), ValidationError> {
    if username.trim().is_empty() {
        return Err(ValidationError::EmptyUsername);
    }

    // Recipients are entered as a comma separated list
    if username.contains(',') {
        return Err(ValidationError::ContainsComma);
    }

    // Recipient names are trimmed, so a padded name could never be addressed
    if username != username.trim() {
        return Err(ValidationError::SurroundingWhitespace);
    }

    Ok(())
}
