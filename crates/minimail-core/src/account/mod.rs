//! Account management module.
//!
//! Provides the account store, credential hashing, and username validation.

pub mod credentials;
mod repository;
mod validation;

pub use repository::{AccountError, AccountStore, LoginPrompt};
pub use validation::{ValidationError, validate_username};
