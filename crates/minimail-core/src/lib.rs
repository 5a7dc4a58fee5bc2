//! # minimail-core
//!
//! Core logic for the `MiniMail+` terminal email simulator.
//!
//! This crate provides:
//! - JSON persistence for the account and mailbox stores
//! - Account registration, login and password changes (Argon2 credentials)
//! - Per-user mailboxes with inbox, drafts and sent folders
//! - Message operations: compose, send, draft actions, list, search, delete
//! - A [`Session`] that owns all state for the lifetime of the program
//!
//! ## Example
//!
//! ```ignore
//! use minimail_core::{Config, Session, mail};
//!
//! let mut session = Session::open(Config::load()?)?;
//! session.register("alice", "secret")?;
//! let draft = mail::compose("alice", "bob, carol", "Hi", "Lunch?", "send");
//! mail::send(session.mailboxes_mut(), draft)?;
//! session.save()?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

pub mod account;
pub mod config;
mod error;
pub mod mail;
pub mod mailbox;
mod session;
pub mod storage;

pub use account::{AccountError, AccountStore, LoginPrompt, ValidationError, validate_username};
pub use config::Config;
pub use error::{Error, Result};
pub use mail::{
    Action, Composition, Delivery, DraftCommand, DraftOutcome, InboxEntry, MailError, SearchHit,
};
pub use mailbox::{Mailbox, MailboxStore, Message};
pub use session::Session;
