//! Message operations.
//!
//! Composing and delivering messages, and listing, searching and removing
//! them from a user's folders. Every operation makes sure the mailboxes it
//! touches exist before reading or writing them.

mod compose;
mod folders;

pub use compose::{Action, Composition, Delivery, compose, parse_recipients, send};
pub use folders::{
    DraftCommand, DraftOutcome, InboxEntry, SearchHit, act_on_draft, delete, list_drafts,
    list_inbox, list_sent, parse_index, search,
};

/// Rejected mail operation. State is left unchanged.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MailError {
    /// Index outside the folder.
    #[error("Invalid index {index}: folder holds {len} message(s)")]
    InvalidIndex {
        /// Requested index.
        index: usize,
        /// Folder length at the time of the request.
        len: usize,
    },

    /// Index missing or not a number.
    #[error("Please enter a valid number (got '{0}')")]
    InvalidInput(String),

    /// Compose action other than send or draft.
    #[error("Invalid option '{0}'. Email not sent.")]
    InvalidAction(String),
}
