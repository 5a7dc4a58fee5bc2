//! Mailbox module.
//!
//! Per-user inbox, drafts and sent folders, and the messages they hold.

mod model;
mod store;

pub use model::{Mailbox, Message};
pub use store::MailboxStore;
