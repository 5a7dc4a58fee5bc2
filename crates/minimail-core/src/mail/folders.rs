//! Listing, searching and removing messages.

use tracing::debug;

use super::MailError;
use super::compose::deliver;
use crate::mailbox::{MailboxStore, Message};

/// A message shown by [`list_inbox`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboxEntry {
    /// Position in the inbox as stored (the index [`delete`] expects).
    pub index: usize,
    /// Whether the message was unread before this listing.
    pub is_new: bool,
    /// The message, already marked read.
    pub message: Message,
}

/// A message matched by [`search`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    /// Position in the inbox as stored.
    pub index: usize,
    /// The matching message.
    pub message: Message,
}

/// Follow-up command for the drafts folder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftCommand {
    /// Deliver the draft at this index.
    Send(usize),
    /// Discard the draft at this index.
    Delete(usize),
    /// Leave the drafts alone.
    Cancel,
}

impl DraftCommand {
    /// Parses `send <index>`, `del <index>`, or anything else as cancel.
    ///
    /// # Errors
    ///
    /// Returns [`MailError::InvalidInput`] when a send or delete command has
    /// a missing or non-numeric index.
    pub fn parse(input: &str) -> Result<Self, MailError> {
        let input = input.trim();
        if input.starts_with("send") {
            Ok(Self::Send(index_argument(input)?))
        } else if input.starts_with("del") {
            Ok(Self::Delete(index_argument(input)?))
        } else {
            Ok(Self::Cancel)
        }
    }
}

/// Result of [`act_on_draft`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftOutcome {
    /// The draft was delivered.
    Sent(Message),
    /// The draft was discarded.
    Deleted(Message),
    /// Nothing happened.
    Cancelled,
}

/// Parses a 0-based index typed by the user.
///
/// # Errors
///
/// Returns [`MailError::InvalidInput`] if the input is not a non-negative
/// integer.
pub fn parse_index(input: &str) -> Result<usize, MailError> {
    let input = input.trim();
    input
        .parse()
        .map_err(|_| MailError::InvalidInput(input.to_string()))
}

/// Second whitespace separated token of a draft command, as an index.
fn index_argument(command: &str) -> Result<usize, MailError> {
    let token = command
        .split_whitespace()
        .nth(1)
        .ok_or_else(|| MailError::InvalidInput(command.to_string()))?;
    parse_index(token)
}

/// Bounds-checked removal.
fn take(folder: &mut Vec<Message>, index: usize) -> Result<Message, MailError> {
    if index < folder.len() {
        Ok(folder.remove(index))
    } else {
        Err(MailError::InvalidIndex {
            index,
            len: folder.len(),
        })
    }
}

/// Lists the inbox oldest first and marks every message read.
///
/// Messages with equal timestamps keep their storage order.
pub fn list_inbox(store: &mut MailboxStore, username: &str) -> Vec<InboxEntry> {
    let inbox = &mut store.ensure(username).inbox;

    let mut order: Vec<usize> = (0..inbox.len()).collect();
    order.sort_by_key(|&i| inbox[i].time);

    order
        .into_iter()
        .map(|index| {
            let message = &mut inbox[index];
            let is_new = !message.read;
            message.read = true;
            InboxEntry {
                index,
                is_new,
                message: message.clone(),
            }
        })
        .collect()
}

/// Lists sent messages newest first.
pub fn list_sent(store: &mut MailboxStore, username: &str) -> Vec<Message> {
    let mut sent = store.ensure(username).sent.clone();
    sent.sort_by(|a, b| b.time.cmp(&a.time));
    sent
}

/// Lists drafts in storage order.
pub fn list_drafts(store: &mut MailboxStore, username: &str) -> Vec<Message> {
    store.ensure(username).drafts.clone()
}

/// Applies a drafts-folder command.
///
/// Sending removes the draft and delivers it exactly like a freshly
/// composed message.
///
/// # Errors
///
/// Returns [`MailError::InvalidIndex`] if the index is out of range; the
/// drafts are left unchanged.
pub fn act_on_draft(
    store: &mut MailboxStore,
    username: &str,
    command: DraftCommand,
) -> Result<DraftOutcome, MailError> {
    match command {
        DraftCommand::Send(index) => {
            let draft = take(&mut store.ensure(username).drafts, index)?;
            deliver(store, draft.clone());
            Ok(DraftOutcome::Sent(draft))
        }
        DraftCommand::Delete(index) => {
            let draft = take(&mut store.ensure(username).drafts, index)?;
            debug!("{username} discarded draft {index}");
            Ok(DraftOutcome::Deleted(draft))
        }
        DraftCommand::Cancel => Ok(DraftOutcome::Cancelled),
    }
}

/// Removes the inbox message at a storage index and returns it.
///
/// # Errors
///
/// Returns [`MailError::InvalidIndex`] if the index is out of range; the
/// inbox is left unchanged.
pub fn delete(
    store: &mut MailboxStore,
    username: &str,
    index: usize,
) -> Result<Message, MailError> {
    let message = take(&mut store.ensure(username).inbox, index)?;
    debug!("{username} deleted inbox message {index} from {}", message.sender);
    Ok(message)
}

/// Finds inbox messages whose subject or body contains `keyword`,
/// ignoring case. Results keep storage order; an empty keyword matches all.
pub fn search(store: &mut MailboxStore, username: &str, keyword: &str) -> Vec<SearchHit> {
    let keyword = keyword.trim();
    store
        .ensure(username)
        .inbox
        .iter()
        .enumerate()
        .filter(|(_, message)| message.matches(keyword))
        .map(|(index, message)| SearchHit {
            index,
            message: message.clone(),
        })
        .collect()
}
