//! Mailbox store.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::model::Mailbox;

/// Mapping from username to mailbox.
///
/// Mailboxes are created on first use, including for recipients that never
/// registered an account.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MailboxStore {
    boxes: BTreeMap<String, Mailbox>,
}

impl MailboxStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the mailbox of `username`, creating an empty one if needed.
    pub fn ensure(&mut self, username: &str) -> &mut Mailbox {
        match self.boxes.entry(username.to_string()) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                debug!("Creating mailbox for {username}");
                entry.insert(Mailbox::new())
            }
        }
    }

    /// Returns the mailbox of `username` if it exists.
    #[must_use]
    pub fn get(&self, username: &str) -> Option<&Mailbox> {
        self.boxes.get(username)
    }

    /// Number of mailboxes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    /// Returns true if there are no mailboxes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }
}
