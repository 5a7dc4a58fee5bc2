//! Composing and delivering messages.

use tracing::{debug, info};

use super::MailError;
use crate::mailbox::{MailboxStore, Message};

/// What to do with a freshly composed message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Deliver now.
    Send,
    /// Keep in the sender's drafts.
    Draft,
    /// Anything else the user typed.
    Other(String),
}

impl Action {
    /// Classifies free-text input, ignoring case and surrounding whitespace.
    #[must_use]
    pub fn from_input(input: &str) -> Self {
        let normalized = input.trim().to_lowercase();
        match normalized.as_str() {
            "send" => Self::Send,
            "draft" => Self::Draft,
            _ => Self::Other(normalized),
        }
    }
}

/// A composed message together with what to do with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Composition {
    /// The message, unread and stamped at compose time.
    pub message: Message,
    /// Requested action. Not validated until [`send`].
    pub action: Action,
}

/// Result of a successful [`send`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    /// Delivered to these recipients.
    Sent(Vec<String>),
    /// Stored in the sender's drafts.
    Drafted,
}

/// Splits a comma separated recipient list, dropping blank entries.
#[must_use]
pub fn parse_recipients(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .map(ToString::to_string)
        .collect()
}

/// Builds a message from raw user input.
#[must_use]
pub fn compose(
    sender: &str,
    recipients: &str,
    subject: &str,
    body: &str,
    action: &str,
) -> Composition {
    Composition {
        message: Message::new(sender, parse_recipients(recipients), subject, body),
        action: Action::from_input(action),
    }
}

/// Sends or drafts a composed message.
///
/// # Errors
///
/// Returns [`MailError::InvalidAction`] for an action other than send or
/// draft; nothing is stored in that case.
pub fn send(store: &mut MailboxStore, composition: Composition) -> Result<Delivery, MailError> {
    let Composition { message, action } = composition;
    match action {
        Action::Send => Ok(Delivery::Sent(deliver(store, message))),
        Action::Draft => {
            debug!("Saving draft for {}", message.sender);
            store.ensure(&message.sender).drafts.push(message);
            Ok(Delivery::Drafted)
        }
        Action::Other(other) => Err(MailError::InvalidAction(other)),
    }
}

/// Copies `message` into every recipient's inbox and files the original in
/// the sender's sent folder. Returns the recipients.
pub(super) fn deliver(store: &mut MailboxStore, message: Message) -> Vec<String> {
    for recipient in &message.recipients {
        store.ensure(recipient).inbox.push(message.clone());
    }

    info!(
        "{} sent '{}' to {} recipient(s)",
        message.sender,
        message.subject,
        message.recipients.len()
    );
    let recipients = message.recipients.clone();
    store.ensure(&message.sender).sent.push(message);
    recipients
}
