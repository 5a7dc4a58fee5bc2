//! Text rendering for menus and message listings.

use minimail_core::{InboxEntry, Message, SearchHit};

/// Width of banners and separators.
pub const WIDTH: usize = 60;

/// Horizontal rule of `=` characters.
fn rule() -> String {
    "=".repeat(WIDTH)
}

/// Horizontal rule of `-` characters.
pub fn separator() -> String {
    "-".repeat(WIDTH)
}

/// Centred title between two rules, preceded by a blank line.
pub fn banner(title: &str) -> String {
    format!("\n{rule}\n{title:^WIDTH$}\n{rule}", rule = rule())
}

/// Banner shown once at startup (no leading blank line).
pub fn welcome(title: &str) -> String {
    format!("{rule}\n{title:^WIDTH$}\n{rule}", rule = rule())
}

/// Header, subject and body of a message, followed by a separator.
fn block(header: &str, message: &Message) -> String {
    format!(
        "\n{header}\nSubject: {}\nMessage:\n{}\n{}",
        message.subject,
        message.body,
        separator()
    )
}

/// An inbox entry, labelled with its storage index.
pub fn inbox_entry(entry: &InboxEntry) -> String {
    let status = if entry.is_new { "[NEW] " } else { "" };
    block(
        &format!(
            "[{}] {status}From: {} | Time: {}",
            entry.index,
            entry.message.sender,
            entry.message.time_display()
        ),
        &entry.message,
    )
}

/// A sent message or draft, labelled with its position in the listing.
pub fn outgoing(position: usize, message: &Message) -> String {
    block(
        &format!(
            "[{position}] To: {} | Time: {}",
            message.recipients.join(", "),
            message.time_display()
        ),
        message,
    )
}

/// A search result, labelled with its storage index.
pub fn search_hit(hit: &SearchHit) -> String {
    block(
        &format!(
            "[{}] From: {} | Time: {}",
            hit.index,
            hit.message.sender,
            hit.message.time_display()
        ),
        &hit.message,
    )
}
