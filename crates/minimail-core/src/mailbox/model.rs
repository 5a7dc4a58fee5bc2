//! Mailbox data models.

use chrono::{Local, NaiveDateTime, SubsecRound};
use serde::{Deserialize, Serialize};

/// A message as stored in a folder.
///
/// Every folder holds its own copy; delivering a message clones it once per
/// recipient, so changing one copy never affects another.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Sender username.
    #[serde(rename = "from")]
    pub sender: String,
    /// Recipient usernames.
    #[serde(rename = "to", default)]
    pub recipients: Vec<String>,
    /// Subject line.
    pub subject: String,
    /// Message body.
    pub body: String,
    /// Creation time, local clock, second precision.
    #[serde(with = "timestamp")]
    pub time: NaiveDateTime,
    /// Whether the message has been shown in its owner's inbox.
    #[serde(default)]
    pub read: bool,
}

impl Message {
    /// Creates an unread message stamped with the current local time.
    #[must_use]
    pub fn new(
        sender: impl Into<String>,
        recipients: Vec<String>,
        subject: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self::at(
            sender,
            recipients,
            subject,
            body,
            Local::now().naive_local().trunc_subsecs(0),
        )
    }

    /// Creates an unread message with an explicit timestamp.
    #[must_use]
    pub fn at(
        sender: impl Into<String>,
        recipients: Vec<String>,
        subject: impl Into<String>,
        body: impl Into<String>,
        time: NaiveDateTime,
    ) -> Self {
        Self {
            sender: sender.into(),
            recipients,
            subject: subject.into(),
            body: body.into(),
            time,
            read: false,
        }
    }

    /// Checks if subject or body contains `keyword` (case-insensitive).
    #[must_use]
    pub fn matches(&self, keyword: &str) -> bool {
        let keyword = keyword.to_lowercase();
        self.subject.to_lowercase().contains(&keyword)
            || self.body.to_lowercase().contains(&keyword)
    }

    /// Returns the timestamp as stored on disk (`YYYY-MM-DDTHH:MM:SS`).
    #[must_use]
    pub fn time_display(&self) -> String {
        self.time.format(timestamp::FORMAT).to_string()
    }
}

/// One user's folders.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mailbox {
    /// Received messages in arrival order.
    #[serde(default)]
    pub inbox: Vec<Message>,
    /// Drafts in creation order.
    #[serde(default)]
    pub drafts: Vec<Message>,
    /// Sent messages in send order.
    #[serde(default)]
    pub sent: Vec<Message>,
}

impl Mailbox {
    /// Creates a mailbox with three empty folders.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of inbox messages not yet shown.
    #[must_use]
    pub fn unread_count(&self) -> usize {
        self.inbox.iter().filter(|m| !m.read).count()
    }
}

/// Serde helpers for message timestamps.
///
/// Written without fractional seconds. Fractional seconds are accepted on
/// read and truncated, so a loaded value is exactly what a save writes back.
mod timestamp {
    use chrono::{NaiveDateTime, SubsecRound};
    use serde::{Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%Y-%m-%dT%H:%M:%S";
    const PARSE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

    #[allow(clippy::trivially_copy_pass_by_ref)] // Required by serde with= signature
    pub fn serialize<S>(time: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&time.format(FORMAT))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&s, PARSE_FORMAT)
            .map(|time| time.trunc_subsecs(0))
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::{NaiveDate, Timelike};

    use super::*;

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 17)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    mod message_tests {
        use super::*;

        #[test]
        fn new_is_unread_and_whole_seconds() {
            let msg = Message::new("alice", vec!["bob".into()], "Hi", "There");
            assert!(!msg.read);
            assert_eq!(msg.time.nanosecond(), 0);
        }

        #[test]
        fn matches_subject_or_body() {
            let msg = Message::at("a", vec![], "Quarterly REPORT", "numbers inside", at(9, 0, 0));
            assert!(msg.matches("report"));
            assert!(msg.matches("NUMBERS"));
            assert!(msg.matches(""));
            assert!(!msg.matches("invoice"));
        }

        #[test]
        fn json_shape() {
            let msg = Message::at("alice", vec!["bob".into()], "S", "B", at(8, 5, 3));
            let json = serde_json::to_value(&msg).unwrap();
            assert_eq!(
                json,
                serde_json::json!({
                    "from": "alice",
                    "to": ["bob"],
                    "subject": "S",
                    "body": "B",
                    "time": "2024-05-17T08:05:03",
                    "read": false
                })
            );
        }

        #[test]
        fn read_flag_optional_on_load() {
            let msg: Message = serde_json::from_str(
                r#"{"from":"a","to":["b"],"subject":"s","body":"b","time":"2024-05-17T10:00:00"}"#,
            )
            .unwrap();
            assert!(!msg.read);
            assert_eq!(msg.time, at(10, 0, 0));
        }

        #[test]
        fn fractional_seconds_accepted() {
            let msg: Message = serde_json::from_str(
                r#"{"from":"a","to":[],"subject":"s","body":"b","time":"2024-05-17T10:00:00.250"}"#,
            )
            .unwrap();
            assert_eq!(msg.time, at(10, 0, 0));
            assert_eq!(msg.time.nanosecond(), 0);
        }

        #[test]
        fn loaded_time_matches_saved_time() {
            let msg: Message = serde_json::from_str(
                r#"{"from":"a","to":[],"subject":"s","body":"b","time":"2024-05-17T10:00:00.250"}"#,
            )
            .unwrap();
            let reloaded: Message =
                serde_json::from_str(&serde_json::to_string(&msg).unwrap()).unwrap();
            assert_eq!(reloaded, msg);
        }

        #[test]
        fn bad_timestamp_rejected() {
            let result: Result<Message, _> = serde_json::from_str(
                r#"{"from":"a","to":[],"subject":"s","body":"b","time":"yesterday"}"#,
            );
            assert!(result.is_err());
        }

        #[test]
        fn time_display() {
            let msg = Message::at("a", vec![], "s", "b", at(23, 59, 1));
            assert_eq!(msg.time_display(), "2024-05-17T23:59:01");
        }
    }

    mod mailbox_tests {
        use super::*;

        #[test]
        fn new_is_empty() {
            let mailbox = Mailbox::new();
            assert!(mailbox.inbox.is_empty());
            assert!(mailbox.drafts.is_empty());
            assert!(mailbox.sent.is_empty());
        }

        #[test]
        fn unread_count() {
            let mut mailbox = Mailbox::new();
            let mut seen = Message::at("a", vec![], "s", "b", at(1, 0, 0));
            seen.read = true;
            mailbox.inbox.push(seen);
            mailbox.inbox.push(Message::at("a", vec![], "s", "b", at(2, 0, 0)));
            assert_eq!(mailbox.unread_count(), 1);
        }

        #[test]
        fn json_shape() {
            let json = serde_json::to_value(Mailbox::new()).unwrap();
            assert_eq!(
                json,
                serde_json::json!({"inbox": [], "drafts": [], "sent": []})
            );
        }
    }
}
