//! The normalized, presentation-ready representation of one mailbox message.

use serde::{Deserialize, Serialize};

/// One Inbox message, normalized into a uniform record.
///
/// Every text field defaults to an empty string; the two timestamps are
/// present-or-omitted. Timestamps are canonical ISO 8601 strings without a
/// timezone suffix (e.g. `2024-01-31T23:59:59`).
///
/// Records are constructed once per source message during stream extraction
/// and never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MessageRecord {
    /// Subject line.
    pub subject: String,

    /// Sender display string (display name, falling back to email address).
    pub from: String,

    /// Primary recipients, as ", "-joined `Display Name <email>` labels.
    pub to: String,

    /// Carbon-copy recipients, same format as `to`.
    pub cc: String,

    /// Delivery time, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub received_time: Option<String>,

    /// Submission time, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sent_time: Option<String>,

    /// Plain-text preview, at most 200 characters, CR/LF collapsed to spaces.
    pub snippet: String,
}

impl MessageRecord {
    /// The timestamp a record should be listed under: received time,
    /// falling back to sent time.
    pub fn display_time(&self) -> &str {
        self.received_time
            .as_deref()
            .or(self.sent_time.as_deref())
            .unwrap_or("")
    }
}
