//! Chat message model

use chrono::{DateTime, Utc};
use souk_api_client::MessageRecord;
use uuid::Uuid;

/// A message in the local conversation mirror.
///
/// `pending` marks an optimistic local entry whose remote write has not
/// been acknowledged yet; it never reaches the wire.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    pub id: String,
    pub sender_id: String,
    pub receiver_id: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub read: bool,
    pub pending: bool,
}

impl ChatMessage {
    /// Synthesize an optimistic local message with a temporary identifier.
    ///
    /// The id is replaced with the server-assigned one once the remote
    /// write is acknowledged.
    pub fn pending_local(
        sender_id: impl Into<String>,
        receiver_id: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id: format!("local-{}", Uuid::new_v4()),
            sender_id: sender_id.into(),
            receiver_id: receiver_id.into(),
            content: content.into(),
            created_at: Utc::now(),
            read: false,
            pending: true,
        }
    }

    /// Convert a confirmed wire record
    pub fn from_record(record: MessageRecord) -> Self {
        Self {
            id: record.id,
            sender_id: record.sender_id,
            receiver_id: record.receiver_id,
            content: record.content,
            created_at: record.created_at,
            read: record.mark_as_read,
            pending: false,
        }
    }

    /// Whether this message was sent *to* the given user
    pub fn is_incoming_for(&self, user_id: &str) -> bool {
        self.receiver_id == user_id
    }
}

/// Sort into logical reading order: strictly by creation timestamp
/// ascending, id as a deterministic tie-break regardless of arrival order.
pub(crate) fn sort_chronological(messages: &mut [ChatMessage]) {
    messages.sort_by(|a, b| {
        a.created_at
            .cmp(&b.created_at)
            .then_with(|| a.id.cmp(&b.id))
    });
}
