//! In-memory mock marketplace backend for testing.
//!
//! Configurable responses and failure switches for unit and integration
//! tests; records the calls it receives.

use crate::api::traits::{BookingsApi, MessagesApi, ProfilesApi};
use crate::booking::{BookingAction, ParticipantRole};
use crate::error::{Result, SdkError};
use async_trait::async_trait;
use chrono::Utc;
use souk_api_client::{BookingRecord, DisputeRequest, MessageRecord, Profile, SendMessageRequest};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use tokio::sync::Mutex;

/// Mock marketplace backend.
///
/// Implements all three collaborator ports against in-memory state.
#[derive(Default)]
pub struct MockMarket {
    bookings: Mutex<Vec<BookingRecord>>,
    conversation: Mutex<Vec<MessageRecord>>,
    profiles: Mutex<HashMap<String, Profile>>,
    disputes: Mutex<Vec<DisputeRequest>>,
    fail_fetches: AtomicBool,
    fail_mutations: AtomicBool,
    fail_mark_read_for: Mutex<HashSet<String>>,
    action_calls: Mutex<Vec<(BookingAction, String)>>,
    mark_read_calls: Mutex<Vec<String>>,
    send_counter: AtomicU32,
}

impl MockMarket {
    /// Create an empty mock backend
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a booking record
    pub async fn with_booking(self, record: BookingRecord) -> Self {
        self.bookings.lock().await.push(record);
        self
    }

    /// Seed the conversation history
    pub async fn with_conversation(self, records: Vec<MessageRecord>) -> Self {
        *self.conversation.lock().await = records;
        self
    }

    /// Seed a profile
    pub async fn with_profile(self, profile: Profile) -> Self {
        self.profiles
            .lock()
            .await
            .insert(profile.user_id.clone(), profile);
        self
    }

    /// Make every fetch (booking list, conversation) fail
    pub fn set_fail_fetches(&self, fail: bool) {
        self.fail_fetches.store(fail, Ordering::SeqCst);
    }

    /// Make every mutation (booking action, send, dispute) fail
    pub fn set_fail_mutations(&self, fail: bool) {
        self.fail_mutations.store(fail, Ordering::SeqCst);
    }

    /// Make mark-as-read fail for one message id
    pub async fn fail_mark_read_for(&self, message_id: impl Into<String>) {
        self.fail_mark_read_for.lock().await.insert(message_id.into());
    }

    /// Booking actions received, in order
    pub async fn action_calls(&self) -> Vec<(BookingAction, String)> {
        self.action_calls.lock().await.clone()
    }

    /// Message ids mark-as-read was attempted for, in order
    pub async fn mark_read_calls(&self) -> Vec<String> {
        self.mark_read_calls.lock().await.clone()
    }

    /// Disputes received
    pub async fn disputes(&self) -> Vec<DisputeRequest> {
        self.disputes.lock().await.clone()
    }

    /// Current server-side conversation state
    pub async fn conversation_state(&self) -> Vec<MessageRecord> {
        self.conversation.lock().await.clone()
    }
}

#[async_trait]
impl BookingsApi for MockMarket {
    async fn list_bookings(&self, _role: ParticipantRole) -> Result<Vec<BookingRecord>> {
        if self.fail_fetches.load(Ordering::SeqCst) {
            return Err(SdkError::RemoteActionFailed("mock fetch failure".into()));
        }
        Ok(self.bookings.lock().await.clone())
    }

    async fn booking_action(
        &self,
        action: BookingAction,
        booking_id: &str,
    ) -> Result<BookingRecord> {
        self.action_calls
            .lock()
            .await
            .push((action, booking_id.to_string()));

        if self.fail_mutations.load(Ordering::SeqCst) {
            return Err(SdkError::RemoteActionFailed("mock mutation failure".into()));
        }

        let mut bookings = self.bookings.lock().await;
        let record = bookings
            .iter_mut()
            .find(|r| r.id == booking_id)
            .ok_or_else(|| SdkError::NotFound(format!("booking {booking_id}")))?;

        if let Some(target) = action.target() {
            record.status = target.as_str().to_string();
        }
        Ok(record.clone())
    }

    async fn open_dispute(&self, request: DisputeRequest) -> Result<()> {
        if self.fail_mutations.load(Ordering::SeqCst) {
            return Err(SdkError::RemoteActionFailed("mock mutation failure".into()));
        }
        self.disputes.lock().await.push(request);
        Ok(())
    }
}

#[async_trait]
impl MessagesApi for MockMarket {
    async fn conversation(&self, _self_id: &str, _peer_id: &str) -> Result<Vec<MessageRecord>> {
        if self.fail_fetches.load(Ordering::SeqCst) {
            return Err(SdkError::RemoteActionFailed("mock fetch failure".into()));
        }
        Ok(self.conversation.lock().await.clone())
    }

    async fn send_message(&self, request: SendMessageRequest) -> Result<MessageRecord> {
        if self.fail_mutations.load(Ordering::SeqCst) {
            return Err(SdkError::RemoteActionFailed("mock send failure".into()));
        }

        let n = self.send_counter.fetch_add(1, Ordering::SeqCst) + 1;
        let record = MessageRecord {
            id: format!("srv-{n}"),
            sender_id: request.sender_id,
            receiver_id: request.receiver_id,
            content: request.content,
            created_at: Utc::now(),
            mark_as_read: request.mark_as_read,
        };
        self.conversation.lock().await.push(record.clone());
        Ok(record)
    }

    async fn mark_as_read(&self, message_id: &str) -> Result<()> {
        self.mark_read_calls.lock().await.push(message_id.to_string());

        if self.fail_mark_read_for.lock().await.contains(message_id) {
            return Err(SdkError::RemoteActionFailed(format!(
                "mock mark-read failure for {message_id}"
            )));
        }

        let mut conversation = self.conversation.lock().await;
        if let Some(record) = conversation.iter_mut().find(|m| m.id == message_id) {
            record.mark_as_read = true;
        }
        Ok(())
    }
}

#[async_trait]
impl ProfilesApi for MockMarket {
    async fn get_profile(&self, user_id: &str) -> Result<Profile> {
        self.profiles
            .lock()
            .await
            .get(user_id)
            .cloned()
            .ok_or_else(|| SdkError::NotFound(format!("profile {user_id}")))
    }
}

/// Build a booking record with the given ids and status
pub fn booking_record(
    id: &str,
    status: &str,
    requester_id: &str,
    provider_id: &str,
) -> BookingRecord {
    BookingRecord {
        id: id.to_string(),
        title: "Test booking".to_string(),
        description: None,
        date: Utc::now(),
        location: None,
        status: status.to_string(),
        requester_id: requester_id.to_string(),
        provider_id: provider_id.to_string(),
        price: None,
        payment_method: None,
        images: Vec::new(),
        attachment: None,
    }
}

/// Build a message record with an explicit timestamp
pub fn message_record(
    id: &str,
    sender_id: &str,
    receiver_id: &str,
    content: &str,
    created_at: chrono::DateTime<Utc>,
) -> MessageRecord {
    MessageRecord {
        id: id.to_string(),
        sender_id: sender_id.to_string(),
        receiver_id: receiver_id.to_string(),
        content: content.to_string(),
        created_at,
        mark_as_read: false,
    }
}
