//! Collaborator ports for the remote marketplace backend
//!
//! The tracker and synchronizer talk to the backend through these traits so
//! tests can substitute scripted fakes for the HTTP client.

use crate::booking::{BookingAction, ParticipantRole};
use crate::error::Result;
use async_trait::async_trait;
use souk_api_client::{BookingRecord, DisputeRequest, MessageRecord, Profile, SendMessageRequest};

/// Remote bookings collaborator
#[async_trait]
pub trait BookingsApi: Send + Sync {
    /// Fetch the full booking list for the caller's role
    async fn list_bookings(&self, role: ParticipantRole) -> Result<Vec<BookingRecord>>;

    /// Apply a lifecycle action remotely; returns the updated record
    async fn booking_action(&self, action: BookingAction, booking_id: &str)
        -> Result<BookingRecord>;

    /// Submit a dispute payload; the recording backend is external
    async fn open_dispute(&self, request: DisputeRequest) -> Result<()>;
}

/// Remote messages collaborator
#[async_trait]
pub trait MessagesApi: Send + Sync {
    /// Fetch the full message history between two users
    async fn conversation(&self, self_id: &str, peer_id: &str) -> Result<Vec<MessageRecord>>;

    /// Create a message; the response carries the server-assigned id
    async fn send_message(&self, request: SendMessageRequest) -> Result<MessageRecord>;

    /// Best-effort mark a single message as read
    async fn mark_as_read(&self, message_id: &str) -> Result<()>;
}

/// Remote profile lookup collaborator
#[async_trait]
pub trait ProfilesApi: Send + Sync {
    /// Fetch a user's public profile
    async fn get_profile(&self, user_id: &str) -> Result<Profile>;
}
