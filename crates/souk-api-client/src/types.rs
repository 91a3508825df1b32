//! Wire types for the marketplace API

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL for the marketplace HTTP API
    pub base_url: String,
    /// Optional bearer token for authenticated requests
    pub auth_token: Option<String>,
    /// Request timeout in seconds (default: 15)
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            auth_token: None,
            timeout_secs: 15,
        }
    }
}

/// Response envelope used by every marketplace endpoint.
///
/// `status != "success"` is treated as a failure regardless of the HTTP
/// status code.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    pub status: String,
    #[serde(default = "Option::default")]
    pub data: Option<T>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Booking record as returned by the bookings endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRecord {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Scheduled date/time for the job
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub location: Option<String>,
    /// Status string, one of the lifecycle states
    pub status: String,
    pub requester_id: String,
    pub provider_id: String,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub payment_method: Option<String>,
    /// Up to four thumbnail image references
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub attachment: Option<String>,
}

/// Message record as returned by the conversation endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageRecord {
    pub id: String,
    pub sender_id: String,
    pub receiver_id: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    #[serde(rename = "mark_as_read", default)]
    pub mark_as_read: bool,
}

/// Request body for `POST /message`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageRequest {
    pub sender_id: String,
    pub receiver_id: String,
    pub content: String,
    #[serde(rename = "mark_as_read")]
    pub mark_as_read: bool,
}

/// Public profile fields used to decorate booking and chat views
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub user_id: String,
    pub display_name: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

/// Payload for submitting a dispute against a booking
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisputeRequest {
    pub booking_id: String,
    /// The other party to the booking
    pub counterpart_id: String,
    pub details: String,
}
