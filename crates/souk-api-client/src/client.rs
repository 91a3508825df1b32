//! HTTP client for the marketplace REST API
//!
//! Every endpoint responds with an `{status, data, message?}` envelope;
//! `status != "success"` is a failure even on HTTP 200.

use crate::error::{ApiError, Result};
use crate::types::*;
use reqwest::{header, Client, StatusCode};
use std::time::Duration;

/// HTTP client for the marketplace REST API
///
/// # Example
///
/// ```rust,no_run
/// use souk_api_client::{MarketClient, ClientConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = MarketClient::new(ClientConfig {
///     base_url: "https://api.souk.example".into(),
///     auth_token: Some("token".into()),
///     ..Default::default()
/// });
///
/// let inward = client.list_bookings("inward").await?;
/// # Ok(())
/// # }
/// ```
pub struct MarketClient {
    config: ClientConfig,
    client: Client,
}

impl MarketClient {
    /// Create a new marketplace client
    pub fn new(config: ClientConfig) -> Self {
        let mut headers = header::HeaderMap::new();
        if let Some(ref token) = config.auth_token {
            if let Ok(value) = header::HeaderValue::from_str(&format!("Bearer {}", token)) {
                headers.insert(header::AUTHORIZATION, value);
            }
        }

        let client = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_default();

        Self { config, client }
    }

    /// Get the client configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    // ==================== Bookings ====================

    /// List bookings for the authenticated user's role.
    ///
    /// `role_segment` is `"inward"` (provider view) or `"outward"`
    /// (requester view).
    pub async fn list_bookings(&self, role_segment: &str) -> Result<Vec<BookingRecord>> {
        let url = format!("{}/bookings/get/user/{}", self.config.base_url, role_segment);
        let response = self.client.get(&url).send().await?;
        self.handle_envelope(response).await
    }

    /// Apply a lifecycle action to a booking.
    ///
    /// `action_segment` is one of `accept`, `reject`, `in-progress`,
    /// `complete`. Returns the updated record.
    pub async fn booking_action(
        &self,
        action_segment: &str,
        booking_id: &str,
    ) -> Result<BookingRecord> {
        let url = format!(
            "{}/bookings/{}/{}",
            self.config.base_url, action_segment, booking_id
        );
        let response = self.client.put(&url).send().await?;
        self.handle_envelope(response).await
    }

    /// Submit a dispute against a booking
    pub async fn open_dispute(&self, request: &DisputeRequest) -> Result<()> {
        let url = format!("{}/disputes", self.config.base_url);
        let response = self.client.post(&url).json(request).send().await?;
        // The dispute backend returns an empty data payload on success
        let envelope: Envelope<serde_json::Value> = self.decode(response).await?;
        if envelope.status != "success" {
            return Err(ApiError::Rejected {
                message: envelope.message.unwrap_or_default(),
            });
        }
        Ok(())
    }

    // ==================== Profiles ====================

    /// Fetch a user's public profile
    pub async fn get_profile(&self, user_id: &str) -> Result<Profile> {
        let url = format!("{}/users/basic/profile/{}", self.config.base_url, user_id);
        let response = self.client.get(&url).send().await?;
        self.handle_envelope(response).await
    }

    // ==================== Messages ====================

    /// Fetch the full message history between two users
    pub async fn conversation(&self, self_id: &str, peer_id: &str) -> Result<Vec<MessageRecord>> {
        let url = format!("{}/message/{}/{}", self.config.base_url, self_id, peer_id);
        let response = self.client.get(&url).send().await?;
        self.handle_envelope(response).await
    }

    /// Create a message; the response carries the server-assigned id
    pub async fn send_message(&self, request: &SendMessageRequest) -> Result<MessageRecord> {
        let url = format!("{}/message", self.config.base_url);
        let response = self.client.post(&url).json(request).send().await?;
        self.handle_envelope(response).await
    }

    /// Mark a single message as read
    pub async fn mark_as_read(&self, message_id: &str) -> Result<()> {
        let url = format!("{}/message/markasread/{}", self.config.base_url, message_id);
        let response = self.client.put(&url).send().await?;
        let envelope: Envelope<serde_json::Value> = self.decode(response).await?;
        if envelope.status != "success" {
            return Err(ApiError::Rejected {
                message: envelope.message.unwrap_or_default(),
            });
        }
        Ok(())
    }

    // ==================== Helpers ====================

    async fn decode<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<Envelope<T>> {
        if response.status() == StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound("resource not found".to_string()));
        }

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(ApiError::Server { status, message });
        }

        Ok(response.json().await?)
    }

    async fn handle_envelope<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T> {
        let envelope: Envelope<T> = self.decode(response).await?;

        if envelope.status != "success" {
            let message = envelope
                .message
                .unwrap_or_else(|| format!("status {}", envelope.status));
            tracing::debug!("request rejected by server: {}", message);
            return Err(ApiError::Rejected { message });
        }

        envelope
            .data
            .ok_or_else(|| ApiError::InvalidResponse("success envelope without data".to_string()))
    }
}
