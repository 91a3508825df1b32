//! Souk SDK - Marketplace Client Core
//!
//! Client-side state engine for the Souk marketplace: tracks a booking
//! through its lifecycle and keeps a two-party chat mirrored locally, both
//! over the marketplace REST backend.
//!
//! # Architecture
//!
//! Two engines share a set of collaborator ports:
//! - **LifecycleTracker**: guarded booking transitions with optimistic
//!   mirror updates and rollback on remote failure
//! - **ChatSynchronizer**: polling conversation mirror with optimistic
//!   sends and stale-fetch discard
//!
//! The ports ([`BookingsApi`], [`MessagesApi`], [`ProfilesApi`]) are
//! implemented over HTTP by [`MarketClient`] and in memory by
//! [`MockMarket`] for tests.
//!
//! # Example
//!
//! ```rust,ignore
//! use souk_sdk::{
//!     ClientConfig, LifecycleTracker, MarketClient, ParticipantRole, Session,
//! };
//! use std::sync::Arc;
//!
//! let client = Arc::new(MarketClient::new(ClientConfig {
//!     base_url: "https://api.souk.example".into(),
//!     auth_token: token,
//!     ..Default::default()
//! }));
//!
//! let session = Session::new("user-1").with_auth_token(token);
//! let (tracker, mut events) =
//!     LifecycleTracker::new(client, session, ParticipantRole::Provider);
//!
//! tracker.load("booking-7").await?;
//! tracker.accept().await?;
//! ```

// Collaborator ports and their adapters
pub mod api;

// Booking lifecycle engine
pub mod booking;

// Chat synchronizer
pub mod chat;

// Error types
pub mod error;

// Authenticated session context
pub mod session;

// Re-export collaborator ports
pub use api::{BookingsApi, MessagesApi, MockMarket, ProfilesApi};

// Re-export booking types
pub use booking::{
    timeline, Booking, BookingAction, BookingStatus, LifecycleTracker, ParticipantRole,
    TimelineStage, TimelineStep, TrackerEvent, REVIEW_PROMPT_DELAY,
};

// Re-export chat types
pub use chat::{ChatMessage, ChatSynchronizer};

// Re-export error types
pub use error::{Result, SdkError};

// Re-export session
pub use session::Session;

// Re-export from the wire client
pub use souk_api_client::{
    BookingRecord, ClientConfig, DisputeRequest, MarketClient, MessageRecord, Profile,
    SendMessageRequest,
};
