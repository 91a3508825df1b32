//! Typed HTTP client for the Souk marketplace REST API
//!
//! Covers the endpoints the client screens depend on:
//! - booking lists per participant role and booking lifecycle actions
//! - two-party message history, message creation, mark-as-read
//! - public profile lookup
//! - dispute submission
//!
//! # Example
//!
//! ```rust,no_run
//! use souk_api_client::{MarketClient, ClientConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = MarketClient::new(ClientConfig {
//!     base_url: "https://api.souk.example".into(),
//!     ..Default::default()
//! });
//!
//! let bookings = client.list_bookings("outward").await?;
//! let history = client.conversation("u1", "u2").await?;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod error;
pub mod types;

// Re-export main types
pub use client::MarketClient;
pub use error::{ApiError, Result};
pub use types::*;
