//! Booking domain model: status lifecycle, participant roles, actions

use crate::error::SdkError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use souk_api_client::BookingRecord;
use std::fmt;

/// Payment method applied when the record carries none
pub const DEFAULT_PAYMENT_METHOD: &str = "cash";

/// Maximum number of thumbnail image references kept on a booking
pub const MAX_BOOKING_IMAGES: usize = 4;

/// Lifecycle status of a booking.
///
/// Status is monotonic along `Pending → Accepted → InProgress → Completed`;
/// `Rejected` is reachable from `Pending`/`Accepted` and `Disputed` from any
/// pre-completed state. No transition moves backward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    Pending,
    Accepted,
    InProgress,
    Completed,
    Rejected,
    Disputed,
}

impl BookingStatus {
    /// Ordinal rank along the forward chain, used by the timeline
    /// derivation: pending=1, accepted=2, in_progress=3, completed=4,
    /// disputed=4. A rejected booking never advanced past the request.
    pub fn rank(&self) -> u8 {
        match self {
            BookingStatus::Pending => 1,
            BookingStatus::Accepted => 2,
            BookingStatus::InProgress => 3,
            BookingStatus::Completed => 4,
            BookingStatus::Disputed => 4,
            BookingStatus::Rejected => 1,
        }
    }

    /// Terminal states accept no further transitions
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            BookingStatus::Completed | BookingStatus::Rejected | BookingStatus::Disputed
        )
    }

    /// Whether the lifecycle permits moving from `self` to `to`
    pub fn can_transition(&self, to: BookingStatus) -> bool {
        use BookingStatus::*;
        match (self, to) {
            (Pending, Accepted) | (Pending, Rejected) => true,
            (Accepted, InProgress) | (Accepted, Completed) | (Accepted, Rejected) => true,
            (InProgress, Completed) => true,
            // Disputes absorb any non-terminal state
            (from, Disputed) => !from.is_terminal(),
            _ => false,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Accepted => "accepted",
            BookingStatus::InProgress => "in_progress",
            BookingStatus::Completed => "completed",
            BookingStatus::Rejected => "rejected",
            BookingStatus::Disputed => "disputed",
        }
    }

    /// Parse a wire status string; unknown values are an error rather than
    /// being coerced to a default.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(BookingStatus::Pending),
            "accepted" => Some(BookingStatus::Accepted),
            "in_progress" | "in-progress" => Some(BookingStatus::InProgress),
            "completed" => Some(BookingStatus::Completed),
            "rejected" => Some(BookingStatus::Rejected),
            "disputed" => Some(BookingStatus::Disputed),
            _ => None,
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which side of the booking the caller is on.
///
/// The "inward" (provider) and "outward" (requester) views share one
/// tracker parameterized by role, with `may` exposing only the action
/// subset valid for that role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticipantRole {
    /// Service provider — sees incoming job requests (inward view)
    Provider,
    /// Requester — sees jobs booked from someone else (outward view)
    Requester,
}

impl ParticipantRole {
    /// Path segment for the bookings list endpoint
    pub fn segment(&self) -> &'static str {
        match self {
            ParticipantRole::Provider => "inward",
            ParticipantRole::Requester => "outward",
        }
    }

    /// Capability check: may this role perform `action` from `from`?
    ///
    /// Implies `from.can_transition(action.target())` for every action that
    /// has a target status.
    pub fn may(&self, action: BookingAction, from: BookingStatus) -> bool {
        use BookingAction::*;
        use BookingStatus::*;
        match (self, action) {
            (ParticipantRole::Provider, Accept) => from == Pending,
            (ParticipantRole::Requester, Accept) => false,
            (_, Reject) => matches!(from, Pending | Accepted),
            (ParticipantRole::Requester, Start) => from == Accepted,
            (ParticipantRole::Provider, Start) => false,
            (ParticipantRole::Provider, Complete) => from == Accepted,
            (ParticipantRole::Requester, Complete) => from == InProgress,
            (_, Dispute) => !from.is_terminal(),
        }
    }

    /// The other party's user id for a given booking
    pub fn counterpart_of<'a>(&self, booking: &'a Booking) -> &'a str {
        match self {
            ParticipantRole::Provider => &booking.requester_id,
            ParticipantRole::Requester => &booking.provider_id,
        }
    }
}

/// Lifecycle actions exposed by the tracker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingAction {
    Accept,
    Reject,
    Start,
    Complete,
    Dispute,
}

impl BookingAction {
    /// Status the action moves the booking to. `Dispute` records a claim
    /// without changing status in this core.
    pub fn target(&self) -> Option<BookingStatus> {
        match self {
            BookingAction::Accept => Some(BookingStatus::Accepted),
            BookingAction::Reject => Some(BookingStatus::Rejected),
            BookingAction::Start => Some(BookingStatus::InProgress),
            BookingAction::Complete => Some(BookingStatus::Completed),
            BookingAction::Dispute => None,
        }
    }

    /// Path segment for the booking action endpoint
    pub fn segment(&self) -> &'static str {
        match self {
            BookingAction::Accept => "accept",
            BookingAction::Reject => "reject",
            BookingAction::Start => "in-progress",
            BookingAction::Complete => "complete",
            BookingAction::Dispute => "dispute",
        }
    }
}

impl fmt::Display for BookingAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BookingAction::Accept => "accept",
            BookingAction::Reject => "reject",
            BookingAction::Start => "start",
            BookingAction::Complete => "complete",
            BookingAction::Dispute => "dispute",
        };
        f.write_str(name)
    }
}

/// A booking as mirrored by the tracker
#[derive(Debug, Clone, PartialEq)]
pub struct Booking {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub scheduled_at: DateTime<Utc>,
    pub location: Option<String>,
    pub status: BookingStatus,
    pub requester_id: String,
    pub provider_id: String,
    pub price: Option<f64>,
    pub payment_method: String,
    /// At most [`MAX_BOOKING_IMAGES`] thumbnail references
    pub images: Vec<String>,
    pub attachment: Option<String>,
}

impl TryFrom<BookingRecord> for Booking {
    type Error = SdkError;

    fn try_from(record: BookingRecord) -> Result<Self, Self::Error> {
        let status = BookingStatus::parse(&record.status).ok_or_else(|| {
            SdkError::Serialization(format!("unknown booking status: {}", record.status))
        })?;

        let mut images = record.images;
        images.truncate(MAX_BOOKING_IMAGES);

        Ok(Booking {
            id: record.id,
            title: record.title,
            description: record.description,
            scheduled_at: record.date,
            location: record.location,
            status,
            requester_id: record.requester_id,
            provider_id: record.provider_id,
            price: record.price,
            payment_method: record
                .payment_method
                .unwrap_or_else(|| DEFAULT_PAYMENT_METHOD.to_string()),
            images,
            attachment: record.attachment,
        })
    }
}
