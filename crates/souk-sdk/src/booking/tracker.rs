//! Booking lifecycle tracker
//!
//! Holds the local mirror of one booking and drives guarded status
//! transitions for a single participant role. Mutations are optimistic:
//! the mirror is updated before the remote call and restored if the call
//! fails.

use super::model::{Booking, BookingAction, ParticipantRole};
use crate::api::traits::{BookingsApi, ProfilesApi};
use crate::error::{Result, SdkError};
use crate::session::Session;
use souk_api_client::{DisputeRequest, Profile};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, RwLock};
use tracing::warn;

/// User-visible delay the presentation layer applies before navigating to
/// the review flow, so the completion acknowledgement stays on screen.
pub const REVIEW_PROMPT_DELAY: Duration = Duration::from_millis(1500);

/// Events emitted by the tracker for the presentation layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackerEvent {
    /// Emitted exactly once when a booking completes; carries the
    /// identifiers the review flow needs, unchanged from the booking.
    ReviewPrompt {
        booking_id: String,
        requester_id: String,
        provider_id: String,
        /// Delay to apply before navigating
        delay: Duration,
    },
}

/// Tracks one booking's lifecycle for a single participant role.
///
/// # Example
///
/// ```rust,ignore
/// use souk_sdk::{LifecycleTracker, ParticipantRole, Session};
///
/// let (tracker, mut events) =
///     LifecycleTracker::new(api, Session::new("u1"), ParticipantRole::Provider);
/// tracker.load("b1").await?;
/// tracker.accept("b1").await?;
/// ```
pub struct LifecycleTracker<A: BookingsApi> {
    api: Arc<A>,
    session: Session,
    role: ParticipantRole,
    booking: RwLock<Option<Booking>>,
    events: mpsc::UnboundedSender<TrackerEvent>,
}

impl<A: BookingsApi> LifecycleTracker<A> {
    /// Create a tracker and the receiver for its events
    pub fn new(
        api: Arc<A>,
        session: Session,
        role: ParticipantRole,
    ) -> (Self, mpsc::UnboundedReceiver<TrackerEvent>) {
        let (events, receiver) = mpsc::unbounded_channel();
        let tracker = Self {
            api,
            session,
            role,
            booking: RwLock::new(None),
            events,
        };
        (tracker, receiver)
    }

    /// The role this tracker operates as
    pub fn role(&self) -> ParticipantRole {
        self.role
    }

    /// The session this tracker was constructed with
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Snapshot of the mirrored booking
    pub async fn current(&self) -> Option<Booking> {
        self.booking.read().await.clone()
    }

    /// Fetch the booking from the role's full list and mirror it.
    ///
    /// Fails with [`SdkError::NotFound`] if no record with the id exists in
    /// the fetched set.
    pub async fn load(&self, booking_id: &str) -> Result<Booking> {
        let records = self.api.list_bookings(self.role).await?;
        let record = records
            .into_iter()
            .find(|r| r.id == booking_id)
            .ok_or_else(|| SdkError::NotFound(format!("booking {booking_id}")))?;

        let booking = Booking::try_from(record)?;
        *self.booking.write().await = Some(booking.clone());
        Ok(booking)
    }

    /// Accept a pending booking (provider only)
    pub async fn accept(&self, booking_id: &str) -> Result<Booking> {
        self.apply(BookingAction::Accept, booking_id).await
    }

    /// Reject a booking from `pending` or `accepted`
    pub async fn reject(&self, booking_id: &str) -> Result<Booking> {
        self.apply(BookingAction::Reject, booking_id).await
    }

    /// Move an accepted booking to in-progress (requester only)
    pub async fn start(&self, booking_id: &str) -> Result<Booking> {
        self.apply(BookingAction::Start, booking_id).await
    }

    /// Complete the booking and prompt the review flow.
    ///
    /// Provider completes from `accepted`, requester from `in_progress`.
    /// Emits exactly one [`TrackerEvent::ReviewPrompt`] on success.
    pub async fn complete(&self, booking_id: &str) -> Result<Booking> {
        let booking = self.apply(BookingAction::Complete, booking_id).await?;

        let _ = self.events.send(TrackerEvent::ReviewPrompt {
            booking_id: booking.id.clone(),
            requester_id: booking.requester_id.clone(),
            provider_id: booking.provider_id.clone(),
            delay: REVIEW_PROMPT_DELAY,
        });
        Ok(booking)
    }

    /// Submit a dispute for the mirrored booking.
    ///
    /// Valid from any non-terminal state; does not change local status —
    /// the dispute-recording backend owns that outcome.
    pub async fn open_dispute(&self, booking_id: &str, details: &str) -> Result<()> {
        let booking = self.mirrored(booking_id).await?;

        if !self.role.may(BookingAction::Dispute, booking.status) {
            return Err(SdkError::InvalidTransition {
                from: booking.status,
                action: BookingAction::Dispute,
            });
        }

        let request = DisputeRequest {
            booking_id: booking.id.clone(),
            counterpart_id: self.role.counterpart_of(&booking).to_string(),
            details: details.to_string(),
        };
        self.api.open_dispute(request).await
    }

    /// Resolve the counterpart's public profile through the given lookup
    /// collaborator.
    pub async fn counterpart_profile<P: ProfilesApi>(&self, profiles: &P) -> Result<Profile> {
        let booking = self
            .booking
            .read()
            .await
            .clone()
            .ok_or_else(|| SdkError::NotFound("no booking loaded".to_string()))?;
        profiles
            .get_profile(self.role.counterpart_of(&booking))
            .await
    }

    async fn mirrored(&self, booking_id: &str) -> Result<Booking> {
        self.booking
            .read()
            .await
            .clone()
            .filter(|b| b.id == booking_id)
            .ok_or_else(|| SdkError::NotFound(format!("booking {booking_id} not loaded")))
    }

    /// Guard, optimistically update, call remote, roll back on failure.
    async fn apply(&self, action: BookingAction, booking_id: &str) -> Result<Booking> {
        let prior = self.mirrored(booking_id).await?;

        if !self.role.may(action, prior.status) {
            return Err(SdkError::InvalidTransition {
                from: prior.status,
                action,
            });
        }

        let target = action
            .target()
            .ok_or_else(|| SdkError::Config(format!("{action} has no target status")))?;

        // Optimistic local update
        {
            let mut slot = self.booking.write().await;
            if let Some(booking) = slot.as_mut() {
                booking.status = target;
            }
        }

        match self.api.booking_action(action, booking_id).await {
            Ok(record) => match Booking::try_from(record) {
                Ok(fresh) => {
                    let mut slot = self.booking.write().await;
                    *slot = Some(fresh.clone());
                    Ok(fresh)
                }
                Err(err) => {
                    // Remote succeeded; keep the optimistic mirror
                    warn!("booking {} returned an undecodable record: {}", booking_id, err);
                    Ok(self
                        .booking
                        .read()
                        .await
                        .clone()
                        .unwrap_or_else(|| prior.clone()))
                }
            },
            Err(err) => {
                // Roll the optimistic change back
                let mut slot = self.booking.write().await;
                *slot = Some(prior);
                Err(err)
            }
        }
    }
}
