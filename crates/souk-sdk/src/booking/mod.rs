//! Booking lifecycle: domain model, guarded transition tracking, and the
//! progress timeline derivation.

pub mod model;
pub mod timeline;
pub mod tracker;

pub use model::{
    Booking, BookingAction, BookingStatus, ParticipantRole, DEFAULT_PAYMENT_METHOD,
    MAX_BOOKING_IMAGES,
};
pub use timeline::{timeline, TimelineStage, TimelineStep};
pub use tracker::{LifecycleTracker, TrackerEvent, REVIEW_PROMPT_DELAY};
