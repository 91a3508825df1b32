//! Booking progress timeline derivation
//!
//! Pure function of status: no side effects, identical output for
//! identical input.

use super::model::BookingStatus;

/// The five fixed stages shown on the booking detail timeline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimelineStage {
    Requested,
    Confirmed,
    /// Shares the confirmed rank: confirming a booking confirms its
    /// payment hold.
    PaymentConfirmed,
    InProgress,
    Completed,
}

impl TimelineStage {
    /// Status rank at which this stage counts as complete
    fn required_rank(&self) -> u8 {
        match self {
            TimelineStage::Requested => 1,
            TimelineStage::Confirmed => 2,
            TimelineStage::PaymentConfirmed => 2,
            TimelineStage::InProgress => 3,
            TimelineStage::Completed => 4,
        }
    }

    /// User-facing label
    pub fn label(&self) -> &'static str {
        match self {
            TimelineStage::Requested => "Requested",
            TimelineStage::Confirmed => "Confirmed",
            TimelineStage::PaymentConfirmed => "Payment confirmed",
            TimelineStage::InProgress => "In progress",
            TimelineStage::Completed => "Completed",
        }
    }
}

/// One derived timeline entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimelineStep {
    pub stage: TimelineStage,
    pub complete: bool,
}

const STAGES: [TimelineStage; 5] = [
    TimelineStage::Requested,
    TimelineStage::Confirmed,
    TimelineStage::PaymentConfirmed,
    TimelineStage::InProgress,
    TimelineStage::Completed,
];

/// Derive the five-step timeline for a status.
///
/// Step *i* is complete iff the status rank is at least the stage's
/// required rank.
pub fn timeline(status: BookingStatus) -> [TimelineStep; 5] {
    let rank = status.rank();
    STAGES.map(|stage| TimelineStep {
        stage,
        complete: rank >= stage.required_rank(),
    })
}
