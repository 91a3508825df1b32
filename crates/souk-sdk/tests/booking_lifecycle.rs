//! End-to-end booking lifecycle against the in-memory mock backend.

use souk_sdk::api::mock::{booking_record, MockMarket};
use souk_sdk::{
    BookingStatus, LifecycleTracker, ParticipantRole, SdkError, Session, TrackerEvent,
    REVIEW_PROMPT_DELAY,
};
use std::sync::Arc;

async fn seeded_market(status: &str) -> Arc<MockMarket> {
    Arc::new(
        MockMarket::new()
            .with_booking(booking_record("b1", status, "amara", "yusuf"))
            .await,
    )
}

#[tokio::test]
async fn test_full_happy_path_from_request_to_review_prompt() {
    let api = seeded_market("pending").await;

    let (provider, _provider_events) = LifecycleTracker::new(
        api.clone(),
        Session::new("yusuf"),
        ParticipantRole::Provider,
    );
    let (requester, mut requester_events) = LifecycleTracker::new(
        api.clone(),
        Session::new("amara"),
        ParticipantRole::Requester,
    );

    // Provider confirms the request
    provider.load("b1").await.unwrap();
    let booking = provider.accept("b1").await.unwrap();
    assert_eq!(booking.status, BookingStatus::Accepted);

    // Requester sees the confirmation and kicks off the work
    requester.load("b1").await.unwrap();
    let booking = requester.start("b1").await.unwrap();
    assert_eq!(booking.status, BookingStatus::InProgress);

    // Requester signs the work off
    let booking = requester.complete("b1").await.unwrap();
    assert_eq!(booking.status, BookingStatus::Completed);

    let event = requester_events.try_recv().unwrap();
    assert_eq!(
        event,
        TrackerEvent::ReviewPrompt {
            booking_id: "b1".to_string(),
            requester_id: "amara".to_string(),
            provider_id: "yusuf".to_string(),
            delay: REVIEW_PROMPT_DELAY,
        }
    );
    assert!(requester_events.try_recv().is_err());

    // Both sides converge on the terminal state after a reload
    provider.load("b1").await.unwrap();
    assert_eq!(
        provider.current().await.unwrap().status,
        BookingStatus::Completed
    );

    // Completion is terminal
    let err = provider.reject("b1").await.unwrap_err();
    assert!(matches!(err, SdkError::InvalidTransition { .. }));
}

#[tokio::test]
async fn test_provider_rejects_after_accepting() {
    let api = seeded_market("pending").await;
    let (provider, _events) = LifecycleTracker::new(
        api.clone(),
        Session::new("yusuf"),
        ParticipantRole::Provider,
    );
    provider.load("b1").await.unwrap();

    provider.accept("b1").await.unwrap();
    let booking = provider.reject("b1").await.unwrap();
    assert_eq!(booking.status, BookingStatus::Rejected);

    // Rejection is terminal for both roles
    let err = provider.accept("b1").await.unwrap_err();
    assert!(matches!(err, SdkError::InvalidTransition { .. }));

    let (requester, _events) =
        LifecycleTracker::new(api, Session::new("amara"), ParticipantRole::Requester);
    requester.load("b1").await.unwrap();
    let err = requester.start("b1").await.unwrap_err();
    assert!(matches!(err, SdkError::InvalidTransition { .. }));
}

#[tokio::test]
async fn test_out_of_order_actions_are_refused_without_remote_calls() {
    let api = seeded_market("pending").await;
    let (requester, _events) = LifecycleTracker::new(
        api.clone(),
        Session::new("amara"),
        ParticipantRole::Requester,
    );
    requester.load("b1").await.unwrap();

    // Nothing the requester may do with a booking still pending
    assert!(requester.start("b1").await.is_err());
    assert!(requester.complete("b1").await.is_err());
    assert!(requester.accept("b1").await.is_err());

    assert!(api.action_calls().await.is_empty());
    assert_eq!(
        requester.current().await.unwrap().status,
        BookingStatus::Pending
    );
}

#[tokio::test]
async fn test_dispute_during_in_progress_work() {
    let api = seeded_market("in_progress").await;
    let (requester, _events) = LifecycleTracker::new(
        api.clone(),
        Session::new("amara"),
        ParticipantRole::Requester,
    );
    requester.load("b1").await.unwrap();

    requester
        .open_dispute("b1", "provider stopped showing up")
        .await
        .unwrap();

    let disputes = api.disputes().await;
    assert_eq!(disputes.len(), 1);
    assert_eq!(disputes[0].booking_id, "b1");
    assert_eq!(disputes[0].counterpart_id, "yusuf");
    // The mirror keeps its status until the backend resolves the dispute
    assert_eq!(
        requester.current().await.unwrap().status,
        BookingStatus::InProgress
    );
}

#[tokio::test]
async fn test_remote_failure_mid_chain_leaves_mirror_consistent() {
    let api = seeded_market("pending").await;
    let (provider, mut events) = LifecycleTracker::new(
        api.clone(),
        Session::new("yusuf"),
        ParticipantRole::Provider,
    );
    provider.load("b1").await.unwrap();
    provider.accept("b1").await.unwrap();

    api.set_fail_mutations(true);
    let err = provider.complete("b1").await.unwrap_err();
    assert!(matches!(err, SdkError::RemoteActionFailed(_)));
    assert_eq!(
        provider.current().await.unwrap().status,
        BookingStatus::Accepted
    );
    assert!(events.try_recv().is_err());

    // Recovery once the backend is healthy again
    api.set_fail_mutations(false);
    let booking = provider.complete("b1").await.unwrap();
    assert_eq!(booking.status, BookingStatus::Completed);
    assert!(events.try_recv().is_ok());
}
