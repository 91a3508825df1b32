//! HTTP behavior tests for `MarketClient` against a wiremock server.

use serde_json::json;
use souk_api_client::{ApiError, ClientConfig, MarketClient, SendMessageRequest};
use std::time::Duration;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> MarketClient {
    MarketClient::new(ClientConfig {
        base_url: server.uri(),
        auth_token: None,
        timeout_secs: 2,
    })
}

#[tokio::test]
async fn list_bookings_decodes_success_envelope() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/bookings/get/user/inward"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "data": [{
                "id": "b1",
                "title": "Fix sink",
                "date": "2026-04-10T09:00:00Z",
                "status": "pending",
                "requesterId": "u2",
                "providerId": "u1"
            }]
        })))
        .mount(&server)
        .await;

    let bookings = client_for(&server).list_bookings("inward").await.unwrap();
    assert_eq!(bookings.len(), 1);
    assert_eq!(bookings[0].id, "b1");
    assert_eq!(bookings[0].status, "pending");
}

#[tokio::test]
async fn failure_envelope_is_rejected_even_on_http_200() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/bookings/accept/b1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "error",
            "message": "booking no longer pending"
        })))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .booking_action("accept", "b1")
        .await
        .unwrap_err();
    match err {
        ApiError::Rejected { message } => assert_eq!(message, "booking no longer pending"),
        other => panic!("expected Rejected, got {other:?}"),
    }
}

#[tokio::test]
async fn missing_profile_maps_to_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/basic/profile/nobody"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = client_for(&server).get_profile("nobody").await.unwrap_err();
    assert!(matches!(err, ApiError::NotFound(_)));
}

#[tokio::test]
async fn send_message_posts_expected_body() {
    let server = MockServer::start().await;
    let request = SendMessageRequest {
        sender_id: "u1".into(),
        receiver_id: "u2".into(),
        content: "hi".into(),
        mark_as_read: false,
    };

    Mock::given(method("POST"))
        .and(path("/message"))
        .and(body_json(json!({
            "senderId": "u1",
            "receiverId": "u2",
            "content": "hi",
            "mark_as_read": false
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "data": {
                "id": "m99",
                "senderId": "u1",
                "receiverId": "u2",
                "content": "hi",
                "createdAt": "2026-04-10T09:00:00Z",
                "mark_as_read": false
            }
        })))
        .mount(&server)
        .await;

    let record = client_for(&server).send_message(&request).await.unwrap();
    assert_eq!(record.id, "m99");
}

#[tokio::test]
async fn slow_server_surfaces_timeout() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/message/u1/u2"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_secs(5))
                .set_body_json(json!({"status": "success", "data": []})),
        )
        .mount(&server)
        .await;

    let err = client_for(&server).conversation("u1", "u2").await.unwrap_err();
    assert!(matches!(err, ApiError::Timeout));
}

#[tokio::test]
async fn server_error_carries_status() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/message/markasread/m1"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let err = client_for(&server).mark_as_read("m1").await.unwrap_err();
    match err {
        ApiError::Server { status, .. } => assert_eq!(status, 500),
        other => panic!("expected Server, got {other:?}"),
    }
}
