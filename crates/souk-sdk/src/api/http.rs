//! Collaborator trait impls for the concrete HTTP client

use crate::api::traits::{BookingsApi, MessagesApi, ProfilesApi};
use crate::booking::{BookingAction, ParticipantRole};
use crate::error::Result;
use async_trait::async_trait;
use souk_api_client::{
    BookingRecord, DisputeRequest, MarketClient, MessageRecord, Profile, SendMessageRequest,
};

#[async_trait]
impl BookingsApi for MarketClient {
    async fn list_bookings(&self, role: ParticipantRole) -> Result<Vec<BookingRecord>> {
        Ok(MarketClient::list_bookings(self, role.segment()).await?)
    }

    async fn booking_action(
        &self,
        action: BookingAction,
        booking_id: &str,
    ) -> Result<BookingRecord> {
        Ok(MarketClient::booking_action(self, action.segment(), booking_id).await?)
    }

    async fn open_dispute(&self, request: DisputeRequest) -> Result<()> {
        Ok(MarketClient::open_dispute(self, &request).await?)
    }
}

#[async_trait]
impl MessagesApi for MarketClient {
    async fn conversation(&self, self_id: &str, peer_id: &str) -> Result<Vec<MessageRecord>> {
        Ok(MarketClient::conversation(self, self_id, peer_id).await?)
    }

    async fn send_message(&self, request: SendMessageRequest) -> Result<MessageRecord> {
        Ok(MarketClient::send_message(self, &request).await?)
    }

    async fn mark_as_read(&self, message_id: &str) -> Result<()> {
        Ok(MarketClient::mark_as_read(self, message_id).await?)
    }
}

#[async_trait]
impl ProfilesApi for MarketClient {
    async fn get_profile(&self, user_id: &str) -> Result<Profile> {
        Ok(MarketClient::get_profile(self, user_id).await?)
    }
}
