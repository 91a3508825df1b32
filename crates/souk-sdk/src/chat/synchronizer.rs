//! Chat synchronizer
//!
//! Maintains a locally ordered mirror of a two-party conversation:
//! - periodic full refresh from the remote collaborator
//! - optimistic send with server-id reconciliation and rollback on failure
//! - best-effort read-receipt propagation
//!
//! Each refresh replaces the mirror wholesale; overlapping refreshes are
//! resolved by a monotonic dispatch counter (later-dispatched wins, stale
//! responses are discarded).

use super::model::{sort_chronological, ChatMessage};
use crate::api::traits::MessagesApi;
use crate::error::Result;
use crate::session::Session;
use souk_api_client::SendMessageRequest;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// Synchronizes one two-party conversation against the remote backend.
///
/// # Example
///
/// ```rust,ignore
/// use souk_sdk::{ChatSynchronizer, Session};
/// use std::time::Duration;
///
/// let sync = ChatSynchronizer::new(api, Session::new("u1"));
/// sync.start_sync("u2", Duration::from_secs(3)).await;
/// sync.send("u2", "hello").await?;
/// sync.stop().await;
/// ```
pub struct ChatSynchronizer<A> {
    api: Arc<A>,
    session: Session,
    mirror: Arc<RwLock<Vec<ChatMessage>>>,
    running: Arc<RwLock<bool>>,
    /// Next dispatch sequence number handed to a refresh
    dispatch_seq: Arc<AtomicU64>,
    /// Highest sequence number whose response has been applied
    applied_seq: Arc<AtomicU64>,
}

impl<A> Clone for ChatSynchronizer<A> {
    fn clone(&self) -> Self {
        Self {
            api: Arc::clone(&self.api),
            session: self.session.clone(),
            mirror: Arc::clone(&self.mirror),
            running: Arc::clone(&self.running),
            dispatch_seq: Arc::clone(&self.dispatch_seq),
            applied_seq: Arc::clone(&self.applied_seq),
        }
    }
}

impl<A: MessagesApi> ChatSynchronizer<A> {
    /// Create a synchronizer for the session user
    pub fn new(api: Arc<A>, session: Session) -> Self {
        Self {
            api,
            session,
            mirror: Arc::new(RwLock::new(Vec::new())),
            running: Arc::new(RwLock::new(false)),
            dispatch_seq: Arc::new(AtomicU64::new(0)),
            applied_seq: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Snapshot of the mirror in logical reading order (oldest first)
    pub async fn messages(&self) -> Vec<ChatMessage> {
        self.mirror.read().await.clone()
    }

    /// Snapshot in display order (newest first)
    pub async fn messages_newest_first(&self) -> Vec<ChatMessage> {
        let mut messages = self.messages().await;
        messages.reverse();
        messages
    }

    /// Whether the polling task is active
    pub async fn is_running(&self) -> bool {
        *self.running.read().await
    }

    /// Run one fetch cycle.
    ///
    /// Replaces the mirror wholesale with the fetched history, re-sorted
    /// chronologically, unless a later-dispatched refresh has already been
    /// applied. Pending optimistic entries survive the replacement so an
    /// in-flight send is not dropped by a concurrent poll.
    pub async fn refresh(&self, peer_id: &str) -> Result<()> {
        let seq = self.dispatch_seq.fetch_add(1, Ordering::SeqCst) + 1;

        let records = self
            .api
            .conversation(&self.session.user_id, peer_id)
            .await?;

        let mut mirror = self.mirror.write().await;
        let latest = self.applied_seq.fetch_max(seq, Ordering::SeqCst);
        if latest >= seq {
            debug!("discarding stale conversation fetch {} (latest {})", seq, latest);
            return Ok(());
        }

        let mut fresh: Vec<ChatMessage> =
            records.into_iter().map(ChatMessage::from_record).collect();
        fresh.extend(mirror.iter().filter(|m| m.pending).cloned());
        sort_chronological(&mut fresh);
        *mirror = fresh;
        Ok(())
    }

    /// Send a message optimistically.
    ///
    /// The message is appended to the mirror with a temporary identifier
    /// before the remote write. On acknowledgement the server-assigned id
    /// replaces the temporary one; on failure the entry is removed and the
    /// error is returned.
    pub async fn send(&self, peer_id: &str, text: &str) -> Result<ChatMessage> {
        let local = ChatMessage::pending_local(&self.session.user_id, peer_id, text);
        let local_id = local.id.clone();
        self.mirror.write().await.push(local);

        let request = SendMessageRequest {
            sender_id: self.session.user_id.clone(),
            receiver_id: peer_id.to_string(),
            content: text.to_string(),
            mark_as_read: false,
        };

        match self.api.send_message(request).await {
            Ok(record) => {
                let confirmed = ChatMessage::from_record(record);
                let mut mirror = self.mirror.write().await;
                // A refresh may have raced the acknowledgement and already
                // pulled the server copy; keep exactly one entry.
                mirror.retain(|m| m.id != local_id && m.id != confirmed.id);
                mirror.push(confirmed.clone());
                sort_chronological(&mut mirror);
                Ok(confirmed)
            }
            Err(err) => {
                self.mirror.write().await.retain(|m| m.id != local_id);
                warn!("message send to {} failed: {}", peer_id, err);
                Err(err)
            }
        }
    }

    /// Propagate read receipts for every unread message in `batch` that was
    /// sent *to* the session user.
    ///
    /// Best effort: a failing remote call is logged and does not stop the
    /// remaining messages from being attempted. Outgoing messages are never
    /// targeted. Returns the number of messages successfully marked.
    pub async fn mark_incoming_as_read(&self, batch: &[ChatMessage]) -> usize {
        let mut marked = 0;
        for message in batch {
            if !message.is_incoming_for(&self.session.user_id) || message.read || message.pending {
                continue;
            }

            match self.api.mark_as_read(&message.id).await {
                Ok(()) => {
                    marked += 1;
                    let mut mirror = self.mirror.write().await;
                    if let Some(entry) = mirror.iter_mut().find(|m| m.id == message.id) {
                        entry.read = true;
                    }
                }
                Err(err) => {
                    warn!("failed to mark message {} as read: {}", message.id, err);
                }
            }
        }
        marked
    }
}

impl<A: MessagesApi + 'static> ChatSynchronizer<A> {
    /// Start the periodic refresh task.
    ///
    /// The first fetch fires immediately, then every `interval`. Calling
    /// while already running is a no-op.
    pub async fn start_sync(&self, peer_id: impl Into<String>, interval: Duration) {
        {
            let mut running = self.running.write().await;
            if *running {
                warn!("chat sync already running");
                return;
            }
            *running = true;
        }

        let peer_id = peer_id.into();
        info!("starting chat sync with {} (interval {:?})", peer_id, interval);

        let sync = self.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            loop {
                ticker.tick().await;

                if !*sync.running.read().await {
                    info!("chat sync with {} stopped", peer_id);
                    break;
                }

                // Fetch failures are terminal for this cycle only
                if let Err(err) = sync.refresh(&peer_id).await {
                    warn!("conversation refresh failed: {}", err);
                }
            }
        });
    }

    /// Stop the periodic refresh task.
    ///
    /// Idempotent: stopping twice is a no-op.
    pub async fn stop(&self) {
        let mut running = self.running.write().await;
        if *running {
            info!("stopping chat sync");
        }
        *running = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::{message_record, MockMarket};
    use crate::error::SdkError;
    use chrono::{TimeZone, Utc};

    fn session() -> Session {
        Session::new("u1")
    }

    fn at(minute: u32) -> chrono::DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 10, minute, 0).unwrap()
    }

    #[tokio::test]
    async fn test_refresh_replaces_and_sorts_mirror() {
        let api = Arc::new(
            MockMarket::new()
                .with_conversation(vec![
                    message_record("m2", "u2", "u1", "second", at(2)),
                    message_record("m1", "u1", "u2", "first", at(1)),
                ])
                .await,
        );
        let sync = ChatSynchronizer::new(api, session());

        sync.refresh("u2").await.unwrap();

        let messages = sync.messages().await;
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].id, "m1");
        assert_eq!(messages[1].id, "m2");

        let newest_first = sync.messages_newest_first().await;
        assert_eq!(newest_first[0].id, "m2");
    }

    #[tokio::test]
    async fn test_send_success_reconciles_server_id() {
        let api = Arc::new(MockMarket::new());
        let sync = ChatSynchronizer::new(api, session());

        let confirmed = sync.send("u2", "hi").await.unwrap();
        assert_eq!(confirmed.id, "srv-1");
        assert!(!confirmed.pending);

        let messages = sync.messages().await;
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].id, "srv-1");
        assert_eq!(messages[0].content, "hi");
        assert_eq!(messages[0].sender_id, "u1");
        assert!(!messages[0].id.starts_with("local-"));
    }

    #[tokio::test]
    async fn test_send_failure_removes_optimistic_entry() {
        let api = Arc::new(MockMarket::new());
        api.set_fail_mutations(true);
        let sync = ChatSynchronizer::new(api, session());

        let err = sync.send("u2", "hi").await.unwrap_err();
        assert!(matches!(err, SdkError::RemoteActionFailed(_)));
        assert!(sync.messages().await.is_empty());
    }

    #[tokio::test]
    async fn test_refresh_preserves_pending_entries() {
        let api = Arc::new(
            MockMarket::new()
                .with_conversation(vec![message_record("m1", "u2", "u1", "hey", at(1))])
                .await,
        );
        let sync = ChatSynchronizer::new(api, session());

        // Simulate an in-flight optimistic send
        sync.mirror
            .write()
            .await
            .push(ChatMessage::pending_local("u1", "u2", "draft"));

        sync.refresh("u2").await.unwrap();

        let messages = sync.messages().await;
        assert_eq!(messages.len(), 2);
        assert!(messages.iter().any(|m| m.pending && m.content == "draft"));
    }

    #[tokio::test]
    async fn test_mark_incoming_tolerates_partial_failure() {
        let api = Arc::new(
            MockMarket::new()
                .with_conversation(vec![
                    message_record("in-1", "u2", "u1", "a", at(1)),
                    message_record("out-1", "u1", "u2", "b", at(2)),
                    message_record("in-2", "u2", "u1", "c", at(3)),
                ])
                .await,
        );
        api.fail_mark_read_for("in-1").await;
        let sync = ChatSynchronizer::new(api.clone(), session());
        sync.refresh("u2").await.unwrap();

        let batch = sync.messages().await;
        let marked = sync.mark_incoming_as_read(&batch).await;

        // Both incoming messages attempted despite the first failing
        assert_eq!(api.mark_read_calls().await, vec!["in-1", "in-2"]);
        assert_eq!(marked, 1);

        let messages = sync.messages().await;
        let in2 = messages.iter().find(|m| m.id == "in-2").unwrap();
        assert!(in2.read);
        // Outgoing messages are never targeted
        assert!(!api.mark_read_calls().await.contains(&"out-1".to_string()));
    }

    #[tokio::test]
    async fn test_mark_incoming_skips_already_read() {
        let mut record = message_record("in-1", "u2", "u1", "a", at(1));
        record.mark_as_read = true;
        let api = Arc::new(MockMarket::new().with_conversation(vec![record]).await);
        let sync = ChatSynchronizer::new(api.clone(), session());
        sync.refresh("u2").await.unwrap();

        let batch = sync.messages().await;
        assert_eq!(sync.mark_incoming_as_read(&batch).await, 0);
        assert!(api.mark_read_calls().await.is_empty());
    }

    #[tokio::test]
    async fn test_start_and_stop_are_idempotent() {
        let api = Arc::new(
            MockMarket::new()
                .with_conversation(vec![message_record("m1", "u2", "u1", "hey", at(1))])
                .await,
        );
        let sync = ChatSynchronizer::new(api, session());

        sync.start_sync("u2", Duration::from_millis(5)).await;
        // Second start while running is a no-op
        sync.start_sync("u2", Duration::from_millis(5)).await;
        assert!(sync.is_running().await);

        tokio::time::sleep(Duration::from_millis(30)).await;
        assert_eq!(sync.messages().await.len(), 1);

        sync.stop().await;
        sync.stop().await;
        assert!(!sync.is_running().await);
    }
}
