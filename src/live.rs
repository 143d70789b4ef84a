//! Live comment streams.
//!
//! A standing in-process subscription registry: views subscribe to a
//! post's comments and receive the full refreshed comment list every time
//! the underlying collection changes. Each delivered snapshot replaces,
//! never merges with, prior state.
//!
//! Subscriptions are scoped resources. The [`CommentSubscription`] handle
//! unsubscribes when dropped, so tearing down the consuming view (e.g. an
//! SSE connection closing) releases the registry entry instead of leaking
//! a subscriber that keeps receiving pushes.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tracing::debug;

use crate::db::Comment;

/// Unique identifier for one subscription, used for precise cleanup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriberId(u64);

struct Subscriber {
    id: SubscriberId,
    sender: UnboundedSender<Vec<Comment>>,
}

/// Registry of comment subscribers, keyed by post ID.
#[derive(Clone, Default)]
pub struct CommentStreams {
    inner: Arc<RwLock<HashMap<i64, Vec<Subscriber>>>>,
    next_id: Arc<AtomicU64>,
}

impl CommentStreams {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe to a post's comment updates.
    ///
    /// The returned handle receives every published snapshot until it is
    /// cancelled or dropped.
    #[must_use]
    pub fn subscribe(&self, post_id: i64) -> CommentSubscription {
        let id = SubscriberId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let (sender, receiver) = unbounded_channel();

        // Lock is only held for the map update, never across an await.
        let mut inner = self.inner.write().unwrap_or_else(std::sync::PoisonError::into_inner);
        inner
            .entry(post_id)
            .or_default()
            .push(Subscriber { id, sender });

        debug!(post_id, subscriber_id = id.0, "Comment stream subscribed");

        CommentSubscription {
            id,
            post_id,
            streams: self.clone(),
            receiver,
        }
    }

    /// Deliver a fresh comment snapshot to every subscriber of a post.
    ///
    /// Subscribers whose receiving side has gone away are pruned here.
    pub fn publish(&self, post_id: i64, comments: &[Comment]) {
        let mut inner = self.inner.write().unwrap_or_else(std::sync::PoisonError::into_inner);
        let Some(subscribers) = inner.get_mut(&post_id) else {
            return;
        };

        subscribers.retain(|subscriber| subscriber.sender.send(comments.to_vec()).is_ok());

        if subscribers.is_empty() {
            inner.remove(&post_id);
        }
    }

    /// Number of live subscribers for a post.
    #[must_use]
    pub fn subscriber_count(&self, post_id: i64) -> usize {
        let inner = self.inner.read().unwrap_or_else(std::sync::PoisonError::into_inner);
        inner.get(&post_id).map_or(0, Vec::len)
    }

    fn unsubscribe(&self, post_id: i64, id: SubscriberId) {
        let mut inner = self.inner.write().unwrap_or_else(std::sync::PoisonError::into_inner);
        if let Some(subscribers) = inner.get_mut(&post_id) {
            subscribers.retain(|subscriber| subscriber.id != id);
            if subscribers.is_empty() {
                inner.remove(&post_id);
            }
        }
        debug!(post_id, subscriber_id = id.0, "Comment stream unsubscribed");
    }
}

/// Cancellation handle for one comment subscription.
///
/// Receives full comment snapshots via [`Self::next_snapshot`]. Dropping
/// the handle (or calling [`Self::cancel`]) removes the subscriber from
/// the registry and stops further deliveries.
pub struct CommentSubscription {
    id: SubscriberId,
    post_id: i64,
    streams: CommentStreams,
    receiver: UnboundedReceiver<Vec<Comment>>,
}

impl CommentSubscription {
    /// Wait for the next published snapshot. Returns `None` once the
    /// subscription has been cancelled.
    pub async fn next_snapshot(&mut self) -> Option<Vec<Comment>> {
        self.receiver.recv().await
    }

    /// The post this subscription is attached to.
    #[must_use]
    pub fn post_id(&self) -> i64 {
        self.post_id
    }

    /// Explicitly release the subscription.
    pub fn cancel(self) {
        // Drop does the work.
    }
}

impl Drop for CommentSubscription {
    fn drop(&mut self) {
        self.streams.unsubscribe(self.post_id, self.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn comment(id: i64, post_id: i64, body: &str) -> Comment {
        Comment {
            id,
            post_id,
            body: body.to_string(),
            author_name: "Ravi".to_string(),
            created_at: "2025-01-01 00:00:00".to_string(),
        }
    }

    #[tokio::test]
    async fn test_subscribe_receives_snapshots() {
        let streams = CommentStreams::new();
        let mut sub = streams.subscribe(7);

        streams.publish(7, &[comment(1, 7, "bahut khoob")]);
        streams.publish(7, &[comment(1, 7, "bahut khoob"), comment(2, 7, "wah")]);

        let first = sub.next_snapshot().await.expect("first snapshot");
        assert_eq!(first.len(), 1);

        let second = sub.next_snapshot().await.expect("second snapshot");
        assert_eq!(second.len(), 2);
    }

    #[tokio::test]
    async fn test_publish_is_scoped_to_post() {
        let streams = CommentStreams::new();
        let mut sub = streams.subscribe(1);

        streams.publish(2, &[comment(1, 2, "elsewhere")]);
        streams.publish(1, &[comment(2, 1, "here")]);

        let snapshot = sub.next_snapshot().await.expect("snapshot");
        assert_eq!(snapshot[0].post_id, 1);
    }

    #[tokio::test]
    async fn test_drop_unsubscribes() {
        let streams = CommentStreams::new();
        let sub = streams.subscribe(3);
        assert_eq!(streams.subscriber_count(3), 1);

        drop(sub);
        assert_eq!(streams.subscriber_count(3), 0);
    }

    #[tokio::test]
    async fn test_cancel_unsubscribes() {
        let streams = CommentStreams::new();
        let sub = streams.subscribe(4);
        let other = streams.subscribe(4);
        assert_eq!(streams.subscriber_count(4), 2);

        sub.cancel();
        assert_eq!(streams.subscriber_count(4), 1);
        drop(other);
    }
}
