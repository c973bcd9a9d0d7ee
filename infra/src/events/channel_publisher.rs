//! Channel-backed domain event publisher.
//!
//! Events are handed to an unbounded in-process channel; the consumer side
//! (notification dispatch, analytics) drains the receiver on its own task.
//! Publishing fails only when the receiver is gone, which the credential
//! service treats as fire-and-forget for most events and as
//! `ServiceUnavailable` for the blocking email dispatches.

use async_trait::async_trait;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::debug;

use sn_core::domain::events::{DomainEvent, EventPublisher};
use sn_core::errors::{DomainError, DomainResult};

/// Event publisher backed by a tokio mpsc channel
#[derive(Clone)]
pub struct ChannelEventPublisher {
    sender: UnboundedSender<DomainEvent>,
}

impl ChannelEventPublisher {
    /// Create a publisher and the receiver its consumer drains
    pub fn new() -> (Self, UnboundedReceiver<DomainEvent>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }

    /// Wrap an existing sender
    pub fn from_sender(sender: UnboundedSender<DomainEvent>) -> Self {
        Self { sender }
    }
}

#[async_trait]
impl EventPublisher for ChannelEventPublisher {
    async fn publish(&self, event: DomainEvent) -> DomainResult<()> {
        let name = event.name();

        // Raw-token payloads must never reach the log output
        if !event.carries_raw_token() {
            debug!(event = name, "publishing domain event");
        }

        self.sender
            .send(event)
            .map_err(|_| DomainError::ServiceUnavailable {
                message: format!("event channel closed while publishing {name}"),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn sample_event() -> DomainEvent {
        DomainEvent::UserEmailVerified {
            account_id: Uuid::new_v4(),
            email: "parent@example.com".to_string(),
            verified_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_publish_delivers_to_receiver() {
        let (publisher, mut receiver) = ChannelEventPublisher::new();

        publisher.publish(sample_event()).await.unwrap();

        let received = receiver.recv().await.unwrap();
        assert_eq!(received.name(), "user.email_verified");
    }

    #[tokio::test]
    async fn test_publish_preserves_order() {
        let (publisher, mut receiver) = ChannelEventPublisher::new();

        publisher.publish(sample_event()).await.unwrap();
        publisher
            .publish(DomainEvent::UserPasswordChanged {
                account_id: Uuid::new_v4(),
                changed_at: Utc::now(),
                sessions_invalidated: true,
            })
            .await
            .unwrap();

        assert_eq!(receiver.recv().await.unwrap().name(), "user.email_verified");
        assert_eq!(
            receiver.recv().await.unwrap().name(),
            "user.password_changed"
        );
    }

    #[tokio::test]
    async fn test_publish_fails_when_receiver_dropped() {
        let (publisher, receiver) = ChannelEventPublisher::new();
        drop(receiver);

        let result = publisher.publish(sample_event()).await;
        assert!(matches!(
            result,
            Err(DomainError::ServiceUnavailable { .. })
        ));
    }

    #[tokio::test]
    async fn test_cloned_publishers_share_channel() {
        let (publisher, mut receiver) = ChannelEventPublisher::new();
        let clone = publisher.clone();

        clone.publish(sample_event()).await.unwrap();
        assert!(receiver.recv().await.is_some());
    }
}
