//! Event publisher trait for dispatching domain events.

use async_trait::async_trait;

use super::DomainEvent;
use crate::errors::DomainResult;

/// Sink for domain events
///
/// Most events are fire-and-forget: the credential service logs a publish
/// failure and continues. The two raw-token events are blocking, since a
/// lost verification or reset email leaves the caller stuck; their publish
/// errors are surfaced as `ServiceUnavailable`.
#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// Publish a single event
    async fn publish(&self, event: DomainEvent) -> DomainResult<()>;
}

/// Publisher that silently discards all events
///
/// Useful for tooling and tests that do not care about side effects.
pub struct NoOpEventPublisher;

#[async_trait]
impl EventPublisher for NoOpEventPublisher {
    async fn publish(&self, _event: DomainEvent) -> DomainResult<()> {
        Ok(())
    }
}
