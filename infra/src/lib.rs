//! # StoryNest Infrastructure
//!
//! Infrastructure layer for the StoryNest backend. Provides the MySQL
//! implementations of the `sn_core` repository traits, connection pool
//! management, and the channel-backed domain event publisher.

pub mod database;
pub mod events;

// Re-export commonly used types
pub use database::{
    DatabasePool, MySqlAccountRepository, MySqlKnownIpRepository, MySqlOneTimeTokenRepository,
    MySqlSessionRepository, MySqlTransactionalStore,
};
pub use events::ChannelEventPublisher;
