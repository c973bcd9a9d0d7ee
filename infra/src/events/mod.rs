//! Domain event dispatch infrastructure.

pub mod channel_publisher;

pub use channel_publisher::ChannelEventPublisher;
