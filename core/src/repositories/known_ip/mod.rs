//! Known IP repository module.

mod r#trait;
pub use r#trait::KnownIpRepository;

mod mock;
pub use mock::MockKnownIpRepository;
