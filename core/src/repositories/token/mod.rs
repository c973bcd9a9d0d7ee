//! One-time token repository module.

mod r#trait;
pub use r#trait::OneTimeTokenRepository;

mod mock;
pub use mock::MockOneTimeTokenRepository;
