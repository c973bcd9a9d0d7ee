//! Transactional store module for atomic multi-entity writes.

mod r#trait;
pub use r#trait::TransactionalStore;

mod mock;
pub use mock::MockTransactionalStore;
