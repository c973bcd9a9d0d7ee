//! Repository interfaces for the credential and session lifecycle.
//!
//! Traits define the persistence contract; in-memory mocks back the service
//! tests. Concrete MySQL implementations live in the `sn_infra` crate.

pub mod account;
pub mod known_ip;
pub mod session;
pub mod store;
pub mod token;

pub use account::{AccountRepository, MockAccountRepository};
pub use known_ip::{KnownIpRepository, MockKnownIpRepository};
pub use session::{MockSessionRepository, SessionRepository};
pub use store::{MockTransactionalStore, TransactionalStore};
pub use token::{MockOneTimeTokenRepository, OneTimeTokenRepository};
