//! Database module - MySQL implementations using SQLx
//!
//! Provides connection pool management and the concrete repository
//! implementations behind the `sn_core` persistence traits.

pub mod connection;
pub mod mysql;

// Re-export commonly used types
pub use connection::DatabasePool;
pub use mysql::{
    MySqlAccountRepository, MySqlKnownIpRepository, MySqlOneTimeTokenRepository,
    MySqlSessionRepository, MySqlTransactionalStore,
};
