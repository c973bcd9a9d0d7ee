//! MySQL repository implementations.

pub mod account_repository_impl;
pub mod known_ip_repository_impl;
pub mod session_repository_impl;
pub mod token_repository_impl;
pub mod transactional_store_impl;

pub use account_repository_impl::MySqlAccountRepository;
pub use known_ip_repository_impl::MySqlKnownIpRepository;
pub use session_repository_impl::MySqlSessionRepository;
pub use token_repository_impl::MySqlOneTimeTokenRepository;
pub use transactional_store_impl::MySqlTransactionalStore;
