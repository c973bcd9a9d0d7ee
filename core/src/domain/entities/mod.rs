//! Domain entities for the credential and session lifecycle.

pub mod account;
pub mod known_ip;
pub mod one_time_token;
pub mod session;

pub use account::{Account, AccountRole, OnboardingStage};
pub use known_ip::KnownIp;
pub use one_time_token::{OneTimeToken, TokenKind};
pub use session::{Claims, Session, TokenPair};
