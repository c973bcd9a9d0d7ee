//! Business services containing domain logic and use cases.

pub mod credential;
pub mod password;
pub mod session;

// Re-export commonly used types
pub use credential::{CredentialService, CredentialServiceConfig, RegistrationRequest};
pub use password::{fingerprint, generate_secret, PasswordHasher};
pub use session::{SessionService, SessionServiceConfig};
