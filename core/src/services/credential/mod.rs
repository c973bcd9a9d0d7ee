//! Credential service module orchestrating login, registration, email
//! verification, password reset, and password change.

mod config;
mod email;
mod service;

pub use config::CredentialServiceConfig;
pub use email::{mask_email, normalize_email, validate_email};
pub use service::{CredentialService, RegistrationRequest};

#[cfg(test)]
mod tests;
