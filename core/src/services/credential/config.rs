//! Credential service configuration.

use sn_shared::config::{PasswordConfig, RegistrationConfig};

use crate::domain::entities::one_time_token::ONE_TIME_TOKEN_EXPIRY_HOURS;
use crate::services::password::DEFAULT_BCRYPT_COST;

/// Minimum accepted password length
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Configuration for the credential service
#[derive(Debug, Clone)]
pub struct CredentialServiceConfig {
    /// bcrypt cost factor for password hashing
    pub bcrypt_cost: u32,

    /// Out-of-band shared secret required to register an admin account.
    /// `None` disables admin self-registration entirely.
    pub admin_secret: Option<String>,

    /// Lifetime of email-verification tokens in hours
    pub verification_token_ttl_hours: i64,

    /// Lifetime of password-reset tokens in hours
    pub reset_token_ttl_hours: i64,
}

impl Default for CredentialServiceConfig {
    fn default() -> Self {
        Self {
            bcrypt_cost: DEFAULT_BCRYPT_COST,
            admin_secret: None,
            verification_token_ttl_hours: ONE_TIME_TOKEN_EXPIRY_HOURS,
            reset_token_ttl_hours: ONE_TIME_TOKEN_EXPIRY_HOURS,
        }
    }
}

impl CredentialServiceConfig {
    /// Build from the shared password and registration configuration
    pub fn from_shared(password: &PasswordConfig, registration: &RegistrationConfig) -> Self {
        Self {
            bcrypt_cost: password.bcrypt_cost,
            admin_secret: registration.admin_secret.clone(),
            ..Default::default()
        }
    }

    /// Set the admin registration secret
    pub fn with_admin_secret(mut self, secret: impl Into<String>) -> Self {
        self.admin_secret = Some(secret.into());
        self
    }

    /// Set the bcrypt cost factor
    pub fn with_bcrypt_cost(mut self, cost: u32) -> Self {
        self.bcrypt_cost = cost;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CredentialServiceConfig::default();
        assert_eq!(config.bcrypt_cost, DEFAULT_BCRYPT_COST);
        assert!(config.admin_secret.is_none());
        assert_eq!(config.verification_token_ttl_hours, 24);
        assert_eq!(config.reset_token_ttl_hours, 24);
    }

    #[test]
    fn test_from_shared() {
        let password = PasswordConfig { bcrypt_cost: 10 };
        let registration = RegistrationConfig {
            admin_secret: Some("shared-secret".to_string()),
        };

        let config = CredentialServiceConfig::from_shared(&password, &registration);
        assert_eq!(config.bcrypt_cost, 10);
        assert_eq!(config.admin_secret.as_deref(), Some("shared-secret"));
    }
}
