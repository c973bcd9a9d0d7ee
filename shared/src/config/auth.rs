//! Authentication and credential configuration

use serde::{Deserialize, Serialize};

/// JWT authentication configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// JWT secret key for signing access tokens
    pub secret: String,

    /// Access token expiry time in seconds
    pub access_token_expiry: i64,

    /// Refresh token expiry time in seconds
    pub refresh_token_expiry: i64,

    /// JWT issuer claim
    pub issuer: String,

    /// JWT audience claim
    pub audience: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::from("your-secret-key-change-in-production"),
            access_token_expiry: 3600,    // 1 hour
            refresh_token_expiry: 604800, // 7 days
            issuer: String::from("storynest"),
            audience: String::from("storynest-api"),
        }
    }
}

impl JwtConfig {
    /// Create a new JWT configuration with secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Default::default()
        }
    }

    /// Create from environment variables
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(secret) = std::env::var("JWT_SECRET") {
            config.secret = secret;
        }
        if let Ok(expiry) = std::env::var("JWT_ACCESS_TOKEN_EXPIRY") {
            if let Ok(seconds) = expiry.parse() {
                config.access_token_expiry = seconds;
            }
        }
        config
    }

    /// Set access token expiry in minutes
    pub fn with_access_expiry_minutes(mut self, minutes: i64) -> Self {
        self.access_token_expiry = minutes * 60;
        self
    }

    /// Set refresh token expiry in days
    pub fn with_refresh_expiry_days(mut self, days: i64) -> Self {
        self.refresh_token_expiry = days * 86400;
        self
    }

    /// Check if using the default secret (security warning)
    pub fn is_using_default_secret(&self) -> bool {
        self.secret == "your-secret-key-change-in-production"
    }
}

/// Password hashing configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PasswordConfig {
    /// bcrypt cost factor; the cost is embedded in each digest so it can be
    /// raised without invalidating previously hashed passwords
    pub bcrypt_cost: u32,
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self { bcrypt_cost: 12 }
    }
}

impl PasswordConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let bcrypt_cost = std::env::var("BCRYPT_COST")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(12);
        Self { bcrypt_cost }
    }
}

/// Registration configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RegistrationConfig {
    /// Out-of-band shared secret required to register an admin account.
    /// `None` disables admin self-registration entirely.
    pub admin_secret: Option<String>,
}

impl RegistrationConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self {
            admin_secret: std::env::var("ADMIN_REGISTRATION_SECRET").ok(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jwt_config_defaults() {
        let config = JwtConfig::default();
        assert_eq!(config.access_token_expiry, 3600);
        assert_eq!(config.refresh_token_expiry, 604800);
        assert_eq!(config.issuer, "storynest");
        assert!(config.is_using_default_secret());
    }

    #[test]
    fn test_jwt_config_builders() {
        let config = JwtConfig::new("test-secret")
            .with_access_expiry_minutes(30)
            .with_refresh_expiry_days(14);
        assert_eq!(config.access_token_expiry, 1800);
        assert_eq!(config.refresh_token_expiry, 14 * 86400);
        assert!(!config.is_using_default_secret());
    }

    #[test]
    fn test_password_config_default_cost() {
        assert_eq!(PasswordConfig::default().bcrypt_cost, 12);
    }
}
