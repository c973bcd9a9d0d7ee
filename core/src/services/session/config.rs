//! Session service configuration.

use sn_shared::config::JwtConfig;

use crate::domain::entities::session::{ACCESS_TOKEN_EXPIRY_MINUTES, REFRESH_TOKEN_EXPIRY_DAYS};

/// Configuration for the session service
#[derive(Debug, Clone)]
pub struct SessionServiceConfig {
    /// Secret key for signing JWT access tokens (HS256)
    pub jwt_secret: String,

    /// Access token lifetime in minutes
    pub access_token_ttl_minutes: i64,

    /// Refresh token lifetime in days
    pub refresh_token_ttl_days: i64,
}

impl SessionServiceConfig {
    /// Create a configuration with an explicit secret and default lifetimes
    pub fn new(jwt_secret: impl Into<String>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            access_token_ttl_minutes: ACCESS_TOKEN_EXPIRY_MINUTES,
            refresh_token_ttl_days: REFRESH_TOKEN_EXPIRY_DAYS,
        }
    }

    /// Build from the shared JWT configuration
    pub fn from_jwt_config(config: &JwtConfig) -> Self {
        Self {
            jwt_secret: config.secret.clone(),
            access_token_ttl_minutes: config.access_token_expiry / 60,
            refresh_token_ttl_days: config.refresh_token_expiry / (24 * 60 * 60),
        }
    }

    /// Override the access token lifetime
    pub fn with_access_ttl_minutes(mut self, minutes: i64) -> Self {
        self.access_token_ttl_minutes = minutes;
        self
    }

    /// Override the refresh token lifetime
    pub fn with_refresh_ttl_days(mut self, days: i64) -> Self {
        self.refresh_token_ttl_days = days;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_lifetimes() {
        let config = SessionServiceConfig::new("secret");
        assert_eq!(config.access_token_ttl_minutes, 60);
        assert_eq!(config.refresh_token_ttl_days, 7);
    }

    #[test]
    fn test_from_jwt_config_converts_units() {
        let jwt = JwtConfig::new("secret".to_string());
        let config = SessionServiceConfig::from_jwt_config(&jwt);

        assert_eq!(config.jwt_secret, "secret");
        assert_eq!(config.access_token_ttl_minutes, 60);
        assert_eq!(config.refresh_token_ttl_days, 7);
    }
}
