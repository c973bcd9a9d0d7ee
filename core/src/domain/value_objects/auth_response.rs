//! Authentication response value object for API responses.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::account::{Account, OnboardingStage};
use crate::domain::entities::session::TokenPair;

/// Authentication response returned after login, registration, or refresh
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuthResponse {
    /// Signed JWT access token for API authentication
    pub access_token: String,

    /// Opaque refresh token for obtaining new access tokens
    pub refresh_token: String,

    /// Access token expiration time in seconds
    pub expires_in: i64,

    /// Session id backing the refresh token
    pub session_id: Uuid,

    /// Account role ("parent" or "admin")
    pub role: String,

    /// Current onboarding stage for client routing
    pub onboarding_stage: OnboardingStage,
}

impl AuthResponse {
    /// Creates an authentication response from a token pair and the account
    pub fn from_token_pair(token_pair: TokenPair, account: &Account) -> Self {
        Self {
            access_token: token_pair.access_token,
            refresh_token: token_pair.refresh_token,
            expires_in: token_pair.access_expires_in,
            session_id: token_pair.session_id,
            role: account.role.as_str().to_string(),
            onboarding_stage: account.onboarding_stage,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::account::AccountRole;

    #[test]
    fn test_from_token_pair() {
        let account = Account::new(
            "parent@example.com".to_string(),
            "$2b$12$digest".to_string(),
            "Sam".to_string(),
            AccountRole::Parent,
        );
        let session_id = Uuid::new_v4();
        let pair = TokenPair::new("access".to_string(), "refresh".to_string(), session_id);

        let response = AuthResponse::from_token_pair(pair, &account);
        assert_eq!(response.session_id, session_id);
        assert_eq!(response.role, "parent");
        assert_eq!(response.onboarding_stage, OnboardingStage::AccountCreated);
        assert_eq!(response.expires_in, 3600);
    }
}
