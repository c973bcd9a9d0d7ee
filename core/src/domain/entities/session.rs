//! Session entity and JWT claims for refresh-token based authentication.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::account::Account;

/// Access token expiration time (1 hour)
pub const ACCESS_TOKEN_EXPIRY_MINUTES: i64 = 60;

/// Refresh token expiration time (7 days)
pub const REFRESH_TOKEN_EXPIRY_DAYS: i64 = 7;

/// JWT issuer
pub const JWT_ISSUER: &str = "storynest";

/// JWT audience
pub const JWT_AUDIENCE: &str = "storynest-api";

/// Claims structure for the JWT access token payload
///
/// `sid` binds the access token to the session that issued it, so operations
/// that check session liveness (e.g. password change excluding the current
/// session from bulk revocation) can identify the calling session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (account ID)
    pub sub: String,

    /// Account email address
    pub email: String,

    /// Account role ("parent" or "admin")
    pub role: String,

    /// Session ID the token is bound to
    pub sid: String,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,

    /// Not before timestamp
    pub nbf: i64,

    /// Issuer
    pub iss: String,

    /// Audience
    pub aud: String,

    /// JWT ID (unique identifier for the token)
    pub jti: String,
}

impl Claims {
    /// Creates new claims for an access token bound to a session
    pub fn new_access_token(account: &Account, session_id: Uuid, ttl_minutes: i64) -> Self {
        let now = Utc::now();
        let expiry = now + Duration::minutes(ttl_minutes);

        Self {
            sub: account.id.to_string(),
            email: account.email.clone(),
            role: account.role.as_str().to_string(),
            sid: session_id.to_string(),
            iat: now.timestamp(),
            exp: expiry.timestamp(),
            nbf: now.timestamp(),
            iss: JWT_ISSUER.to_string(),
            aud: JWT_AUDIENCE.to_string(),
            jti: Uuid::new_v4().to_string(),
        }
    }

    /// Checks if the claims have expired
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }

    /// Gets the account ID from the claims
    pub fn account_id(&self) -> Result<Uuid, uuid::Error> {
        Uuid::parse_str(&self.sub)
    }

    /// Gets the session ID from the claims
    pub fn session_id(&self) -> Result<Uuid, uuid::Error> {
        Uuid::parse_str(&self.sid)
    }
}

/// Session entity backing one issued refresh token
///
/// Only the SHA-256 digest of the raw refresh token is stored; the raw value
/// exists solely in the response returned to the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Unique identifier for the session
    pub id: Uuid,

    /// Account this session belongs to
    pub account_id: Uuid,

    /// SHA-256 digest of the raw refresh token (unique)
    pub token_digest: String,

    /// Timestamp when the session was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the session expires
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// Creates a new session with the default 7-day expiry
    pub fn new(account_id: Uuid, token_digest: String) -> Self {
        Self::with_ttl_days(account_id, token_digest, REFRESH_TOKEN_EXPIRY_DAYS)
    }

    /// Creates a new session with an explicit TTL in days
    pub fn with_ttl_days(account_id: Uuid, token_digest: String, ttl_days: i64) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            account_id,
            token_digest,
            created_at: now,
            expires_at: now + Duration::days(ttl_days),
        }
    }

    /// Checks if the session has expired
    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }
}

/// Token pair returned to the client after login, registration, or refresh
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    /// Signed JWT access token
    pub access_token: String,

    /// Opaque refresh token (raw value, never persisted)
    pub refresh_token: String,

    /// Access token expiry time in seconds
    pub access_expires_in: i64,

    /// Refresh token expiry time in seconds
    pub refresh_expires_in: i64,

    /// Session backing the refresh token
    pub session_id: Uuid,
}

impl TokenPair {
    /// Creates a new token pair
    pub fn new(access_token: String, refresh_token: String, session_id: Uuid) -> Self {
        Self {
            access_token,
            refresh_token,
            access_expires_in: ACCESS_TOKEN_EXPIRY_MINUTES * 60,
            refresh_expires_in: REFRESH_TOKEN_EXPIRY_DAYS * 24 * 60 * 60,
            session_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::account::AccountRole;

    fn sample_account() -> Account {
        Account::new(
            "parent@example.com".to_string(),
            "$2b$12$digest".to_string(),
            "Sam".to_string(),
            AccountRole::Parent,
        )
    }

    #[test]
    fn test_access_token_claims() {
        let account = sample_account();
        let session_id = Uuid::new_v4();
        let claims = Claims::new_access_token(&account, session_id, ACCESS_TOKEN_EXPIRY_MINUTES);

        assert_eq!(claims.sub, account.id.to_string());
        assert_eq!(claims.email, account.email);
        assert_eq!(claims.role, "parent");
        assert_eq!(claims.sid, session_id.to_string());
        assert_eq!(claims.iss, JWT_ISSUER);
        assert_eq!(claims.aud, JWT_AUDIENCE);
        assert!(!claims.is_expired());
    }

    #[test]
    fn test_claims_id_parsing() {
        let account = sample_account();
        let session_id = Uuid::new_v4();
        let claims = Claims::new_access_token(&account, session_id, 60);

        assert_eq!(claims.account_id().unwrap(), account.id);
        assert_eq!(claims.session_id().unwrap(), session_id);
    }

    #[test]
    fn test_claims_expiration() {
        let account = sample_account();
        let mut claims = Claims::new_access_token(&account, Uuid::new_v4(), 60);

        claims.exp = Utc::now().timestamp() - 1;
        assert!(claims.is_expired());
    }

    #[test]
    fn test_session_creation() {
        let account_id = Uuid::new_v4();
        let session = Session::new(account_id, "digest".to_string());

        assert_eq!(session.account_id, account_id);
        assert!(!session.is_expired());
        assert!(session.expires_at > session.created_at);
    }

    #[test]
    fn test_session_expiration() {
        let mut session = Session::new(Uuid::new_v4(), "digest".to_string());
        session.expires_at = Utc::now() - Duration::days(1);

        assert!(session.is_expired());
    }

    #[test]
    fn test_token_pair_expiry_seconds() {
        let pair = TokenPair::new("access".to_string(), "refresh".to_string(), Uuid::new_v4());

        assert_eq!(pair.access_expires_in, 3600);
        assert_eq!(pair.refresh_expires_in, 7 * 24 * 60 * 60);
    }
}
