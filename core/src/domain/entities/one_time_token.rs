//! Single-use token entity for email verification and password reset.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One-time token expiration time (24 hours, both kinds)
pub const ONE_TIME_TOKEN_EXPIRY_HOURS: i64 = 24;

/// The kind of single-use token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    /// Email address verification
    EmailVerification,
    /// Password reset
    PasswordReset,
}

impl TokenKind {
    /// Kind name as stored in the database
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::EmailVerification => "email_verification",
            TokenKind::PasswordReset => "password_reset",
        }
    }
}

/// A pending verification or reset request
///
/// Only the SHA-256 digest of the raw secret is stored. At most the most
/// recently issued token of a given kind is live per account: issuing a new
/// one deletes prior rows of the same kind. Rows are deleted on successful
/// consumption or on expiry detection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OneTimeToken {
    /// Unique identifier for the token row
    pub id: Uuid,

    /// Account this token belongs to
    pub account_id: Uuid,

    /// SHA-256 digest of the raw token (unique per kind)
    pub token_digest: String,

    /// Token kind
    pub kind: TokenKind,

    /// Timestamp when the token was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the token expires
    pub expires_at: DateTime<Utc>,
}

impl OneTimeToken {
    /// Creates a new one-time token with the default 24-hour expiry
    pub fn new(account_id: Uuid, token_digest: String, kind: TokenKind) -> Self {
        Self::with_ttl_hours(account_id, token_digest, kind, ONE_TIME_TOKEN_EXPIRY_HOURS)
    }

    /// Creates a new one-time token with an explicit TTL in hours
    pub fn with_ttl_hours(
        account_id: Uuid,
        token_digest: String,
        kind: TokenKind,
        ttl_hours: i64,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            account_id,
            token_digest,
            kind,
            created_at: now,
            expires_at: now + Duration::hours(ttl_hours),
        }
    }

    /// Checks if the token has expired
    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_creation() {
        let account_id = Uuid::new_v4();
        let token = OneTimeToken::new(
            account_id,
            "digest".to_string(),
            TokenKind::EmailVerification,
        );

        assert_eq!(token.account_id, account_id);
        assert_eq!(token.kind, TokenKind::EmailVerification);
        assert!(!token.is_expired());
    }

    #[test]
    fn test_token_expiration() {
        let mut token = OneTimeToken::new(
            Uuid::new_v4(),
            "digest".to_string(),
            TokenKind::PasswordReset,
        );
        token.expires_at = Utc::now() - Duration::hours(1);

        assert!(token.is_expired());
    }

    #[test]
    fn test_kind_as_str() {
        assert_eq!(TokenKind::EmailVerification.as_str(), "email_verification");
        assert_eq!(TokenKind::PasswordReset.as_str(), "password_reset");
    }
}
