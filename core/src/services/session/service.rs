//! Session service implementing refresh-token session lifecycle and JWT
//! access token issuance.

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use tracing::{debug, info};
use uuid::Uuid;

use crate::domain::entities::account::Account;
use crate::domain::entities::session::{Claims, Session, TokenPair, JWT_AUDIENCE, JWT_ISSUER};
use crate::errors::{DomainError, DomainResult, TokenError};
use crate::repositories::SessionRepository;
use crate::services::password::{fingerprint, generate_secret, SECRET_LENGTH};

use super::config::SessionServiceConfig;

/// Service for issuing, verifying, and revoking sessions
///
/// A session is one logged-in device. Its refresh token is an opaque random
/// secret handed to the client exactly once; only the SHA-256 digest is
/// persisted, so a database leak exposes nothing redeemable. Access tokens
/// are short-lived HS256 JWTs carrying the owning session's id in `sid`.
pub struct SessionService<S: SessionRepository> {
    repository: S,
    config: SessionServiceConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl<S: SessionRepository> SessionService<S> {
    /// Create a new session service
    pub fn new(repository: S, config: SessionServiceConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[JWT_ISSUER]);
        validation.set_audience(&[JWT_AUDIENCE]);
        validation.validate_nbf = true;

        Self {
            repository,
            config,
            encoding_key,
            decoding_key,
            validation,
        }
    }

    /// Issue a fresh token pair for an account
    ///
    /// Creates one session row holding the digest of a newly generated
    /// refresh token, then signs an access token bound to that session.
    /// The raw refresh token appears only in the returned pair.
    pub async fn issue_pair(&self, account: &Account) -> DomainResult<TokenPair> {
        let raw_refresh = generate_secret(SECRET_LENGTH);
        let digest = fingerprint(&raw_refresh);

        let session = Session::with_ttl_days(account.id, digest, self.config.refresh_token_ttl_days);
        let session = self.repository.create(session).await?;

        let access_token = self.mint_access_token(account, session.id)?;

        info!(account_id = %account.id, session_id = %session.id, "session created");
        Ok(TokenPair::new(access_token, raw_refresh, session.id))
    }

    /// Sign a JWT access token for an account bound to an existing session
    pub fn mint_access_token(&self, account: &Account, session_id: Uuid) -> DomainResult<String> {
        let claims =
            Claims::new_access_token(account, session_id, self.config.access_token_ttl_minutes);

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|_| DomainError::Token(TokenError::TokenGenerationFailed))
    }

    /// Resolve a raw refresh token to its live session
    ///
    /// Expiry is enforced here rather than left to background cleanup: an
    /// expired session row is deleted on sight and the caller gets
    /// `TokenExpired` instead of a fresh access token.
    pub async fn verify_refresh_token(&self, raw_token: &str) -> DomainResult<Session> {
        let digest = fingerprint(raw_token);

        let session = self
            .repository
            .find_by_digest(&digest)
            .await?
            .ok_or(DomainError::Token(TokenError::InvalidRefreshToken))?;

        if session.is_expired() {
            self.repository.delete(session.id).await?;
            debug!(session_id = %session.id, "expired session purged on refresh");
            return Err(DomainError::Token(TokenError::TokenExpired));
        }

        Ok(session)
    }

    /// Decode and validate a JWT access token
    pub fn verify_access_token(&self, token: &str) -> DomainResult<Claims> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                let token_error = match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::TokenExpired,
                    jsonwebtoken::errors::ErrorKind::ImmatureSignature => {
                        TokenError::TokenNotYetValid
                    }
                    _ => TokenError::InvalidTokenFormat,
                };
                DomainError::Token(token_error)
            })
    }

    /// Revoke a single session (logout)
    ///
    /// Idempotent: revoking an already-gone session reports `false`.
    pub async fn revoke(&self, session_id: Uuid) -> DomainResult<bool> {
        let deleted = self.repository.delete(session_id).await?;
        if deleted {
            info!(session_id = %session_id, "session revoked");
        }
        Ok(deleted)
    }

    /// Revoke every session for an account (logout everywhere)
    pub async fn revoke_all(&self, account_id: Uuid) -> DomainResult<usize> {
        let revoked = self.repository.delete_all_for_account(account_id).await?;
        info!(account_id = %account_id, revoked, "all sessions revoked");
        Ok(revoked)
    }

    /// Revoke every session for an account except the given one
    pub async fn revoke_others(&self, account_id: Uuid, keep_session_id: Uuid) -> DomainResult<usize> {
        let revoked = self
            .repository
            .delete_all_except(account_id, keep_session_id)
            .await?;
        info!(account_id = %account_id, revoked, "other sessions revoked");
        Ok(revoked)
    }

    /// Delete expired session rows
    pub async fn cleanup_expired(&self) -> DomainResult<usize> {
        let removed = self.repository.delete_expired().await?;
        if removed > 0 {
            debug!(removed, "expired sessions cleaned up");
        }
        Ok(removed)
    }

    /// Count live sessions for an account
    pub async fn count_for_account(&self, account_id: Uuid) -> DomainResult<usize> {
        self.repository.count_for_account(account_id).await
    }
}
