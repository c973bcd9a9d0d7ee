//! Credential service implementing the stateful login, registration,
//! verification, and password lifecycle protocols.

use std::net::IpAddr;
use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::entities::account::{Account, AccountRole};
use crate::domain::entities::known_ip::KnownIp;
use crate::domain::entities::one_time_token::{OneTimeToken, TokenKind};
use crate::domain::entities::session::TokenPair;
use crate::domain::events::{DomainEvent, EventPublisher};
use crate::domain::value_objects::AuthResponse;
use crate::errors::{AuthError, DomainError, DomainResult, TokenError, ValidationError};
use crate::repositories::{
    AccountRepository, KnownIpRepository, OneTimeTokenRepository, SessionRepository,
    TransactionalStore,
};
use crate::services::password::{fingerprint, generate_secret, PasswordHasher, SECRET_LENGTH};
use crate::services::session::SessionService;

use super::config::{CredentialServiceConfig, MIN_PASSWORD_LENGTH};
use super::email::{mask_email, normalize_email, validate_email};

/// Input for account registration
#[derive(Debug, Clone)]
pub struct RegistrationRequest {
    pub email: String,
    pub password: String,
    pub display_name: String,
    pub role: AccountRole,
    /// Out-of-band shared secret, required when `role` is `Admin`
    pub admin_secret: Option<String>,
}

/// Service orchestrating credential lifecycle operations
///
/// Owns no state of its own; every protocol below is a sequence of
/// repository calls with the multi-entity steps funneled through the
/// transactional store so they land fully or not at all.
pub struct CredentialService<A, S, T, K, X, E>
where
    A: AccountRepository,
    S: SessionRepository,
    T: OneTimeTokenRepository,
    K: KnownIpRepository,
    X: TransactionalStore,
    E: EventPublisher,
{
    accounts: Arc<A>,
    sessions: Arc<SessionService<S>>,
    tokens: Arc<T>,
    known_ips: Arc<K>,
    store: Arc<X>,
    events: Arc<E>,
    hasher: PasswordHasher,
    config: CredentialServiceConfig,
}

impl<A, S, T, K, X, E> CredentialService<A, S, T, K, X, E>
where
    A: AccountRepository,
    S: SessionRepository,
    T: OneTimeTokenRepository,
    K: KnownIpRepository,
    X: TransactionalStore,
    E: EventPublisher,
{
    /// Create a new credential service
    pub fn new(
        accounts: Arc<A>,
        sessions: Arc<SessionService<S>>,
        tokens: Arc<T>,
        known_ips: Arc<K>,
        store: Arc<X>,
        events: Arc<E>,
        config: CredentialServiceConfig,
    ) -> Self {
        let hasher = PasswordHasher::new(config.bcrypt_cost);
        Self {
            accounts,
            sessions,
            tokens,
            known_ips,
            store,
            events,
            hasher,
            config,
        }
    }

    /// Authenticate an account and open a new session
    ///
    /// Unknown email, wrong password, and soft-deleted account all surface
    /// as `InvalidCredentials` so callers cannot probe which addresses are
    /// registered. Only the unverified-email rejection is distinguishable,
    /// since it is not a credential-guessing signal.
    pub async fn login(&self, email: &str, password: &str) -> DomainResult<AuthResponse> {
        let email = normalize_email(email);

        let account = match self.accounts.find_by_email(&email).await? {
            Some(account) if !account.is_deleted => account,
            _ => {
                info!(email = %mask_email(&email), "login rejected");
                return Err(AuthError::InvalidCredentials.into());
            }
        };

        if !self
            .hasher
            .verify_secret(password, &account.password_digest)?
        {
            info!(email = %mask_email(&email), "login rejected");
            return Err(AuthError::InvalidCredentials.into());
        }

        if !account.is_email_verified {
            return Err(AuthError::EmailNotVerified.into());
        }

        let pair = self.sessions.issue_pair(&account).await?;
        info!(account_id = %account.id, "login succeeded");
        Ok(AuthResponse::from_token_pair(pair, &account))
    }

    /// Register a new account and open its first session
    ///
    /// Admin registration additionally requires the out-of-band shared
    /// secret. Preference seeding and welcome mail run asynchronously off
    /// the registration event, never on this write path.
    pub async fn register(&self, request: RegistrationRequest) -> DomainResult<AuthResponse> {
        validate_email(&request.email)?;
        validate_password(&request.password)?;
        if request.display_name.trim().is_empty() {
            return Err(ValidationError::RequiredField {
                field: "display_name".to_string(),
            }
            .into());
        }

        let email = normalize_email(&request.email);

        if self.accounts.exists_by_email(&email).await? {
            return Err(AuthError::EmailAlreadyRegistered.into());
        }

        if request.role == AccountRole::Admin {
            match (&self.config.admin_secret, &request.admin_secret) {
                (Some(expected), Some(provided)) if expected == provided => {}
                _ => return Err(AuthError::InvalidAdminSecret.into()),
            }
        }

        let digest = self.hasher.hash_secret(&request.password)?;
        let account = Account::new(
            email,
            digest,
            request.display_name.trim().to_string(),
            request.role,
        );
        let account = self.accounts.create(account).await?;

        self.publish_best_effort(DomainEvent::UserRegistered {
            account_id: account.id,
            email: account.email.clone(),
            display_name: account.display_name.clone(),
            role: account.role,
            registered_at: account.created_at,
        })
        .await;

        let pair = self.sessions.issue_pair(&account).await?;
        info!(account_id = %account.id, role = %account.role.as_str(), "account registered");
        Ok(AuthResponse::from_token_pair(pair, &account))
    }

    /// Issue a fresh verification token and request the verification email
    ///
    /// Any prior verification token for the account dies here; only the
    /// newest one redeems. The email dispatch is the one blocking
    /// notification in the service: if it cannot be requested the caller
    /// must know, since the raw token is otherwise lost.
    pub async fn send_verification(&self, email: &str) -> DomainResult<()> {
        let email = normalize_email(email);
        let account = self
            .accounts
            .find_by_email(&email)
            .await?
            .ok_or_else(|| DomainError::NotFound {
                resource: "account".to_string(),
            })?;

        let raw_token = generate_secret(SECRET_LENGTH);
        let token = OneTimeToken::with_ttl_hours(
            account.id,
            fingerprint(&raw_token),
            TokenKind::EmailVerification,
            self.config.verification_token_ttl_hours,
        );

        self.tokens
            .delete_by_kind(account.id, TokenKind::EmailVerification)
            .await?;
        let token = self.tokens.create(token).await?;

        self.publish_blocking(DomainEvent::EmailVerificationRequested {
            account_id: account.id,
            email: account.email.clone(),
            raw_token,
            expires_at: token.expires_at,
        })
        .await?;

        info!(account_id = %account.id, "verification token issued");
        Ok(())
    }

    /// Redeem a verification token
    ///
    /// Consumption is single-use: the verified flag, onboarding stage, and
    /// token deletion land in one transaction, so a second caller racing on
    /// the same token loses the row delete and observes `InvalidToken`.
    pub async fn verify_email(&self, raw_token: &str) -> DomainResult<()> {
        let token = self
            .find_live_token(raw_token, TokenKind::EmailVerification)
            .await?;

        self.store
            .apply_email_verification(token.account_id, token.id)
            .await?;

        if let Some(account) = self.accounts.find_by_id(token.account_id).await? {
            self.publish_best_effort(DomainEvent::UserEmailVerified {
                account_id: account.id,
                email: account.email,
                verified_at: Utc::now(),
            })
            .await;
        }

        info!(account_id = %token.account_id, "email verified");
        Ok(())
    }

    /// Issue a password-reset token and request the reset email
    ///
    /// A request from an address the account has never reset from raises a
    /// security alert first. That side path is strictly best-effort; the
    /// reset itself is the primary goal and proceeds regardless.
    pub async fn request_password_reset(&self, email: &str, source_ip: IpAddr) -> DomainResult<()> {
        let email = normalize_email(email);
        let account = self
            .accounts
            .find_by_email(&email)
            .await?
            .ok_or_else(|| DomainError::NotFound {
                resource: "account".to_string(),
            })?;

        self.note_request_ip(&account, source_ip).await;

        let raw_token = generate_secret(SECRET_LENGTH);
        let token = OneTimeToken::with_ttl_hours(
            account.id,
            fingerprint(&raw_token),
            TokenKind::PasswordReset,
            self.config.reset_token_ttl_hours,
        );

        self.tokens
            .delete_by_kind(account.id, TokenKind::PasswordReset)
            .await?;
        let token = self.tokens.create(token).await?;

        self.publish_blocking(DomainEvent::PasswordResetRequested {
            account_id: account.id,
            email: account.email.clone(),
            raw_token,
            expires_at: token.expires_at,
        })
        .await?;

        info!(account_id = %account.id, "password reset token issued");
        Ok(())
    }

    /// Check a reset token before the client shows the new-password form
    ///
    /// The supplied email must match the token's owning account, guarding
    /// against token/email mismatch from tampered links.
    pub async fn validate_reset_token(&self, raw_token: &str, email: &str) -> DomainResult<()> {
        let token = self
            .find_live_token(raw_token, TokenKind::PasswordReset)
            .await?;

        let account = self
            .accounts
            .find_by_id(token.account_id)
            .await?
            .ok_or_else(|| DomainError::NotFound {
                resource: "account".to_string(),
            })?;

        if account.email != normalize_email(email) {
            return Err(DomainError::Unauthorized);
        }

        Ok(())
    }

    /// Consume a reset token and set a new password
    ///
    /// Every session for the account is revoked: a reset implies the
    /// account may be compromised, so no session survives.
    pub async fn reset_password(&self, raw_token: &str, new_password: &str) -> DomainResult<()> {
        validate_password(new_password)?;

        let token = self
            .find_live_token(raw_token, TokenKind::PasswordReset)
            .await?;

        let digest = self.hasher.hash_secret(new_password)?;
        let revoked = self
            .store
            .apply_password_reset(token.account_id, token.id, &digest)
            .await?;

        self.publish_best_effort(DomainEvent::UserPasswordChanged {
            account_id: token.account_id,
            changed_at: Utc::now(),
            sessions_invalidated: true,
        })
        .await;

        info!(account_id = %token.account_id, revoked, "password reset");
        Ok(())
    }

    /// Change the password of an authenticated account
    ///
    /// Every other session is revoked in the same transaction as the digest
    /// update; the session performing the change stays logged in.
    pub async fn change_password(
        &self,
        account_id: Uuid,
        old_password: &str,
        new_password: &str,
        current_session_id: Uuid,
    ) -> DomainResult<()> {
        let account = self
            .accounts
            .find_by_id(account_id)
            .await?
            .ok_or_else(|| DomainError::NotFound {
                resource: "account".to_string(),
            })?;

        if !self
            .hasher
            .verify_secret(old_password, &account.password_digest)?
        {
            return Err(AuthError::InvalidOldPassword.into());
        }
        if old_password == new_password {
            return Err(AuthError::SamePassword.into());
        }
        validate_password(new_password)?;

        let digest = self.hasher.hash_secret(new_password)?;
        let revoked = self
            .store
            .apply_password_change(account.id, &digest, current_session_id)
            .await?;

        self.publish_best_effort(DomainEvent::UserPasswordChanged {
            account_id: account.id,
            changed_at: Utc::now(),
            sessions_invalidated: revoked > 0,
        })
        .await;

        info!(account_id = %account.id, revoked, "password changed");
        Ok(())
    }

    /// Exchange a raw refresh token for a fresh access token
    ///
    /// The session id is preserved and the refresh token is not rotated;
    /// the supplied token remains the session's credential until the
    /// session is revoked or expires.
    pub async fn refresh_session(&self, raw_refresh_token: &str) -> DomainResult<AuthResponse> {
        let session = self.sessions.verify_refresh_token(raw_refresh_token).await?;

        let account = match self.accounts.find_by_id(session.account_id).await? {
            Some(account) if !account.is_deleted => account,
            _ => return Err(TokenError::InvalidRefreshToken.into()),
        };

        let access_token = self.sessions.mint_access_token(&account, session.id)?;
        let pair = TokenPair::new(access_token, raw_refresh_token.to_string(), session.id);
        Ok(AuthResponse::from_token_pair(pair, &account))
    }

    /// Log out a single session
    pub async fn logout(&self, session_id: Uuid) -> DomainResult<bool> {
        self.sessions.revoke(session_id).await
    }

    /// Log out every session for an account
    pub async fn logout_all(&self, account_id: Uuid) -> DomainResult<usize> {
        self.sessions.revoke_all(account_id).await
    }

    /// Look up a live one-time token by its raw value
    ///
    /// An expired row is deleted on sight, so the caller gets
    /// `TokenExpired` exactly once and `InvalidToken` on any retry.
    async fn find_live_token(
        &self,
        raw_token: &str,
        kind: TokenKind,
    ) -> DomainResult<OneTimeToken> {
        let digest = fingerprint(raw_token);
        let token = self
            .tokens
            .find_by_digest(&digest, kind)
            .await?
            .ok_or(DomainError::Token(TokenError::InvalidToken))?;

        if token.is_expired() {
            self.tokens.delete(token.id).await?;
            return Err(TokenError::TokenExpired.into());
        }

        Ok(token)
    }

    /// Record the source address of a reset request, alerting on a new one
    ///
    /// Nothing in here may abort the reset flow; every failure is logged
    /// and swallowed.
    async fn note_request_ip(&self, account: &Account, source_ip: IpAddr) {
        match self.known_ips.find(account.id, source_ip).await {
            Ok(Some(record)) => {
                if let Err(e) = self.known_ips.touch(record.id).await {
                    warn!(account_id = %account.id, error = %e, "failed to bump known ip");
                }
            }
            Ok(None) => {
                warn!(account_id = %account.id, %source_ip, "reset requested from unknown ip");
                self.publish_best_effort(DomainEvent::PasswordResetAlert {
                    account_id: account.id,
                    email: account.email.clone(),
                    ip_address: source_ip,
                    raised_at: Utc::now(),
                })
                .await;

                let record = KnownIp::new(account.id, source_ip);
                if let Err(e) = self.known_ips.create(record).await {
                    warn!(account_id = %account.id, error = %e, "failed to record known ip");
                }
            }
            Err(e) => {
                warn!(account_id = %account.id, error = %e, "known ip lookup failed");
            }
        }
    }

    /// Publish an event, logging and swallowing any failure
    async fn publish_best_effort(&self, event: DomainEvent) {
        let name = event.name();
        if let Err(e) = self.events.publish(event).await {
            warn!(event = name, error = %e, "failed to publish domain event");
        }
    }

    /// Publish an event the caller must know about on failure
    ///
    /// Used for the raw-token-carrying emails: if the dispatch request is
    /// lost, the raw token is lost with it.
    async fn publish_blocking(&self, event: DomainEvent) -> DomainResult<()> {
        let name = event.name();
        self.events
            .publish(event)
            .await
            .map_err(|_| DomainError::ServiceUnavailable {
                message: format!("notification dispatch failed for {name}"),
            })
    }
}

fn validate_password(password: &str) -> DomainResult<()> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(ValidationError::TooShort {
            field: "password".to_string(),
            min: MIN_PASSWORD_LENGTH,
        }
        .into());
    }
    Ok(())
}
