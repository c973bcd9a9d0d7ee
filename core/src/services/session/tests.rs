//! Tests for the session service against the in-memory repository.

use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::domain::entities::account::{Account, AccountRole};
use crate::domain::entities::session::Session;
use crate::errors::{DomainError, TokenError};
use crate::repositories::MockSessionRepository;
use crate::services::password::fingerprint;

use super::config::SessionServiceConfig;
use super::service::SessionService;

fn test_service() -> SessionService<MockSessionRepository> {
    SessionService::new(
        MockSessionRepository::new(),
        SessionServiceConfig::new("test-secret-key"),
    )
}

fn sample_account() -> Account {
    let mut account = Account::new(
        "parent@example.com".to_string(),
        "$2b$04$digest".to_string(),
        "Sam".to_string(),
        AccountRole::Parent,
    );
    account.mark_email_verified();
    account
}

#[tokio::test]
async fn test_issue_pair_persists_digest_only() {
    let repository = MockSessionRepository::new();
    let sessions = repository.sessions.clone();
    let service = SessionService::new(repository, SessionServiceConfig::new("test-secret-key"));
    let account = sample_account();

    let pair = service.issue_pair(&account).await.unwrap();

    let stored = sessions.read().await;
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].account_id, account.id);
    assert_eq!(stored[0].id, pair.session_id);
    // The raw refresh token never touches storage
    assert_ne!(stored[0].token_digest, pair.refresh_token);
    assert_eq!(stored[0].token_digest, fingerprint(&pair.refresh_token));
}

#[tokio::test]
async fn test_refresh_token_roundtrip() {
    let service = test_service();
    let account = sample_account();

    let pair = service.issue_pair(&account).await.unwrap();
    let session = service.verify_refresh_token(&pair.refresh_token).await.unwrap();

    assert_eq!(session.id, pair.session_id);
    assert_eq!(session.account_id, account.id);
}

#[tokio::test]
async fn test_unknown_refresh_token_rejected() {
    let service = test_service();

    let result = service.verify_refresh_token("no-such-token").await;
    assert!(matches!(
        result,
        Err(DomainError::Token(TokenError::InvalidRefreshToken))
    ));
}

#[tokio::test]
async fn test_expired_session_purged_on_refresh() {
    let repository = MockSessionRepository::new();
    let sessions = repository.sessions.clone();
    let service = SessionService::new(repository, SessionServiceConfig::new("test-secret-key"));

    let raw = "expired-refresh-token-value-0001";
    let mut session = Session::new(Uuid::new_v4(), fingerprint(raw));
    session.expires_at = Utc::now() - Duration::hours(1);
    sessions.write().await.push(session);

    let result = service.verify_refresh_token(raw).await;
    assert!(matches!(
        result,
        Err(DomainError::Token(TokenError::TokenExpired))
    ));

    // The stale row is gone, so a retry looks like an unknown token
    assert!(sessions.read().await.is_empty());
    let retry = service.verify_refresh_token(raw).await;
    assert!(matches!(
        retry,
        Err(DomainError::Token(TokenError::InvalidRefreshToken))
    ));
}

#[tokio::test]
async fn test_access_token_roundtrip() {
    let service = test_service();
    let account = sample_account();

    let pair = service.issue_pair(&account).await.unwrap();
    let claims = service.verify_access_token(&pair.access_token).unwrap();

    assert_eq!(claims.account_id().unwrap(), account.id);
    assert_eq!(claims.session_id().unwrap(), pair.session_id);
    assert_eq!(claims.role, "parent");
}

#[tokio::test]
async fn test_access_token_wrong_secret_rejected() {
    let service = test_service();
    let other = SessionService::new(
        MockSessionRepository::new(),
        SessionServiceConfig::new("a-different-secret"),
    );
    let account = sample_account();

    let pair = service.issue_pair(&account).await.unwrap();
    let result = other.verify_access_token(&pair.access_token);

    assert!(matches!(
        result,
        Err(DomainError::Token(TokenError::InvalidTokenFormat))
    ));
}

#[tokio::test]
async fn test_revoke_is_idempotent() {
    let service = test_service();
    let account = sample_account();

    let pair = service.issue_pair(&account).await.unwrap();

    assert!(service.revoke(pair.session_id).await.unwrap());
    assert!(!service.revoke(pair.session_id).await.unwrap());

    // The refresh token dies with the session
    let result = service.verify_refresh_token(&pair.refresh_token).await;
    assert!(matches!(
        result,
        Err(DomainError::Token(TokenError::InvalidRefreshToken))
    ));
}

#[tokio::test]
async fn test_revoke_all_spares_other_accounts() {
    let repository = MockSessionRepository::new();
    let sessions = repository.sessions.clone();
    let service = SessionService::new(repository, SessionServiceConfig::new("test-secret-key"));

    let account = sample_account();
    let other = sample_account();

    service.issue_pair(&account).await.unwrap();
    service.issue_pair(&account).await.unwrap();
    service.issue_pair(&other).await.unwrap();

    let revoked = service.revoke_all(account.id).await.unwrap();
    assert_eq!(revoked, 2);

    let remaining = sessions.read().await;
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].account_id, other.id);
}

#[tokio::test]
async fn test_revoke_others_keeps_one() {
    let service = test_service();
    let account = sample_account();

    let a = service.issue_pair(&account).await.unwrap();
    let b = service.issue_pair(&account).await.unwrap();
    let c = service.issue_pair(&account).await.unwrap();

    let revoked = service.revoke_others(account.id, b.session_id).await.unwrap();
    assert_eq!(revoked, 2);

    assert!(service.verify_refresh_token(&b.refresh_token).await.is_ok());
    assert!(service.verify_refresh_token(&a.refresh_token).await.is_err());
    assert!(service.verify_refresh_token(&c.refresh_token).await.is_err());
}

#[tokio::test]
async fn test_cleanup_expired_removes_only_stale_rows() {
    let repository = MockSessionRepository::new();
    let sessions = repository.sessions.clone();
    let service = SessionService::new(repository, SessionServiceConfig::new("test-secret-key"));
    let account = sample_account();

    service.issue_pair(&account).await.unwrap();

    let mut stale = Session::new(account.id, fingerprint("stale-token"));
    stale.expires_at = Utc::now() - Duration::days(1);
    sessions.write().await.push(stale);

    let removed = service.cleanup_expired().await.unwrap();
    assert_eq!(removed, 1);
    assert_eq!(service.count_for_account(account.id).await.unwrap(), 1);
}
