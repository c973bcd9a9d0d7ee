//! Mock implementation of TransactionalStore for testing.
//!
//! Shares the `Arc` state of the entity mocks so tests observe the combined
//! effect through the individual repositories. Checks are performed before
//! any mutation, mirroring a rolled-back transaction on failure.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::account::Account;
use crate::domain::entities::one_time_token::OneTimeToken;
use crate::domain::entities::session::Session;
use crate::errors::DomainError;

use super::r#trait::TransactionalStore;

/// In-memory transactional store for tests
pub struct MockTransactionalStore {
    accounts: Arc<RwLock<Vec<Account>>>,
    tokens: Arc<RwLock<Vec<OneTimeToken>>>,
    sessions: Arc<RwLock<Vec<Session>>>,
}

impl MockTransactionalStore {
    /// Create a store sharing state with the entity mocks
    pub fn new(
        accounts: Arc<RwLock<Vec<Account>>>,
        tokens: Arc<RwLock<Vec<OneTimeToken>>>,
        sessions: Arc<RwLock<Vec<Session>>>,
    ) -> Self {
        Self {
            accounts,
            tokens,
            sessions,
        }
    }
}

#[async_trait]
impl TransactionalStore for MockTransactionalStore {
    async fn apply_email_verification(
        &self,
        account_id: Uuid,
        token_id: Uuid,
    ) -> Result<(), DomainError> {
        let mut accounts = self.accounts.write().await;
        let mut tokens = self.tokens.write().await;

        let account = accounts
            .iter_mut()
            .find(|a| a.id == account_id)
            .ok_or_else(|| DomainError::NotFound {
                resource: format!("account:{account_id}"),
            })?;
        if !tokens.iter().any(|t| t.id == token_id) {
            return Err(DomainError::NotFound {
                resource: format!("one_time_token:{token_id}"),
            });
        }

        account.mark_email_verified();
        tokens.retain(|t| t.id != token_id);
        Ok(())
    }

    async fn apply_password_reset(
        &self,
        account_id: Uuid,
        token_id: Uuid,
        password_digest: &str,
    ) -> Result<usize, DomainError> {
        let mut accounts = self.accounts.write().await;
        let mut tokens = self.tokens.write().await;
        let mut sessions = self.sessions.write().await;

        let account = accounts
            .iter_mut()
            .find(|a| a.id == account_id)
            .ok_or_else(|| DomainError::NotFound {
                resource: format!("account:{account_id}"),
            })?;
        if !tokens.iter().any(|t| t.id == token_id) {
            return Err(DomainError::NotFound {
                resource: format!("one_time_token:{token_id}"),
            });
        }

        account.set_password_digest(password_digest.to_string());
        tokens.retain(|t| t.id != token_id);

        let before = sessions.len();
        sessions.retain(|s| s.account_id != account_id);
        Ok(before - sessions.len())
    }

    async fn apply_password_change(
        &self,
        account_id: Uuid,
        password_digest: &str,
        keep_session_id: Uuid,
    ) -> Result<usize, DomainError> {
        let mut accounts = self.accounts.write().await;
        let mut sessions = self.sessions.write().await;

        let account = accounts
            .iter_mut()
            .find(|a| a.id == account_id)
            .ok_or_else(|| DomainError::NotFound {
                resource: format!("account:{account_id}"),
            })?;

        account.set_password_digest(password_digest.to_string());

        let before = sessions.len();
        sessions.retain(|s| s.account_id != account_id || s.id == keep_session_id);
        Ok(before - sessions.len())
    }
}
