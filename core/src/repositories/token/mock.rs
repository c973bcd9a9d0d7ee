//! Mock implementation of OneTimeTokenRepository for testing

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::one_time_token::{OneTimeToken, TokenKind};
use crate::errors::DomainError;

use super::r#trait::OneTimeTokenRepository;

/// In-memory one-time token repository for tests
pub struct MockOneTimeTokenRepository {
    pub tokens: Arc<RwLock<Vec<OneTimeToken>>>,
}

impl MockOneTimeTokenRepository {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        Self {
            tokens: Arc::new(RwLock::new(Vec::new())),
        }
    }
}

impl Default for MockOneTimeTokenRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OneTimeTokenRepository for MockOneTimeTokenRepository {
    async fn create(&self, token: OneTimeToken) -> Result<OneTimeToken, DomainError> {
        let mut tokens = self.tokens.write().await;
        if tokens
            .iter()
            .any(|t| t.token_digest == token.token_digest && t.kind == token.kind)
        {
            return Err(DomainError::Validation {
                message: "Token digest already exists".to_string(),
            });
        }
        tokens.push(token.clone());
        Ok(token)
    }

    async fn find_by_digest(
        &self,
        token_digest: &str,
        kind: TokenKind,
    ) -> Result<Option<OneTimeToken>, DomainError> {
        let tokens = self.tokens.read().await;
        Ok(tokens
            .iter()
            .find(|t| t.token_digest == token_digest && t.kind == kind)
            .cloned())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let mut tokens = self.tokens.write().await;
        let before = tokens.len();
        tokens.retain(|t| t.id != id);
        Ok(tokens.len() < before)
    }

    async fn delete_by_kind(
        &self,
        account_id: Uuid,
        kind: TokenKind,
    ) -> Result<usize, DomainError> {
        let mut tokens = self.tokens.write().await;
        let before = tokens.len();
        tokens.retain(|t| t.account_id != account_id || t.kind != kind);
        Ok(before - tokens.len())
    }

    async fn delete_expired(&self) -> Result<usize, DomainError> {
        let mut tokens = self.tokens.write().await;
        let before = tokens.len();
        tokens.retain(|t| !t.is_expired());
        Ok(before - tokens.len())
    }
}
