//! Mock implementation of SessionRepository for testing

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::session::Session;
use crate::errors::DomainError;

use super::r#trait::SessionRepository;

/// In-memory session repository for tests
pub struct MockSessionRepository {
    pub sessions: Arc<RwLock<Vec<Session>>>,
}

impl MockSessionRepository {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        Self {
            sessions: Arc::new(RwLock::new(Vec::new())),
        }
    }
}

impl Default for MockSessionRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionRepository for MockSessionRepository {
    async fn create(&self, session: Session) -> Result<Session, DomainError> {
        let mut sessions = self.sessions.write().await;
        if sessions
            .iter()
            .any(|s| s.token_digest == session.token_digest)
        {
            return Err(DomainError::Validation {
                message: "Session digest already exists".to_string(),
            });
        }
        sessions.push(session.clone());
        Ok(session)
    }

    async fn find_by_digest(&self, token_digest: &str) -> Result<Option<Session>, DomainError> {
        let sessions = self.sessions.read().await;
        Ok(sessions
            .iter()
            .find(|s| s.token_digest == token_digest)
            .cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Session>, DomainError> {
        let sessions = self.sessions.read().await;
        Ok(sessions.iter().find(|s| s.id == id).cloned())
    }

    async fn find_by_account(&self, account_id: Uuid) -> Result<Vec<Session>, DomainError> {
        let sessions = self.sessions.read().await;
        Ok(sessions
            .iter()
            .filter(|s| s.account_id == account_id)
            .cloned()
            .collect())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|s| s.id != id);
        Ok(sessions.len() < before)
    }

    async fn delete_all_for_account(&self, account_id: Uuid) -> Result<usize, DomainError> {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|s| s.account_id != account_id);
        Ok(before - sessions.len())
    }

    async fn delete_all_except(
        &self,
        account_id: Uuid,
        keep_session_id: Uuid,
    ) -> Result<usize, DomainError> {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|s| s.account_id != account_id || s.id == keep_session_id);
        Ok(before - sessions.len())
    }

    async fn delete_expired(&self) -> Result<usize, DomainError> {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|s| !s.is_expired());
        Ok(before - sessions.len())
    }
}
