//! Session repository trait defining the interface for refresh-token
//! session persistence.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::session::Session;
use crate::errors::DomainError;

/// Repository trait for Session entity persistence operations
///
/// # Security Considerations
/// - Only the digest of the raw refresh token is ever stored
/// - The digest column carries a unique index; concurrent inserts of the
///   same digest conflict at the store, not in application code
/// - Expired sessions should be periodically cleaned up
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Save a new session
    ///
    /// # Returns
    /// * `Ok(Session)` - The saved session
    /// * `Err(DomainError)` - Save failed (e.g. duplicate digest)
    async fn create(&self, session: Session) -> Result<Session, DomainError>;

    /// Find a session by the digest of its refresh token
    async fn find_by_digest(&self, token_digest: &str) -> Result<Option<Session>, DomainError>;

    /// Find a session by its ID
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Session>, DomainError>;

    /// Find all sessions for an account
    async fn find_by_account(&self, account_id: Uuid) -> Result<Vec<Session>, DomainError>;

    /// Delete a specific session
    ///
    /// Idempotent: a missing session is reported, never an error.
    ///
    /// # Returns
    /// * `Ok(true)` - Session existed and was deleted
    /// * `Ok(false)` - Session not found
    async fn delete(&self, id: Uuid) -> Result<bool, DomainError>;

    /// Delete every session for an account
    ///
    /// # Returns
    /// * `Ok(usize)` - Number of sessions deleted
    async fn delete_all_for_account(&self, account_id: Uuid) -> Result<usize, DomainError>;

    /// Delete every session for an account except one
    ///
    /// Used on password change so the initiating device stays logged in.
    async fn delete_all_except(
        &self,
        account_id: Uuid,
        keep_session_id: Uuid,
    ) -> Result<usize, DomainError>;

    /// Delete expired sessions
    ///
    /// Called periodically to clean up stale rows.
    async fn delete_expired(&self) -> Result<usize, DomainError>;

    /// Count live sessions for an account
    async fn count_for_account(&self, account_id: Uuid) -> Result<usize, DomainError> {
        let sessions = self.find_by_account(account_id).await?;
        Ok(sessions.len())
    }
}
