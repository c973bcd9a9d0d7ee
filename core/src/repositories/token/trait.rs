//! One-time token repository trait for verification and reset secrets.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::one_time_token::{OneTimeToken, TokenKind};
use crate::errors::DomainError;

/// Repository trait for single-use token persistence
///
/// # Security Considerations
/// - Tokens are stored as digests only and looked up by exact digest match
///   via a unique index on `(token_digest, kind)`
/// - Issuing a new token of a kind deletes prior rows of the same kind, so
///   at most the most recently issued token per kind is redeemable
/// - Consumed and expired rows are deleted, never soft-disabled
#[async_trait]
pub trait OneTimeTokenRepository: Send + Sync {
    /// Save a new one-time token
    async fn create(&self, token: OneTimeToken) -> Result<OneTimeToken, DomainError>;

    /// Find a token by its digest and kind
    async fn find_by_digest(
        &self,
        token_digest: &str,
        kind: TokenKind,
    ) -> Result<Option<OneTimeToken>, DomainError>;

    /// Delete a specific token row
    ///
    /// # Returns
    /// * `Ok(true)` - Token existed and was deleted
    /// * `Ok(false)` - Token not found (already consumed by a concurrent
    ///   caller, or expired away)
    async fn delete(&self, id: Uuid) -> Result<bool, DomainError>;

    /// Delete every token of a kind for an account
    ///
    /// Used to invalidate prior tokens before issuing a new one.
    async fn delete_by_kind(
        &self,
        account_id: Uuid,
        kind: TokenKind,
    ) -> Result<usize, DomainError>;

    /// Delete expired tokens
    async fn delete_expired(&self) -> Result<usize, DomainError>;
}
