//! Atomic multi-entity write contract.
//!
//! Each operation here touches two or more tables and must land fully or
//! not at all: a verified flag without the token deletion would leave a
//! redeemable token on a verified account, and a password update without
//! session revocation would leave stale sessions honoring the old secret.
//! Implementations wrap the writes in a single database transaction.

use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::DomainError;

/// All-or-nothing writes spanning accounts, tokens, and sessions
///
/// Only one concurrent caller can delete a given token row inside its
/// transaction; the loser observes `NotFound` rather than a double apply.
#[async_trait]
pub trait TransactionalStore: Send + Sync {
    /// Flip the account's verified flag, advance its onboarding stage, and
    /// delete the consumed verification token, atomically.
    ///
    /// # Returns
    /// * `Ok(())` - Both writes committed
    /// * `Err(DomainError::NotFound)` - Account or token row vanished; the
    ///   transaction rolled back and nothing was applied
    async fn apply_email_verification(
        &self,
        account_id: Uuid,
        token_id: Uuid,
    ) -> Result<(), DomainError>;

    /// Update the password digest, delete the consumed reset token, and
    /// delete every session for the account, atomically.
    ///
    /// # Returns
    /// * `Ok(usize)` - Number of sessions revoked
    async fn apply_password_reset(
        &self,
        account_id: Uuid,
        token_id: Uuid,
        password_digest: &str,
    ) -> Result<usize, DomainError>;

    /// Update the password digest and delete every session for the account
    /// except the one performing the change, atomically.
    ///
    /// # Returns
    /// * `Ok(usize)` - Number of sessions revoked
    async fn apply_password_change(
        &self,
        account_id: Uuid,
        password_digest: &str,
        keep_session_id: Uuid,
    ) -> Result<usize, DomainError>;
}
