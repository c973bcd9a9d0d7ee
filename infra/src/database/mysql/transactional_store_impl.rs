//! MySQL implementation of the TransactionalStore trait.
//!
//! Each operation opens one database transaction and commits only after
//! every statement succeeded. A failed or missing row aborts the whole
//! operation; dropping the transaction handle rolls everything back.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::MySqlPool;
use uuid::Uuid;

use sn_core::errors::DomainError;
use sn_core::repositories::TransactionalStore;

/// MySQL implementation of TransactionalStore
pub struct MySqlTransactionalStore {
    pool: MySqlPool,
}

impl MySqlTransactionalStore {
    /// Create a new MySQL transactional store
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TransactionalStore for MySqlTransactionalStore {
    async fn apply_email_verification(
        &self,
        account_id: Uuid,
        token_id: Uuid,
    ) -> Result<(), DomainError> {
        let mut tx = self.pool.begin().await.map_err(|e| DomainError::Internal {
            message: format!("Failed to begin transaction: {e}"),
        })?;

        let updated = sqlx::query(
            r#"
            UPDATE accounts
            SET is_email_verified = TRUE,
                onboarding_stage = CASE
                    WHEN onboarding_stage = 'account_created' THEN 'email_verified'
                    ELSE onboarding_stage
                END,
                updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(Utc::now())
        .bind(account_id.to_string())
        .execute(&mut *tx)
        .await
        .map_err(|e| DomainError::Internal {
            message: format!("Failed to mark account verified: {e}"),
        })?;

        if updated.rows_affected() == 0 {
            return Err(DomainError::NotFound {
                resource: format!("account:{account_id}"),
            });
        }

        let deleted = sqlx::query("DELETE FROM one_time_tokens WHERE id = ?")
            .bind(token_id.to_string())
            .execute(&mut *tx)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to consume verification token: {e}"),
            })?;

        // The row delete is the single-use gate: a concurrent caller that
        // already consumed the token aborts here and the flag update above
        // rolls back with the transaction
        if deleted.rows_affected() == 0 {
            return Err(DomainError::NotFound {
                resource: format!("one_time_token:{token_id}"),
            });
        }

        tx.commit().await.map_err(|e| DomainError::Internal {
            message: format!("Failed to commit email verification: {e}"),
        })
    }

    async fn apply_password_reset(
        &self,
        account_id: Uuid,
        token_id: Uuid,
        password_digest: &str,
    ) -> Result<usize, DomainError> {
        let mut tx = self.pool.begin().await.map_err(|e| DomainError::Internal {
            message: format!("Failed to begin transaction: {e}"),
        })?;

        let updated = sqlx::query(
            "UPDATE accounts SET password_digest = ?, updated_at = ? WHERE id = ?",
        )
        .bind(password_digest)
        .bind(Utc::now())
        .bind(account_id.to_string())
        .execute(&mut *tx)
        .await
        .map_err(|e| DomainError::Internal {
            message: format!("Failed to update password digest: {e}"),
        })?;

        if updated.rows_affected() == 0 {
            return Err(DomainError::NotFound {
                resource: format!("account:{account_id}"),
            });
        }

        let deleted = sqlx::query("DELETE FROM one_time_tokens WHERE id = ?")
            .bind(token_id.to_string())
            .execute(&mut *tx)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to consume reset token: {e}"),
            })?;

        if deleted.rows_affected() == 0 {
            return Err(DomainError::NotFound {
                resource: format!("one_time_token:{token_id}"),
            });
        }

        let revoked = sqlx::query("DELETE FROM sessions WHERE account_id = ?")
            .bind(account_id.to_string())
            .execute(&mut *tx)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to revoke sessions: {e}"),
            })?;

        tx.commit().await.map_err(|e| DomainError::Internal {
            message: format!("Failed to commit password reset: {e}"),
        })?;

        Ok(revoked.rows_affected() as usize)
    }

    async fn apply_password_change(
        &self,
        account_id: Uuid,
        password_digest: &str,
        keep_session_id: Uuid,
    ) -> Result<usize, DomainError> {
        let mut tx = self.pool.begin().await.map_err(|e| DomainError::Internal {
            message: format!("Failed to begin transaction: {e}"),
        })?;

        let updated = sqlx::query(
            "UPDATE accounts SET password_digest = ?, updated_at = ? WHERE id = ?",
        )
        .bind(password_digest)
        .bind(Utc::now())
        .bind(account_id.to_string())
        .execute(&mut *tx)
        .await
        .map_err(|e| DomainError::Internal {
            message: format!("Failed to update password digest: {e}"),
        })?;

        if updated.rows_affected() == 0 {
            return Err(DomainError::NotFound {
                resource: format!("account:{account_id}"),
            });
        }

        let revoked = sqlx::query("DELETE FROM sessions WHERE account_id = ? AND id <> ?")
            .bind(account_id.to_string())
            .bind(keep_session_id.to_string())
            .execute(&mut *tx)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to revoke other sessions: {e}"),
            })?;

        tx.commit().await.map_err(|e| DomainError::Internal {
            message: format!("Failed to commit password change: {e}"),
        })?;

        Ok(revoked.rows_affected() as usize)
    }
}
