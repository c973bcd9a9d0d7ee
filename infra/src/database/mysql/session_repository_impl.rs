//! MySQL implementation of the SessionRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use sn_core::domain::entities::session::Session;
use sn_core::errors::DomainError;
use sn_core::repositories::SessionRepository;

use super::account_repository_impl::parse_uuid;

/// MySQL implementation of SessionRepository
///
/// The `token_digest` column carries a unique index, so concurrent inserts
/// of the same digest conflict at the database rather than in application
/// code.
pub struct MySqlSessionRepository {
    pool: MySqlPool,
}

impl MySqlSessionRepository {
    /// Create a new MySQL session repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert a database row to a Session entity
    fn row_to_session(row: &sqlx::mysql::MySqlRow) -> Result<Session, DomainError> {
        let id: String = row.try_get("id").map_err(|e| DomainError::Internal {
            message: format!("Failed to get id: {e}"),
        })?;
        let account_id: String = row
            .try_get("account_id")
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to get account_id: {e}"),
            })?;

        Ok(Session {
            id: parse_uuid(&id, "session")?,
            account_id: parse_uuid(&account_id, "account")?,
            token_digest: row
                .try_get("token_digest")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get token_digest: {e}"),
                })?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get created_at: {e}"),
                })?,
            expires_at: row
                .try_get::<DateTime<Utc>, _>("expires_at")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get expires_at: {e}"),
                })?,
        })
    }
}

#[async_trait]
impl SessionRepository for MySqlSessionRepository {
    async fn create(&self, session: Session) -> Result<Session, DomainError> {
        let query = r#"
            INSERT INTO sessions (id, account_id, token_digest, created_at, expires_at)
            VALUES (?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(session.id.to_string())
            .bind(session.account_id.to_string())
            .bind(&session.token_digest)
            .bind(session.created_at)
            .bind(session.expires_at)
            .execute(&self.pool)
            .await
            .map_err(|e| match &e {
                sqlx::Error::Database(db) if db.is_unique_violation() => {
                    DomainError::AlreadyExists {
                        resource: "session".to_string(),
                    }
                }
                _ => DomainError::Internal {
                    message: format!("Failed to create session: {e}"),
                },
            })?;

        Ok(session)
    }

    async fn find_by_digest(&self, token_digest: &str) -> Result<Option<Session>, DomainError> {
        let query = r#"
            SELECT id, account_id, token_digest, created_at, expires_at
            FROM sessions
            WHERE token_digest = ?
            LIMIT 1
        "#;

        let result = sqlx::query(query)
            .bind(token_digest)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to find session by digest: {e}"),
            })?;

        match result {
            Some(row) => Ok(Some(Self::row_to_session(&row)?)),
            None => Ok(None),
        }
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Session>, DomainError> {
        let query = r#"
            SELECT id, account_id, token_digest, created_at, expires_at
            FROM sessions
            WHERE id = ?
            LIMIT 1
        "#;

        let result = sqlx::query(query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to find session by id: {e}"),
            })?;

        match result {
            Some(row) => Ok(Some(Self::row_to_session(&row)?)),
            None => Ok(None),
        }
    }

    async fn find_by_account(&self, account_id: Uuid) -> Result<Vec<Session>, DomainError> {
        let query = r#"
            SELECT id, account_id, token_digest, created_at, expires_at
            FROM sessions
            WHERE account_id = ?
            ORDER BY created_at DESC
        "#;

        let rows = sqlx::query(query)
            .bind(account_id.to_string())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to find account sessions: {e}"),
            })?;

        let mut sessions = Vec::with_capacity(rows.len());
        for row in &rows {
            sessions.push(Self::row_to_session(row)?);
        }
        Ok(sessions)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM sessions WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to delete session: {e}"),
            })?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_all_for_account(&self, account_id: Uuid) -> Result<usize, DomainError> {
        let result = sqlx::query("DELETE FROM sessions WHERE account_id = ?")
            .bind(account_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to delete account sessions: {e}"),
            })?;

        Ok(result.rows_affected() as usize)
    }

    async fn delete_all_except(
        &self,
        account_id: Uuid,
        keep_session_id: Uuid,
    ) -> Result<usize, DomainError> {
        let result = sqlx::query("DELETE FROM sessions WHERE account_id = ? AND id <> ?")
            .bind(account_id.to_string())
            .bind(keep_session_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to delete other sessions: {e}"),
            })?;

        Ok(result.rows_affected() as usize)
    }

    async fn delete_expired(&self) -> Result<usize, DomainError> {
        let result = sqlx::query("DELETE FROM sessions WHERE expires_at < ?")
            .bind(Utc::now())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to delete expired sessions: {e}"),
            })?;

        Ok(result.rows_affected() as usize)
    }
}
