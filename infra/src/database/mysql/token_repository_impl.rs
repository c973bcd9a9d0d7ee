//! MySQL implementation of the OneTimeTokenRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use sn_core::domain::entities::one_time_token::{OneTimeToken, TokenKind};
use sn_core::errors::DomainError;
use sn_core::repositories::OneTimeTokenRepository;

use super::account_repository_impl::parse_uuid;

/// MySQL implementation of OneTimeTokenRepository
pub struct MySqlOneTimeTokenRepository {
    pool: MySqlPool,
}

impl MySqlOneTimeTokenRepository {
    /// Create a new MySQL one-time token repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert a database row to a OneTimeToken entity
    fn row_to_token(row: &sqlx::mysql::MySqlRow) -> Result<OneTimeToken, DomainError> {
        let id: String = row.try_get("id").map_err(|e| DomainError::Internal {
            message: format!("Failed to get id: {e}"),
        })?;
        let account_id: String = row
            .try_get("account_id")
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to get account_id: {e}"),
            })?;
        let kind: String = row.try_get("kind").map_err(|e| DomainError::Internal {
            message: format!("Failed to get kind: {e}"),
        })?;

        Ok(OneTimeToken {
            id: parse_uuid(&id, "token")?,
            account_id: parse_uuid(&account_id, "account")?,
            token_digest: row
                .try_get("token_digest")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get token_digest: {e}"),
                })?,
            kind: kind_from_str(&kind)?,
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
impl OneTimeTokenRepository for MySqlOneTimeTokenRepository {
    async fn create(&self, token: OneTimeToken) -> Result<OneTimeToken, DomainError> {
        let query = r#"
            INSERT INTO one_time_tokens (id, account_id, token_digest, kind, created_at, expires_at)
            VALUES (?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(token.id.to_string())
            .bind(token.account_id.to_string())
            .bind(&token.token_digest)
            .bind(token.kind.as_str())
            .bind(token.created_at)
            .bind(token.expires_at)
            .execute(&self.pool)
            .await
            .map_err(|e| match &e {
                sqlx::Error::Database(db) if db.is_unique_violation() => {
                    DomainError::AlreadyExists {
                        resource: "one_time_token".to_string(),
                    }
                }
                _ => DomainError::Internal {
                    message: format!("Failed to create one-time token: {e}"),
                },
            })?;

        Ok(token)
    }

    async fn find_by_digest(
        &self,
        token_digest: &str,
        kind: TokenKind,
    ) -> Result<Option<OneTimeToken>, DomainError> {
        let query = r#"
            SELECT id, account_id, token_digest, kind, created_at, expires_at
            FROM one_time_tokens
            WHERE token_digest = ? AND kind = ?
            LIMIT 1
        "#;

        let result = sqlx::query(query)
            .bind(token_digest)
            .bind(kind.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to find one-time token: {e}"),
            })?;

        match result {
            Some(row) => Ok(Some(Self::row_to_token(&row)?)),
            None => Ok(None),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM one_time_tokens WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to delete one-time token: {e}"),
            })?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_by_kind(
        &self,
        account_id: Uuid,
        kind: TokenKind,
    ) -> Result<usize, DomainError> {
        let result = sqlx::query("DELETE FROM one_time_tokens WHERE account_id = ? AND kind = ?")
            .bind(account_id.to_string())
            .bind(kind.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to delete tokens by kind: {e}"),
            })?;

        Ok(result.rows_affected() as usize)
    }

    async fn delete_expired(&self) -> Result<usize, DomainError> {
        let result = sqlx::query("DELETE FROM one_time_tokens WHERE expires_at < ?")
            .bind(Utc::now())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to delete expired tokens: {e}"),
            })?;

        Ok(result.rows_affected() as usize)
    }
}

fn kind_from_str(value: &str) -> Result<TokenKind, DomainError> {
    match value {
        "email_verification" => Ok(TokenKind::EmailVerification),
        "password_reset" => Ok(TokenKind::PasswordReset),
        other => Err(DomainError::Internal {
            message: format!("Unknown token kind: {other}"),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_round_trip() {
        for kind in [TokenKind::EmailVerification, TokenKind::PasswordReset] {
            assert_eq!(kind_from_str(kind.as_str()).unwrap(), kind);
        }
        assert!(kind_from_str("magic_link").is_err());
    }
}
