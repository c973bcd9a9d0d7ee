//! MySQL implementation of the AccountRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use sn_core::domain::entities::account::{Account, AccountRole, OnboardingStage};
use sn_core::errors::DomainError;
use sn_core::repositories::AccountRepository;

/// MySQL implementation of AccountRepository
pub struct MySqlAccountRepository {
    pool: MySqlPool,
}

impl MySqlAccountRepository {
    /// Create a new MySQL account repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert a database row to an Account entity
    fn row_to_account(row: &sqlx::mysql::MySqlRow) -> Result<Account, DomainError> {
        let id: String = row.try_get("id").map_err(|e| DomainError::Internal {
            message: format!("Failed to get id: {e}"),
        })?;
        let role: String = row.try_get("role").map_err(|e| DomainError::Internal {
            message: format!("Failed to get role: {e}"),
        })?;
        let stage: String = row
            .try_get("onboarding_stage")
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to get onboarding_stage: {e}"),
            })?;

        Ok(Account {
            id: parse_uuid(&id, "account")?,
            email: row.try_get("email").map_err(|e| DomainError::Internal {
                message: format!("Failed to get email: {e}"),
            })?,
            password_digest: row
                .try_get("password_digest")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get password_digest: {e}"),
                })?,
            display_name: row
                .try_get("display_name")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get display_name: {e}"),
                })?,
            role: role_from_str(&role)?,
            is_email_verified: row
                .try_get("is_email_verified")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get is_email_verified: {e}"),
                })?,
            onboarding_stage: stage_from_str(&stage)?,
            is_deleted: row
                .try_get("is_deleted")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get is_deleted: {e}"),
                })?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get created_at: {e}"),
                })?,
            updated_at: row
                .try_get::<DateTime<Utc>, _>("updated_at")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get updated_at: {e}"),
                })?,
        })
    }
}

const SELECT_COLUMNS: &str = "id, email, password_digest, display_name, role, \
     is_email_verified, onboarding_stage, is_deleted, created_at, updated_at";

#[async_trait]
impl AccountRepository for MySqlAccountRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, DomainError> {
        let query = format!("SELECT {SELECT_COLUMNS} FROM accounts WHERE email = ? LIMIT 1");

        let result = sqlx::query(&query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to find account by email: {e}"),
            })?;

        match result {
            Some(row) => Ok(Some(Self::row_to_account(&row)?)),
            None => Ok(None),
        }
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, DomainError> {
        let query = format!("SELECT {SELECT_COLUMNS} FROM accounts WHERE id = ? LIMIT 1");

        let result = sqlx::query(&query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to find account by id: {e}"),
            })?;

        match result {
            Some(row) => Ok(Some(Self::row_to_account(&row)?)),
            None => Ok(None),
        }
    }

    async fn create(&self, account: Account) -> Result<Account, DomainError> {
        let query = r#"
            INSERT INTO accounts (
                id, email, password_digest, display_name, role,
                is_email_verified, onboarding_stage, is_deleted, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(account.id.to_string())
            .bind(&account.email)
            .bind(&account.password_digest)
            .bind(&account.display_name)
            .bind(account.role.as_str())
            .bind(account.is_email_verified)
            .bind(stage_as_str(account.onboarding_stage))
            .bind(account.is_deleted)
            .bind(account.created_at)
            .bind(account.updated_at)
            .execute(&self.pool)
            .await
            .map_err(|e| match &e {
                sqlx::Error::Database(db) if db.is_unique_violation() => {
                    DomainError::AlreadyExists {
                        resource: "account".to_string(),
                    }
                }
                _ => DomainError::Internal {
                    message: format!("Failed to create account: {e}"),
                },
            })?;

        Ok(account)
    }

    async fn update(&self, account: Account) -> Result<Account, DomainError> {
        let query = r#"
            UPDATE accounts
            SET email = ?, password_digest = ?, display_name = ?, role = ?,
                is_email_verified = ?, onboarding_stage = ?, is_deleted = ?, updated_at = ?
            WHERE id = ?
        "#;

        let result = sqlx::query(query)
            .bind(&account.email)
            .bind(&account.password_digest)
            .bind(&account.display_name)
            .bind(account.role.as_str())
            .bind(account.is_email_verified)
            .bind(stage_as_str(account.onboarding_stage))
            .bind(account.is_deleted)
            .bind(Utc::now())
            .bind(account.id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to update account: {e}"),
            })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound {
                resource: format!("account:{}", account.id),
            });
        }

        Ok(account)
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError> {
        let query = "SELECT EXISTS(SELECT 1 FROM accounts WHERE email = ?) AS present";

        let row = sqlx::query(query)
            .bind(email)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to check account existence: {e}"),
            })?;

        let present: i8 = row.try_get("present").map_err(|e| DomainError::Internal {
            message: format!("Failed to get existence result: {e}"),
        })?;

        Ok(present == 1)
    }
}

pub(crate) fn parse_uuid(value: &str, resource: &str) -> Result<Uuid, DomainError> {
    Uuid::parse_str(value).map_err(|e| DomainError::Internal {
        message: format!("Invalid {resource} UUID: {e}"),
    })
}

fn role_from_str(value: &str) -> Result<AccountRole, DomainError> {
    match value {
        "parent" => Ok(AccountRole::Parent),
        "admin" => Ok(AccountRole::Admin),
        other => Err(DomainError::Internal {
            message: format!("Unknown account role: {other}"),
        }),
    }
}

fn stage_from_str(value: &str) -> Result<OnboardingStage, DomainError> {
    match value {
        "account_created" => Ok(OnboardingStage::AccountCreated),
        "email_verified" => Ok(OnboardingStage::EmailVerified),
        "profile_completed" => Ok(OnboardingStage::ProfileCompleted),
        other => Err(DomainError::Internal {
            message: format!("Unknown onboarding stage: {other}"),
        }),
    }
}

pub(crate) fn stage_as_str(stage: OnboardingStage) -> &'static str {
    match stage {
        OnboardingStage::AccountCreated => "account_created",
        OnboardingStage::EmailVerified => "email_verified",
        OnboardingStage::ProfileCompleted => "profile_completed",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trip() {
        for role in [AccountRole::Parent, AccountRole::Admin] {
            assert_eq!(role_from_str(role.as_str()).unwrap(), role);
        }
        assert!(role_from_str("superuser").is_err());
    }

    #[test]
    fn test_stage_round_trip() {
        for stage in [
            OnboardingStage::AccountCreated,
            OnboardingStage::EmailVerified,
            OnboardingStage::ProfileCompleted,
        ] {
            assert_eq!(stage_from_str(stage_as_str(stage)).unwrap(), stage);
        }
        assert!(stage_from_str("finished").is_err());
    }
}
