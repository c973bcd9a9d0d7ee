//! MySQL implementation of the KnownIpRepository trait.

use std::net::IpAddr;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use sn_core::domain::entities::known_ip::KnownIp;
use sn_core::errors::DomainError;
use sn_core::repositories::KnownIpRepository;

use super::account_repository_impl::parse_uuid;

/// MySQL implementation of KnownIpRepository
///
/// Addresses are stored in their canonical string form; VARCHAR(45) covers
/// a full-length IPv6 address.
pub struct MySqlKnownIpRepository {
    pool: MySqlPool,
}

impl MySqlKnownIpRepository {
    /// Create a new MySQL known-IP repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert a database row to a KnownIp entity
    fn row_to_record(row: &sqlx::mysql::MySqlRow) -> Result<KnownIp, DomainError> {
        let id: String = row.try_get("id").map_err(|e| DomainError::Internal {
            message: format!("Failed to get id: {e}"),
        })?;
        let account_id: String = row
            .try_get("account_id")
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to get account_id: {e}"),
            })?;
        let ip_address: String = row
            .try_get("ip_address")
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to get ip_address: {e}"),
            })?;

        Ok(KnownIp {
            id: parse_uuid(&id, "known_ip")?,
            account_id: parse_uuid(&account_id, "account")?,
            ip_address: ip_address.parse().map_err(|e| DomainError::Internal {
                message: format!("Invalid stored IP address: {e}"),
            })?,
            first_seen_at: row
                .try_get::<DateTime<Utc>, _>("first_seen_at")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get first_seen_at: {e}"),
                })?,
            last_used_at: row
                .try_get::<DateTime<Utc>, _>("last_used_at")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get last_used_at: {e}"),
                })?,
        })
    }
}

#[async_trait]
impl KnownIpRepository for MySqlKnownIpRepository {
    async fn find(
        &self,
        account_id: Uuid,
        ip_address: IpAddr,
    ) -> Result<Option<KnownIp>, DomainError> {
        let query = r#"
            SELECT id, account_id, ip_address, first_seen_at, last_used_at
            FROM known_ips
            WHERE account_id = ? AND ip_address = ?
            LIMIT 1
        "#;

        let result = sqlx::query(query)
            .bind(account_id.to_string())
            .bind(ip_address.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to find known IP: {e}"),
            })?;

        match result {
            Some(row) => Ok(Some(Self::row_to_record(&row)?)),
            None => Ok(None),
        }
    }

    async fn create(&self, record: KnownIp) -> Result<KnownIp, DomainError> {
        let query = r#"
            INSERT INTO known_ips (id, account_id, ip_address, first_seen_at, last_used_at)
            VALUES (?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(record.id.to_string())
            .bind(record.account_id.to_string())
            .bind(record.ip_address.to_string())
            .bind(record.first_seen_at)
            .bind(record.last_used_at)
            .execute(&self.pool)
            .await
            .map_err(|e| match &e {
                sqlx::Error::Database(db) if db.is_unique_violation() => {
                    DomainError::AlreadyExists {
                        resource: "known_ip".to_string(),
                    }
                }
                _ => DomainError::Internal {
                    message: format!("Failed to create known IP: {e}"),
                },
            })?;

        Ok(record)
    }

    async fn touch(&self, id: Uuid) -> Result<bool, DomainError> {
        let result = sqlx::query("UPDATE known_ips SET last_used_at = ? WHERE id = ?")
            .bind(Utc::now())
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to touch known IP: {e}"),
            })?;

        Ok(result.rows_affected() > 0)
    }

    async fn find_by_account(&self, account_id: Uuid) -> Result<Vec<KnownIp>, DomainError> {
        let query = r#"
            SELECT id, account_id, ip_address, first_seen_at, last_used_at
            FROM known_ips
            WHERE account_id = ?
            ORDER BY last_used_at DESC
        "#;

        let rows = sqlx::query(query)
            .bind(account_id.to_string())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to list known IPs: {e}"),
            })?;

        let mut records = Vec::with_capacity(rows.len());
        for row in &rows {
            records.push(Self::row_to_record(row)?);
        }
        Ok(records)
    }
}
