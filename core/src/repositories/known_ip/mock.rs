//! Mock implementation of KnownIpRepository for testing

use async_trait::async_trait;
use chrono::Utc;
use std::net::IpAddr;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::known_ip::KnownIp;
use crate::errors::DomainError;

use super::r#trait::KnownIpRepository;

/// In-memory known-IP repository for tests
pub struct MockKnownIpRepository {
    pub records: Arc<RwLock<Vec<KnownIp>>>,
}

impl MockKnownIpRepository {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(Vec::new())),
        }
    }
}

impl Default for MockKnownIpRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl KnownIpRepository for MockKnownIpRepository {
    async fn find(
        &self,
        account_id: Uuid,
        ip_address: IpAddr,
    ) -> Result<Option<KnownIp>, DomainError> {
        let records = self.records.read().await;
        Ok(records
            .iter()
            .find(|r| r.account_id == account_id && r.ip_address == ip_address)
            .cloned())
    }

    async fn create(&self, record: KnownIp) -> Result<KnownIp, DomainError> {
        let mut records = self.records.write().await;
        records.push(record.clone());
        Ok(record)
    }

    async fn touch(&self, id: Uuid) -> Result<bool, DomainError> {
        let mut records = self.records.write().await;
        if let Some(record) = records.iter_mut().find(|r| r.id == id) {
            record.last_used_at = Utc::now();
            Ok(true)
        } else {
            Ok(false)
        }
    }

    async fn find_by_account(&self, account_id: Uuid) -> Result<Vec<KnownIp>, DomainError> {
        let records = self.records.read().await;
        Ok(records
            .iter()
            .filter(|r| r.account_id == account_id)
            .cloned()
            .collect())
    }
}
