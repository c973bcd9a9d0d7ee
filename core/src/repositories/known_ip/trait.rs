//! Known IP repository trait for the reset-alert protocol.

use async_trait::async_trait;
use std::net::IpAddr;
use uuid::Uuid;

use crate::domain::entities::known_ip::KnownIp;
use crate::errors::DomainError;

/// Repository trait for known IP records
#[async_trait]
pub trait KnownIpRepository: Send + Sync {
    /// Find the record for an account/address pair
    async fn find(
        &self,
        account_id: Uuid,
        ip_address: IpAddr,
    ) -> Result<Option<KnownIp>, DomainError>;

    /// Save a new known-IP record
    async fn create(&self, record: KnownIp) -> Result<KnownIp, DomainError>;

    /// Bump the last-used timestamp of a record
    ///
    /// # Returns
    /// * `Ok(true)` - Record existed and was touched
    /// * `Ok(false)` - Record not found
    async fn touch(&self, id: Uuid) -> Result<bool, DomainError>;

    /// List all known addresses for an account
    async fn find_by_account(&self, account_id: Uuid) -> Result<Vec<KnownIp>, DomainError>;
}
