//! Known IP record used by the password-reset alerting protocol.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use uuid::Uuid;

/// An IP address previously seen for an account
///
/// A reset request arriving from an address not in this set triggers a
/// best-effort security alert before the reset proceeds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnownIp {
    /// Unique identifier for the record
    pub id: Uuid,

    /// Account the address was seen for
    pub account_id: Uuid,

    /// The IP address
    pub ip_address: IpAddr,

    /// When the address was first seen
    pub first_seen_at: DateTime<Utc>,

    /// When the address was last used
    pub last_used_at: DateTime<Utc>,
}

impl KnownIp {
    /// Creates a new known-IP record
    pub fn new(account_id: Uuid, ip_address: IpAddr) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            account_id,
            ip_address,
            first_seen_at: now,
            last_used_at: now,
        }
    }

    /// Bumps the last-used timestamp
    pub fn touch(&mut self) {
        self.last_used_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_ip_creation() {
        let account_id = Uuid::new_v4();
        let ip: IpAddr = "203.0.113.7".parse().unwrap();
        let record = KnownIp::new(account_id, ip);

        assert_eq!(record.account_id, account_id);
        assert_eq!(record.ip_address, ip);
        assert_eq!(record.first_seen_at, record.last_used_at);
    }

    #[test]
    fn test_touch_bumps_last_used() {
        let mut record = KnownIp::new(Uuid::new_v4(), "198.51.100.2".parse().unwrap());
        let before = record.last_used_at;
        record.touch();
        assert!(record.last_used_at >= before);
    }
}
