//! Domain events emitted after credential state changes.
//!
//! Events are immutable facts consumed asynchronously by unrelated
//! subsystems (notification dispatch, analytics). The two raw-token-carrying
//! events are seen only by the notification dispatcher; the emitting service
//! never re-derives a raw token after issuing it.

mod publisher;

pub use publisher::{EventPublisher, NoOpEventPublisher};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use uuid::Uuid;

use crate::domain::entities::account::AccountRole;

/// A domain event emitted by the credential core
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DomainEvent {
    /// A new account was registered
    UserRegistered {
        account_id: Uuid,
        email: String,
        display_name: String,
        role: AccountRole,
        registered_at: DateTime<Utc>,
    },

    /// An account's email address was verified
    UserEmailVerified {
        account_id: Uuid,
        email: String,
        verified_at: DateTime<Utc>,
    },

    /// An account's password was changed or reset
    UserPasswordChanged {
        account_id: Uuid,
        changed_at: DateTime<Utc>,
        sessions_invalidated: bool,
    },

    /// A verification email must be sent; carries the raw token
    EmailVerificationRequested {
        account_id: Uuid,
        email: String,
        raw_token: String,
        expires_at: DateTime<Utc>,
    },

    /// A password-reset email must be sent; carries the raw token
    PasswordResetRequested {
        account_id: Uuid,
        email: String,
        raw_token: String,
        expires_at: DateTime<Utc>,
    },

    /// A reset was requested from an address not previously seen
    PasswordResetAlert {
        account_id: Uuid,
        email: String,
        ip_address: IpAddr,
        raised_at: DateTime<Utc>,
    },
}

impl DomainEvent {
    /// Routing key for the event
    pub fn name(&self) -> &'static str {
        match self {
            DomainEvent::UserRegistered { .. } => "user.registered",
            DomainEvent::UserEmailVerified { .. } => "user.email_verified",
            DomainEvent::UserPasswordChanged { .. } => "user.password_changed",
            DomainEvent::EmailVerificationRequested { .. } => "email.verification_requested",
            DomainEvent::PasswordResetRequested { .. } => "password.reset_requested",
            DomainEvent::PasswordResetAlert { .. } => "password.reset_alert",
        }
    }

    /// Whether the payload carries a raw secret and must never be logged
    pub fn carries_raw_token(&self) -> bool {
        matches!(
            self,
            DomainEvent::EmailVerificationRequested { .. }
                | DomainEvent::PasswordResetRequested { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_names() {
        let event = DomainEvent::EmailVerificationRequested {
            account_id: Uuid::new_v4(),
            email: "parent@example.com".to_string(),
            raw_token: "raw".to_string(),
            expires_at: Utc::now(),
        };
        assert_eq!(event.name(), "email.verification_requested");
        assert!(event.carries_raw_token());
    }

    #[test]
    fn test_password_changed_event_is_not_secret() {
        let event = DomainEvent::UserPasswordChanged {
            account_id: Uuid::new_v4(),
            changed_at: Utc::now(),
            sessions_invalidated: true,
        };
        assert!(!event.carries_raw_token());
    }

    #[test]
    fn test_event_serialization_tags_type() {
        let event = DomainEvent::UserEmailVerified {
            account_id: Uuid::new_v4(),
            email: "parent@example.com".to_string(),
            verified_at: Utc::now(),
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"type\":\"user_email_verified\""));
    }
}
