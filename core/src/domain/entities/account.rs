//! Account entity representing a registered identity in the StoryNest system.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Role assigned to an account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountRole {
    /// A parent managing kid profiles and stories
    Parent,
    /// A platform administrator
    Admin,
}

impl AccountRole {
    /// Role name as embedded in access-token claims
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountRole::Parent => "parent",
            AccountRole::Admin => "admin",
        }
    }
}

/// How far an account has progressed through mandatory setup
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OnboardingStage {
    /// Account row exists, email not yet verified
    AccountCreated,
    /// Email verified, profile setup pending
    EmailVerified,
    /// All mandatory setup steps complete
    ProfileCompleted,
}

impl OnboardingStage {
    /// The stage that follows this one, if any
    pub fn next(&self) -> Option<OnboardingStage> {
        match self {
            OnboardingStage::AccountCreated => Some(OnboardingStage::EmailVerified),
            OnboardingStage::EmailVerified => Some(OnboardingStage::ProfileCompleted),
            OnboardingStage::ProfileCompleted => None,
        }
    }
}

/// Account entity representing a registered identity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Unique identifier for the account
    pub id: Uuid,

    /// Unique email address, stored lowercase
    pub email: String,

    /// bcrypt digest of the account password; never the plaintext
    pub password_digest: String,

    /// Display name shown to other users
    pub display_name: String,

    /// Role of the account
    pub role: AccountRole,

    /// Whether the email address has been verified
    pub is_email_verified: bool,

    /// Current onboarding stage
    pub onboarding_stage: OnboardingStage,

    /// Soft-delete flag; deleted accounts cannot log in
    pub is_deleted: bool,

    /// Timestamp when the account was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the account was last updated
    pub updated_at: DateTime<Utc>,
}

impl Account {
    /// Creates a new Account in the `AccountCreated` stage
    pub fn new(
        email: String,
        password_digest: String,
        display_name: String,
        role: AccountRole,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            email,
            password_digest,
            display_name,
            role,
            is_email_verified: false,
            onboarding_stage: OnboardingStage::AccountCreated,
            is_deleted: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Marks the email as verified and advances the onboarding stage
    pub fn mark_email_verified(&mut self) {
        self.is_email_verified = true;
        if let Some(next) = self.onboarding_stage.next() {
            if self.onboarding_stage == OnboardingStage::AccountCreated {
                self.onboarding_stage = next;
            }
        }
        self.updated_at = Utc::now();
    }

    /// Replaces the password digest
    pub fn set_password_digest(&mut self, digest: String) {
        self.password_digest = digest;
        self.updated_at = Utc::now();
    }

    /// Soft-deletes the account
    pub fn soft_delete(&mut self) {
        self.is_deleted = true;
        self.updated_at = Utc::now();
    }

    /// Restores a soft-deleted account
    pub fn restore(&mut self) {
        self.is_deleted = false;
        self.updated_at = Utc::now();
    }

    /// Checks if the account holds the admin role
    pub fn is_admin(&self) -> bool {
        matches!(self.role, AccountRole::Admin)
    }

    /// Checks whether the account is allowed to authenticate at all
    pub fn is_active(&self) -> bool {
        !self.is_deleted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_account() -> Account {
        Account::new(
            "parent@example.com".to_string(),
            "$2b$12$digest".to_string(),
            "Sam".to_string(),
            AccountRole::Parent,
        )
    }

    #[test]
    fn test_new_account_starts_unverified() {
        let account = sample_account();

        assert_eq!(account.email, "parent@example.com");
        assert!(!account.is_email_verified);
        assert_eq!(account.onboarding_stage, OnboardingStage::AccountCreated);
        assert!(!account.is_deleted);
        assert!(account.is_active());
        assert!(!account.is_admin());
    }

    #[test]
    fn test_mark_email_verified_advances_stage() {
        let mut account = sample_account();

        account.mark_email_verified();
        assert!(account.is_email_verified);
        assert_eq!(account.onboarding_stage, OnboardingStage::EmailVerified);

        // A second call must not regress or advance the stage further
        account.mark_email_verified();
        assert_eq!(account.onboarding_stage, OnboardingStage::EmailVerified);
    }

    #[test]
    fn test_soft_delete_and_restore() {
        let mut account = sample_account();

        account.soft_delete();
        assert!(account.is_deleted);
        assert!(!account.is_active());

        account.restore();
        assert!(account.is_active());
    }

    #[test]
    fn test_onboarding_stage_progression() {
        assert_eq!(
            OnboardingStage::AccountCreated.next(),
            Some(OnboardingStage::EmailVerified)
        );
        assert_eq!(
            OnboardingStage::EmailVerified.next(),
            Some(OnboardingStage::ProfileCompleted)
        );
        assert_eq!(OnboardingStage::ProfileCompleted.next(), None);
    }

    #[test]
    fn test_role_serialization() {
        let json = serde_json::to_string(&AccountRole::Parent).unwrap();
        assert_eq!(json, "\"parent\"");
        let json = serde_json::to_string(&AccountRole::Admin).unwrap();
        assert_eq!(json, "\"admin\"");
    }
}
