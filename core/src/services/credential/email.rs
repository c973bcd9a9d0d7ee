//! Email address validation, normalization, and log masking.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::{DomainResult, ValidationError};

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    // Pragmatic RFC 5322 subset; the mail provider is the real authority
    Regex::new(r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)+$")
        .unwrap()
});

/// Lowercase and trim an email address for storage and lookup
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Validate an email address's shape
pub fn validate_email(email: &str) -> DomainResult<()> {
    let email = email.trim();
    if email.is_empty() {
        return Err(ValidationError::RequiredField {
            field: "email".to_string(),
        }
        .into());
    }
    if !EMAIL_REGEX.is_match(email) {
        return Err(ValidationError::InvalidEmail.into());
    }
    Ok(())
}

/// Mask an email address for log output
///
/// Keeps the first character of the local part and the full domain:
/// `parent@example.com` becomes `p***@example.com`.
pub fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() => {
            let first = local.chars().next().map(String::from).unwrap_or_default();
            format!("{first}***@{domain}")
        }
        _ => "***".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_emails() {
        for email in [
            "parent@example.com",
            "first.last@sub.example.co.uk",
            "user+tag@example.io",
        ] {
            assert!(validate_email(email).is_ok(), "{email} should be valid");
        }
    }

    #[test]
    fn test_invalid_emails() {
        for email in ["", "   ", "plainaddress", "@example.com", "user@", "user@@example.com"] {
            assert!(validate_email(email).is_err(), "{email:?} should be invalid");
        }
    }

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email("  Parent@Example.COM "), "parent@example.com");
    }

    #[test]
    fn test_mask_email() {
        assert_eq!(mask_email("parent@example.com"), "p***@example.com");
        assert_eq!(mask_email("a@b.io"), "a***@b.io");
        assert_eq!(mask_email("not-an-email"), "***");
    }
}
