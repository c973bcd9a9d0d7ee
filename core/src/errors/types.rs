//! Error type definitions for credential, token, and validation failures.
//!
//! Error messages stay machine-neutral; human-facing copy is rendered in the
//! presentation layer from the error codes produced here.

use sn_shared::types::response::ErrorResponse;
use thiserror::Error;

/// Credential and authentication errors
///
/// `InvalidCredentials` deliberately covers both unknown-email and
/// wrong-password so callers cannot enumerate registered addresses.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum AuthError {
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Email address not verified")]
    EmailNotVerified,

    #[error("Email address already registered")]
    EmailAlreadyRegistered,

    #[error("Invalid admin registration secret")]
    InvalidAdminSecret,

    #[error("Current password is incorrect")]
    InvalidOldPassword,

    #[error("New password must differ from the current password")]
    SamePassword,

    #[error("Account not found")]
    AccountNotFound,
}

/// Token-related errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum TokenError {
    #[error("Invalid or unknown token")]
    InvalidToken,

    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token format")]
    InvalidTokenFormat,

    #[error("Token not yet valid")]
    TokenNotYetValid,

    #[error("Invalid refresh token")]
    InvalidRefreshToken,

    #[error("Token generation failed")]
    TokenGenerationFailed,
}

/// Input validation errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required field: {field}")]
    RequiredField { field: String },

    #[error("Invalid email format")]
    InvalidEmail,

    #[error("Invalid length: {field} (expected at least {min})")]
    TooShort { field: String, min: usize },
}

/// Convert AuthError to ErrorResponse
impl From<AuthError> for ErrorResponse {
    fn from(err: AuthError) -> Self {
        let error_code = match &err {
            AuthError::InvalidCredentials => "INVALID_CREDENTIALS",
            AuthError::EmailNotVerified => "EMAIL_NOT_VERIFIED",
            AuthError::EmailAlreadyRegistered => "EMAIL_ALREADY_REGISTERED",
            AuthError::InvalidAdminSecret => "INVALID_ADMIN_SECRET",
            AuthError::InvalidOldPassword => "INVALID_OLD_PASSWORD",
            AuthError::SamePassword => "SAME_PASSWORD",
            AuthError::AccountNotFound => "ACCOUNT_NOT_FOUND",
        };

        ErrorResponse::new(error_code, err.to_string())
    }
}

/// Convert TokenError to ErrorResponse
impl From<TokenError> for ErrorResponse {
    fn from(err: TokenError) -> Self {
        let error_code = match &err {
            TokenError::InvalidToken => "INVALID_TOKEN",
            TokenError::TokenExpired => "TOKEN_EXPIRED",
            TokenError::InvalidTokenFormat => "INVALID_TOKEN_FORMAT",
            TokenError::TokenNotYetValid => "TOKEN_NOT_YET_VALID",
            TokenError::InvalidRefreshToken => "INVALID_REFRESH_TOKEN",
            TokenError::TokenGenerationFailed => "TOKEN_GENERATION_FAILED",
        };

        ErrorResponse::new(error_code, err.to_string())
    }
}

/// Convert ValidationError to ErrorResponse
impl From<ValidationError> for ErrorResponse {
    fn from(err: ValidationError) -> Self {
        let error_code = match &err {
            ValidationError::RequiredField { .. } => "REQUIRED_FIELD",
            ValidationError::InvalidEmail => "INVALID_EMAIL",
            ValidationError::TooShort { .. } => "TOO_SHORT",
        };

        ErrorResponse::new(error_code, err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_error_conversion() {
        let error = AuthError::InvalidCredentials;
        let response: ErrorResponse = error.into();
        assert_eq!(response.error, "INVALID_CREDENTIALS");
        assert!(response.message.contains("Invalid email or password"));
    }

    #[test]
    fn test_token_error_conversion() {
        let error = TokenError::TokenExpired;
        let response: ErrorResponse = error.into();
        assert_eq!(response.error, "TOKEN_EXPIRED");
    }

    #[test]
    fn test_same_error_shape_for_enumeration_resistance() {
        // Unknown email and wrong password must surface identically
        let unknown: ErrorResponse = AuthError::InvalidCredentials.into();
        let wrong: ErrorResponse = AuthError::InvalidCredentials.into();
        assert_eq!(unknown.error, wrong.error);
        assert_eq!(unknown.message, wrong.message);
    }
}
