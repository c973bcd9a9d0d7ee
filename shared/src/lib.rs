//! Shared utilities and common types for the StoryNest server
//!
//! This crate provides functionality used across all server modules:
//! - Configuration types (JWT, password hashing, database, environment)
//! - Response wrappers surfaced at the HTTP boundary

pub mod config;
pub mod types;

// Re-export commonly used items at crate root
pub use config::{
    DatabaseConfig, Environment, JwtConfig, PasswordConfig, RegistrationConfig,
};
pub use types::{ApiResponse, ErrorResponse};
