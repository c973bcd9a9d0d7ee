//! Configuration types shared across server crates

pub mod auth;
pub mod database;
pub mod environment;

pub use auth::{JwtConfig, PasswordConfig, RegistrationConfig};
pub use database::DatabaseConfig;
pub use environment::Environment;
