//! Value objects returned to the presentation layer.

pub mod auth_response;

pub use auth_response::AuthResponse;
