//! Session service module for refresh-token sessions and JWT access tokens.

mod config;
mod service;

pub use config::SessionServiceConfig;
pub use service::SessionService;

#[cfg(test)]
mod tests;
