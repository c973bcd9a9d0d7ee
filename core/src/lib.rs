//! # StoryNest Core
//!
//! Core business logic and domain layer for the StoryNest backend.
//! This crate contains domain entities, business services, repository
//! interfaces, domain events, and error types that form the foundation of
//! the credential and session lifecycle.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::entities::account::{Account, AccountRole, OnboardingStage};
pub use domain::entities::session::{Claims, Session, TokenPair};
pub use domain::events::{DomainEvent, EventPublisher};
pub use domain::value_objects::AuthResponse;
pub use errors::{AuthError, DomainError, DomainResult, TokenError, ValidationError};
pub use services::{
    CredentialService, CredentialServiceConfig, RegistrationRequest, SessionService,
    SessionServiceConfig,
};
