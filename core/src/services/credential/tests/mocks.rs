//! Test harness wiring the credential service to the in-memory mocks.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::account::{Account, AccountRole};
use crate::domain::entities::known_ip::KnownIp;
use crate::domain::entities::one_time_token::OneTimeToken;
use crate::domain::entities::session::Session;
use crate::domain::events::{DomainEvent, EventPublisher};
use crate::errors::{DomainError, DomainResult};
use crate::repositories::{
    MockAccountRepository, MockKnownIpRepository, MockOneTimeTokenRepository,
    MockSessionRepository, MockTransactionalStore,
};
use crate::services::credential::{CredentialService, CredentialServiceConfig};
use crate::services::password::PasswordHasher;
use crate::services::session::{SessionService, SessionServiceConfig};

/// bcrypt cost used throughout the tests; the minimum keeps them fast
pub const TEST_BCRYPT_COST: u32 = 4;

/// Admin registration secret used throughout the tests
pub const TEST_ADMIN_SECRET: &str = "test-admin-secret";

/// Publisher that records every event it sees
#[derive(Default)]
pub struct CapturingEventPublisher {
    pub events: Arc<RwLock<Vec<DomainEvent>>>,
}

#[async_trait]
impl EventPublisher for CapturingEventPublisher {
    async fn publish(&self, event: DomainEvent) -> DomainResult<()> {
        self.events.write().await.push(event);
        Ok(())
    }
}

/// Publisher that rejects every event
pub struct FailingEventPublisher;

#[async_trait]
impl EventPublisher for FailingEventPublisher {
    async fn publish(&self, _event: DomainEvent) -> DomainResult<()> {
        Err(DomainError::ServiceUnavailable {
            message: "publisher down".to_string(),
        })
    }
}

/// Handles on the shared mock state for assertions
pub struct State {
    pub accounts: Arc<RwLock<Vec<Account>>>,
    pub sessions: Arc<RwLock<Vec<Session>>>,
    pub tokens: Arc<RwLock<Vec<OneTimeToken>>>,
    pub known_ips: Arc<RwLock<Vec<KnownIp>>>,
}

pub type TestCredentialService<E> = CredentialService<
    MockAccountRepository,
    MockSessionRepository,
    MockOneTimeTokenRepository,
    MockKnownIpRepository,
    MockTransactionalStore,
    E,
>;

/// Assemble a credential service over fresh mocks with the given publisher
pub fn build_service<E: EventPublisher>(publisher: Arc<E>) -> (TestCredentialService<E>, State) {
    let account_repo = MockAccountRepository::new();
    let session_repo = MockSessionRepository::new();
    let token_repo = MockOneTimeTokenRepository::new();
    let known_ip_repo = MockKnownIpRepository::new();

    let state = State {
        accounts: account_repo.accounts.clone(),
        sessions: session_repo.sessions.clone(),
        tokens: token_repo.tokens.clone(),
        known_ips: known_ip_repo.records.clone(),
    };

    let store = MockTransactionalStore::new(
        state.accounts.clone(),
        state.tokens.clone(),
        state.sessions.clone(),
    );
    let session_service = SessionService::new(
        session_repo,
        SessionServiceConfig::new("test-secret-key"),
    );
    let config = CredentialServiceConfig::default()
        .with_bcrypt_cost(TEST_BCRYPT_COST)
        .with_admin_secret(TEST_ADMIN_SECRET);

    let service = CredentialService::new(
        Arc::new(account_repo),
        Arc::new(session_service),
        Arc::new(token_repo),
        Arc::new(known_ip_repo),
        Arc::new(store),
        publisher,
        config,
    );

    (service, state)
}

/// Harness with a capturing publisher, the common case
pub struct Harness {
    pub service: TestCredentialService<CapturingEventPublisher>,
    pub state: State,
    pub events: Arc<RwLock<Vec<DomainEvent>>>,
}

pub fn harness() -> Harness {
    let publisher = Arc::new(CapturingEventPublisher::default());
    let events = publisher.events.clone();
    let (service, state) = build_service(publisher);
    Harness {
        service,
        state,
        events,
    }
}

impl Harness {
    /// Seed an account directly into the mock store
    pub async fn seed_account(&self, email: &str, password: &str, verified: bool) -> Account {
        let hasher = PasswordHasher::new(TEST_BCRYPT_COST);
        let mut account = Account::new(
            email.to_string(),
            hasher.hash_secret(password).unwrap(),
            "Sam".to_string(),
            AccountRole::Parent,
        );
        if verified {
            account.mark_email_verified();
        }
        self.state.accounts.write().await.push(account.clone());
        account
    }

    /// The raw token carried by the most recent raw-token event
    pub async fn last_raw_token(&self) -> String {
        self.events
            .read()
            .await
            .iter()
            .rev()
            .find_map(|event| match event {
                DomainEvent::EmailVerificationRequested { raw_token, .. }
                | DomainEvent::PasswordResetRequested { raw_token, .. } => Some(raw_token.clone()),
                _ => None,
            })
            .expect("no raw-token event captured")
    }

    /// Count of captured events matching a routing key
    pub async fn event_count(&self, name: &str) -> usize {
        self.events
            .read()
            .await
            .iter()
            .filter(|event| event.name() == name)
            .count()
    }
}
