//! Credential service tests.

mod mocks;
