//! Password hashing and secret fingerprinting primitives.
//!
//! Two distinct one-way functions live here and must not be conflated:
//!
//! - [`PasswordHasher`] wraps bcrypt for password storage. Adaptive cost,
//!   salted, and verified through the library's own routine, never manual
//!   string equality. The cost factor is embedded in each digest, so it can
//!   be raised per deployment without invalidating old digests.
//! - [`fingerprint`] is a plain SHA-256 hex digest used only to *look up*
//!   refresh and one-time tokens by value. Those secrets are random with
//!   well over 128 bits of entropy, so a fast digest is sufficient and the
//!   unique index on the digest column gives O(1) lookup.

use rand::Rng;
use sha2::{Digest, Sha256};

use crate::errors::{DomainError, DomainResult};

/// Default bcrypt cost factor
pub const DEFAULT_BCRYPT_COST: u32 = 12;

/// Length of generated refresh and one-time token secrets
pub const SECRET_LENGTH: usize = 32;

const SECRET_CHARSET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Adaptive-cost password hasher backed by bcrypt
#[derive(Debug, Clone)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    /// Create a hasher with an explicit cost factor
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    /// Hash a plaintext secret for storage
    pub fn hash_secret(&self, plaintext: &str) -> DomainResult<String> {
        bcrypt::hash(plaintext, self.cost).map_err(|e| DomainError::Internal {
            message: format!("Password hashing failed: {e}"),
        })
    }

    /// Verify a plaintext secret against a stored digest
    pub fn verify_secret(&self, plaintext: &str, digest: &str) -> DomainResult<bool> {
        bcrypt::verify(plaintext, digest).map_err(|e| DomainError::Internal {
            message: format!("Password verification failed: {e}"),
        })
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new(DEFAULT_BCRYPT_COST)
    }
}

/// Fast deterministic digest for token lookup
///
/// Never used for password storage.
pub fn fingerprint(raw: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(raw.as_bytes());
    hex::encode(hasher.finalize())
}

/// Generate a random alphanumeric secret
///
/// 32 characters over a 62-symbol alphabet carry ~190 bits of entropy,
/// comfortably above the 128-bit floor required for fast-digest lookup.
pub fn generate_secret(length: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..length)
        .map(|_| {
            let idx = rng.gen_range(0..SECRET_CHARSET.len());
            SECRET_CHARSET[idx] as char
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    // Minimum bcrypt cost keeps the tests fast
    const TEST_COST: u32 = 4;

    #[test]
    fn test_hash_and_verify_roundtrip() {
        let hasher = PasswordHasher::new(TEST_COST);
        let digest = hasher.hash_secret("correct horse battery staple").unwrap();

        assert!(hasher
            .verify_secret("correct horse battery staple", &digest)
            .unwrap());
        assert!(!hasher.verify_secret("wrong password", &digest).unwrap());
    }

    #[test]
    fn test_hashes_are_salted() {
        let hasher = PasswordHasher::new(TEST_COST);
        let a = hasher.hash_secret("same input").unwrap();
        let b = hasher.hash_secret("same input").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_cost_change_keeps_old_digests_verifiable() {
        let old = PasswordHasher::new(TEST_COST);
        let digest = old.hash_secret("password").unwrap();

        // A hasher with a different cost still verifies the old digest,
        // since the cost is embedded in the digest itself
        let new = PasswordHasher::new(TEST_COST + 1);
        assert!(new.verify_secret("password", &digest).unwrap());
    }

    #[test]
    fn test_fingerprint_is_deterministic() {
        let a = fingerprint("some-token-value");
        let b = fingerprint("some-token-value");
        let c = fingerprint("other-token-value");

        assert_eq!(a, b);
        assert_ne!(a, c);
        // SHA-256 in hex
        assert_eq!(a.len(), 64);
        assert!(a.chars().all(|ch| ch.is_ascii_hexdigit()));
    }

    #[test]
    fn test_fingerprint_does_not_leak_input() {
        let raw = "supersecrettokenvalue";
        let digest = fingerprint(raw);
        assert!(!digest.contains(raw));
    }

    #[test]
    fn test_generate_secret_shape() {
        let secret = generate_secret(SECRET_LENGTH);
        assert_eq!(secret.len(), SECRET_LENGTH);
        assert!(secret.chars().all(|c| c.is_ascii_alphanumeric()));

        // Two draws must not collide
        assert_ne!(secret, generate_secret(SECRET_LENGTH));
    }
}
