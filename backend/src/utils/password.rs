//! Password hashing for credentials at rest.
//!
//! Thin wrapper over `bcrypt` carrying the configured work factor. Every call
//! to [`PasswordHasher::hash`] generates a fresh random salt.
//!
//! bcrypt only reads the first [`MAX_PASSWORD_BYTES`] bytes of its input, so
//! the non-truncating variants are used: longer passwords are refused when
//! hashing and never verify.

use crate::auth::models::PASSWORD_TOO_LONG_MESSAGE;
use crate::errors::{ServiceError, ServiceResult};
use bcrypt::{BcryptError, non_truncating_hash, non_truncating_verify};
use std::sync::{Arc, OnceLock};

/// Lowest work factor bcrypt accepts.
pub const MIN_COST: u32 = 4;
/// Highest work factor bcrypt accepts.
pub const MAX_COST: u32 = 31;
/// Longest password bcrypt hashes without truncation.
pub const MAX_PASSWORD_BYTES: usize = 72;

/// Plaintext behind the digest checked when a login names an unknown user.
const DUMMY_PASSWORD: &str = "unknown-user-placeholder";

#[derive(Debug, Clone)]
pub struct PasswordHasher {
    cost: u32,
    /// Digest at the configured cost, built on first use and shared by clones.
    dummy_digest: Arc<OnceLock<String>>,
}

impl PasswordHasher {
    pub fn new(cost: u32) -> Self {
        Self {
            cost,
            dummy_digest: Arc::new(OnceLock::new()),
        }
    }

    /// Hashes a plaintext password.
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` for a password longer than
    /// [`MAX_PASSWORD_BYTES`], and `ServiceError::InternalError` if bcrypt
    /// rejects the input otherwise (for example an out-of-range cost).
    pub fn hash(&self, password: &str) -> ServiceResult<String> {
        non_truncating_hash(password, self.cost).map_err(|e| match e {
            BcryptError::Truncation(_) => {
                ServiceError::validation(vec![PASSWORD_TOO_LONG_MESSAGE.to_string()])
            }
            e => ServiceError::internal_error(format!("Password hashing failed: {}", e)),
        })
    }

    /// Checks a plaintext password against a stored digest.
    ///
    /// A digest that cannot be parsed, or a password bcrypt would truncate,
    /// verifies as `false`.
    pub fn verify(&self, password: &str, digest: &str) -> bool {
        non_truncating_verify(password, digest).unwrap_or(false)
    }

    /// Runs a full verify against a placeholder digest and returns `false`.
    ///
    /// Used when there is no stored digest to compare against, so that the
    /// request still pays the cost of one bcrypt verification.
    pub fn verify_dummy(&self, password: &str) -> bool {
        let digest = self.dummy_digest.get_or_init(|| {
            non_truncating_hash(DUMMY_PASSWORD, self.cost).unwrap_or_default()
        });
        self.verify(password, digest);
        false
    }

    /// True once the placeholder digest has been built.
    #[cfg(test)]
    pub fn dummy_digest_in_use(&self) -> bool {
        self.dummy_digest.get().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hasher() -> PasswordHasher {
        PasswordHasher::new(MIN_COST)
    }

    #[test]
    fn hash_then_verify() {
        let digest = hasher().hash("correct-password-123").unwrap();

        assert!(hasher().verify("correct-password-123", &digest));
        assert!(!hasher().verify("another-password-456", &digest));
    }

    #[test]
    fn salts_differ_between_calls() {
        let first = hasher().hash("correct-password-123").unwrap();
        let second = hasher().hash("correct-password-123").unwrap();

        assert_ne!(first, second);
        assert!(hasher().verify("correct-password-123", &first));
        assert!(hasher().verify("correct-password-123", &second));
    }

    #[test]
    fn digest_never_contains_plaintext() {
        let digest = hasher().hash("correct-password-123").unwrap();
        assert!(!digest.contains("correct-password-123"));
    }

    #[test]
    fn malformed_digest_verifies_false() {
        assert!(!hasher().verify("whatever", ""));
        assert!(!hasher().verify("whatever", "not-a-bcrypt-digest"));
        assert!(!hasher().verify("whatever", "$2b$04$short"));
    }

    #[test]
    fn cost_is_embedded_in_digest() {
        let digest = PasswordHasher::new(5).hash("correct-password-123").unwrap();
        assert!(digest.starts_with("$2b$05$"));
    }

    #[test]
    fn password_at_byte_limit_hashes() {
        // 24 three-byte characters.
        let password = "€".repeat(24);
        assert_eq!(password.len(), MAX_PASSWORD_BYTES);

        let digest = hasher().hash(&password).unwrap();
        assert!(hasher().verify(&password, &digest));
    }

    #[test]
    fn password_over_byte_limit_is_refused() {
        let result = hasher().hash(&"€".repeat(25));

        match result {
            Err(ServiceError::Validation { messages }) => {
                assert_eq!(messages, vec![PASSWORD_TOO_LONG_MESSAGE]);
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn shared_prefix_beyond_byte_limit_does_not_verify() {
        let prefix = "€".repeat(24);
        let digest = hasher().hash(&prefix).unwrap();

        assert!(!hasher().verify(&format!("{}abc", prefix), &digest));
        assert!(!hasher().verify(&format!("{}€", prefix), &digest));
    }

    #[test]
    fn dummy_verification_always_fails_and_builds_digest() {
        let hasher = hasher();
        let clone = hasher.clone();
        assert!(!hasher.dummy_digest_in_use());

        assert!(!hasher.verify_dummy("unknown-user-placeholder"));
        assert!(!hasher.verify_dummy("correct-password-123"));
        assert!(clone.dummy_digest_in_use());
    }
}
