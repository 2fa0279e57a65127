//! One-way password hashing (Argon2id, random salt).

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher as _, PasswordVerifier as _, SaltString};
use argon2::Argon2;

use ledgerkeep_core::{DomainError, DomainResult};

/// Memory-hard password hasher.
///
/// Algorithm parameters are fixed by the implementation (Argon2id defaults),
/// never caller-supplied. The digest is self-contained: algorithm, parameters
/// and salt travel inside the PHC string.
#[derive(Debug, Default)]
pub struct CredentialHasher {
    argon2: Argon2<'static>,
}

impl CredentialHasher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hash a plaintext password with a fresh random salt.
    pub fn hash(&self, plaintext: &str) -> DomainResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let digest = self
            .argon2
            .hash_password(plaintext.as_bytes(), &salt)
            .map_err(|e| DomainError::validation(format!("password hashing failed: {e}")))?;
        Ok(digest.to_string())
    }

    /// Check a plaintext against a stored digest.
    ///
    /// A mismatch is a normal outcome and returns `Ok(false)`; only a
    /// malformed or corrupt digest is an error (`CorruptCredential`).
    pub fn verify(&self, digest: &str, plaintext: &str) -> DomainResult<bool> {
        let parsed = PasswordHash::new(digest).map_err(|_| DomainError::CorruptCredential)?;
        match self.argon2.verify_password(plaintext.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(_) => Err(DomainError::CorruptCredential),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify_roundtrip() {
        let hasher = CredentialHasher::new();
        let digest = hasher.hash("correct horse battery staple").unwrap();
        assert_eq!(
            hasher.verify(&digest, "correct horse battery staple"),
            Ok(true)
        );
    }

    #[test]
    fn wrong_password_is_false_not_an_error() {
        let hasher = CredentialHasher::new();
        let digest = hasher.hash("s3cret").unwrap();
        assert_eq!(hasher.verify(&digest, "not-the-password"), Ok(false));
    }

    #[test]
    fn hashes_are_salted() {
        let hasher = CredentialHasher::new();
        let a = hasher.hash("same input").unwrap();
        let b = hasher.hash("same input").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn corrupt_digest_is_a_distinct_failure() {
        let hasher = CredentialHasher::new();
        assert_eq!(
            hasher.verify("not-a-phc-string", "anything"),
            Err(DomainError::CorruptCredential)
        );
    }
}
