//! Password value object and hashing.
//!
//! A [`Password`] only ever holds a one-way digest. Producing one goes
//! through a [`PasswordHasher`], which the account service receives as a
//! collaborator so tests can swap in a cheap implementation.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, SaltString},
    Argon2, PasswordHasher as _, PasswordVerifier as _,
};

use crate::error::{DomainError, DomainResult};

/// Hashed password value object.
///
/// Immutable and compared by value. There is no way to build one from a
/// plain text password except through a [`PasswordHasher`].
#[derive(Clone, PartialEq, Eq)]
pub struct Password {
    hash: String,
}

// Don't expose hash in debug output (security)
impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Password")
            .field("hash", &"[REDACTED]")
            .finish()
    }
}

impl Password {
    /// Create a Password from an existing hash (from database).
    pub fn from_hash(hash: impl Into<String>) -> Self {
        Self { hash: hash.into() }
    }

    /// Get the hash string for storage.
    pub fn as_str(&self) -> &str {
        &self.hash
    }

    /// Consume and return the hash string.
    pub fn into_string(self) -> String {
        self.hash
    }

    /// Verify a plain text password against this Argon2 hash.
    ///
    /// Returns `false` for hashes that are not valid PHC strings.
    pub fn verify(&self, plain_text: &str) -> bool {
        PasswordHash::new(&self.hash)
            .map(|parsed| {
                Argon2::default()
                    .verify_password(plain_text.as_bytes(), &parsed)
                    .is_ok()
            })
            .unwrap_or(false)
    }
}

impl From<Password> for String {
    fn from(password: Password) -> Self {
        password.hash
    }
}

/// One-way password hashing.
pub trait PasswordHasher: Send + Sync {
    /// Hash a plain text password into a storable digest.
    fn hash(&self, plain_text: &str) -> DomainResult<Password>;
}

/// Argon2id hasher with a fresh random salt per call.
#[derive(Debug, Clone, Default)]
pub struct Argon2Hasher;

impl Argon2Hasher {
    pub fn new() -> Self {
        Self
    }
}

impl PasswordHasher for Argon2Hasher {
    fn hash(&self, plain_text: &str) -> DomainResult<Password> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(plain_text.as_bytes(), &salt)
            .map_err(|e| DomainError::internal(format!("Password hash failed: {}", e)))?;
        Ok(Password::from_hash(hash.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_hash_and_verify() {
        let plain = "SecurePassword123!";
        let password = Argon2Hasher::new().hash(plain).unwrap();

        assert!(password.verify(plain));
        assert!(!password.verify("WrongPassword123"));
    }

    #[test]
    fn test_hash_is_never_plain_text() {
        let plain = "secret1";
        let password = Argon2Hasher::new().hash(plain).unwrap();

        assert_ne!(password.as_str(), plain);
        assert!(!password.as_str().contains(plain));
    }

    #[test]
    fn test_password_from_hash() {
        let plain = "TestPassword123";
        let hash = Argon2Hasher::new().hash(plain).unwrap().into_string();

        let restored = Password::from_hash(hash);
        assert!(restored.verify(plain));
    }

    #[test]
    fn test_same_password_different_salts() {
        let hasher = Argon2Hasher::new();
        let plain = "SamePassword123";
        let pass1 = hasher.hash(plain).unwrap();
        let pass2 = hasher.hash(plain).unwrap();

        // Different salts produce different hashes
        assert_ne!(pass1, pass2);
        assert!(pass1.verify(plain));
        assert!(pass2.verify(plain));
    }

    #[test]
    fn test_short_passwords_are_accepted() {
        assert!(Argon2Hasher::new().hash("abc").is_ok());
    }

    #[test]
    fn test_verify_rejects_malformed_hash() {
        assert!(!Password::from_hash("not-a-phc-string").verify("anything"));
    }

    #[test]
    fn test_debug_output_is_redacted() {
        let password = Password::from_hash("$argon2id$v=19$secret-digest");
        let debug = format!("{:?}", password);

        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("secret-digest"));
    }
}
