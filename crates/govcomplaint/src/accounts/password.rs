use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher as _, PasswordVerifier as _, SaltString};
use argon2::Argon2;

/// Credential verification collaborator. Plaintext passwords are hashed on
/// the way into the identity store and only ever compared through `verify`.
pub trait CredentialHasher: Send + Sync {
    fn hash(&self, plaintext: &str) -> Result<String, PasswordHashError>;
    fn verify(&self, plaintext: &str, digest: &str) -> Result<bool, PasswordHashError>;
}

#[derive(Debug, thiserror::Error)]
pub enum PasswordHashError {
    #[error("failed to hash password")]
    Hash(#[source] argon2::password_hash::Error),
    #[error("stored password digest is malformed")]
    MalformedDigest(#[source] argon2::password_hash::Error),
}

/// Argon2id with a fresh random salt per digest.
#[derive(Debug, Clone, Copy, Default)]
pub struct Argon2Hasher;

impl CredentialHasher for Argon2Hasher {
    fn hash(&self, plaintext: &str) -> Result<String, PasswordHashError> {
        let salt = SaltString::generate(&mut OsRng);
        let digest = Argon2::default()
            .hash_password(plaintext.as_bytes(), &salt)
            .map_err(PasswordHashError::Hash)?;
        Ok(digest.to_string())
    }

    fn verify(&self, plaintext: &str, digest: &str) -> Result<bool, PasswordHashError> {
        let parsed = PasswordHash::new(digest).map_err(PasswordHashError::MalformedDigest)?;
        match Argon2::default().verify_password(plaintext.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(err) => Err(PasswordHashError::MalformedDigest(err)),
        }
    }
}
