use crate::error::RiskError;
use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

/// Capability that decides whether a table re-upload may proceed
///
/// The session never checks secrets itself; callers inject whichever
/// authorizer fits their deployment.
pub trait UploadAuthorizer {
    fn authorize(&self, secret: &str) -> bool;
}

/// Authorizer backed by a stored Argon2 hash
///
/// Only the PHC-format hash is kept in memory, never the plaintext secret.
#[derive(Clone, Debug)]
pub struct Argon2Authorizer {
    password_hash: String,
}

impl Argon2Authorizer {
    /// Wraps an existing hash, e.g. one read from the deployment's secrets
    pub fn from_hash(password_hash: impl Into<String>) -> Result<Self, RiskError> {
        let password_hash = password_hash.into();
        PasswordHash::new(&password_hash)
            .map_err(|_| RiskError::Credential("Invalid password hash format".to_string()))?;
        Ok(Self { password_hash })
    }

    /// Hashes `password` with a fresh salt
    pub fn from_password(password: &str) -> Result<Self, RiskError> {
        Ok(Self {
            password_hash: hash_password(password)?,
        })
    }

    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }
}

impl UploadAuthorizer for Argon2Authorizer {
    fn authorize(&self, secret: &str) -> bool {
        verify_password(secret, &self.password_hash)
    }
}

/// Hash a password using Argon2id with a random salt
///
/// # Returns
/// * `Result<String, RiskError>` - The PHC-format hash or an error
pub fn hash_password(password: &str) -> Result<String, RiskError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    match argon2.hash_password(password.as_bytes(), &salt) {
        Ok(hash) => Ok(hash.to_string()),
        Err(_) => Err(RiskError::Credential("Password hashing failed".to_string())),
    }
}

fn verify_password(password: &str, hash: &str) -> bool {
    let parsed_hash = match PasswordHash::new(hash) {
        Ok(hash) => hash,
        Err(_) => return false,
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
}
