//! Password hashing and verification using Argon2id

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::error::{CredentialError, CredentialResult};

/// Hash a password using Argon2id with the crate's default parameters.
///
/// # Returns
///
/// A PHC-formatted hash string suitable for storage
///
/// # Example
///
/// ```
/// use team_auth::hash_password;
///
/// let hash = hash_password("correct horse battery").unwrap();
/// assert!(hash.starts_with("$argon2id$"));
/// ```
pub fn hash_password(password: &str) -> CredentialResult<String> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| CredentialError::HashingFailed(e.to_string()))
}

/// Verify a password against a stored PHC hash.
///
/// Returns `Ok(false)` on a mismatch and an error only when the stored hash
/// cannot be parsed or the verifier itself fails.
pub fn verify_password(password: &str, hash: &str) -> CredentialResult<bool> {
    let parsed =
        PasswordHash::new(hash).map_err(|e| CredentialError::InvalidHashFormat(e.to_string()))?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(CredentialError::VerificationFailed(e.to_string())),
    }
}
