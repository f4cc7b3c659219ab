//! Salted password hashing for stored user credentials.
//!
//! Hashes are Argon2 PHC strings, so the random salt travels inside the
//! stored value and verification needs nothing else.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

use crate::error::{DataError, Result};

/// Hash a plaintext password with a fresh random salt.
pub fn hash_password(plain: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);

    let hash = Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map_err(|e| DataError::PasswordHash(e.to_string()))?
        .to_string();

    Ok(hash)
}

/// Check a plaintext password against a stored hash.
///
/// A stored value that is not a valid PHC string is an error, not a mismatch.
pub fn verify_password(plain: &str, stored_hash: &str) -> Result<bool> {
    let parsed = PasswordHash::new(stored_hash).map_err(|e| DataError::PasswordHash(e.to_string()))?;

    Ok(Argon2::default()
        .verify_password(plain.as_bytes(), &parsed)
        .is_ok())
}
