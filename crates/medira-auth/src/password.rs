//! Argon2id password hashing and verification.
//!
//! Hashing and verification live together here so the database layer
//! (which hashes at insert) and the login flow (which verifies) cannot
//! drift apart on parameters or pepper handling.

use argon2::password_hash::SaltString;
use argon2::password_hash::rand_core::OsRng;
use argon2::{Argon2, PasswordHasher, PasswordVerifier};

use crate::error::AuthError;

// OWASP ASVS recommended Argon2id parameters.
const MEMORY_KIB: u32 = 19_456; // 19 MiB
const ITERATIONS: u32 = 2;
const PARALLELISM: u32 = 1;

fn argon2() -> Result<Argon2<'static>, AuthError> {
    let params = argon2::Params::new(MEMORY_KIB, ITERATIONS, PARALLELISM, None)
        .map_err(|e| AuthError::Crypto(format!("argon2 params error: {e}")))?;
    Ok(Argon2::new(
        argon2::Algorithm::Argon2id,
        argon2::Version::V0x13,
        params,
    ))
}

fn peppered<'a>(password: &'a str, pepper: Option<&str>) -> std::borrow::Cow<'a, str> {
    match pepper {
        Some(p) => std::borrow::Cow::Owned(format!("{p}{password}")),
        None => std::borrow::Cow::Borrowed(password),
    }
}

/// Hash a password into PHC format with a fresh random salt.
///
/// If `pepper` is provided it is prepended to the password before
/// hashing; verification must use the same pepper.
pub fn hash_password(password: &str, pepper: Option<&str>) -> Result<String, AuthError> {
    let input = peppered(password, pepper);
    let salt = SaltString::generate(&mut OsRng);
    let hash = argon2()?
        .hash_password(input.as_bytes(), &salt)
        .map_err(|e| AuthError::Crypto(format!("password hash error: {e}")))?;
    Ok(hash.to_string())
}

/// Verify a plaintext password against a PHC-format hash.
///
/// Returns `Ok(true)` on match, `Ok(false)` on mismatch, or
/// `Err(AuthError::Crypto)` if the stored hash is malformed. The
/// parameters are read from the hash itself, so hashes produced with
/// older parameter sets keep verifying.
pub fn verify_password(
    password: &str,
    hash: &str,
    pepper: Option<&str>,
) -> Result<bool, AuthError> {
    let input = peppered(password, pepper);
    let parsed_hash = argon2::PasswordHash::new(hash)
        .map_err(|e| AuthError::Crypto(format!("invalid hash format: {e}")))?;

    match argon2()?.verify_password(input.as_bytes(), &parsed_hash) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(AuthError::Crypto(format!("verify error: {e}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registration::TEMPORARY_PASSWORD;

    #[test]
    fn temporary_password_hash_verifies() {
        let hash = hash_password(TEMPORARY_PASSWORD, None).unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password(TEMPORARY_PASSWORD, &hash, None).unwrap());
    }

    #[test]
    fn changed_password_no_longer_verifies() {
        let hash = hash_password(TEMPORARY_PASSWORD, None).unwrap();
        assert!(!verify_password("chosen-by-admin-later", &hash, None).unwrap());
    }

    #[test]
    fn salts_differ_between_hashes() {
        let h1 = hash_password(TEMPORARY_PASSWORD, None).unwrap();
        let h2 = hash_password(TEMPORARY_PASSWORD, None).unwrap();
        assert_ne!(h1, h2);
        assert!(verify_password(TEMPORARY_PASSWORD, &h2, None).unwrap());
    }

    #[test]
    fn pepper_must_match_between_hash_and_verify() {
        let hash = hash_password(TEMPORARY_PASSWORD, Some("server-secret")).unwrap();
        assert!(verify_password(TEMPORARY_PASSWORD, &hash, Some("server-secret")).unwrap());
        assert!(!verify_password(TEMPORARY_PASSWORD, &hash, None).unwrap());
        assert!(!verify_password(TEMPORARY_PASSWORD, &hash, Some("other-secret")).unwrap());
    }

    #[test]
    fn malformed_stored_hash_is_a_crypto_error() {
        let result = verify_password(TEMPORARY_PASSWORD, "plaintext-left-by-mistake", None);
        assert!(matches!(result, Err(AuthError::Crypto(_))));
    }
}
