//! Password hashing and verification
//!
//! Passwords are stored as `base64(salt):base64(derived_key)` where the key
//! is derived with PBKDF2-HMAC-SHA256. A fresh random salt is generated for
//! every encode call, so hashing the same password twice never yields the
//! same string.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use pbkdf2::pbkdf2_hmac;
use rand::RngCore;
use sha2::Sha256;
use thiserror::Error;

/// PBKDF2 iteration count
const ITERATIONS: u32 = 120_000;

/// Salt length in bytes
const SALT_LEN: usize = 16;

/// Derived key length in bytes
const KEY_LEN: usize = 32;

/// Password hashing errors
#[derive(Error, Debug)]
pub enum PasswordError {
    #[error("Password must not be empty")]
    EmptyPassword,
}

/// Hash a raw password into the `salt:hash` storage format.
///
/// An empty password is a programming error at the call site and is
/// rejected loudly rather than hashed.
pub fn encode(raw_password: &str) -> Result<String, PasswordError> {
    if raw_password.is_empty() {
        return Err(PasswordError::EmptyPassword);
    }

    let mut salt = [0u8; SALT_LEN];
    rand::thread_rng().fill_bytes(&mut salt);

    let mut key = [0u8; KEY_LEN];
    pbkdf2_hmac::<Sha256>(raw_password.as_bytes(), &salt, ITERATIONS, &mut key);

    Ok(format!("{}:{}", BASE64.encode(salt), BASE64.encode(key)))
}

/// Verify a raw password against a stored `salt:hash` string.
///
/// Malformed stored values (wrong part count, undecodable base64) verify
/// as `false` rather than erroring; a corrupted hash and a wrong password
/// are indistinguishable to the caller.
pub fn matches(raw_password: &str, encoded: &str) -> bool {
    let mut parts = encoded.split(':');
    let (salt_b64, key_b64) = match (parts.next(), parts.next(), parts.next()) {
        (Some(salt), Some(key), None) => (salt, key),
        _ => return false,
    };

    let salt = match BASE64.decode(salt_b64) {
        Ok(s) => s,
        Err(_) => return false,
    };
    let expected = match BASE64.decode(key_b64) {
        Ok(k) => k,
        Err(_) => return false,
    };

    let mut key = vec![0u8; expected.len().max(1)];
    pbkdf2_hmac::<Sha256>(raw_password.as_bytes(), &salt, ITERATIONS, &mut key);

    key == expected
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip() {
        let encoded = encode("correct horse battery staple").unwrap();
        assert!(matches("correct horse battery staple", &encoded));
    }

    #[test]
    fn test_wrong_password_rejected() {
        let encoded = encode("password-one").unwrap();
        assert!(!matches("password-two", &encoded));
    }

    #[test]
    fn test_salt_is_random() {
        let first = encode("same-password").unwrap();
        let second = encode("same-password").unwrap();
        assert_ne!(first, second);
        assert!(matches("same-password", &first));
        assert!(matches("same-password", &second));
    }

    #[test]
    fn test_empty_password_fails_loudly() {
        assert!(encode("").is_err());
    }

    #[test]
    fn test_malformed_encoded_verifies_false() {
        assert!(!matches("anything", "no-separator"));
        assert!(!matches("anything", "a:b:c"));
        assert!(!matches("anything", "!!!not-base64!!!:AAAA"));
        assert!(!matches("anything", "AAAA:!!!not-base64!!!"));
    }

    #[test]
    fn test_storage_format() {
        let encoded = encode("pw-format-check").unwrap();
        let parts: Vec<&str> = encoded.split(':').collect();
        assert_eq!(parts.len(), 2);
        assert_eq!(BASE64.decode(parts[0]).unwrap().len(), SALT_LEN);
        assert_eq!(BASE64.decode(parts[1]).unwrap().len(), KEY_LEN);
    }
}
