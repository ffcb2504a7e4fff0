//! Password-based key derivation using PBKDF2-HMAC-SHA256.
//!
//! PBKDF2 cannot tell a wrong password from a right one: any input
//! produces *some* 32-byte secret.  Wrong-password detection therefore
//! happens later, when the keychain probes an existing entry.

use pbkdf2::pbkdf2_hmac;
use rand::RngCore;
use sha2::Sha256;

use super::keys::{MasterSecret, KEY_LEN};
use crate::errors::{KeychainError, Result};

/// Length of the salt in bytes (128 bits).
pub const SALT_LEN: usize = 16;

/// Default PBKDF2 iteration count.
///
/// Whatever count is used must be persisted next to the vault; deriving
/// with a different count silently yields a different key.
pub const DEFAULT_ITERATIONS: u32 = 100_000;

/// Upper bound on the iteration count accepted from a vault or caller.
///
/// A vault is parsed before any key exists, so without a digest its
/// `iterations` field is attacker-controlled input to PBKDF2.
pub const MAX_ITERATIONS: u32 = 10_000_000;

/// Derive the master secret from a password and salt using the default
/// iteration count.
pub fn derive_master_secret(password: &[u8], salt: &[u8]) -> Result<MasterSecret> {
    derive_master_secret_with_iterations(password, salt, DEFAULT_ITERATIONS)
}

/// Derive the master secret with an explicit iteration count.
///
/// The same password + salt + iterations always produce the same secret.
pub fn derive_master_secret_with_iterations(
    password: &[u8],
    salt: &[u8],
    iterations: u32,
) -> Result<MasterSecret> {
    if salt.is_empty() {
        return Err(KeychainError::Validation("salt must not be empty".into()));
    }
    if salt.len() != SALT_LEN {
        return Err(KeychainError::Validation(format!(
            "salt must be {SALT_LEN} bytes (got {})",
            salt.len()
        )));
    }
    validate_iterations(iterations)?;

    let mut secret = [0u8; KEY_LEN];
    pbkdf2_hmac::<Sha256>(password, salt, iterations, &mut secret);

    Ok(MasterSecret::new(secret))
}

/// Check that `iterations` lies in `1..=MAX_ITERATIONS`.
pub fn validate_iterations(iterations: u32) -> Result<()> {
    if iterations == 0 {
        return Err(KeychainError::Validation(
            "iteration count must be at least 1".into(),
        ));
    }
    if iterations > MAX_ITERATIONS {
        return Err(KeychainError::Validation(format!(
            "iteration count cannot exceed {MAX_ITERATIONS} (got {iterations})"
        )));
    }
    Ok(())
}

/// Generate a cryptographically random 16-byte salt.
pub fn generate_salt() -> [u8; SALT_LEN] {
    let mut salt = [0u8; SALT_LEN];
    rand::rng().fill_bytes(&mut salt);
    salt
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_zero_iterations() {
        let salt = generate_salt();
        let err = derive_master_secret_with_iterations(b"pw", &salt, 0);
        assert!(matches!(err, Err(KeychainError::Validation(_))));
    }

    #[test]
    fn rejects_excessive_iterations() {
        let salt = generate_salt();
        let err = derive_master_secret_with_iterations(b"pw", &salt, MAX_ITERATIONS + 1);
        assert!(matches!(err, Err(KeychainError::Validation(_))));
        assert!(validate_iterations(MAX_ITERATIONS).is_ok());
    }

    #[test]
    fn rejects_empty_and_short_salt() {
        assert!(matches!(
            derive_master_secret_with_iterations(b"pw", &[], 10),
            Err(KeychainError::Validation(_))
        ));
        assert!(matches!(
            derive_master_secret_with_iterations(b"pw", &[0u8; 8], 10),
            Err(KeychainError::Validation(_))
        ));
    }

    #[test]
    fn iteration_count_changes_output() {
        let salt = [7u8; SALT_LEN];
        let a = derive_master_secret_with_iterations(b"pw", &salt, 10).unwrap();
        let b = derive_master_secret_with_iterations(b"pw", &salt, 11).unwrap();
        assert_ne!(a.as_bytes(), b.as_bytes());
    }

    #[test]
    fn matches_rfc_test_vector() {
        // PBKDF2-HMAC-SHA256, P="password", S="salt", c=1, dkLen=32.
        // The salt check requires 16 bytes, so call the primitive directly.
        let mut out = [0u8; 32];
        pbkdf2_hmac::<Sha256>(b"password", b"salt", 1, &mut out);
        assert_eq!(
            out[..4],
            [0x12, 0x0f, 0xb6, 0xcf],
            "first bytes of the published PBKDF2-SHA256 vector"
        );
    }

    #[test]
    fn salts_are_random() {
        assert_ne!(generate_salt(), generate_salt());
    }
}
