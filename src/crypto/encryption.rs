//! AES-256-GCM authenticated encryption with associated data.
//!
//! Nonces are generated by the caller via [`generate_nonce`] once per
//! encryption and stored next to the ciphertext.  The associated data is
//! always the entry's domain tag, so a ciphertext moved under another tag
//! fails to authenticate.

use aes_gcm::aead::{Aead, KeyInit, OsRng, Payload};
use aes_gcm::{AeadCore, Aes256Gcm, Nonce};

use super::keys::EncryptionKey;
use crate::errors::{KeychainError, Result};

/// Size of the AES-256-GCM nonce in bytes (96 bits).
pub const NONCE_LEN: usize = 12;

/// Size of the GCM authentication tag appended to every ciphertext.
pub const AUTH_TAG_LEN: usize = 16;

/// Generate a fresh random 96-bit nonce.
pub fn generate_nonce() -> [u8; NONCE_LEN] {
    let nonce = Aes256Gcm::generate_nonce(&mut OsRng);
    let mut out = [0u8; NONCE_LEN];
    out.copy_from_slice(&nonce);
    out
}

/// Encrypt `plaintext` under `key` and `nonce`, authenticating `aad`.
///
/// Returns the ciphertext with the 16-byte GCM tag appended.
pub fn encrypt(
    key: &EncryptionKey,
    nonce: &[u8; NONCE_LEN],
    plaintext: &[u8],
    aad: &[u8],
) -> Result<Vec<u8>> {
    let cipher = Aes256Gcm::new_from_slice(key.as_bytes())
        .map_err(|e| KeychainError::KeyDerivation(format!("invalid key length: {e}")))?;

    cipher
        .encrypt(
            Nonce::from_slice(nonce),
            Payload {
                msg: plaintext,
                aad,
            },
        )
        .map_err(|_| KeychainError::Crypto)
}

/// Decrypt and verify data produced by [`encrypt`].
///
/// Any mismatch in key, nonce, associated data or ciphertext yields
/// [`KeychainError::Crypto`].  The failure is final.
pub fn decrypt(key: &EncryptionKey, nonce: &[u8], ciphertext: &[u8], aad: &[u8]) -> Result<Vec<u8>> {
    if nonce.len() != NONCE_LEN || ciphertext.len() < AUTH_TAG_LEN {
        return Err(KeychainError::Crypto);
    }

    let cipher = Aes256Gcm::new_from_slice(key.as_bytes()).map_err(|_| KeychainError::Crypto)?;

    cipher
        .decrypt(
            Nonce::from_slice(nonce),
            Payload {
                msg: ciphertext,
                aad,
            },
        )
        .map_err(|_| KeychainError::Crypto)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ciphertext_carries_tag() {
        let key = EncryptionKey::new([5; 32]);
        let nonce = generate_nonce();
        let ct = encrypt(&key, &nonce, b"hello", b"aad").unwrap();
        assert_eq!(ct.len(), 5 + AUTH_TAG_LEN);
    }

    #[test]
    fn wrong_nonce_length_is_crypto_error() {
        let key = EncryptionKey::new([5; 32]);
        let nonce = generate_nonce();
        let ct = encrypt(&key, &nonce, b"hello", b"aad").unwrap();
        assert!(matches!(
            decrypt(&key, &nonce[..8], &ct, b"aad"),
            Err(KeychainError::Crypto)
        ));
    }

    #[test]
    fn truncated_ciphertext_is_crypto_error() {
        let key = EncryptionKey::new([5; 32]);
        let nonce = generate_nonce();
        assert!(matches!(
            decrypt(&key, &nonce, &[0u8; 4], b"aad"),
            Err(KeychainError::Crypto)
        ));
    }
}
