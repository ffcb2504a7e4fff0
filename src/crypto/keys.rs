//! Subkey derivation by HMAC-SHA256 labeling.
//!
//! From the PBKDF2 master secret we derive two purpose-bound keys:
//! - An **encryption key** (`HMAC(master, "enc")`) used only by AES-GCM.
//! - An **authentication key** (`HMAC(master, "mac")`) used only to tag
//!   domain names.
//!
//! Each key is its own type, so the compiler refuses to hand the
//! authentication key to the cipher or the encryption key to the hasher.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use zeroize::Zeroize;

use crate::errors::{KeychainError, Result};

/// Length of the master secret and of each derived subkey (256 bits).
pub const KEY_LEN: usize = 32;

/// Label for the encryption subkey.
const ENC_LABEL: &[u8] = b"enc";

/// Label for the authentication subkey.
const MAC_LABEL: &[u8] = b"mac";

/// The PBKDF2 output.  Never persisted; zeroed when dropped.
#[derive(Zeroize)]
#[zeroize(drop)]
pub struct MasterSecret {
    bytes: [u8; KEY_LEN],
}

impl MasterSecret {
    /// Wrap raw secret bytes.
    pub fn new(bytes: [u8; KEY_LEN]) -> Self {
        Self { bytes }
    }

    /// Access the raw secret bytes.
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.bytes
    }

    /// Expand this secret into its encryption and authentication keys.
    pub fn derive_subkeys(&self) -> Result<SubKeys> {
        derive_subkeys(self)
    }
}

/// AES-256-GCM key.  Only accepted by [`crate::crypto::encryption`].
#[derive(Zeroize)]
#[zeroize(drop)]
pub struct EncryptionKey {
    bytes: [u8; KEY_LEN],
}

impl EncryptionKey {
    pub fn new(bytes: [u8; KEY_LEN]) -> Self {
        Self { bytes }
    }

    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.bytes
    }
}

/// HMAC-SHA256 key for domain tagging.  Only accepted by
/// [`crate::crypto::domain`].
#[derive(Zeroize)]
#[zeroize(drop)]
pub struct AuthenticationKey {
    bytes: [u8; KEY_LEN],
}

impl AuthenticationKey {
    pub fn new(bytes: [u8; KEY_LEN]) -> Self {
        Self { bytes }
    }

    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.bytes
    }
}

/// The pair of purpose-separated keys held by an unlocked keychain.
pub struct SubKeys {
    pub encryption: EncryptionKey,
    pub authentication: AuthenticationKey,
}

/// Derive the `(encryption, authentication)` key pair from a master secret.
///
/// Deterministic: the same master secret always yields the same pair.
pub fn derive_subkeys(master: &MasterSecret) -> Result<SubKeys> {
    let encryption = EncryptionKey::new(hmac_label(master.as_bytes(), ENC_LABEL)?);
    let authentication = AuthenticationKey::new(hmac_label(master.as_bytes(), MAC_LABEL)?);

    Ok(SubKeys {
        encryption,
        authentication,
    })
}

/// Internal helper: `HMAC-SHA256(key, label)`.
fn hmac_label(key: &[u8], label: &[u8]) -> Result<[u8; KEY_LEN]> {
    let mut mac = Hmac::<Sha256>::new_from_slice(key)
        .map_err(|e| KeychainError::KeyDerivation(format!("invalid HMAC key: {e}")))?;
    mac.update(label);

    let mut out = [0u8; KEY_LEN];
    out.copy_from_slice(&mac.finalize().into_bytes());
    Ok(out)
}
