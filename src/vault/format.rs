//! Serialized vault format.
//!
//! A vault serializes to compact JSON:
//!
//! ```text
//! {"kvs":{"<b64 tag>":{"ciphertext":"<b64>","iv":"<b64>"},...},"salt":"<b64>","iterations":N}
//! ```
//!
//! - **kvs**: entries keyed by base64 domain tag, in tag order.
//! - **salt**: the 16-byte PBKDF2 salt.
//! - **iterations**: the PBKDF2 iteration count used at creation.
//!
//! Field order and map order are fixed, so the same vault state always
//! serializes to the same bytes.  The digest is never part of this
//! payload.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::entry::Entry;
use crate::crypto::domain::DomainTag;
use crate::crypto::kdf::{validate_iterations, SALT_LEN};
use crate::errors::{KeychainError, Result};

/// The unit that gets serialized and handed to storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vault {
    /// Encrypted entries keyed by domain tag.
    pub kvs: BTreeMap<DomainTag, Entry>,

    /// The salt used for PBKDF2 (base64 in JSON).
    #[serde(serialize_with = "base64_encode", deserialize_with = "base64_decode_array")]
    pub salt: [u8; SALT_LEN],

    /// PBKDF2 iteration count; must be reproduced exactly on load.
    pub iterations: u32,
}

impl Vault {
    /// An empty vault for a freshly generated salt.
    pub fn empty(salt: [u8; SALT_LEN], iterations: u32) -> Self {
        Self {
            kvs: BTreeMap::new(),
            salt,
            iterations,
        }
    }
}

/// Serialize a vault to its canonical byte form.
pub fn to_bytes(vault: &Vault) -> Result<Vec<u8>> {
    serde_json::to_vec(vault).map_err(|e| KeychainError::Serialization(format!("vault: {e}")))
}

/// Parse the serialized byte form of a vault.
pub fn from_bytes(bytes: &[u8]) -> Result<Vault> {
    let vault: Vault = serde_json::from_slice(bytes)
        .map_err(|e| KeychainError::InvalidVaultFormat(format!("vault JSON: {e}")))?;

    validate_iterations(vault.iterations)?;

    Ok(vault)
}

// ---------------------------------------------------------------------------
// Serde helpers for base64-encoded byte fields
// ---------------------------------------------------------------------------

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

pub(crate) fn base64_encode<S, T>(data: &T, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: serde::Serializer,
    T: AsRef<[u8]>,
{
    let encoded = BASE64.encode(data.as_ref());
    serializer.serialize_str(&encoded)
}

pub(crate) fn base64_decode<'de, D>(deserializer: D) -> std::result::Result<Vec<u8>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    BASE64.decode(&s).map_err(serde::de::Error::custom)
}

/// Like [`base64_decode`], but the decoded value must be exactly `N` bytes.
pub(crate) fn base64_decode_array<'de, D, const N: usize>(
    deserializer: D,
) -> std::result::Result<[u8; N], D::Error>
where
    D: serde::Deserializer<'de>,
{
    let bytes = base64_decode(deserializer)?;
    let len = bytes.len();
    bytes
        .try_into()
        .map_err(|_| serde::de::Error::custom(format!("expected {N} bytes, got {len}")))
}
