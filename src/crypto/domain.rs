//! Domain tagging with HMAC-SHA256.
//!
//! A domain name is never stored.  The vault is keyed by
//! `HMAC(authentication_key, utf8(domain))`, which is reproducible only
//! by someone holding the authentication key.  The same tag is fed to
//! AES-GCM as associated data, binding each ciphertext to its domain.

use std::fmt;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use hmac::{Hmac, Mac};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::Sha256;

use super::keys::AuthenticationKey;
use crate::errors::{KeychainError, Result};

/// Length of a domain tag (HMAC-SHA256 output).
pub const TAG_LEN: usize = 32;

/// Opaque lookup key for a vault entry.
///
/// Serialized as a base64 string, which lets it sit directly as a JSON
/// object key.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DomainTag([u8; TAG_LEN]);

impl DomainTag {
    pub fn from_bytes(bytes: [u8; TAG_LEN]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; TAG_LEN] {
        &self.0
    }

    /// Base64 form, as it appears in the serialized vault.
    pub fn to_base64(&self) -> String {
        BASE64.encode(self.0)
    }

    /// Parse the base64 form used in the serialized vault.
    pub fn from_base64(encoded: &str) -> Result<Self> {
        let raw = BASE64
            .decode(encoded)
            .map_err(|e| KeychainError::InvalidVaultFormat(format!("domain tag: {e}")))?;
        let bytes: [u8; TAG_LEN] = raw.try_into().map_err(|v: Vec<u8>| {
            KeychainError::InvalidVaultFormat(format!(
                "domain tag must be {TAG_LEN} bytes (got {})",
                v.len()
            ))
        })?;
        Ok(Self(bytes))
    }
}

// Tags are not secret, but printing raw bytes is noise.
impl fmt::Debug for DomainTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DomainTag({})", self.to_base64())
    }
}

impl Serialize for DomainTag {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_base64())
    }
}

impl<'de> Deserialize<'de> for DomainTag {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        DomainTag::from_base64(&s).map_err(serde::de::Error::custom)
    }
}

/// Compute the tag for `domain`.  Pure and deterministic.
pub fn tag_for(key: &AuthenticationKey, domain: &str) -> Result<DomainTag> {
    let mut mac = Hmac::<Sha256>::new_from_slice(key.as_bytes())
        .map_err(|e| KeychainError::KeyDerivation(format!("invalid HMAC key: {e}")))?;
    mac.update(domain.as_bytes());

    let mut tag = [0u8; TAG_LEN];
    tag.copy_from_slice(&mac.finalize().into_bytes());
    Ok(DomainTag(tag))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(byte: u8) -> AuthenticationKey {
        AuthenticationKey::new([byte; 32])
    }

    #[test]
    fn same_domain_same_tag() {
        let k = key(9);
        assert_eq!(
            tag_for(&k, "example.com").unwrap(),
            tag_for(&k, "example.com").unwrap()
        );
    }

    #[test]
    fn different_domains_different_tags() {
        let k = key(9);
        assert_ne!(
            tag_for(&k, "example.com").unwrap(),
            tag_for(&k, "example.org").unwrap()
        );
    }

    #[test]
    fn tag_depends_on_key() {
        assert_ne!(
            tag_for(&key(1), "example.com").unwrap(),
            tag_for(&key(2), "example.com").unwrap()
        );
    }

    #[test]
    fn base64_roundtrip_and_length_check() {
        let tag = tag_for(&key(3), "a.b").unwrap();
        assert_eq!(DomainTag::from_base64(&tag.to_base64()).unwrap(), tag);

        let short = BASE64.encode([0u8; 16]);
        assert!(matches!(
            DomainTag::from_base64(&short),
            Err(KeychainError::InvalidVaultFormat(_))
        ));
        assert!(DomainTag::from_base64("not base64!").is_err());
    }
}
