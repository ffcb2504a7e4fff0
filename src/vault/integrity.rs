//! Rollback and tamper detection over serialized vault bytes.
//!
//! The digest is a base64 SHA-256 over the exact bytes produced by
//! `Keychain::dump`.  It travels next to the vault, never inside it, and
//! is supplied back independently at load time.

use std::fmt;
use std::str::FromStr;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use sha2::{Digest as _, Sha256};
use subtle::ConstantTimeEq;

use crate::errors::KeychainError;

/// Base64-encoded SHA-256 content hash of a serialized vault.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Digest(String);

impl Digest {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Digest({})", self.0)
    }
}

impl From<String> for Digest {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for Digest {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl FromStr for Digest {
    type Err = KeychainError;

    /// Accepts a stored digest, ignoring surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(KeychainError::Validation("digest cannot be empty".into()));
        }
        Ok(Self(trimmed.to_string()))
    }
}

/// Compute the digest of `bytes`.
pub fn digest(bytes: &[u8]) -> Digest {
    Digest(BASE64.encode(Sha256::digest(bytes)))
}

/// Return `true` if `bytes` hash to `expected`.
///
/// The comparison is constant-time in the digest contents.
pub fn verify(bytes: &[u8], expected: &Digest) -> bool {
    let actual = digest(bytes);
    actual.0.as_bytes().ct_eq(expected.0.as_bytes()).into()
}
