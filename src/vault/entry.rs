//! A single encrypted password record.
//!
//! Both fields use base64 serde helpers so the serialized vault stays
//! plain JSON.  Any other field is rejected: an entry carrying a
//! plaintext label (`site`, `username`) would expose the domain its tag
//! hides, and dropping it on the next dump would lose data silently.

use serde::{Deserialize, Serialize};

use super::format::{base64_decode, base64_decode_array, base64_encode};
use crate::crypto::encryption::NONCE_LEN;

/// One stored password, keyed in the vault by its domain tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Entry {
    /// AES-GCM output over the padded password (tag appended).
    #[serde(serialize_with = "base64_encode", deserialize_with = "base64_decode")]
    pub ciphertext: Vec<u8>,

    /// The nonce used for this encryption.  Fresh on every `set`.
    #[serde(serialize_with = "base64_encode", deserialize_with = "base64_decode_array")]
    pub iv: [u8; NONCE_LEN],
}
