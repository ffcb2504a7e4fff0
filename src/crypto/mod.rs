//! Cryptographic primitives for the keychain.
//!
//! This module provides:
//! - PBKDF2-HMAC-SHA256 master secret derivation (`kdf`)
//! - HMAC-labeled encryption/authentication subkeys (`keys`)
//! - HMAC domain tags (`domain`)
//! - AES-256-GCM with associated data (`encryption`)
//! - Fixed-length password framing (`padding`)

pub mod domain;
pub mod encryption;
pub mod kdf;
pub mod keys;
pub mod padding;

// Re-export the most commonly used items so callers can write:
//   use crate::crypto::{encrypt, decrypt, tag_for, ...};
pub use domain::{tag_for, DomainTag};
pub use encryption::{decrypt, encrypt, generate_nonce};
pub use kdf::{
    derive_master_secret, derive_master_secret_with_iterations, generate_salt, DEFAULT_ITERATIONS,
};
pub use keys::{derive_subkeys, AuthenticationKey, EncryptionKey, MasterSecret, SubKeys};
