//! Vault module — the keychain and its serialized form.
//!
//! This module provides:
//! - The `Entry` record type (`entry`)
//! - The JSON vault format (`format`)
//! - SHA-256 rollback/tamper digests (`integrity`)
//! - The `Keychain` that owns keys and entries (`keychain`)

pub mod entry;
pub mod format;
pub mod integrity;
pub mod keychain;

// Re-export the most commonly used items.
pub use entry::Entry;
pub use format::Vault;
pub use integrity::{digest, verify, Digest};
pub use keychain::Keychain;
