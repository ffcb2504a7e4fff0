//! Password keychain core.
//!
//! A master password is stretched with PBKDF2 into a master secret,
//! which is split into an encryption key and an authentication key.
//! Domains are stored as HMAC tags; passwords as AES-GCM ciphertexts
//! bound to their tag.  Serialized vaults carry a separate SHA-256
//! digest for rollback and tamper detection.
//!
//! ```no_run
//! use keychain::vault::Keychain;
//!
//! # fn main() -> keychain::errors::Result<()> {
//! let mut kc = Keychain::init("M@ster1")?;
//! kc.set("example.com", "Sup3rSecret!")?;
//! let (bytes, digest) = kc.dump()?;
//!
//! let kc = Keychain::load("M@ster1", &bytes, Some(&digest))?;
//! assert_eq!(kc.get("example.com")?.as_deref().map(String::as_str), Some("Sup3rSecret!"));
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod crypto;
pub mod errors;
pub mod storage;
pub mod vault;

pub use errors::{KeychainError, Result};
pub use vault::{Digest, Keychain};
