//! The keychain: an unlocked vault plus the keys that open it.
//!
//! A `Keychain` only exists in the unlocked state.  It is produced by
//! [`Keychain::init`] or [`Keychain::load`], and every entry operation
//! runs against its owned in-memory [`Vault`].  Keys are wiped when the
//! keychain is dropped.
//!
//! The keychain does no locking of its own; callers sharing one across
//! threads must serialize mutations (e.g. behind a `Mutex`).

use std::fmt;

use zeroize::{Zeroize, Zeroizing};

use crate::crypto::domain::{tag_for, DomainTag};
use crate::crypto::encryption::{decrypt, encrypt, generate_nonce};
use crate::crypto::kdf::{derive_master_secret_with_iterations, generate_salt, DEFAULT_ITERATIONS};
use crate::crypto::keys::SubKeys;
use crate::crypto::padding;
use crate::errors::{KeychainError, Result};

use super::entry::Entry;
use super::format::{self, Vault};
use super::integrity::{self, Digest};

/// The main keychain handle.  Create one with `Keychain::init` or
/// `Keychain::load`, then use its methods to manage passwords.
pub struct Keychain {
    /// Encryption and authentication keys (zeroized on drop).
    keys: SubKeys,

    /// Entries, salt and iteration count.
    vault: Vault,
}

impl Keychain {
    // ------------------------------------------------------------------
    // Construction
    // ------------------------------------------------------------------

    /// Create a new, empty keychain with the default iteration count.
    pub fn init(password: &str) -> Result<Self> {
        Self::init_with_iterations(password, DEFAULT_ITERATIONS)
    }

    /// Create a new, empty keychain with an explicit iteration count.
    ///
    /// The count is stored in the vault so `load` derives the same keys.
    pub fn init_with_iterations(password: &str, iterations: u32) -> Result<Self> {
        validate_master_password(password)?;

        let salt = generate_salt();
        let master = derive_master_secret_with_iterations(password.as_bytes(), &salt, iterations)?;
        let keys = master.derive_subkeys()?;

        tracing::debug!(iterations, "initialized new keychain");

        Ok(Self {
            keys,
            vault: Vault::empty(salt, iterations),
        })
    }

    /// Reconstruct a keychain from serialized bytes.
    ///
    /// 1. If `expected_digest` is given, the bytes must hash to it; a
    ///    mismatch is reported as [`KeychainError::Integrity`] before
    ///    anything is parsed or decrypted.
    /// 2. Keys are re-derived from the stored salt and iteration count.
    /// 3. The first entry (in tag order) is decrypted as a probe.  A
    ///    failure means the password is wrong or the entry is corrupt and
    ///    yields [`KeychainError::Authentication`].  An empty vault cannot
    ///    be probed and is accepted.
    pub fn load(password: &str, serialized: &[u8], expected_digest: Option<&Digest>) -> Result<Self> {
        if let Some(expected) = expected_digest {
            if !integrity::verify(serialized, expected) {
                return Err(KeychainError::Integrity);
            }
        }

        validate_master_password(password)?;

        let vault = format::from_bytes(serialized)?;
        let master =
            derive_master_secret_with_iterations(password.as_bytes(), &vault.salt, vault.iterations)?;
        let keys = master.derive_subkeys()?;

        let keychain = Self { keys, vault };
        keychain.probe()?;

        tracing::debug!(
            entries = keychain.vault.kvs.len(),
            iterations = keychain.vault.iterations,
            verified_digest = expected_digest.is_some(),
            "loaded keychain"
        );

        Ok(keychain)
    }

    /// Decrypt one existing entry to confirm the derived keys are right.
    fn probe(&self) -> Result<()> {
        let Some((tag, entry)) = self.vault.kvs.iter().next() else {
            return Ok(());
        };

        let mut plaintext = self
            .open_entry(tag, entry)
            .map_err(|_| KeychainError::Authentication)?;
        plaintext.zeroize();
        Ok(())
    }

    // ------------------------------------------------------------------
    // Entry operations
    // ------------------------------------------------------------------

    /// Store `password` for `domain`, replacing any existing entry.
    ///
    /// The entry is built completely before it is inserted, so a failure
    /// leaves the vault unchanged.
    pub fn set(&mut self, domain: &str, password: &str) -> Result<()> {
        let tag = self.tag(domain)?;
        let frame = padding::pad(password)?;

        let iv = generate_nonce();
        let ciphertext = encrypt(&self.keys.encryption, &iv, &frame, tag.as_bytes())?;

        self.vault.kvs.insert(tag, Entry { ciphertext, iv });
        Ok(())
    }

    /// Return the password stored for `domain`.
    ///
    /// `Ok(None)` means no entry exists.  An entry that fails to
    /// authenticate is an error, never `None`.
    pub fn get(&self, domain: &str) -> Result<Option<Zeroizing<String>>> {
        let tag = self.tag(domain)?;
        let Some(entry) = self.vault.kvs.get(&tag) else {
            return Ok(None);
        };

        let frame = self.open_entry(&tag, entry)?;
        padding::unpad(frame).map(Some)
    }

    /// Remove the entry for `domain`.  Returns `true` if one existed.
    pub fn remove(&mut self, domain: &str) -> Result<bool> {
        let tag = self.tag(domain)?;
        Ok(self.vault.kvs.remove(&tag).is_some())
    }

    /// Returns `true` if an entry exists for `domain`.
    ///
    /// No decryption is performed.
    pub fn contains(&self, domain: &str) -> Result<bool> {
        let tag = self.tag(domain)?;
        Ok(self.vault.kvs.contains_key(&tag))
    }

    // ------------------------------------------------------------------
    // Persistence
    // ------------------------------------------------------------------

    /// Serialize the vault and compute its digest.
    ///
    /// The caller must store the digest separately from the bytes.
    pub fn dump(&self) -> Result<(Vec<u8>, Digest)> {
        let bytes = format::to_bytes(&self.vault)?;
        let digest = integrity::digest(&bytes);

        tracing::debug!(
            entries = self.vault.kvs.len(),
            bytes = bytes.len(),
            "dumped keychain"
        );

        Ok((bytes, digest))
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.vault.kvs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vault.kvs.is_empty()
    }

    /// PBKDF2 iteration count this vault was created with.
    pub fn iterations(&self) -> u32 {
        self.vault.iterations
    }

    /// The vault's PBKDF2 salt.
    pub fn salt(&self) -> &[u8] {
        &self.vault.salt
    }

    /// The domain tag for `domain` under this keychain's authentication key.
    pub fn tag(&self, domain: &str) -> Result<DomainTag> {
        if domain.is_empty() {
            return Err(KeychainError::Validation("domain cannot be empty".into()));
        }
        tag_for(&self.keys.authentication, domain)
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    /// Decrypt an entry with its own tag as associated data.
    fn open_entry(&self, tag: &DomainTag, entry: &Entry) -> Result<Vec<u8>> {
        decrypt(
            &self.keys.encryption,
            &entry.iv,
            &entry.ciphertext,
            tag.as_bytes(),
        )
    }
}

impl fmt::Debug for Keychain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Keychain")
            .field("entries", &self.vault.kvs.len())
            .field("iterations", &self.vault.iterations)
            .finish_non_exhaustive()
    }
}

fn validate_master_password(password: &str) -> Result<()> {
    if password.is_empty() {
        return Err(KeychainError::Validation(
            "master password cannot be empty".into(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const FAST: u32 = 1_000;

    #[test]
    fn probe_uses_entry_tag_as_aad() {
        let mut kc = Keychain::init_with_iterations("pw", FAST).unwrap();
        kc.set("a.com", "one").unwrap();
        kc.set("b.com", "two").unwrap();

        // Swap the two entries under each other's tags.
        let tag_a = kc.tag("a.com").unwrap();
        let tag_b = kc.tag("b.com").unwrap();
        let a = kc.vault.kvs[&tag_a].clone();
        let b = kc.vault.kvs[&tag_b].clone();
        kc.vault.kvs.insert(tag_a, b);
        kc.vault.kvs.insert(tag_b, a);

        let (bytes, _) = kc.dump().unwrap();
        assert!(matches!(
            Keychain::load("pw", &bytes, None),
            Err(KeychainError::Authentication)
        ));
    }

    #[test]
    fn flipped_ciphertext_bit_fails_get_with_crypto_error() {
        let mut kc = Keychain::init_with_iterations("pw", FAST).unwrap();
        kc.set("a.com", "one").unwrap();
        kc.set("b.com", "two").unwrap();

        let tag = kc.tag("b.com").unwrap();
        if let Some(entry) = kc.vault.kvs.get_mut(&tag) {
            entry.ciphertext[3] ^= 0x01;
        }

        assert!(matches!(kc.get("b.com"), Err(KeychainError::Crypto)));
        assert_eq!(kc.get("a.com").unwrap().unwrap().as_str(), "one");
    }

    #[test]
    fn failed_set_leaves_vault_untouched() {
        let mut kc = Keychain::init_with_iterations("pw", FAST).unwrap();
        kc.set("a.com", "original").unwrap();
        let before = kc.vault.clone();

        assert!(kc.set("a.com", &"x".repeat(padding::FRAME_LEN + 1)).is_err());
        assert_eq!(kc.vault, before);
        assert_eq!(kc.get("a.com").unwrap().unwrap().as_str(), "original");
    }

    #[test]
    fn each_set_uses_a_fresh_nonce() {
        let mut kc = Keychain::init_with_iterations("pw", FAST).unwrap();
        let tag = kc.tag("a.com").unwrap();

        kc.set("a.com", "same").unwrap();
        let first = kc.vault.kvs[&tag].clone();
        kc.set("a.com", "same").unwrap();
        let second = kc.vault.kvs[&tag].clone();

        assert_ne!(first.iv, second.iv);
        assert_ne!(first.ciphertext, second.ciphertext);
    }

    #[test]
    fn ciphertext_length_is_independent_of_password_length() {
        let mut kc = Keychain::init_with_iterations("pw", FAST).unwrap();
        kc.set("short.com", "a").unwrap();
        kc.set("long.com", &"b".repeat(padding::FRAME_LEN)).unwrap();

        let short = &kc.vault.kvs[&kc.tag("short.com").unwrap()];
        let long = &kc.vault.kvs[&kc.tag("long.com").unwrap()];
        assert_eq!(short.ciphertext.len(), long.ciphertext.len());
    }

    #[test]
    fn debug_output_hides_keys() {
        let kc = Keychain::init_with_iterations("pw", FAST).unwrap();
        let rendered = format!("{kc:?}");
        assert!(rendered.contains("entries"));
        assert!(!rendered.contains("keys"));
    }
}
