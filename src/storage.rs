//! File-backed storage for serialized vaults.
//!
//! A vault named `NAME` in directory `DIR` is kept as two sibling files:
//!
//! ```text
//! DIR/NAME.json     serialized vault bytes
//! DIR/NAME.digest   base64 SHA-256 of those bytes
//! ```
//!
//! The keychain itself never touches the filesystem; only the CLI does,
//! through this module.

use std::fs;
use std::path::{Path, PathBuf};

use crate::errors::{KeychainError, Result};
use crate::vault::Digest;

/// Location of one vault and its digest on disk.
#[derive(Debug, Clone)]
pub struct FileStorage {
    vault_path: PathBuf,
    digest_path: PathBuf,
}

impl FileStorage {
    /// Storage for vault `name` inside `dir`.
    pub fn new(dir: &Path, name: &str) -> Self {
        Self {
            vault_path: dir.join(format!("{name}.json")),
            digest_path: dir.join(format!("{name}.digest")),
        }
    }

    pub fn vault_path(&self) -> &Path {
        &self.vault_path
    }

    pub fn digest_path(&self) -> &Path {
        &self.digest_path
    }

    /// Returns `true` if a vault file is present.
    pub fn exists(&self) -> bool {
        self.vault_path.exists()
    }

    /// Read the vault bytes and the stored digest.
    pub fn read(&self) -> Result<(Vec<u8>, Digest)> {
        if !self.vault_path.exists() {
            return Err(KeychainError::StorageNotFound(self.vault_path.clone()));
        }
        if !self.digest_path.exists() {
            return Err(KeychainError::StorageNotFound(self.digest_path.clone()));
        }

        let bytes = fs::read(&self.vault_path)?;
        let digest: Digest = fs::read_to_string(&self.digest_path)?.parse()?;

        Ok((bytes, digest))
    }

    /// Write the vault bytes and digest, each **atomically**.
    ///
    /// The digest is written last, so an interrupted write leaves a
    /// digest that no longer matches and the next load refuses it.
    pub fn write(&self, bytes: &[u8], digest: &Digest) -> Result<()> {
        if let Some(parent) = self.vault_path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
                tracing::debug!(dir = %parent.display(), "created vault directory");
            }
        }

        write_atomic(&self.vault_path, bytes)?;
        write_atomic(&self.digest_path, format!("{digest}\n").as_bytes())?;

        tracing::debug!(path = %self.vault_path.display(), "saved vault");
        Ok(())
    }

    /// Write only if no vault exists yet.
    pub fn create(&self, bytes: &[u8], digest: &Digest) -> Result<()> {
        if self.exists() {
            return Err(KeychainError::StorageAlreadyExists(self.vault_path.clone()));
        }
        self.write(bytes, digest)
    }
}

/// Write to a temp file in the same directory, then rename over `path`.
///
/// The rename ensures readers never see a half-written file.
fn write_atomic(path: &Path, data: &[u8]) -> Result<()> {
    let parent = path.parent().unwrap_or(Path::new("."));
    let tmp_path = parent.join(format!(
        ".{}.tmp",
        path.file_name().unwrap_or_default().to_string_lossy()
    ));

    fs::write(&tmp_path, data)?;
    fs::rename(&tmp_path, path)?;
    Ok(())
}
