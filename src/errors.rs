use std::path::PathBuf;
use thiserror::Error;

/// All errors that can occur in the keychain.
#[derive(Debug, Error)]
pub enum KeychainError {
    // --- Input errors ---
    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Invalid vault format: {0}")]
    InvalidVaultFormat(String),

    // --- Security errors ---
    #[error("Digest mismatch — vault was rolled back or tampered with")]
    Integrity,

    #[error("Wrong master password or corrupted vault")]
    Authentication,

    #[error("Entry failed authentication — corrupted ciphertext or swapped entry")]
    Crypto,

    #[error("Key derivation failed: {0}")]
    KeyDerivation(String),

    // --- Lookup errors ---
    #[error("No password stored for '{0}'")]
    NotFound(String),

    // --- Storage errors ---
    #[error("Vault not found at {0}")]
    StorageNotFound(PathBuf),

    #[error("Vault already exists at {0}")]
    StorageAlreadyExists(PathBuf),

    // --- Config errors ---
    #[error("Config file error: {0}")]
    Config(String),

    // --- IO errors ---
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // --- Serialization errors ---
    #[error("Serialization error: {0}")]
    Serialization(String),

    // --- CLI errors ---
    #[error("Command failed: {0}")]
    CommandFailed(String),
}

/// Convenience type alias for keychain results.
pub type Result<T> = std::result::Result<T, KeychainError>;
