//! CLI module — Clap argument parser, output helpers, and command implementations.

pub mod commands;
pub mod output;

use std::path::PathBuf;

use clap::Parser;

use zeroize::Zeroizing;

use crate::config::Settings;
use crate::errors::{KeychainError, Result};
use crate::storage::FileStorage;
use crate::vault::Keychain;

/// Environment variable checked for the master password before prompting.
pub const PASSWORD_ENV: &str = "KEYCHAIN_PASSWORD";

/// Keychain CLI: domain password manager.
#[derive(Parser)]
#[command(name = "keychain", about = "Encrypted domain password keychain", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Vault directory (default from .keychain.toml, else .keychain)
    #[arg(long, global = true)]
    pub vault_dir: Option<String>,

    /// Vault name (default from .keychain.toml, else "default")
    #[arg(short, long, global = true)]
    pub name: Option<String>,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Create a new, empty vault
    Init,

    /// Store a password for a domain (add or replace)
    Set {
        /// Domain name (e.g. example.com)
        domain: String,
        /// Password (omit for interactive prompt)
        password: Option<String>,
    },

    /// Print the password stored for a domain
    Get {
        /// Domain name
        domain: String,
    },

    /// Remove the password stored for a domain
    Remove {
        /// Domain name
        domain: String,
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// Unlock the vault and show a summary
    Info,

    /// Check the stored digest against the stored vault (no password needed)
    Verify,

    /// Show version
    Version,

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

/// Get the master password, trying in order:
/// 1. `KEYCHAIN_PASSWORD` env var (scripts/CI)
/// 2. Interactive prompt
///
/// Returns `Zeroizing<String>` so the password is wiped from memory on drop.
pub fn prompt_password() -> Result<Zeroizing<String>> {
    if let Some(pw) = password_from_env() {
        return Ok(pw);
    }

    let pw = dialoguer::Password::new()
        .with_prompt("Enter master password")
        .interact()
        .map_err(|e| KeychainError::CommandFailed(format!("password prompt: {e}")))?;
    Ok(Zeroizing::new(pw))
}

/// Prompt for a new master password with confirmation (used during `init`).
///
/// Also respects `KEYCHAIN_PASSWORD` for scripted usage.
pub fn prompt_new_password() -> Result<Zeroizing<String>> {
    if let Some(pw) = password_from_env() {
        return Ok(pw);
    }

    let password = dialoguer::Password::new()
        .with_prompt("Choose master password")
        .with_confirmation(
            "Confirm master password",
            "Passwords do not match, try again",
        )
        .interact()
        .map_err(|e| KeychainError::CommandFailed(format!("password prompt: {e}")))?;

    Ok(Zeroizing::new(password))
}

fn password_from_env() -> Option<Zeroizing<String>> {
    match std::env::var(PASSWORD_ENV) {
        Ok(pw) if !pw.is_empty() => Some(Zeroizing::new(pw)),
        _ => None,
    }
}

/// Resolve settings for the current directory with CLI overrides applied.
pub fn settings(cli: &Cli) -> Result<(PathBuf, Settings)> {
    let cwd = std::env::current_dir()?;
    let mut settings = Settings::load(&cwd)?;

    if let Some(dir) = &cli.vault_dir {
        settings.vault_dir = dir.clone();
    }
    if let Some(name) = &cli.name {
        settings.vault_name = name.clone();
    }
    validate_vault_name(&settings.vault_name)?;

    Ok((cwd, settings))
}

/// Storage handle for the vault selected by the CLI arguments.
pub fn storage(cli: &Cli) -> Result<FileStorage> {
    let (cwd, settings) = settings(cli)?;
    Ok(settings.storage(&cwd))
}

/// Read the stored vault, check its digest, and unlock it.
pub fn open_keychain(cli: &Cli) -> Result<(FileStorage, Keychain)> {
    let storage = storage(cli)?;
    let (bytes, digest) = storage.read()?;

    let password = prompt_password()?;
    let keychain = Keychain::load(&password, &bytes, Some(&digest))?;

    Ok((storage, keychain))
}

/// Serialize the keychain and persist it together with its digest.
pub fn save_keychain(storage: &FileStorage, keychain: &Keychain) -> Result<()> {
    let (bytes, digest) = keychain.dump()?;
    storage.write(&bytes, &digest)
}

/// Validate that a vault name is safe to use as a file stem.
///
/// Allowed: lowercase letters, digits, hyphens. Must not be empty
/// or start/end with a hyphen. Max length 64 characters.
pub fn validate_vault_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(KeychainError::Config("vault name cannot be empty".into()));
    }

    if name.len() > 64 {
        return Err(KeychainError::Config(
            "vault name cannot exceed 64 characters".into(),
        ));
    }

    if !name
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        return Err(KeychainError::Config(format!(
            "vault name '{name}' is invalid — only lowercase letters, digits, and hyphens are allowed"
        )));
    }

    if name.starts_with('-') || name.ends_with('-') {
        return Err(KeychainError::Config(format!(
            "vault name '{name}' cannot start or end with a hyphen"
        )));
    }

    Ok(())
}
