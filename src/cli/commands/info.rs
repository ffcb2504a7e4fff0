//! `keychain info` — unlock the vault and print a summary.

use crate::cli::output;
use crate::cli::{open_keychain, Cli};
use crate::errors::Result;

/// Execute the `info` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let (storage, keychain) = open_keychain(cli)?;
    let (_, digest) = keychain.dump()?;

    output::print_summary(&[
        ("Vault", storage.vault_path().display().to_string()),
        ("Entries", keychain.len().to_string()),
        ("PBKDF2 iterations", keychain.iterations().to_string()),
        ("Digest", digest.to_string()),
    ]);

    Ok(())
}
