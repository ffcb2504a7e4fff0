//! `keychain verify` — check the stored digest without unlocking.

use crate::cli::output;
use crate::cli::{storage, Cli};
use crate::errors::{KeychainError, Result};
use crate::vault::integrity;

/// Execute the `verify` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let storage = storage(cli)?;
    let (bytes, digest) = storage.read()?;

    if !integrity::verify(&bytes, &digest) {
        return Err(KeychainError::Integrity);
    }

    output::success(&format!(
        "Digest matches {}",
        storage.vault_path().display()
    ));
    Ok(())
}
