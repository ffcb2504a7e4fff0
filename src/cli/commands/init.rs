//! `keychain init` — create a new, empty vault.

use crate::cli::output;
use crate::cli::{prompt_new_password, settings, Cli};
use crate::errors::{KeychainError, Result};
use crate::vault::Keychain;

/// Execute the `init` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let (cwd, settings) = settings(cli)?;
    let storage = settings.storage(&cwd);

    // 1. Refuse to overwrite an existing vault.
    if storage.exists() {
        output::tip("Use `keychain set` to add passwords to the existing vault.");
        return Err(KeychainError::StorageAlreadyExists(
            storage.vault_path().to_path_buf(),
        ));
    }

    // 2. Prompt for a new master password (with confirmation).
    let password = prompt_new_password()?;

    // 3. Derive keys and persist the empty vault with its digest.
    let keychain = Keychain::init_with_iterations(&password, settings.iterations)?;
    let (bytes, digest) = keychain.dump()?;
    storage.create(&bytes, &digest)?;

    output::success(&format!(
        "Vault '{}' created at {}",
        settings.vault_name,
        storage.vault_path().display()
    ));
    output::tip("Run `keychain set <DOMAIN>` to store a password.");

    Ok(())
}
