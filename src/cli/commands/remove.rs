//! `keychain remove` — delete the password stored for a domain.

use dialoguer::Confirm;

use crate::cli::output;
use crate::cli::{open_keychain, save_keychain, Cli};
use crate::errors::{KeychainError, Result};

/// Execute the `remove` command.
pub fn execute(cli: &Cli, domain: &str, force: bool) -> Result<()> {
    // Unless --force is set, ask for confirmation before deleting.
    if !force {
        let confirmed = Confirm::new()
            .with_prompt(format!("Remove password for '{domain}'?"))
            .default(false)
            .interact()
            .map_err(|e| KeychainError::CommandFailed(format!("confirm prompt: {e}")))?;

        if !confirmed {
            output::info("Cancelled.");
            return Ok(());
        }
    }

    let (storage, mut keychain) = open_keychain(cli)?;

    if !keychain.remove(domain)? {
        return Err(KeychainError::NotFound(domain.to_string()));
    }
    save_keychain(&storage, &keychain)?;

    output::success(&format!("Removed password for '{domain}'"));

    Ok(())
}
