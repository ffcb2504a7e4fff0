//! `keychain get` — print the password stored for a domain.

use crate::cli::{open_keychain, Cli};
use crate::errors::{KeychainError, Result};

/// Execute the `get` command.
pub fn execute(cli: &Cli, domain: &str) -> Result<()> {
    let (_storage, keychain) = open_keychain(cli)?;

    let password = keychain
        .get(domain)?
        .ok_or_else(|| KeychainError::NotFound(domain.to_string()))?;
    println!("{}", password.as_str());

    Ok(())
}
