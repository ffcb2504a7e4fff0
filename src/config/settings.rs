use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::crypto::kdf::DEFAULT_ITERATIONS;
use crate::errors::{KeychainError, Result};
use crate::storage::FileStorage;

/// Project-level configuration, loaded from `.keychain.toml`.
///
/// Every field has a sensible default so the keychain works
/// out-of-the-box without any config file at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Directory (relative to project root) where vault files are stored.
    #[serde(default = "default_vault_dir")]
    pub vault_dir: String,

    /// Vault name used when none is given on the command line.
    #[serde(default = "default_vault_name")]
    pub vault_name: String,

    /// PBKDF2 iteration count for newly created vaults.
    /// Existing vaults always use the count stored inside them.
    #[serde(default = "default_iterations")]
    pub iterations: u32,
}

// ── Serde default helpers ────────────────────────────────────────────

fn default_vault_dir() -> String {
    ".keychain".to_string()
}

fn default_vault_name() -> String {
    "default".to_string()
}

fn default_iterations() -> u32 {
    DEFAULT_ITERATIONS
}

// ── Implementation ───────────────────────────────────────────────────

impl Default for Settings {
    fn default() -> Self {
        Self {
            vault_dir: default_vault_dir(),
            vault_name: default_vault_name(),
            iterations: default_iterations(),
        }
    }
}

impl Settings {
    /// Name of the config file we look for in the project root.
    const FILE_NAME: &'static str = ".keychain.toml";

    /// Load settings from `<project_dir>/.keychain.toml`.
    ///
    /// If the file does not exist, sensible defaults are returned.
    /// If the file exists but cannot be parsed, an error is returned.
    pub fn load(project_dir: &Path) -> Result<Self> {
        let config_path = project_dir.join(Self::FILE_NAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path)?;

        let settings: Settings = toml::from_str(&contents).map_err(|e| {
            KeychainError::Config(format!("Failed to parse {}: {e}", config_path.display()))
        })?;

        tracing::debug!(path = %config_path.display(), "loaded settings");
        Ok(settings)
    }

    /// Directory holding the vault files.
    ///
    /// Example: `project_dir/.keychain`
    pub fn vault_dir_path(&self, project_dir: &Path) -> PathBuf {
        project_dir.join(&self.vault_dir)
    }

    /// Storage handle for the configured vault.
    pub fn storage(&self, project_dir: &Path) -> FileStorage {
        FileStorage::new(&self.vault_dir_path(project_dir), &self.vault_name)
    }
}

// ── Tests ────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn default_settings_are_sensible() {
        let s = Settings::default();
        assert_eq!(s.vault_dir, ".keychain");
        assert_eq!(s.vault_name, "default");
        assert_eq!(s.iterations, 100_000);
    }

    #[test]
    fn load_returns_defaults_when_no_config_file() {
        let tmp = TempDir::new().unwrap();
        let settings = Settings::load(tmp.path()).unwrap();
        assert_eq!(settings.vault_name, "default");
    }

    #[test]
    fn load_parses_toml_file() {
        let tmp = TempDir::new().unwrap();
        let config = r#"
vault_dir = "secrets"
vault_name = "work"
iterations = 250000
"#;
        fs::write(tmp.path().join(".keychain.toml"), config).unwrap();

        let settings = Settings::load(tmp.path()).unwrap();
        assert_eq!(settings.vault_dir, "secrets");
        assert_eq!(settings.vault_name, "work");
        assert_eq!(settings.iterations, 250_000);
    }

    #[test]
    fn load_uses_defaults_for_missing_fields() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(".keychain.toml"), "iterations = 5000\n").unwrap();

        let settings = Settings::load(tmp.path()).unwrap();
        assert_eq!(settings.iterations, 5_000);
        // Rest should be defaults
        assert_eq!(settings.vault_dir, ".keychain");
        assert_eq!(settings.vault_name, "default");
    }

    #[test]
    fn load_errors_on_invalid_toml() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(".keychain.toml"), "not valid {{toml").unwrap();

        assert!(matches!(
            Settings::load(tmp.path()),
            Err(KeychainError::Config(_))
        ));
    }

    #[test]
    fn storage_builds_correct_paths() {
        let s = Settings {
            vault_dir: "secrets".to_string(),
            ..Settings::default()
        };
        let storage = s.storage(Path::new("/home/user/project"));
        assert_eq!(
            storage.vault_path(),
            Path::new("/home/user/project/secrets/default.json")
        );
    }
}
