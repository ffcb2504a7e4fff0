//! Project configuration (`.keychain.toml`).

pub mod settings;

pub use settings::Settings;
