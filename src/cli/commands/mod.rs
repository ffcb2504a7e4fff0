//! One module per subcommand, each exposing `execute`.

pub mod completions;
pub mod get;
pub mod info;
pub mod init;
pub mod remove;
pub mod set;
pub mod verify;
pub mod version;
