use clap::Parser;
use keychain::cli::{Cli, Commands};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Log to stderr so stdout stays clean for `get` and `completions`.
fn init_logging() {
    let filter = EnvFilter::try_from_env("KEYCHAIN_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        )
        .with(filter)
        .init();
}

fn main() {
    init_logging();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init => keychain::cli::commands::init::execute(&cli),
        Commands::Set {
            ref domain,
            ref password,
        } => keychain::cli::commands::set::execute(&cli, domain, password.as_deref()),
        Commands::Get { ref domain } => keychain::cli::commands::get::execute(&cli, domain),
        Commands::Remove { ref domain, force } => {
            keychain::cli::commands::remove::execute(&cli, domain, force)
        }
        Commands::Info => keychain::cli::commands::info::execute(&cli),
        Commands::Verify => keychain::cli::commands::verify::execute(&cli),
        Commands::Version => keychain::cli::commands::version::execute(),
        Commands::Completions { shell } => keychain::cli::commands::completions::execute(shell),
    };

    if let Err(e) = result {
        keychain::cli::output::error(&e.to_string());
        std::process::exit(1);
    }
}
