//! Sprintboard CLI - run backlog, sprint and issue operations.
//!
//! Commands:
//! - `sprintboard exec [JSON]`: Execute operations (JSON argument or stdin)
//! - `sprintboard ops`: List every operation and its parameters
//! - `sprintboard config`: Print the effective configuration
//!
//! Exit codes:
//! - 0: Success
//! - 1: Error (any failed operation)

use clap::Parser;
use tracing_subscriber::EnvFilter;

use sprintboard::SprintboardConfig;
use sprintboard_cli::{run, Cli, Commands};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match SprintboardConfig::load(Some(cli.store.as_path())) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    // Initialize tracing with appropriate level
    let filter = if cli.debug {
        EnvFilter::new("sprintboard=debug,sprintboard_cli=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(std::io::stderr)
        .init();

    let exit_code = match cli.command {
        Commands::Exec { input } => {
            match run::open_context(&cli.store, cli.actor.as_deref(), config).await {
                Ok(ctx) => run::run_exec(&ctx, input).await,
                Err(e) => {
                    eprintln!("Error: {}", e);
                    1
                }
            }
        }
        Commands::Ops => run::run_ops(),
        Commands::Config => run::run_config(&config),
    };

    std::process::exit(exit_code);
}
