//! CLI definition for the sprintboard command-line interface.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Sprintboard - backlog, sprint and issue operations over a file-backed store.
///
/// Operations are JSON objects such as `{"op": "add issue", "title": "...",
/// "project_id": "..."}` or arrays of them. Each result is printed as one
/// JSON object with `ok`, `data`, `error` and `kind`.
#[derive(Parser, Debug)]
#[command(name = "sprintboard")]
#[command(version)]
#[command(about = "Run backlog, sprint and issue operations against a file-backed store")]
#[command(
    long_about = "Sprintboard runs JSON operations against a directory of JSON documents.\n\n\
    Configuration is read from sprintboard.toml / .yaml / .json in the store directory \
    and from SPRINTBOARD_* environment variables.\n\n\
    Environment variables:\n  \
    RUST_LOG                      Log filter (overrides log_level)\n  \
    SPRINTBOARD_RESEQUENCE_POLICY trust or validate\n  \
    SPRINTBOARD_LOG_LEVEL         Default log filter"
)]
pub struct Cli {
    /// Enable debug output to stderr
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// Store directory
    #[arg(short, long, global = true, value_name = "DIR", default_value = ".sprintboard")]
    pub store: PathBuf,

    /// Actor id the operations run as
    #[arg(short, long, global = true, value_name = "ACTOR_ID")]
    pub actor: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Execute one operation or a JSON array of operations
    Exec {
        /// Operation JSON; read from stdin when omitted
        input: Option<String>,
    },

    /// List every operation with its parameters
    Ops,

    /// Print the effective configuration
    Config,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_exec_with_globals() {
        let cli = Cli::try_parse_from([
            "sprintboard",
            "--store",
            "/tmp/board",
            "--actor",
            "alice",
            "exec",
            r#"{"op":"list projects"}"#,
        ])
        .unwrap();
        assert_eq!(cli.store, PathBuf::from("/tmp/board"));
        assert_eq!(cli.actor.as_deref(), Some("alice"));
        assert!(matches!(cli.command, Commands::Exec { input: Some(_) }));
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["sprintboard", "ops"]).unwrap();
        assert_eq!(cli.store, PathBuf::from(".sprintboard"));
        assert!(cli.actor.is_none());
        assert!(!cli.debug);
    }
}
