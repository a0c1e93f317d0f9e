//! CLI argument parsing
//!
//! Uses clap for argument parsing with derive macros.

use crate::dialog::MergePolicy;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use std::io;
use std::path::PathBuf;

/// Declarative shared dialog service, shown off in a small notes TUI
#[derive(Parser, Debug)]
#[command(name = "modal-relay")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "RUST_LOG", default_value = "info", global = true)]
    pub log_level: String,

    /// Config file (default: ~/.config/modal-relay/config.toml)
    #[arg(short, long, env = "MODAL_RELAY_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Override the config file's dialog merge policy
    #[arg(short, long, value_enum, global = true)]
    pub merge_policy: Option<MergePolicy>,

    /// Tick rate in ticks per second (default: 1.0)
    #[arg(short = 't', long, default_value_t = 1.0, global = true)]
    pub tick_rate: f64,

    /// Frame rate in frames per second (default: 30.0)
    #[arg(short = 'F', long, default_value_t = 30.0, global = true)]
    pub frame_rate: f64,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print an example config file, or write the defaults to disk
    Config {
        /// Write default config to the config path instead of printing
        #[arg(long, default_value_t = false)]
        write: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Generate shell completions and print to stdout
pub fn print_completions(shell: Shell) {
    let mut cmd = Cli::command();
    generate(shell, &mut cmd, "modal-relay", &mut io::stdout());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::try_parse_from(["modal-relay"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.merge_policy.is_none());
        assert!((cli.frame_rate - 30.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_cli_merge_policy_flag() {
        let cli = Cli::try_parse_from(["modal-relay", "--merge-policy", "merge"]).unwrap();
        assert_eq!(cli.merge_policy, Some(MergePolicy::Merge));

        assert!(Cli::try_parse_from(["modal-relay", "--merge-policy", "deep"]).is_err());
    }

    #[test]
    fn test_cli_config_subcommand() {
        let cli = Cli::try_parse_from(["modal-relay", "config", "--write"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Config { write: true })));
    }

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }
}
