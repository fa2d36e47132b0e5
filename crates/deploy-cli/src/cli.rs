//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Deploy a built plugin bundle into its installation directory
///
/// Clears the destination directory's contents and mirrors the source tree
/// into it. With no arguments, copies the `dist` directory next to this
/// executable's parent into the default plugin installation directory.
#[derive(Parser, Debug)]
#[command(name = "deploy")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Source directory to copy from (defaults to ../dist relative to the executable)
    #[arg(short, long, global = true)]
    pub source: Option<PathBuf>,

    /// Destination directory to overwrite (defaults to the plugin installation directory)
    #[arg(short, long, global = true)]
    pub dest: Option<PathBuf>,

    /// Path to a deploy.toml (defaults to ./deploy.toml when present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Preview actions without touching the filesystem
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Output the run report as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Never wait for Enter before exiting
    #[arg(long, global = true)]
    pub no_pause: bool,

    /// The command to run (defaults to sync)
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Synchronize the destination with the source (the default command)
    Sync,

    /// Generate shell completions
    ///
    /// Examples:
    ///   deploy completions bash > ~/.local/share/bash-completion/completions/deploy
    ///   deploy completions zsh > ~/.zfunc/_deploy
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_no_args() {
        let cli = Cli::parse_from(["deploy"]);
        assert!(!cli.verbose);
        assert!(cli.source.is_none());
        assert!(cli.dest.is_none());
        assert!(!cli.dry_run);
        assert!(!cli.no_pause);
        assert!(cli.command.is_none());
    }

    #[test]
    fn parse_source_and_dest() {
        let cli = Cli::parse_from(["deploy", "--source", "/build/dist", "--dest", "/plugins/x"]);
        assert_eq!(cli.source, Some(PathBuf::from("/build/dist")));
        assert_eq!(cli.dest, Some(PathBuf::from("/plugins/x")));
    }

    #[test]
    fn parse_short_flags() {
        let cli = Cli::parse_from(["deploy", "-s", "dist", "-d", "out", "-c", "deploy.toml"]);
        assert_eq!(cli.source, Some(PathBuf::from("dist")));
        assert_eq!(cli.dest, Some(PathBuf::from("out")));
        assert_eq!(cli.config, Some(PathBuf::from("deploy.toml")));
    }

    #[test]
    fn parse_dry_run_and_json() {
        let cli = Cli::parse_from(["deploy", "--dry-run", "--json"]);
        assert!(cli.dry_run);
        assert!(cli.json);
    }

    #[test]
    fn parse_no_pause() {
        let cli = Cli::parse_from(["deploy", "--no-pause"]);
        assert!(cli.no_pause);
    }

    #[test]
    fn parse_verbose_flag() {
        let cli = Cli::parse_from(["deploy", "-v"]);
        assert!(cli.verbose);
    }

    #[test]
    fn parse_sync_subcommand() {
        let cli = Cli::parse_from(["deploy", "sync"]);
        assert!(matches!(cli.command, Some(Commands::Sync)));
    }

    #[test]
    fn parse_sync_subcommand_with_roots() {
        let cli = Cli::parse_from(["deploy", "sync", "--source", "dist", "--dest", "out"]);
        assert!(matches!(cli.command, Some(Commands::Sync)));
        assert_eq!(cli.source, Some(PathBuf::from("dist")));
        assert_eq!(cli.dest, Some(PathBuf::from("out")));
    }

    #[test]
    fn parse_completions_command() {
        let cli = Cli::parse_from(["deploy", "completions", "bash"]);
        assert!(matches!(cli.command, Some(Commands::Completions { .. })));
    }
}
