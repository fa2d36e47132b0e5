//! plugin-deploy CLI
//!
//! Overwrites the plugin installation directory with a freshly built bundle.

mod cli;
mod commands;
mod error;
mod interactive;

use clap::{CommandFactory, Parser};
use colored::Colorize;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    // Setup tracing if verbose
    if cli.verbose {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::DEBUG)
            .with_target(true)
            .finish();
        tracing::subscriber::set_global_default(subscriber)
            .expect("Failed to set tracing subscriber");
        tracing::debug!("Verbose mode enabled");
    }

    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
            return;
        }
        // An explicit `deploy sync` and a bare `deploy` run the same way.
        Some(Commands::Sync) | None => {}
    }

    let pause = !cli.no_pause;
    let invocation = commands::SyncInvocation {
        source: cli.source,
        dest: cli.dest,
        config: cli.config,
        dry_run: cli.dry_run,
        json: cli.json,
    };

    let code = match commands::run_sync(&invocation) {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            1
        }
    };

    // Both exit paths wait, so a double-click launch keeps its window open
    // long enough to read the output.
    if pause {
        interactive::pause_before_exit();
    }
    std::process::exit(code);
}
