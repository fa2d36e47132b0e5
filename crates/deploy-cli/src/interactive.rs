//! Pause-before-exit prompt for double-click launches
//!
//! When the tool is launched by double-click the console window closes with
//! the process, so both exit paths wait for a single Enter keypress first.
//! The wait is skipped when stdin is not an interactive terminal so scripts
//! and CI never hang.

use std::io::stdin;

use colored::Colorize;
use dialoguer::Input;
use is_terminal::IsTerminal;

/// Wait for Enter if, and only if, stdin is an interactive terminal.
pub fn pause_before_exit() {
    if !stdin().is_terminal() {
        return;
    }
    let _ = Input::<String>::new()
        .with_prompt("Press Enter to exit".dimmed().to_string())
        .allow_empty(true)
        .interact_text();
}
