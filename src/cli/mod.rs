//! CLI layer - Command-line interface

pub mod commands;
pub mod menu;
pub mod output;
pub mod prompt;

pub use commands::{BatchCli, Cli, Commands};
pub use menu::{run_menu, JournalSession, MenuCommand};
pub use output::{format_build_report, format_entry_list};
