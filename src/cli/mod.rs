//! CLI command handling module
//!
//! Handles all CLI subcommands and argument parsing.

mod args;
mod commands;
mod error;
mod logging;
mod version;

pub use args::{Args, Command, ConnectionArgs, CreateSecretTokenArgs};
pub use commands::{ConfigSubcommand, handle_config_command};
pub use error::format_error;
pub use logging::*;
pub use version::display_version;
