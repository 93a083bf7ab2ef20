// CLI module
// Command-line interface, argument parsing, and command dispatch

mod args;
pub mod commands;
pub mod logging;

pub use args::{CliArgs, Command, Credentials, DEFAULT_STORE};
pub use commands::{execute, run};

use clap::Parser;

/// Parse command-line arguments using clap
///
/// If parsing fails (invalid arguments, missing required arguments, or
/// `--help`), clap prints the error or help text and exits the process.
pub fn parse_args() -> CliArgs {
    CliArgs::parse()
}
