// CLI module
// Command-line interface, argument parsing and the interactive session

mod args;
mod session;

pub use args::{CliArgs, Command, QueryCommand};
pub use session::run_session;

use clap::Parser;

/// Parse command-line arguments using clap
///
/// If parsing fails (invalid arguments, missing input file or command, or
/// --help), clap prints an error or help text and exits the process.
pub fn parse_args() -> CliArgs {
    CliArgs::parse()
}
