//! Transaction Analytics CLI
//!
//! Loads an initial collection of transactions and runs one query over it.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- transactions.json total
//! cargo run -- transactions.csv total-by-date --year 2024 --month 1
//! cargo run -- transactions.json by-amount -50 50
//! cargo run -- --format json export.txt most-active-month
//! RUST_LOG=debug cargo run -- transactions.csv dominant-type
//! cargo run -- transactions.json shell < commands.txt
//! ```
//!
//! Query results go to stdout; logs and errors go to stderr. In `shell` mode
//! commands are read from stdin and a failing command is reported on stdout
//! without ending the session.
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Error (file not found, malformed input, query on an empty store, etc.)

use std::process;
use tracing_subscriber::EnvFilter;
use transaction_analytics::cli::{self, Command};
use transaction_analytics::{io, query};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = cli::parse_args();

    let mut output = std::io::stdout();
    let result = match &args.command {
        Command::Shell => io::load_store(&args.input_file, args.format).and_then(|mut store| {
            cli::run_session(&mut store, std::io::stdin().lock(), &mut output).map(|_| ())
        }),
        Command::Query(command) => query::process(
            &args.input_file,
            args.format,
            command.to_query(),
            &mut output,
        ),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
