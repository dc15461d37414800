//! Interactive session over one store
//!
//! A session reads commands line by line and runs each against the same
//! [`TransactionStore`], so a transaction added with `add` is visible to every
//! later command. Each line uses the same syntax as the command-line
//! subcommands, without the program name and input file:
//!
//! ```text
//! add --id 9 --date 2024-04-01 --amount -3 --type debit
//! total
//! by-merchant "Bean There"
//! quit
//! ```
//!
//! A line that fails to parse, or a query that fails (average of an empty
//! store, for instance), prints a message and the session continues. Only
//! I/O errors on the input or output end it early.

use super::args::QueryCommand;
use crate::core::TransactionStore;
use crate::query::execute;
use crate::types::AnalyticsError;
use clap::Parser;
use std::io::{BufRead, Write};
use tracing::{debug, info};

/// One line of session input
#[derive(Parser, Debug)]
#[command(name = "transaction-analytics", no_binary_name = true)]
struct SessionLine {
    #[command(subcommand)]
    command: QueryCommand,
}

/// Run commands from `input` against `store` until end of input or `quit`
///
/// Returns the number of commands that ran successfully.
///
/// # Errors
///
/// Returns an error only when reading `input` or writing `output` fails.
pub fn run_session<R: BufRead>(
    store: &mut TransactionStore,
    input: R,
    output: &mut dyn Write,
) -> Result<usize, AnalyticsError> {
    let mut executed = 0usize;

    for (index, line) in input.lines().enumerate() {
        let line = line?;
        let line = line.trim();

        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if matches!(line, "quit" | "exit") {
            break;
        }

        let words = match split_words(line) {
            Ok(words) => words,
            Err(message) => {
                let error = AnalyticsError::ParseError {
                    line: Some(index as u64 + 1),
                    message,
                };
                writeln!(output, "Error: {}", error)?;
                continue;
            }
        };

        let command = match SessionLine::try_parse_from(&words) {
            Ok(parsed) => parsed.command,
            Err(e) => {
                write!(output, "{}", e.render())?;
                continue;
            }
        };

        debug!(line = index + 1, ?command, "session command");
        match execute(store, command.to_query()) {
            Ok(result) => {
                result.write_to(output)?;
                executed += 1;
            }
            Err(e) => writeln!(output, "Error: {}", e)?,
        }
    }

    output.flush()?;
    info!(executed, records = store.len(), "session finished");

    Ok(executed)
}

/// Split a line into words on whitespace, honouring single and double quotes
fn split_words(line: &str) -> Result<Vec<String>, String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut quote: Option<char> = None;

    for c in line.chars() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => current.push(c),
            None if c == '"' || c == '\'' => {
                quote = Some(c);
                in_word = true;
            }
            None if c.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            None => {
                current.push(c);
                in_word = true;
            }
        }
    }

    if let Some(q) = quote {
        return Err(format!("unterminated {} quote", q));
    }
    if in_word {
        words.push(current);
    }

    Ok(words)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Transaction, TxDate, CREDIT, DEBIT};
    use rstest::{fixture, rstest};
    use rust_decimal::Decimal;

    #[fixture]
    fn store() -> TransactionStore {
        TransactionStore::from_transactions(vec![
            Transaction::new("1", TxDate::from_ymd(2024, 1, 5), Decimal::from(100), CREDIT)
                .with_merchant("Corner Shop"),
            Transaction::new("2", TxDate::from_ymd(2024, 1, 20), Decimal::from(-40), DEBIT),
        ])
    }

    fn run(store: &mut TransactionStore, input: &str) -> (usize, String) {
        let mut output = Vec::new();
        let executed = run_session(store, input.as_bytes(), &mut output).unwrap();
        (executed, String::from_utf8(output).unwrap())
    }

    #[rstest]
    #[case::plain("total 2024", &["total", "2024"])]
    #[case::extra_spaces("  find   7  ", &["find", "7"])]
    #[case::double_quotes("by-merchant \"Corner Shop\"", &["by-merchant", "Corner Shop"])]
    #[case::single_quotes("by-merchant 'Corner Shop'", &["by-merchant", "Corner Shop"])]
    #[case::empty_quotes("by-merchant \"\"", &["by-merchant", ""])]
    #[case::quote_inside_word("--description=\"a b\"", &["--description=a b"])]
    fn test_split_words(#[case] line: &str, #[case] expected: &[&str]) {
        assert_eq!(split_words(line).unwrap(), expected);
    }

    #[test]
    fn test_split_words_unterminated_quote() {
        assert!(split_words("by-merchant \"Corner").is_err());
    }

    #[rstest]
    fn test_added_transaction_is_seen_by_later_commands(mut store: TransactionStore) {
        let (executed, output) = run(
            &mut store,
            "add --id 3 --date 2024-02-01 --amount 10 --type debit\ntotal\nfind 3\n",
        );

        assert_eq!(executed, 3);
        assert_eq!(
            output,
            "Transaction 3 added (3 transactions in store)\n\
             70\n\
             transaction_id,transaction_date,transaction_amount,transaction_type,transaction_description,merchant_name,card_type\n\
             3,2024-02-01,10,debit,,,\n"
        );
        assert_eq!(store.len(), 3);
    }

    #[rstest]
    fn test_quoted_merchant_argument(mut store: TransactionStore) {
        let (_, output) = run(&mut store, "by-merchant \"Corner Shop\"\n");
        assert!(output.ends_with("1,2024-01-05,100,credit,,Corner Shop,\n"));
    }

    #[rstest]
    fn test_quit_stops_reading(mut store: TransactionStore) {
        let (executed, output) = run(&mut store, "total\nquit\ntotal-debit\n");

        assert_eq!(executed, 1);
        assert_eq!(output, "60\n");
    }

    #[rstest]
    fn test_blank_and_comment_lines_are_skipped(mut store: TransactionStore) {
        let (executed, output) = run(&mut store, "\n# running total\n   \ntotal\n");

        assert_eq!(executed, 1);
        assert_eq!(output, "60\n");
    }

    #[rstest]
    fn test_bad_lines_do_not_end_session(mut store: TransactionStore) {
        let (executed, output) = run(&mut store, "median\nfind \"1\ntotal\n");

        assert_eq!(executed, 1);
        assert!(output.contains("median"));
        assert!(output.contains("Error: Parse error at line 2: unterminated \" quote"));
        assert!(output.ends_with("60\n"));
    }

    #[test]
    fn test_query_errors_do_not_end_session() {
        let mut store = TransactionStore::new();
        let (executed, output) = run(
            &mut store,
            "average\nadd --id 1 --date 2024-01-01 --amount 4 --type credit\naverage\n",
        );

        assert_eq!(executed, 2);
        assert_eq!(
            output,
            "Error: Cannot compute average amount: the store is empty\n\
             Transaction 1 added (1 transactions in store)\n\
             4\n"
        );
    }

    #[rstest]
    fn test_shell_is_not_a_session_command(mut store: TransactionStore) {
        let (executed, _) = run(&mut store, "shell\n");
        assert_eq!(executed, 0);
    }
}
