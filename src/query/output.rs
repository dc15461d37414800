//! Rendering of query results

use crate::io::write_transactions_csv;
use crate::types::{AnalyticsError, Transaction};
use rust_decimal::Decimal;
use std::io::Write;

/// Owned result of one query
#[derive(Debug, Clone, PartialEq)]
pub enum QueryOutput {
    /// A sequence of transactions, written as CSV
    Transactions(Vec<Transaction>),
    /// A sequence of strings, one per line
    Labels(Vec<String>),
    Amount(Decimal),
    /// A single key such as a month key or the dominant type
    Label(String),
    /// Result of an id lookup
    Lookup(Option<Transaction>),
    /// Confirmation of an append with the new record count
    Appended { id: String, count: usize },
}

impl QueryOutput {
    pub fn transactions<'a, I>(transactions: I) -> Self
    where
        I: IntoIterator<Item = &'a Transaction>,
    {
        QueryOutput::Transactions(transactions.into_iter().cloned().collect())
    }

    pub fn labels<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        QueryOutput::Labels(labels.into_iter().map(Into::into).collect())
    }

    /// Write the result as text
    ///
    /// Transactions use the CSV layout of the input files; a failed lookup
    /// prints `not found`.
    pub fn write_to(&self, output: &mut dyn Write) -> Result<(), AnalyticsError> {
        match self {
            QueryOutput::Transactions(transactions) => {
                write_transactions_csv(transactions, output)?
            }
            QueryOutput::Labels(labels) => {
                for label in labels {
                    writeln!(output, "{}", label)?;
                }
            }
            QueryOutput::Amount(amount) => writeln!(output, "{}", amount)?,
            QueryOutput::Label(label) => writeln!(output, "{}", label)?,
            QueryOutput::Lookup(Some(transaction)) => {
                write_transactions_csv([transaction], output)?
            }
            QueryOutput::Lookup(None) => writeln!(output, "not found")?,
            QueryOutput::Appended { id, count } => writeln!(
                output,
                "Transaction {} added ({} transactions in store)",
                id, count
            )?,
        }

        output.flush()?;
        Ok(())
    }
}
