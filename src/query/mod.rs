//! Query dispatch for the command-line front end
//!
//! This module turns one parsed command into a store operation and renders
//! its result as text. It is the only place where the store's borrowed
//! results are turned into owned, printable values.
//!
//! # Pipeline
//!
//! [`process`] mirrors a single invocation of the binary:
//! 1. Load the initial collection with [`crate::io::load_store`]
//! 2. Run the query with [`execute`]
//! 3. Write the [`QueryOutput`] to the given writer

mod output;

pub use output::QueryOutput;

use crate::core::TransactionStore;
use crate::io::{load_store, InputFormat};
use crate::types::{AnalyticsError, Transaction, TxDate};
use rust_decimal::Decimal;
use std::io::Write;
use std::path::Path;
use tracing::debug;

/// One store operation with its arguments
#[derive(Debug, Clone, PartialEq)]
pub enum Query {
    /// Append a transaction
    Append(Transaction),
    All,
    UniqueTypes,
    TotalAmount,
    TotalAmountByDate {
        year: Option<i32>,
        month: Option<u32>,
        day: Option<u32>,
    },
    ByType(String),
    InDateRange {
        start: TxDate,
        end: TxDate,
    },
    ByMerchant(String),
    AverageAmount,
    ByAmountRange {
        min: Decimal,
        max: Decimal,
    },
    TotalDebitAmount,
    MostActiveMonth,
    MostActiveDebitMonth,
    DominantType,
    BeforeDate(TxDate),
    FindById(String),
    Descriptions,
}

/// Run `query` against `store`
///
/// Only `Append` mutates the store.
///
/// # Errors
///
/// Propagates `EmptyStore` from `AverageAmount`, `NoData` from the
/// month-ranking queries and `ArithmeticOverflow` from the sums.
pub fn execute(store: &mut TransactionStore, query: Query) -> Result<QueryOutput, AnalyticsError> {
    debug!(?query, records = store.len(), "executing query");

    let output = match query {
        Query::Append(transaction) => {
            let id = transaction.id.clone();
            store.append(transaction);
            QueryOutput::Appended {
                id,
                count: store.len(),
            }
        }
        Query::All => QueryOutput::transactions(store.all()),
        Query::UniqueTypes => QueryOutput::labels(store.unique_types()),
        Query::TotalAmount => QueryOutput::Amount(store.total_amount()?),
        Query::TotalAmountByDate { year, month, day } => {
            QueryOutput::Amount(store.total_amount_by_date(year, month, day)?)
        }
        Query::ByType(tx_type) => QueryOutput::transactions(store.by_type(&tx_type)),
        Query::InDateRange { start, end } => {
            QueryOutput::transactions(store.in_date_range(start, end))
        }
        Query::ByMerchant(merchant) => QueryOutput::transactions(store.by_merchant(&merchant)),
        Query::AverageAmount => QueryOutput::Amount(store.average_amount()?),
        Query::ByAmountRange { min, max } => {
            QueryOutput::transactions(store.by_amount_range(min, max))
        }
        Query::TotalDebitAmount => QueryOutput::Amount(store.total_debit_amount()?),
        Query::MostActiveMonth => QueryOutput::Label(store.most_active_month()?),
        Query::MostActiveDebitMonth => QueryOutput::Label(store.most_active_debit_month()?),
        Query::DominantType => QueryOutput::Label(store.dominant_type().to_string()),
        Query::BeforeDate(date) => QueryOutput::transactions(store.before_date(date)),
        Query::FindById(id) => QueryOutput::Lookup(store.find_by_id(&id).cloned()),
        Query::Descriptions => QueryOutput::labels(store.descriptions()),
    };

    Ok(output)
}

/// Load `input_path`, run `query` and write the result to `output`
///
/// # Errors
///
/// Returns loading errors (missing file, unknown format, malformed JSON),
/// query errors, and I/O errors from writing the result.
pub fn process(
    input_path: &Path,
    format: Option<InputFormat>,
    query: Query,
    output: &mut dyn Write,
) -> Result<(), AnalyticsError> {
    let mut store = load_store(input_path, format)?;
    execute(&mut store, query)?.write_to(output)
}
