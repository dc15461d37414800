//! I/O module
//!
//! Loads the initial transaction collection from disk and serializes query
//! results. The analytics core never touches the filesystem; everything that
//! coerces text into transaction fields lives here.
//!
//! # Components
//!
//! - `csv_format` - CSV format handling (record conversion, output serialization)
//! - `sync_reader` - Streaming CSV reader with iterator interface
//! - `json_format` - JSON array loader

pub mod csv_format;
pub mod json_format;
pub mod sync_reader;

pub use csv_format::{convert_csv_record, parse_amount, write_transactions_csv, CsvRecord};
pub use json_format::{convert_json_record, read_json_records, JsonRecord};
pub use sync_reader::SyncReader;

use crate::core::TransactionStore;
use crate::types::{AnalyticsError, Transaction};
use clap::ValueEnum;
use std::fs::File;
use std::io::{BufReader, ErrorKind};
use std::path::Path;
use tracing::{info, warn};

/// Format of the input file
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum InputFormat {
    Csv,
    Json,
}

impl InputFormat {
    /// Detect the format from the file extension (case-insensitive)
    pub fn from_path(path: &Path) -> Result<Self, AnalyticsError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("csv") => Ok(InputFormat::Csv),
            Some("json") => Ok(InputFormat::Json),
            _ => Err(AnalyticsError::unsupported_format(
                &path.display().to_string(),
            )),
        }
    }
}

/// Load a store from `path`
///
/// `format` overrides detection from the file extension. Rows that fail to
/// convert (bad amount, malformed CSV row) are logged and skipped; loading
/// continues with the next row. The surviving rows keep their file order.
///
/// # Errors
///
/// Returns an error if the format cannot be determined, the file cannot be
/// opened, or a JSON document is not a well-formed array of records.
pub fn load_store(
    path: &Path,
    format: Option<InputFormat>,
) -> Result<TransactionStore, AnalyticsError> {
    let format = match format {
        Some(format) => format,
        None => InputFormat::from_path(path)?,
    };

    let rows: Vec<Result<Transaction, AnalyticsError>> = match format {
        InputFormat::Csv => SyncReader::new(path)?.collect(),
        InputFormat::Json => read_json_records(BufReader::new(open(path)?))?,
    };

    let mut store = TransactionStore::new();
    let mut skipped = 0usize;
    for row in rows {
        match row {
            Ok(transaction) => store.append(transaction),
            Err(e) => {
                skipped += 1;
                warn!(error = %e, "skipping transaction");
            }
        }
    }

    info!(
        path = %path.display(),
        ?format,
        loaded = store.len(),
        skipped,
        "loaded transactions"
    );

    Ok(store)
}

fn open(path: &Path) -> Result<File, AnalyticsError> {
    File::open(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => AnalyticsError::FileNotFound {
            path: path.display().to_string(),
        },
        _ => e.into(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal::Decimal;
    use std::io::Write;
    use tempfile::Builder;

    fn temp_file(suffix: &str, content: &str) -> tempfile::NamedTempFile {
        let mut file = Builder::new()
            .suffix(suffix)
            .tempfile()
            .expect("Failed to create temp file");
        file.write_all(content.as_bytes())
            .expect("Failed to write to temp file");
        file.flush().expect("Failed to flush temp file");
        file
    }

    #[rstest]
    #[case::csv("data/transactions.csv", Some(InputFormat::Csv))]
    #[case::json("transactions.json", Some(InputFormat::Json))]
    #[case::upper_case("TRANSACTIONS.JSON", Some(InputFormat::Json))]
    #[case::unknown("transactions.txt", None)]
    #[case::no_extension("transactions", None)]
    fn test_format_from_path(#[case] path: &str, #[case] expected: Option<InputFormat>) {
        assert_eq!(InputFormat::from_path(Path::new(path)).ok(), expected);
    }

    #[test]
    fn test_load_csv_skips_bad_rows() {
        let file = temp_file(
            ".csv",
            "transaction_id,transaction_date,transaction_amount,transaction_type\n\
             1,2024-01-05,100,credit\n\
             2,2024-01-20,n/a,debit\n\
             3,2024-02-01,-40,debit\n",
        );

        let store = load_store(file.path(), None).unwrap();

        let ids: Vec<_> = store.all().iter().map(|tx| tx.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "3"]);
        assert_eq!(store.total_amount(), Ok(Decimal::from(60)));
    }

    #[test]
    fn test_load_json() {
        let file = temp_file(
            ".json",
            r#"[{"transaction_id": 1, "transaction_date": "2024-01-05", "transaction_amount": 2.5, "transaction_type": "debit"}]"#,
        );

        let store = load_store(file.path(), None).unwrap();

        assert_eq!(store.len(), 1);
        assert_eq!(store.total_debit_amount(), Ok(Decimal::new(25, 1)));
    }

    #[test]
    fn test_load_json_null_text_field_keeps_record() {
        let file = temp_file(
            ".json",
            r#"[
                {"transaction_id": "1", "transaction_date": "2024-01-05", "transaction_amount": 10, "merchant_name": "SuperMart"},
                {"transaction_id": "2", "transaction_date": "2024-01-06", "transaction_amount": 5, "merchant_name": null}
            ]"#,
        );

        let store = load_store(file.path(), None).unwrap();

        assert_eq!(store.len(), 2);
        assert_eq!(store.by_merchant("").len(), 1);
        assert_eq!(store.total_amount(), Ok(Decimal::from(15)));
    }

    #[test]
    fn test_explicit_format_overrides_extension() {
        let file = temp_file(
            ".txt",
            r#"[{"transaction_id": "a", "transaction_amount": 1}]"#,
        );

        assert!(matches!(
            load_store(file.path(), None),
            Err(AnalyticsError::UnsupportedFormat { .. })
        ));
        assert_eq!(
            load_store(file.path(), Some(InputFormat::Json))
                .unwrap()
                .len(),
            1
        );
    }

    #[rstest]
    #[case::csv("missing.csv")]
    #[case::json("missing.json")]
    fn test_load_missing_file(#[case] path: &str) {
        assert!(matches!(
            load_store(Path::new(path), None),
            Err(AnalyticsError::FileNotFound { .. })
        ));
    }
}
