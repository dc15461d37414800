//! Synchronous CSV reader with iterator interface
//!
//! Provides a streaming iterator over transactions from a CSV file.
//! Delegates CSV format concerns to the csv_format module.
//!
//! # Iterator Interface
//!
//! SyncReader implements the Iterator trait, yielding
//! `Result<Transaction, AnalyticsError>` for each CSV row:
//!
//! ```no_run
//! use transaction_analytics::io::sync_reader::SyncReader;
//! use std::path::Path;
//!
//! let reader = SyncReader::new(Path::new("transactions.csv")).unwrap();
//! for result in reader {
//!     match result {
//!         Ok(tx) => println!("Loaded transaction {}", tx.id),
//!         Err(e) => eprintln!("Error: {}", e),
//!     }
//! }
//! ```
//!
//! # Error Handling
//!
//! - Fatal errors (file not found, I/O errors) are returned from `new()`
//! - Individual row errors are yielded as Err variants carrying the line number

use crate::io::csv_format::{convert_csv_record, CsvRecord};
use crate::types::{AnalyticsError, Transaction};
use csv::{ReaderBuilder, StringRecord, Trim};
use std::fs::File;
use std::io::ErrorKind;
use std::path::Path;

/// Synchronous CSV reader
#[derive(Debug)]
pub struct SyncReader {
    reader: csv::Reader<File>,
    headers: StringRecord,
    record: StringRecord,
}

impl SyncReader {
    /// Create a new SyncReader from a file path
    ///
    /// The CSV reader is configured to trim whitespace around fields and to
    /// allow rows without the trailing optional columns.
    ///
    /// # Errors
    ///
    /// * `FileNotFound` if nothing exists at `path`
    /// * `IoError` if the file exists but cannot be opened
    /// * `ParseError` if the header row cannot be read
    pub fn new(path: &Path) -> Result<Self, AnalyticsError> {
        let file = File::open(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => AnalyticsError::FileNotFound {
                path: path.display().to_string(),
            },
            _ => AnalyticsError::IoError {
                message: format!("Failed to open file '{}': {}", path.display(), e),
            },
        })?;

        let mut reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .buffer_capacity(8 * 1024)
            .from_reader(file);
        let headers = reader.headers()?.clone();

        Ok(Self {
            reader,
            headers,
            record: StringRecord::new(),
        })
    }
}

impl Iterator for SyncReader {
    type Item = Result<Transaction, AnalyticsError>;

    /// Get the next transaction from the CSV file
    ///
    /// Row errors name the 1-based file line on which the row starts,
    /// counting the header and any quoted line breaks before it.
    fn next(&mut self) -> Option<Self::Item> {
        match self.reader.read_record(&mut self.record) {
            Ok(false) => None,
            Ok(true) => {
                let line = self.record.position().map(|pos| pos.line());
                let row = self
                    .record
                    .deserialize::<CsvRecord>(Some(&self.headers))
                    .map_err(AnalyticsError::from)
                    .and_then(convert_csv_record);

                Some(row.map_err(|e| AnalyticsError::ParseError {
                    line,
                    message: match e {
                        AnalyticsError::ParseError { message, .. } => message,
                        other => other.to_string(),
                    },
                }))
            }
            Err(e) => Some(Err(e.into())),
        }
    }
}
