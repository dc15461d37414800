//! Error types for the transaction analytics library
//!
//! # Error Categories
//!
//! - **Query Errors**: aggregations that have no meaningful answer on the
//!   current contents of the store (average of nothing, busiest month of
//!   nothing, a sum that does not fit in a `Decimal`). These are the only
//!   errors the store itself returns.
//! - **Boundary Errors**: file access, malformed CSV/JSON and unparsable
//!   amounts, raised while loading the initial collection or parsing
//!   command-line input.

use thiserror::Error;

/// Main error type for the analytics library
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalyticsError {
    /// An aggregation needs at least one record but the store is empty
    #[error("Cannot compute {operation}: the store is empty")]
    EmptyStore {
        /// Operation that was attempted
        operation: String,
    },

    /// No records qualify for a grouping query
    #[error("No data for {operation}")]
    NoData {
        /// Operation that was attempted
        operation: String,
    },

    /// A sum of amounts exceeds the range of `Decimal`
    ///
    /// The store keeps every record; only the aggregation is rejected.
    #[error("Arithmetic overflow in {operation}")]
    ArithmeticOverflow {
        /// Operation that would overflow
        operation: String,
    },

    /// Input file does not exist
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    /// I/O error while reading input or writing output
    #[error("I/O error: {message}")]
    IoError { message: String },

    /// Malformed CSV or JSON input
    #[error("Parse error{}: {message}", line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    ParseError {
        /// Line number where the error occurred (if available)
        line: Option<u64>,
        message: String,
    },

    /// Amount text that is not a decimal number
    #[error("Invalid amount '{amount}' for transaction {id}")]
    InvalidAmount { amount: String, id: String },

    /// Input file whose format cannot be determined
    #[error("Unsupported input format: {path} (expected .csv or .json, or pass --format)")]
    UnsupportedFormat { path: String },
}

impl From<std::io::Error> for AnalyticsError {
    fn from(error: std::io::Error) -> Self {
        AnalyticsError::IoError {
            message: error.to_string(),
        }
    }
}

impl From<csv::Error> for AnalyticsError {
    fn from(error: csv::Error) -> Self {
        let line = error.position().map(|pos| pos.line());

        AnalyticsError::ParseError {
            line,
            message: error.to_string(),
        }
    }
}

impl From<serde_json::Error> for AnalyticsError {
    fn from(error: serde_json::Error) -> Self {
        // serde_json reports line 0 for errors that are not tied to a position
        let line = match error.line() {
            0 => None,
            line => Some(line as u64),
        };

        AnalyticsError::ParseError {
            line,
            message: error.to_string(),
        }
    }
}

impl AnalyticsError {
    /// Create an EmptyStore error
    pub fn empty_store(operation: &str) -> Self {
        AnalyticsError::EmptyStore {
            operation: operation.to_string(),
        }
    }

    /// Create a NoData error
    pub fn no_data(operation: &str) -> Self {
        AnalyticsError::NoData {
            operation: operation.to_string(),
        }
    }

    /// Create an ArithmeticOverflow error
    pub fn arithmetic_overflow(operation: &str) -> Self {
        AnalyticsError::ArithmeticOverflow {
            operation: operation.to_string(),
        }
    }

    /// Create an InvalidAmount error
    pub fn invalid_amount(amount: &str, id: &str) -> Self {
        AnalyticsError::InvalidAmount {
            amount: amount.to_string(),
            id: id.to_string(),
        }
    }

    /// Create an UnsupportedFormat error
    pub fn unsupported_format(path: &str) -> Self {
        AnalyticsError::UnsupportedFormat {
            path: path.to_string(),
        }
    }
}
