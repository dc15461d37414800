//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `transaction`: the transaction record, its date type and query result types
//! - `error`: Error types for the analytics library

pub mod error;
pub mod transaction;

pub use error::AnalyticsError;
pub use transaction::{DominantType, Transaction, TxDate, CREDIT, DEBIT};
