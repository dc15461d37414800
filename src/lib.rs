//! Transaction Analytics Library
//! # Overview
//!
//! This library answers aggregation, filtering, grouping and ranking queries
//! over an in-memory, ordered collection of financial transactions.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (Transaction, TxDate, errors)
//! - [`core`] - Business logic components:
//!   - [`core::transaction_store`] - The ordered store and all of its queries
//!   - [`core::activity`] - Busiest-month grouping and ranking
//!   - [`core::shared_store`] - Lock-guarded store handle for multi-threaded callers
//! - [`io`] - Loading the initial collection from CSV or JSON, CSV output
//! - [`query`] - Mapping commands onto store operations and rendering results
//! - [`cli`] - CLI arguments parsing and the interactive `shell` session
//!
//! # Queries
//!
//! - **Totals**: overall, by date components, debit-only, average
//! - **Filters**: by type, merchant, date range, amount range, before a date
//! - **Rankings**: busiest month overall (`year-month`), busiest debit month
//!   (`month-year`), dominant type
//! - **Lookups**: unique types, find by id, descriptions
//!
//! # Example
//!
//! ```
//! use rust_decimal::Decimal;
//! use transaction_analytics::{Transaction, TransactionStore, TxDate};
//!
//! let mut store = TransactionStore::new();
//! store.append(Transaction::new("1", TxDate::parse("2024-01-05"), Decimal::from(100), "credit"));
//! store.append(Transaction::new("2", TxDate::parse("2024-01-20"), Decimal::from(-40), "debit"));
//!
//! assert_eq!(store.total_amount(), Ok(Decimal::from(60)));
//! assert_eq!(store.most_active_month().unwrap(), "2024-1");
//! ```

// Module declarations
pub mod cli;
pub mod core;
pub mod io;
pub mod query;
pub mod types;

pub use self::core::{SharedTransactionStore, TransactionStore};
pub use io::{load_store, write_transactions_csv, InputFormat};
pub use query::{execute, Query, QueryOutput};
pub use types::{AnalyticsError, DominantType, Transaction, TxDate, CREDIT, DEBIT};
