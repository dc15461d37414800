//! Core business logic module
//!
//! This module contains the analytics components:
//! - `transaction_store` - The ordered transaction store and all of its queries
//! - `activity` - Month bucketing and busiest-month ranking
//! - `shared_store` - Lock-guarded handle for sharing a store between threads

pub mod activity;
pub mod shared_store;
pub mod transaction_store;

pub use activity::{KeyOrder, MonthBucket};
pub use shared_store::SharedTransactionStore;
pub use transaction_store::TransactionStore;
