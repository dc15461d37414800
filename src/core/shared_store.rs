//! Thread-safe handle to a transaction store
//!
//! `SharedTransactionStore` lets several threads hold the same store. A
//! single `RwLock` guards the whole sequence: `append` takes the write lock,
//! so it is serialized against every query, while queries may run
//! concurrently with each other.
//!
//! # Poisoning
//!
//! A poisoned lock is recovered rather than propagated. `append` pushes one
//! record and cannot leave the sequence half-written.

use crate::core::TransactionStore;
use crate::types::Transaction;
use std::sync::{Arc, PoisonError, RwLock};

/// Cloneable, thread-safe handle to one [`TransactionStore`]
///
/// Clones share the same underlying store.
#[derive(Debug, Clone, Default)]
pub struct SharedTransactionStore {
    inner: Arc<RwLock<TransactionStore>>,
}

impl SharedTransactionStore {
    pub fn new(store: TransactionStore) -> Self {
        Self {
            inner: Arc::new(RwLock::new(store)),
        }
    }

    /// Append a transaction, blocking until no query holds the store
    pub fn append(&self, transaction: Transaction) {
        self.inner
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .append(transaction);
    }

    /// Run a query against the store under the read lock
    ///
    /// # Examples
    ///
    /// ```
    /// use transaction_analytics::{SharedTransactionStore, TransactionStore};
    ///
    /// let shared = SharedTransactionStore::new(TransactionStore::new());
    /// let total = shared.read(|store| store.total_amount());
    /// assert!(total.is_ok_and(|total| total.is_zero()));
    /// ```
    pub fn read<R, F>(&self, query: F) -> R
    where
        F: FnOnce(&TransactionStore) -> R,
    {
        let store = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        query(&store)
    }

    /// Copy of the current sequence
    pub fn snapshot(&self) -> Vec<Transaction> {
        self.read(|store| store.all().to_vec())
    }

    pub fn len(&self) -> usize {
        self.read(TransactionStore::len)
    }

    pub fn is_empty(&self) -> bool {
        self.read(TransactionStore::is_empty)
    }
}

impl From<TransactionStore> for SharedTransactionStore {
    fn from(store: TransactionStore) -> Self {
        SharedTransactionStore::new(store)
    }
}
