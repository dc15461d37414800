//! In-memory transaction store and its analytical queries
//!
//! This module provides the TransactionStore component that owns an ordered
//! sequence of transactions and answers aggregation, filtering, grouping and
//! lookup queries over it.
//!
//! # Ordering
//!
//! Insertion order is the only ordering. `append` adds to the end, existing
//! records are never reordered or modified, and every query that returns a
//! sequence returns it in store order.
//!
//! # Tolerance
//!
//! The store performs no validation. Duplicate ids, empty text fields and
//! invalid dates are all accepted; queries treat an invalid date as matching
//! no date bound (see [`TxDate`]).
//!
//! # Errors
//!
//! `average_amount` on an empty store returns `EmptyStore`, and the
//! month-ranking queries return `NoData` when there is nothing to rank. Sums
//! use checked arithmetic and return `ArithmeticOverflow` when the result does
//! not fit in a `Decimal`. Every other query returns a neutral value (zero, an
//! empty sequence) when nothing matches.

use crate::core::activity::{self, KeyOrder};
use crate::types::{AnalyticsError, DominantType, Transaction, TxDate, CREDIT, DEBIT};
use rust_decimal::Decimal;
use std::cmp::Ordering;
use std::collections::HashSet;
use tracing::debug;

/// Ordered, append-only collection of transactions
#[derive(Debug, Clone, Default)]
pub struct TransactionStore {
    /// Transactions in insertion order
    transactions: Vec<Transaction>,
}

impl TransactionStore {
    /// Create a new empty transaction store
    pub fn new() -> Self {
        TransactionStore {
            transactions: Vec::new(),
        }
    }

    /// Create a store from an initial sequence, keeping its order
    pub fn from_transactions(transactions: Vec<Transaction>) -> Self {
        TransactionStore { transactions }
    }

    /// Add a transaction to the end of the sequence
    ///
    /// No uniqueness or schema validation is performed.
    pub fn append(&mut self, transaction: Transaction) {
        debug!(id = %transaction.id, "appending transaction");
        self.transactions.push(transaction);
    }

    /// All transactions in insertion order
    pub fn all(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Distinct type tags in order of first occurrence
    pub fn unique_types(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.transactions
            .iter()
            .map(|tx| tx.tx_type.as_str())
            .filter(|tx_type| seen.insert(*tx_type))
            .collect()
    }

    /// Sum of all amounts; zero for an empty store
    ///
    /// # Errors
    ///
    /// Returns `ArithmeticOverflow` if the sum exceeds the range of `Decimal`.
    pub fn total_amount(&self) -> Result<Decimal, AnalyticsError> {
        sum_amounts(&self.transactions, "total amount")
    }

    /// Sum of amounts of transactions dated on the given components
    ///
    /// `month` is 1-12 and `day` is 1-31. A component left as `None` matches
    /// any date; with all three `None` every transaction is included, even
    /// one with an invalid date. With any component given, a transaction with
    /// an invalid date never matches.
    pub fn total_amount_by_date(
        &self,
        year: Option<i32>,
        month: Option<u32>,
        day: Option<u32>,
    ) -> Result<Decimal, AnalyticsError> {
        sum_amounts(
            self.transactions
                .iter()
                .filter(|tx| date_matches(tx.date, year, month, day)),
            "total amount by date",
        )
    }

    /// Transactions whose type tag equals `tx_type` exactly
    pub fn by_type(&self, tx_type: &str) -> Vec<&Transaction> {
        self.filter(|tx| tx.tx_type == tx_type)
    }

    /// Transactions dated within `start..=end`
    ///
    /// Empty when `start > end` or when either bound is invalid.
    pub fn in_date_range(&self, start: TxDate, end: TxDate) -> Vec<&Transaction> {
        self.filter(|tx| tx.date >= start && tx.date <= end)
    }

    /// Transactions whose merchant equals `merchant` exactly
    pub fn by_merchant(&self, merchant: &str) -> Vec<&Transaction> {
        self.filter(|tx| tx.merchant == merchant)
    }

    /// Mean amount across all transactions
    ///
    /// # Errors
    ///
    /// Returns `EmptyStore` when the store holds no transactions and
    /// `ArithmeticOverflow` when the sum of amounts overflows.
    pub fn average_amount(&self) -> Result<Decimal, AnalyticsError> {
        if self.transactions.is_empty() {
            return Err(AnalyticsError::empty_store("average amount"));
        }

        sum_amounts(&self.transactions, "average amount")?
            .checked_div(Decimal::from(self.transactions.len()))
            .ok_or_else(|| AnalyticsError::arithmetic_overflow("average amount"))
    }

    /// Transactions with `min <= amount <= max`; empty when `min > max`
    pub fn by_amount_range(&self, min: Decimal, max: Decimal) -> Vec<&Transaction> {
        self.filter(|tx| tx.amount >= min && tx.amount <= max)
    }

    /// Sum of amounts of debit transactions
    pub fn total_debit_amount(&self) -> Result<Decimal, AnalyticsError> {
        sum_amounts(
            self.transactions.iter().filter(|tx| tx.is_debit()),
            "total debit amount",
        )
    }

    /// Busiest (year, month) keyed as `"{year}-{month}"`, e.g. `2024-1`
    ///
    /// Ties go to the month that appears first in the store.
    ///
    /// # Errors
    ///
    /// Returns `NoData` when the store is empty.
    pub fn most_active_month(&self) -> Result<String, AnalyticsError> {
        activity::most_active_month(&self.transactions, KeyOrder::YearMonth)
            .ok_or_else(|| AnalyticsError::no_data("most active month"))
    }

    /// Busiest month among debit transactions keyed as `"{month}-{year}"`
    ///
    /// Note the key order differs from [`most_active_month`](Self::most_active_month).
    ///
    /// # Errors
    ///
    /// Returns `NoData` when there are no debit transactions.
    pub fn most_active_debit_month(&self) -> Result<String, AnalyticsError> {
        activity::most_active_month(
            self.transactions.iter().filter(|tx| tx.is_debit()),
            KeyOrder::MonthYear,
        )
        .ok_or_else(|| AnalyticsError::no_data("most active debit month"))
    }

    /// Whether debit or credit transactions are more numerous
    ///
    /// Type tags other than `debit` and `credit` are not counted.
    pub fn dominant_type(&self) -> DominantType {
        let (debits, credits) = self.transactions.iter().fold(
            (0usize, 0usize),
            |(debits, credits), tx| match tx.tx_type.as_str() {
                DEBIT => (debits + 1, credits),
                CREDIT => (debits, credits + 1),
                _ => (debits, credits),
            },
        );

        match debits.cmp(&credits) {
            Ordering::Greater => DominantType::Debit,
            Ordering::Less => DominantType::Credit,
            Ordering::Equal => DominantType::Equal,
        }
    }

    /// Transactions dated strictly before `date`
    pub fn before_date(&self, date: TxDate) -> Vec<&Transaction> {
        self.filter(|tx| tx.date < date)
    }

    /// First transaction in store order with the given id
    pub fn find_by_id(&self, id: &str) -> Option<&Transaction> {
        self.transactions.iter().find(|tx| tx.id == id)
    }

    /// Description of every transaction, duplicates retained
    pub fn descriptions(&self) -> Vec<&str> {
        self.transactions
            .iter()
            .map(|tx| tx.description.as_str())
            .collect()
    }

    fn filter<P>(&self, predicate: P) -> Vec<&Transaction>
    where
        P: Fn(&Transaction) -> bool,
    {
        self.transactions.iter().filter(|tx| predicate(tx)).collect()
    }
}

impl From<Vec<Transaction>> for TransactionStore {
    fn from(transactions: Vec<Transaction>) -> Self {
        TransactionStore::from_transactions(transactions)
    }
}

impl FromIterator<Transaction> for TransactionStore {
    fn from_iter<I: IntoIterator<Item = Transaction>>(iter: I) -> Self {
        TransactionStore::from_transactions(iter.into_iter().collect())
    }
}

impl Extend<Transaction> for TransactionStore {
    fn extend<I: IntoIterator<Item = Transaction>>(&mut self, iter: I) {
        for transaction in iter {
            self.append(transaction);
        }
    }
}

fn sum_amounts<'a, I>(transactions: I, operation: &str) -> Result<Decimal, AnalyticsError>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    transactions
        .into_iter()
        .try_fold(Decimal::ZERO, |total, tx| total.checked_add(tx.amount))
        .ok_or_else(|| AnalyticsError::arithmetic_overflow(operation))
}

fn date_matches(date: TxDate, year: Option<i32>, month: Option<u32>, day: Option<u32>) -> bool {
    component_matches(year, date.year())
        && component_matches(month, date.month())
        && component_matches(day, date.day())
}

/// An omitted component matches anything, including an invalid date
fn component_matches<T: PartialEq>(wanted: Option<T>, actual: Option<T>) -> bool {
    match wanted {
        None => true,
        Some(wanted) => actual == Some(wanted),
    }
}
