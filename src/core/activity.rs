//! Month activity ranking
//!
//! Groups transactions into (year, month) buckets, counts records per bucket
//! and picks the busiest one. Counting and ranking are two separate passes:
//! the counts are collected in order of first occurrence, then scanned once
//! with a strict greater-than comparison, so the first bucket to reach the
//! maximum count wins a tie.

use crate::types::{Transaction, TxDate};
use std::collections::HashMap;

/// Field order of a rendered month key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOrder {
    /// `"{year}-{month}"`, e.g. `2024-1`
    YearMonth,
    /// `"{month}-{year}"`, e.g. `1-2024`
    MonthYear,
}

/// Grouping bucket of a transaction date
///
/// Every invalid date shares a single bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MonthBucket {
    Month { year: i32, month: u32 },
    Invalid,
}

impl MonthBucket {
    pub fn of(date: TxDate) -> Self {
        match (date.year(), date.month()) {
            (Some(year), Some(month)) => MonthBucket::Month { year, month },
            _ => MonthBucket::Invalid,
        }
    }

    /// Render the bucket as a key with a 1-based, unpadded month
    pub fn key(&self, order: KeyOrder) -> String {
        match (self, order) {
            (MonthBucket::Month { year, month }, KeyOrder::YearMonth) => {
                format!("{}-{}", year, month)
            }
            (MonthBucket::Month { year, month }, KeyOrder::MonthYear) => {
                format!("{}-{}", month, year)
            }
            (MonthBucket::Invalid, _) => "NaN-NaN".to_string(),
        }
    }
}

/// Per-bucket record counts in order of first occurrence
#[derive(Debug, Default)]
pub struct MonthCounts {
    counts: Vec<(MonthBucket, usize)>,
    index: HashMap<MonthBucket, usize>,
}

impl MonthCounts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, date: TxDate) {
        let bucket = MonthBucket::of(date);
        match self.index.get(&bucket) {
            Some(&position) => self.counts[position].1 += 1,
            None => {
                self.index.insert(bucket, self.counts.len());
                self.counts.push((bucket, 1));
            }
        }
    }

    /// Buckets with their counts, in order of first occurrence
    pub fn iter(&self) -> impl Iterator<Item = &(MonthBucket, usize)> {
        self.counts.iter()
    }

    /// Bucket with the highest count; the earliest bucket wins ties
    pub fn busiest(&self) -> Option<(MonthBucket, usize)> {
        let mut best: Option<(MonthBucket, usize)> = None;
        for &(bucket, count) in &self.counts {
            match best {
                Some((_, best_count)) if count <= best_count => {}
                _ => best = Some((bucket, count)),
            }
        }
        best
    }
}

impl<'a> FromIterator<&'a Transaction> for MonthCounts {
    fn from_iter<I: IntoIterator<Item = &'a Transaction>>(iter: I) -> Self {
        let mut counts = MonthCounts::new();
        for tx in iter {
            counts.record(tx.date);
        }
        counts
    }
}

/// Key of the busiest month among `transactions`, or `None` if there are none
pub fn most_active_month<'a, I>(transactions: I, order: KeyOrder) -> Option<String>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    transactions
        .into_iter()
        .collect::<MonthCounts>()
        .busiest()
        .map(|(bucket, _)| bucket.key(order))
}
