//! Transaction-related types for the transaction analytics library
//!
//! This module defines the transaction record held by the store, the
//! calendar date type used for every date comparison, and the result type
//! of the dominant-type query.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use std::cmp::Ordering;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Type tag of a debit transaction
pub const DEBIT: &str = "debit";

/// Type tag of a credit transaction
pub const CREDIT: &str = "credit";

/// Date-time layouts accepted in addition to a plain `YYYY-MM-DD` date
const DATE_TIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Calendar date of a transaction
///
/// A `TxDate` is either a valid calendar date or the invalid date. Parsing
/// never fails: text that is not a recognised date becomes the invalid date,
/// and the record carrying it is still accepted by the store.
///
/// # Comparison Semantics
///
/// Any comparison involving the invalid date is false. `partial_cmp` returns
/// `None`, so `<`, `<=`, `>`, `>=` and `==` all evaluate to `false`, even when
/// both sides are invalid. Range and cut-off queries therefore never select a
/// record with an invalid date, and an invalid bound selects nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct TxDate(Option<NaiveDate>);

impl TxDate {
    /// The invalid date
    pub const INVALID: TxDate = TxDate(None);

    /// Parse a date from its textual representation
    ///
    /// Accepts `YYYY-MM-DD`, `YYYY-MM-DDTHH:MM:SS[.fff]`,
    /// `YYYY-MM-DD HH:MM:SS[.fff]` and RFC 3339 timestamps. For timestamps
    /// only the calendar date is kept. Anything else yields the invalid date.
    pub fn parse(input: &str) -> Self {
        let input = input.trim();

        if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
            return TxDate(Some(date));
        }

        for format in DATE_TIME_FORMATS {
            if let Ok(date_time) = NaiveDateTime::parse_from_str(input, format) {
                return TxDate(Some(date_time.date()));
            }
        }

        DateTime::parse_from_rfc3339(input)
            .map(|date_time| TxDate(Some(date_time.date_naive())))
            .unwrap_or(TxDate::INVALID)
    }

    /// Build a date from its components
    ///
    /// `month` is 1-12 and `day` is 1-31. Out-of-range components yield the
    /// invalid date.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Self {
        TxDate(NaiveDate::from_ymd_opt(year, month, day))
    }

    /// Whether this is a real calendar date
    pub fn is_valid(&self) -> bool {
        self.0.is_some()
    }

    /// The underlying calendar date, if valid
    pub fn as_naive(&self) -> Option<NaiveDate> {
        self.0
    }

    /// Calendar year
    pub fn year(&self) -> Option<i32> {
        self.0.map(|date| date.year())
    }

    /// Month of the year, 1-based
    pub fn month(&self) -> Option<u32> {
        self.0.map(|date| date.month())
    }

    /// Day of the month, 1-based
    pub fn day(&self) -> Option<u32> {
        self.0.map(|date| date.day())
    }
}

impl From<NaiveDate> for TxDate {
    fn from(date: NaiveDate) -> Self {
        TxDate(Some(date))
    }
}

impl FromStr for TxDate {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(TxDate::parse(s))
    }
}

impl PartialEq for TxDate {
    fn eq(&self, other: &Self) -> bool {
        matches!((self.0, other.0), (Some(a), Some(b)) if a == b)
    }
}

impl PartialOrd for TxDate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self.0, other.0) {
            (Some(a), Some(b)) => Some(a.cmp(&b)),
            _ => None,
        }
    }
}

impl fmt::Display for TxDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(date) => write!(f, "{}", date.format("%Y-%m-%d")),
            None => f.write_str("Invalid Date"),
        }
    }
}

/// A single financial transaction
///
/// Records are immutable once appended to a store. The store performs no
/// validation: ids may repeat, text fields may be empty and the date may be
/// invalid.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    /// Caller-assigned identifier, expected (not enforced) to be unique
    pub id: String,

    /// Calendar date of the transaction
    pub date: TxDate,

    /// Signed amount
    pub amount: Decimal,

    /// Opaque type tag, usually [`DEBIT`] or [`CREDIT`]
    pub tx_type: String,

    /// Free-form description
    pub description: String,

    /// Merchant name
    pub merchant: String,

    /// Card type used for the transaction
    pub card_type: String,
}

impl Transaction {
    /// Create a transaction with empty description, merchant and card type
    pub fn new(
        id: impl Into<String>,
        date: TxDate,
        amount: Decimal,
        tx_type: impl Into<String>,
    ) -> Self {
        Transaction {
            id: id.into(),
            date,
            amount,
            tx_type: tx_type.into(),
            description: String::new(),
            merchant: String::new(),
            card_type: String::new(),
        }
    }

    /// Set the description
    ///
    /// The `with_*` builders chain onto [`Transaction::new`]:
    ///
    /// ```
    /// use rust_decimal::Decimal;
    /// use transaction_analytics::{Transaction, TxDate, DEBIT};
    ///
    /// let tx = Transaction::new("7", TxDate::from_ymd(2024, 3, 2), Decimal::new(-125, 1), DEBIT)
    ///     .with_description("Lunch")
    ///     .with_merchant("Cafe")
    ///     .with_card_type("Visa");
    ///
    /// assert_eq!(tx.merchant, "Cafe");
    /// assert!(tx.is_debit());
    /// ```
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the merchant name
    pub fn with_merchant(mut self, merchant: impl Into<String>) -> Self {
        self.merchant = merchant.into();
        self
    }

    /// Set the card type
    pub fn with_card_type(mut self, card_type: impl Into<String>) -> Self {
        self.card_type = card_type.into();
        self
    }

    /// Whether the type tag is exactly [`DEBIT`]
    pub fn is_debit(&self) -> bool {
        self.tx_type == DEBIT
    }

    /// Whether the type tag is exactly [`CREDIT`]
    pub fn is_credit(&self) -> bool {
        self.tx_type == CREDIT
    }
}

/// Outcome of comparing debit and credit counts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DominantType {
    /// Strictly more debit records than credit records
    Debit,

    /// Strictly more credit records than debit records
    Credit,

    /// Same number of debit and credit records (including none of either)
    Equal,
}

impl DominantType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DominantType::Debit => DEBIT,
            DominantType::Credit => CREDIT,
            DominantType::Equal => "equal",
        }
    }
}

impl fmt::Display for DominantType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
