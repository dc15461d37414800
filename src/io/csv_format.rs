//! CSV format handling for transaction records
//!
//! This module centralizes all CSV format concerns, providing:
//! - CsvRecord structure for deserialization
//! - Coercion of textual fields into a [`Transaction`]
//! - Transaction list serialization
//!
//! The column names are shared with the JSON loader:
//! `transaction_id, transaction_date, transaction_amount, transaction_type,
//! transaction_description, merchant_name, card_type`.
//!
//! All functions are pure (no I/O) for easy testing.

use crate::types::{AnalyticsError, Transaction, TxDate};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::io::Write;
use std::str::FromStr;

/// Header row written ahead of serialized transactions
pub const CSV_HEADER: [&str; 7] = [
    "transaction_id",
    "transaction_date",
    "transaction_amount",
    "transaction_type",
    "transaction_description",
    "merchant_name",
    "card_type",
];

/// CSV record structure for deserialization
///
/// Only the id, date and amount columns are required; the remaining text
/// columns default to empty when absent.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct CsvRecord {
    pub transaction_id: String,
    pub transaction_date: String,
    pub transaction_amount: String,
    #[serde(default)]
    pub transaction_type: String,
    #[serde(default)]
    pub transaction_description: String,
    #[serde(default)]
    pub merchant_name: String,
    #[serde(default)]
    pub card_type: String,
}

/// Parse amount text into a Decimal
///
/// Accepts plain (`-40.25`) and scientific (`1.5e3`) notation, surrounded by
/// optional whitespace.
pub fn parse_amount(amount: &str, id: &str) -> Result<Decimal, AnalyticsError> {
    let trimmed = amount.trim();
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map_err(|_| AnalyticsError::invalid_amount(amount, id))
}

/// Convert a CsvRecord to a Transaction
///
/// The amount must parse as a decimal. The date is never rejected: text that
/// is not a date becomes the invalid date.
pub fn convert_csv_record(csv_record: CsvRecord) -> Result<Transaction, AnalyticsError> {
    let amount = parse_amount(&csv_record.transaction_amount, &csv_record.transaction_id)?;

    Ok(Transaction {
        id: csv_record.transaction_id,
        date: TxDate::parse(&csv_record.transaction_date),
        amount,
        tx_type: csv_record.transaction_type,
        description: csv_record.transaction_description,
        merchant: csv_record.merchant_name,
        card_type: csv_record.card_type,
    })
}

/// Write transactions in CSV format, in the order given
///
/// Dates are written as `YYYY-MM-DD`, or `Invalid Date` for the invalid date.
pub fn write_transactions_csv<'a, I>(
    transactions: I,
    output: &mut dyn Write,
) -> Result<(), AnalyticsError>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut writer = csv::Writer::from_writer(output);

    writer.write_record(CSV_HEADER)?;

    for tx in transactions {
        let date = tx.date.to_string();
        let amount = tx.amount.to_string();
        writer.write_record([
            tx.id.as_str(),
            date.as_str(),
            amount.as_str(),
            tx.tx_type.as_str(),
            tx.description.as_str(),
            tx.merchant.as_str(),
            tx.card_type.as_str(),
        ])?;
    }

    writer.flush()?;

    Ok(())
}
