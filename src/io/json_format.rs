//! JSON loading of the initial transaction collection
//!
//! The input is a single JSON array of objects using the same field names
//! as the CSV columns. Ids and amounts may be given as numbers or strings.
//! Text fields accept any scalar; `null` or a missing field reads as empty.
//!
//! ```json
//! [
//!   {
//!     "transaction_id": "1",
//!     "transaction_date": "2019-01-01",
//!     "transaction_amount": 100.0,
//!     "transaction_type": "debit",
//!     "transaction_description": "Payment for groceries",
//!     "merchant_name": "SuperMart",
//!     "card_type": "Visa"
//!   }
//! ]
//! ```

use crate::io::csv_format::parse_amount;
use crate::types::{AnalyticsError, Transaction, TxDate};
use serde::Deserialize;
use serde_json::Value;
use std::io::Read;

/// JSON record structure for deserialization
///
/// Every field is kept as a raw [`Value`] so that a record of the wrong
/// shape fails in [`convert_json_record`] rather than failing the document.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct JsonRecord {
    #[serde(default)]
    pub transaction_id: Value,
    #[serde(default)]
    pub transaction_date: Value,
    #[serde(default)]
    pub transaction_amount: Value,
    #[serde(default)]
    pub transaction_type: Value,
    #[serde(default)]
    pub transaction_description: Value,
    #[serde(default)]
    pub merchant_name: Value,
    #[serde(default)]
    pub card_type: Value,
}

/// Render a scalar JSON value as text
///
/// Strings are taken verbatim and numbers in their shortest form; `null`
/// and anything structured yield `None`.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Convert a JsonRecord to a Transaction
///
/// # Errors
///
/// `InvalidAmount` if the amount is not a number or numeric string, and
/// `ParseError` if the id is not a string or number. A missing or malformed
/// date is accepted as the invalid date, and a text field that is `null`,
/// missing or structured becomes empty.
pub fn convert_json_record(record: JsonRecord) -> Result<Transaction, AnalyticsError> {
    let id = scalar_text(&record.transaction_id).ok_or_else(|| AnalyticsError::ParseError {
        line: None,
        message: format!("transaction id must be a string or number, got {}", record.transaction_id),
    })?;

    let amount = match &record.transaction_amount {
        Value::String(_) | Value::Number(_) => {
            let text = scalar_text(&record.transaction_amount).unwrap_or_default();
            parse_amount(&text, &id)?
        }
        other => return Err(AnalyticsError::invalid_amount(&other.to_string(), &id)),
    };

    let date = match &record.transaction_date {
        Value::String(s) => TxDate::parse(s),
        _ => TxDate::INVALID,
    };

    Ok(Transaction {
        id,
        date,
        amount,
        tx_type: text_field(&record.transaction_type),
        description: text_field(&record.transaction_description),
        merchant: text_field(&record.merchant_name),
        card_type: text_field(&record.card_type),
    })
}

fn text_field(value: &Value) -> String {
    scalar_text(value).unwrap_or_default()
}

/// Read a JSON array of records
///
/// The document must be a well-formed JSON array. Each element is then
/// decoded and converted on its own, so an element that is not an object or
/// carries a bad id or amount does not reject its neighbours.
///
/// # Errors
///
/// `ParseError` if the document is not valid JSON or not an array.
pub fn read_json_records<R: Read>(
    reader: R,
) -> Result<Vec<Result<Transaction, AnalyticsError>>, AnalyticsError> {
    let elements: Vec<Value> = serde_json::from_reader(reader)?;

    Ok(elements
        .into_iter()
        .map(|element| {
            let record: JsonRecord = serde_json::from_value(element)?;
            convert_json_record(record)
        })
        .collect())
}
