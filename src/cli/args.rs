use crate::io::InputFormat;
use crate::query::Query;
use crate::types::{Transaction, TxDate};
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use std::path::PathBuf;

/// Query a collection of financial transactions
#[derive(Parser, Debug)]
#[command(name = "transaction-analytics")]
#[command(about = "Aggregate, filter and rank financial transactions", long_about = None)]
pub struct CliArgs {
    /// Input file containing the initial transactions (.csv or .json)
    #[arg(value_name = "INPUT", help = "Path to the input CSV or JSON file")]
    pub input_file: PathBuf,

    /// Input format; detected from the file extension when omitted
    #[arg(long = "format", value_name = "FORMAT")]
    pub format: Option<InputFormat>,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level command: one query, or a session of queries read from stdin
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Read commands from stdin, one per line, against one store
    ///
    /// Transactions added during the session are seen by every later
    /// command. An empty line is ignored; `quit` or `exit` ends the session.
    Shell,
    #[command(flatten)]
    Query(QueryCommand),
}

/// Store operation to run
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum QueryCommand {
    /// Append a transaction and report the new record count
    Add {
        #[arg(long)]
        id: String,
        #[arg(long)]
        date: TxDate,
        #[arg(long, allow_negative_numbers = true)]
        amount: Decimal,
        #[arg(long = "type")]
        tx_type: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long, default_value = "")]
        merchant: String,
        #[arg(long, default_value = "")]
        card_type: String,
    },
    /// Show all transactions
    All,
    /// Show the distinct transaction types
    Types,
    /// Sum of all amounts
    Total,
    /// Sum of amounts on a given year, month and/or day
    TotalByDate {
        #[arg(long)]
        year: Option<i32>,
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=12))]
        month: Option<u32>,
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=31))]
        day: Option<u32>,
    },
    /// Show transactions of one type
    ByType {
        #[arg(value_name = "TYPE")]
        tx_type: String,
    },
    /// Show transactions dated between two dates, inclusive
    InRange { start: TxDate, end: TxDate },
    /// Show transactions of one merchant
    ByMerchant { name: String },
    /// Mean amount
    Average,
    /// Show transactions with an amount between two bounds, inclusive
    #[command(allow_negative_numbers = true)]
    ByAmount { min: Decimal, max: Decimal },
    /// Sum of debit amounts
    TotalDebit,
    /// Month with the most transactions, as year-month
    MostActiveMonth,
    /// Month with the most debit transactions, as month-year
    MostActiveDebitMonth,
    /// Whether debit or credit transactions are more numerous
    DominantType,
    /// Show transactions dated strictly before a date
    Before { date: TxDate },
    /// Find a transaction by id
    Find { id: String },
    /// Show every description
    Descriptions,
}

impl QueryCommand {
    /// Convert the parsed command into a store query
    pub fn to_query(&self) -> Query {
        match self.clone() {
            QueryCommand::Add {
                id,
                date,
                amount,
                tx_type,
                description,
                merchant,
                card_type,
            } => Query::Append(
                Transaction::new(id, date, amount, tx_type)
                    .with_description(description)
                    .with_merchant(merchant)
                    .with_card_type(card_type),
            ),
            QueryCommand::All => Query::All,
            QueryCommand::Types => Query::UniqueTypes,
            QueryCommand::Total => Query::TotalAmount,
            QueryCommand::TotalByDate { year, month, day } => {
                Query::TotalAmountByDate { year, month, day }
            }
            QueryCommand::ByType { tx_type } => Query::ByType(tx_type),
            QueryCommand::InRange { start, end } => Query::InDateRange { start, end },
            QueryCommand::ByMerchant { name } => Query::ByMerchant(name),
            QueryCommand::Average => Query::AverageAmount,
            QueryCommand::ByAmount { min, max } => Query::ByAmountRange { min, max },
            QueryCommand::TotalDebit => Query::TotalDebitAmount,
            QueryCommand::MostActiveMonth => Query::MostActiveMonth,
            QueryCommand::MostActiveDebitMonth => Query::MostActiveDebitMonth,
            QueryCommand::DominantType => Query::DominantType,
            QueryCommand::Before { date } => Query::BeforeDate(date),
            QueryCommand::Find { id } => Query::FindById(id),
            QueryCommand::Descriptions => Query::Descriptions,
        }
    }
}
