//! End-to-end integration tests
//!
//! These tests drive the same pipeline as the binary: parse command-line
//! arguments, load a fixture from tests/fixtures/, run the query and render
//! the result. The main fixture exists as both CSV and JSON with identical
//! content, and every query is checked against both.

#[cfg(test)]
mod tests {
    use clap::Parser;
    use rstest::rstest;
    use std::fs;
    use std::io::Write;
    use tempfile::NamedTempFile;
    use transaction_analytics::cli::{self, CliArgs, Command};
    use transaction_analytics::{load_store, query, AnalyticsError};

    const HEADER: &str = "transaction_id,transaction_date,transaction_amount,transaction_type,transaction_description,merchant_name,card_type\n";

    /// Run the binary pipeline over a fixture and return stdout
    ///
    /// `args` are the arguments following the input file.
    fn run_fixture(fixture_name: &str, args: &[&str]) -> Result<String, AnalyticsError> {
        let input_path = format!("tests/fixtures/{}", fixture_name);

        let mut argv = vec!["transaction-analytics", input_path.as_str()];
        argv.extend_from_slice(args);
        let cli = CliArgs::try_parse_from(&argv)
            .unwrap_or_else(|e| panic!("Failed to parse arguments {:?}: {}", argv, e));
        let command = match cli.command {
            Command::Query(command) => command,
            other => panic!("Expected a query command, got {:?}", other),
        };

        // Write through a file, as the binary writes to a stream
        let mut temp_output = NamedTempFile::new().expect("Failed to create temp file");
        query::process(
            &cli.input_file,
            cli.format,
            command.to_query(),
            &mut temp_output,
        )?;
        temp_output.flush().expect("Failed to flush temp file");

        Ok(fs::read_to_string(temp_output.path())
            .unwrap_or_else(|e| panic!("Failed to read temp output file: {}", e)))
    }

    #[rstest]
    #[case::total(&["total"], "445.25\n")]
    #[case::total_debit(&["total-debit"], "-14.75\n")]
    #[case::average(&["average"], "55.65625\n")]
    #[case::total_by_month(&["total-by-date", "--year", "2024", "--month", "2"], "335.5\n")]
    #[case::total_by_day(&["total-by-date", "--day", "20"], "260\n")]
    #[case::total_by_date_no_match(&["total-by-date", "--year", "1999"], "0\n")]
    #[case::types(&["types"], "credit\ndebit\ntransfer\n")]
    #[case::most_active_month(&["most-active-month"], "2024-2\n")]
    #[case::most_active_debit_month(&["most-active-debit-month"], "2-2024\n")]
    #[case::dominant_type(&["dominant-type"], "debit\n")]
    #[case::descriptions(
        &["descriptions"],
        "Salary advance\nGroceries\nCoffee beans\nFlowers\nRefund\nGroceries\nParking\nSavings\n"
    )]
    #[case::find_missing(&["find", "99"], "not found\n")]
    #[case::add(
        &["add", "--id", "9", "--date", "2024-04-01", "--amount", "-3", "--type", "debit"],
        "Transaction 9 added (9 transactions in store)\n"
    )]
    fn test_text_queries(
        #[case] args: &[&str],
        #[case] expected: &str,
        #[values("transactions.csv", "transactions.json")] fixture: &str,
    ) {
        let actual = run_fixture(fixture, args).unwrap();
        assert_eq!(
            actual, expected,
            "\n\nOutput mismatch for fixture: {} (args: {:?})\n",
            fixture, args
        );
    }

    #[rstest]
    #[case::by_merchant(
        &["by-merchant", "SuperMart"],
        "2,2024-01-20,-40,debit,Groceries,SuperMart,Visa\n\
         5,2024-02-20,300,credit,Refund,SuperMart,Amex\n\
         6,2024-03-03,-15.25,debit,Groceries,SuperMart,Visa\n"
    )]
    #[case::in_range(
        &["in-range", "2024-02-01", "2024-02-20"],
        "3,2024-02-01,10.5,debit,Coffee beans,Bean There,Mastercard\n\
         4,2024-02-14,25,debit,Flowers,Bloom,Visa\n\
         5,2024-02-20,300,credit,Refund,SuperMart,Amex\n"
    )]
    #[case::in_range_reversed(&["in-range", "2024-02-20", "2024-02-01"], "")]
    #[case::before(
        &["before", "2024-01-21"],
        "1,2024-01-05,100,credit,Salary advance,Acme Corp,Visa\n\
         2,2024-01-20,-40,debit,Groceries,SuperMart,Visa\n"
    )]
    #[case::by_amount(
        &["by-amount", "-20", "10.5"],
        "3,2024-02-01,10.5,debit,Coffee beans,Bean There,Mastercard\n\
         6,2024-03-03,-15.25,debit,Groceries,SuperMart,Visa\n\
         7,Invalid Date,5,debit,Parking,City Parking,Visa\n"
    )]
    #[case::by_type(
        &["by-type", "transfer"],
        "8,2024-03-30,60,transfer,Savings,,Visa\n"
    )]
    #[case::find(
        &["find", "4"],
        "4,2024-02-14,25,debit,Flowers,Bloom,Visa\n"
    )]
    fn test_transaction_queries(
        #[case] args: &[&str],
        #[case] expected_rows: &str,
        #[values("transactions.csv", "transactions.json")] fixture: &str,
    ) {
        let actual = run_fixture(fixture, args).unwrap();
        assert_eq!(actual, format!("{}{}", HEADER, expected_rows));
    }

    #[rstest]
    fn test_all_keeps_file_order(
        #[values("transactions.csv", "transactions.json")] fixture: &str,
    ) {
        let actual = run_fixture(fixture, &["all"]).unwrap();
        let ids: Vec<_> = actual
            .lines()
            .skip(1)
            .map(|line| line.split(',').next().unwrap_or_default())
            .collect();

        assert_eq!(ids, vec!["1", "2", "3", "4", "5", "6", "7", "8"]);
    }

    #[rstest]
    #[case::average(&["average"], AnalyticsError::empty_store("average amount"))]
    #[case::most_active_month(&["most-active-month"], AnalyticsError::no_data("most active month"))]
    #[case::most_active_debit_month(
        &["most-active-debit-month"],
        AnalyticsError::no_data("most active debit month")
    )]
    fn test_empty_store_errors(#[case] args: &[&str], #[case] expected: AnalyticsError) {
        assert_eq!(run_fixture("empty.json", args), Err(expected));
    }

    #[rstest]
    #[case::total(&["total"], "0\n")]
    #[case::dominant_type(&["dominant-type"], "equal\n")]
    #[case::types(&["types"], "")]
    fn test_empty_store_neutral_results(#[case] args: &[&str], #[case] expected: &str) {
        assert_eq!(run_fixture("empty.json", args).unwrap(), expected);
    }

    #[test]
    fn test_malformed_rows_are_skipped() {
        assert_eq!(run_fixture("malformed_rows.csv", &["total"]).unwrap(), "70\n");
    }

    /// Run a shell session over a fixture, feeding `commands` as stdin
    fn run_session_fixture(fixture_name: &str, commands: &str) -> String {
        let input_path = format!("tests/fixtures/{}", fixture_name);
        let args = CliArgs::try_parse_from(["transaction-analytics", input_path.as_str(), "shell"])
            .unwrap_or_else(|e| panic!("Failed to parse arguments: {}", e));
        assert_eq!(args.command, Command::Shell);

        let mut store = load_store(&args.input_file, args.format).unwrap();
        let mut output = Vec::new();
        cli::run_session(&mut store, commands.as_bytes(), &mut output).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[rstest]
    fn test_session_add_is_visible_to_later_queries(
        #[values("transactions.csv", "transactions.json")] fixture: &str,
    ) {
        let output = run_session_fixture(
            fixture,
            "add --id 9 --date 2024-02-28 --amount -4.75 --type debit --merchant \"Bean There\"\n\
             total\n\
             total-debit\n\
             find 9\n\
             by-merchant \"Bean There\"\n",
        );

        assert_eq!(
            output,
            format!(
                "Transaction 9 added (9 transactions in store)\n\
                 440.50\n\
                 -19.50\n\
                 {header}9,2024-02-28,-4.75,debit,,Bean There,\n\
                 {header}3,2024-02-01,10.5,debit,Coffee beans,Bean There,Mastercard\n\
                 9,2024-02-28,-4.75,debit,,Bean There,\n",
                header = HEADER
            )
        );
    }

    #[test]
    fn test_session_recovers_from_empty_store_errors() {
        let output = run_session_fixture(
            "empty.json",
            "most-active-month\n\
             add --id 1 --date 2024-05-02 --amount 12 --type credit\n\
             most-active-month\n",
        );

        assert_eq!(
            output,
            "Error: No data for most active month\n\
             Transaction 1 added (1 transactions in store)\n\
             2024-5\n"
        );
    }

    #[test]
    fn test_missing_input_file() {
        assert!(matches!(
            run_fixture("does_not_exist.csv", &["total"]),
            Err(AnalyticsError::FileNotFound { .. })
        ));
    }
}
