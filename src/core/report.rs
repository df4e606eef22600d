use crate::domain::model::{AddressRecord, LAMPORTS_PER_SOL};
use crate::utils::error::{CheckError, Result};
use chrono::{DateTime, SecondsFormat, Utc};

pub const BALANCES_FILE_PREFIX: &str = "solana_balances_";
pub const FAILURES_FILE_PREFIX: &str = "solana_balance_errors_";

const BALANCES_HEADER: [&str; 2] = ["Address", "Balance(SOL)"];
const FAILURES_HEADER: [&str; 2] = ["Address", "Error"];

/// Exact lamports → SOL rendering with nine fractional digits.
pub fn format_sol(lamports: u64) -> String {
    format!(
        "{}.{:09}",
        lamports / LAMPORTS_PER_SOL,
        lamports % LAMPORTS_PER_SOL
    )
}

/// ISO-8601 UTC with milliseconds, `:` and `.` replaced so it is filename safe.
pub fn file_timestamp(now: DateTime<Utc>) -> String {
    now.to_rfc3339_opts(SecondsFormat::Millis, true)
        .replace(|c: char| c == ':' || c == '.', "-")
}

pub fn balances_file_name(timestamp: &str) -> String {
    format!("{}{}.csv", BALANCES_FILE_PREFIX, timestamp)
}

pub fn failures_file_name(timestamp: &str) -> String {
    format!("{}{}.csv", FAILURES_FILE_PREFIX, timestamp)
}

/// CSV of successful records only, header first.
pub fn render_balances_csv(records: &[AddressRecord]) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(BALANCES_HEADER)?;

    for record in records {
        if let Some(lamports) = record.lamports() {
            writer.write_record([record.address.as_str(), format_sol(lamports).as_str()])?;
        }
    }

    finish(writer)
}

pub fn render_failures_csv(records: &[AddressRecord]) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(FAILURES_HEADER)?;

    for record in records {
        if let Some(reason) = record.error() {
            writer.write_record([record.address.as_str(), reason])?;
        }
    }

    finish(writer)
}

fn finish(writer: csv::Writer<Vec<u8>>) -> Result<Vec<u8>> {
    writer
        .into_inner()
        .map_err(|e| CheckError::IoError(e.into_error()))
}

/// Console progress line for one record.
pub fn progress_line(record: &AddressRecord) -> String {
    match (record.balance(), record.error()) {
        (Some(balance), _) => format!("✓ {}: {:.4} SOL", record.address, balance),
        (None, Some(reason)) => format!("✗ {}: Error - {}", record.address, reason),
        (None, None) => format!("✗ {}: Error - unknown", record.address),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_one_sol_formats_with_nine_digits() {
        assert_eq!(format_sol(1_000_000_000), "1.000000000");
        assert_eq!(format_sol(0), "0.000000000");
        assert_eq!(format_sol(1), "0.000000001");
        assert_eq!(format_sol(123_456_789_012), "123.456789012");
    }

    #[test]
    fn test_file_timestamp_replaces_colons_and_dots() {
        let now = Utc.with_ymd_and_hms(2024, 3, 9, 7, 5, 1).unwrap()
            + chrono::Duration::milliseconds(42);

        let timestamp = file_timestamp(now);

        assert_eq!(timestamp, "2024-03-09T07-05-01-042Z");
        assert_eq!(
            balances_file_name(&timestamp),
            "solana_balances_2024-03-09T07-05-01-042Z.csv"
        );
        assert_eq!(
            failures_file_name(&timestamp),
            "solana_balance_errors_2024-03-09T07-05-01-042Z.csv"
        );
    }

    #[test]
    fn test_balances_csv_excludes_failures() {
        let records = vec![
            AddressRecord::success("first", 1_000_000_000),
            AddressRecord::failure("Addr2", "Invalid public key input"),
            AddressRecord::success("third", 2_500_000),
        ];

        let csv = String::from_utf8(render_balances_csv(&records).unwrap()).unwrap();

        assert_eq!(
            csv,
            "Address,Balance(SOL)\nfirst,1.000000000\nthird,0.002500000\n"
        );
    }

    #[test]
    fn test_empty_result_still_has_header() {
        let csv = String::from_utf8(render_balances_csv(&[]).unwrap()).unwrap();
        assert_eq!(csv, "Address,Balance(SOL)\n");
    }

    #[test]
    fn test_failures_csv_quotes_reasons() {
        let records = vec![
            AddressRecord::success("first", 1),
            AddressRecord::failure("Addr2", "RPC error -32602: Invalid param: WrongSize, got 4"),
        ];

        let csv = String::from_utf8(render_failures_csv(&records).unwrap()).unwrap();

        assert_eq!(
            csv,
            "Address,Error\nAddr2,\"RPC error -32602: Invalid param: WrongSize, got 4\"\n"
        );
    }

    #[test]
    fn test_progress_lines() {
        assert_eq!(
            progress_line(&AddressRecord::success("first", 1_234_500_000)),
            "✓ first: 1.2345 SOL"
        );
        assert_eq!(
            progress_line(&AddressRecord::failure("Addr2", "Invalid public key input")),
            "✗ Addr2: Error - Invalid public key input"
        );
    }
}
