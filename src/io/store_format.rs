//! Store record format handling
//!
//! The backing store is headerless comma-separated text, one account per line:
//!
//! ```text
//! <id>,<passcode>,<category>,<balance>
//! ```
//!
//! This module provides:
//! - StoreRecord structure for deserialization
//! - Conversion from store records to accounts
//! - Account serialization back to store lines
//!
//! All functions are pure (no file I/O) for easy testing.

use crate::types::{Account, AccountCategory, BankError};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::io::Write;
use std::str::FromStr;

/// Number of fields in a well-formed record
pub const FIELD_COUNT: usize = 4;

/// Raw store record, fields in file order
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct StoreRecord {
    pub id: String,
    pub passcode: String,
    pub category: String,
    pub balance: String,
}

/// Parse a balance field
///
/// Accepts plain decimals (`500.0`, `12`) and scientific notation (`1e+21`),
/// the latter being what a float formatter may have written for large values.
pub fn parse_balance(raw: &str) -> Option<Decimal> {
    let raw = raw.trim();
    Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .ok()
}

/// Convert a StoreRecord to an Account
///
/// # Arguments
///
/// * `record` - The deserialized record
/// * `line` - 1-based line number, used in error messages
///
/// # Errors
///
/// Returns `MalformedRecord` if the id is empty, the id or passcode holds a
/// quote, the category is unknown, or the balance is not a non-negative number.
pub fn convert_store_record(record: StoreRecord, line: u64) -> Result<Account, BankError> {
    if record.id.is_empty() {
        return Err(BankError::malformed_record(line, "empty account id"));
    }

    if record.id.contains('"') || record.passcode.contains('"') {
        return Err(BankError::malformed_record(line, "unexpected quote"));
    }

    let category = AccountCategory::from_str(&record.category)
        .map_err(|e| BankError::malformed_record(line, e.to_string()))?;

    let balance = parse_balance(&record.balance).ok_or_else(|| {
        BankError::malformed_record(line, format!("invalid balance '{}'", record.balance))
    })?;

    Account::with_balance(record.id, record.passcode, category, balance)
        .map_err(|_| BankError::malformed_record(line, format!("negative balance {}", balance)))
}

/// Write accounts as store lines
///
/// Accounts are written in the order given, one record per line, no header.
/// Balances use `Decimal`'s own formatting so a reload yields the exact value.
///
/// # Errors
///
/// Returns `IoError` if writing or flushing fails.
pub fn write_accounts<'a, I>(accounts: I, output: &mut dyn Write) -> Result<(), BankError>
where
    I: IntoIterator<Item = &'a Account>,
{
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .quote_style(csv::QuoteStyle::Never)
        .from_writer(output);

    for account in accounts {
        let balance = account.balance().to_string();
        writer
            .write_record([
                account.id.as_str(),
                account.passcode.as_str(),
                account.category.as_str(),
                balance.as_str(),
            ])
            .map_err(|e| BankError::IoError {
                message: format!("Failed to write account {}: {}", account.id, e),
            })?;
    }

    writer.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn record(id: &str, passcode: &str, category: &str, balance: &str) -> StoreRecord {
        StoreRecord {
            id: id.to_string(),
            passcode: passcode.to_string(),
            category: category.to_string(),
            balance: balance.to_string(),
        }
    }

    #[rstest]
    #[case::one_decimal("500.0", Decimal::new(5000, 1))]
    #[case::integer("1000", Decimal::from(1000))]
    #[case::two_decimals("12.34", Decimal::new(1234, 2))]
    #[case::padded("  7.5 ", Decimal::new(75, 1))]
    #[case::scientific("1e3", Decimal::from(1000))]
    #[case::zero("0.0", Decimal::ZERO)]
    fn test_parse_balance(#[case] raw: &str, #[case] expected: Decimal) {
        assert_eq!(parse_balance(raw), Some(expected));
    }

    #[rstest]
    #[case::text("abc")]
    #[case::empty("")]
    #[case::two_points("1.2.3")]
    fn test_parse_balance_rejects(#[case] raw: &str) {
        assert_eq!(parse_balance(raw), None);
    }

    #[test]
    fn test_convert_valid_record() {
        let account = convert_store_record(record("10001", "1234", "Personal", "500.0"), 1).unwrap();

        assert_eq!(account.id, "10001");
        assert_eq!(account.passcode, "1234");
        assert_eq!(account.category, AccountCategory::Personal);
        assert_eq!(account.balance(), Decimal::new(5000, 1));
    }

    #[rstest]
    #[case::empty_id(record("", "1234", "Personal", "1.0"), "empty account id")]
    #[case::quoted_id(record("\"10001", "1234", "Personal", "1.0"), "unexpected quote")]
    #[case::quoted_passcode(record("10001", "\"1234", "Personal", "1.0"), "unexpected quote")]
    #[case::unknown_category(record("10001", "1234", "Savings", "1.0"), "Invalid account category")]
    #[case::bad_balance(record("10001", "1234", "Business", "lots"), "invalid balance 'lots'")]
    #[case::negative_balance(record("10001", "1234", "Business", "-5"), "negative balance -5")]
    fn test_convert_malformed_record(#[case] input: StoreRecord, #[case] expected_error: &str) {
        let err = convert_store_record(input, 7).unwrap_err();

        assert!(matches!(err, BankError::MalformedRecord { line: 7, .. }));
        assert!(
            err.to_string().contains(expected_error),
            "unexpected error: {}",
            err
        );
    }

    #[rstest]
    #[case::empty(vec![], "")]
    #[case::single(
        vec![Account::with_balance("10001", "1234", AccountCategory::Personal, Decimal::new(5000, 1)).unwrap()],
        "10001,1234,Personal,500.0\n"
    )]
    #[case::keeps_given_order(
        vec![
            Account::with_balance("10002", "5678", AccountCategory::Business, Decimal::from(1000)).unwrap(),
            Account::new("10001", "1234", AccountCategory::Personal),
        ],
        "10002,5678,Business,1000\n10001,1234,Personal,0\n"
    )]
    #[case::exact_precision(
        vec![Account::with_balance("10003", "0001", AccountCategory::Personal, Decimal::new(120050, 2)).unwrap()],
        "10003,0001,Personal,1200.50\n"
    )]
    fn test_write_accounts(#[case] accounts: Vec<Account>, #[case] expected_output: &str) {
        let mut output = Vec::new();
        write_accounts(&accounts, &mut output).unwrap();

        assert_eq!(String::from_utf8(output).unwrap(), expected_output);
    }
}
