//! Error types for the bank ledger
//!
//! This module defines every error that a ledger or account operation can
//! return. Errors are plain values: operations return them at the point of
//! detection and callers propagate them unchanged with `?`.
//!
//! # Error Categories
//!
//! - **Validation Errors**: invalid amounts, insufficient funds, unknown accounts
//! - **Top-up Errors**: any validation error surfaced through a mobile top-up
//! - **Store Errors**: malformed records (recovered during load) and I/O failures
//! - **Arithmetic Errors**: overflow in balance calculations

use rust_decimal::Decimal;
use thiserror::Error;

/// Main error type for the bank ledger
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BankError {
    /// Amount supplied to deposit, withdraw, transfer or top-up was not positive
    #[error("Amount must be greater than zero (got {amount})")]
    InvalidAmount {
        /// The rejected amount
        amount: Decimal,
    },

    /// Withdrawal or transfer amount exceeds the current balance
    ///
    /// The account balance is left untouched when this is returned.
    #[error("Not enough balance in account {account}: available {available}, requested {requested}")]
    InsufficientFunds {
        /// Account the funds were requested from
        account: String,
        /// Balance at the time of the request
        available: Decimal,
        /// Requested amount
        requested: Decimal,
    },

    /// Transfer target account is absent
    #[error("Invalid recipient account")]
    InvalidRecipient,

    /// Login with unknown id or wrong passcode, or delete of an unknown id
    #[error("{message}")]
    InvalidAccount {
        /// Human readable reason
        message: String,
    },

    /// Account creation requested with an unrecognized category
    #[error("Invalid account category '{category}' (expected Personal or Business)")]
    InvalidCategory {
        /// The rejected category string
        category: String,
    },

    /// A top-up failed; `message` carries the underlying error's text
    #[error("Top-up failed: {message}")]
    TopUpFailed {
        /// Display text of the root cause
        message: String,
    },

    /// Arithmetic overflow would occur
    #[error("Arithmetic overflow in {operation} for account {account}")]
    ArithmeticOverflow {
        /// Operation that would overflow
        operation: String,
        /// Account id
        account: String,
    },

    /// A store line could not be turned into an account
    ///
    /// Only produced while loading. The ledger logs and skips the line.
    #[error("Malformed record at line {line}: {message}")]
    MalformedRecord {
        /// 1-based line number in the store
        line: u64,
        /// Description of the problem
        message: String,
    },

    /// I/O error while reading or writing the store
    #[error("I/O error: {message}")]
    IoError {
        /// Description of the I/O error
        message: String,
    },

    /// No free account id could be found
    #[error("Could not allocate a free account id after {attempts} attempts")]
    IdentifiersExhausted {
        /// Number of generation attempts made
        attempts: usize,
    },
}

impl From<std::io::Error> for BankError {
    fn from(error: std::io::Error) -> Self {
        BankError::IoError {
            message: error.to_string(),
        }
    }
}

impl From<csv::Error> for BankError {
    fn from(error: csv::Error) -> Self {
        if error.is_io_error() {
            return BankError::IoError {
                message: error.to_string(),
            };
        }

        // Everything else (bad UTF-8, field mismatch) is a problem with one record
        let line = error.position().map(|pos| pos.line()).unwrap_or_default();
        BankError::MalformedRecord {
            line,
            message: error.to_string(),
        }
    }
}

// Helper functions for creating common errors

impl BankError {
    /// Create an InvalidAmount error
    pub fn invalid_amount(amount: Decimal) -> Self {
        BankError::InvalidAmount { amount }
    }

    /// Create an InsufficientFunds error
    pub fn insufficient_funds(account: &str, available: Decimal, requested: Decimal) -> Self {
        BankError::InsufficientFunds {
            account: account.to_string(),
            available,
            requested,
        }
    }

    /// Create an InvalidAccount error for a failed login
    pub fn invalid_credentials() -> Self {
        BankError::InvalidAccount {
            message: "Invalid ID or passcode".to_string(),
        }
    }

    /// Create an InvalidAccount error for an id that is not in the ledger
    pub fn account_not_found(id: &str) -> Self {
        BankError::InvalidAccount {
            message: format!("Account {} not found", id),
        }
    }

    /// Create an InvalidCategory error
    pub fn invalid_category(category: &str) -> Self {
        BankError::InvalidCategory {
            category: category.to_string(),
        }
    }

    /// Wrap any error as a TopUpFailed error, keeping its message
    pub fn top_up_failed(cause: &BankError) -> Self {
        BankError::TopUpFailed {
            message: cause.to_string(),
        }
    }

    /// Create an ArithmeticOverflow error
    pub fn arithmetic_overflow(operation: &str, account: &str) -> Self {
        BankError::ArithmeticOverflow {
            operation: operation.to_string(),
            account: account.to_string(),
        }
    }

    /// Create a MalformedRecord error
    pub fn malformed_record(line: u64, message: impl Into<String>) -> Self {
        BankError::MalformedRecord {
            line,
            message: message.into(),
        }
    }
}
