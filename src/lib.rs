//! Bank Ledger Library
//! # Overview
//!
//! This library keeps a set of monetary accounts in memory and persists them
//! to a flat text store between runs.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (Account, AccountCategory, BankError)
//! - [`core`] - Business logic components:
//!   - [`core::ledger`] - Account collection, persistence, transfers and top-ups
//!   - [`core::identifiers`] - Account id and passcode generation
//! - [`io`] - Backing store format and file access
//! - [`cli`] - CLI arguments parsing and command dispatch
//!
//! # Operations
//!
//! - **Deposit**: Credit funds to an account
//! - **Withdraw**: Debit funds from an account (requires sufficient balance)
//! - **Transfer**: Withdraw from one account and deposit into another
//! - **Top-up**: A withdrawal paid towards a phone number
//! - **Create / Delete**: Change ledger membership; both rewrite the store
//!
//! # Store Format
//!
//! One account per line, no header:
//!
//! ```text
//! <id>,<passcode>,<category>,<balance>
//! ```
//!
//! Malformed lines are skipped on load. A missing store is an empty ledger.

// Module declarations
pub mod cli;
pub mod core;
pub mod io;
pub mod types;

pub use crate::core::{
    top_up_mobile, IdentifierSource, Ledger, RandomIdentifiers, SequenceIdentifiers,
};
pub use crate::io::AccountStore;
pub use crate::types::{Account, AccountCategory, AccountId, BankError};
