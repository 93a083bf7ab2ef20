//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `account`: Account, its category, and the balance primitives
//! - `error`: Error types for the bank ledger

pub mod account;
pub mod error;

pub use account::{Account, AccountCategory, AccountId};
pub use error::BankError;
