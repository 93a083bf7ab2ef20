//! Core business logic module
//!
//! This module contains the ledger components:
//! - `ledger` - Account collection, persistence, and cross-account operations
//! - `identifiers` - Account id and passcode generation

pub mod identifiers;
pub mod ledger;

pub use identifiers::{IdentifierSource, RandomIdentifiers, SequenceIdentifiers};
pub use ledger::{top_up_mobile, Ledger};
