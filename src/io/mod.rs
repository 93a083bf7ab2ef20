//! I/O module
//!
//! Handles the backing store.
//!
//! # Components
//!
//! - `store_format` - Record format handling (record conversion, line serialization)
//! - `store` - Store file reader and atomic writer

pub mod store;
pub mod store_format;

pub use store::{AccountStore, StoreReader};
pub use store_format::{convert_store_record, parse_balance, write_accounts, StoreRecord};
