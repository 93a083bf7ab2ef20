//! Backing store file access
//!
//! Reads and writes the flat text store that durably records all accounts.
//! Delegates record format concerns to the store_format module.
//!
//! # Loading
//!
//! `StoreReader` yields one `Result<Account, BankError>` per store line.
//! `AccountStore::load` drains it, logging and skipping every
//! `MalformedRecord`; only I/O failures abort a load. A missing store file
//! loads as an empty ledger.
//!
//! # Saving
//!
//! `AccountStore::save` rewrites the whole store. The records go to a sibling
//! `.tmp` file which is synced and then renamed over the store, so readers
//! see either the old contents or the new ones, never a truncated file.

use crate::io::store_format::{convert_store_record, write_accounts, StoreRecord, FIELD_COUNT};
use crate::types::{Account, BankError};
use csv::{ReaderBuilder, StringRecord, Trim};
use std::fs::{self, File};
use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Streaming reader over store records
///
/// Works over any `Read`, which keeps it usable on in-memory buffers in tests.
#[derive(Debug)]
pub struct StoreReader<R: Read> {
    reader: csv::Reader<R>,
    record: StringRecord,
    finished: bool,
}

impl<R: Read> StoreReader<R> {
    /// Create a new StoreReader
    ///
    /// The reader is configured to:
    /// - Treat every line as data (no header row)
    /// - Trim whitespace from all fields
    /// - Allow any field count, so short or long lines reach validation
    /// - Treat `"` as an ordinary byte, so a stray quote stays on its own line
    pub fn new(reader: R) -> Self {
        let reader = ReaderBuilder::new()
            .has_headers(false)
            .trim(Trim::All)
            .flexible(true)
            .quoting(false)
            .buffer_capacity(8 * 1024)
            .from_reader(reader);

        Self {
            reader,
            record: StringRecord::new(),
            finished: false,
        }
    }

    fn convert_current(&self) -> Result<Account, BankError> {
        let line = self
            .record
            .position()
            .map(|pos| pos.line())
            .unwrap_or_default();

        if self.record.len() != FIELD_COUNT {
            return Err(BankError::malformed_record(
                line,
                format!(
                    "expected {} fields, found {}",
                    FIELD_COUNT,
                    self.record.len()
                ),
            ));
        }

        let store_record: StoreRecord = self
            .record
            .deserialize(None)
            .map_err(|e| BankError::malformed_record(line, e.to_string()))?;

        convert_store_record(store_record, line)
    }
}

impl<R: Read> Iterator for StoreReader<R> {
    type Item = Result<Account, BankError>;

    /// Read the next line and convert it to an Account
    ///
    /// # Returns
    ///
    /// * `Some(Ok(Account))` - Well-formed record
    /// * `Some(Err(MalformedRecord))` - Bad record; iteration may continue
    /// * `Some(Err(IoError))` - Read failure; the next call returns `None`
    /// * `None` - End of store
    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        match self.reader.read_record(&mut self.record) {
            Ok(true) => Some(self.convert_current()),
            Ok(false) => {
                self.finished = true;
                None
            }
            Err(e) => {
                let error = BankError::from(e);
                if matches!(error, BankError::IoError { .. }) {
                    self.finished = true;
                }
                Some(Err(error))
            }
        }
    }
}

/// Handle to the backing store file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountStore {
    path: PathBuf,
}

impl AccountStore {
    /// Create a handle for the store at `path`. Nothing is read or created yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the store file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load every well-formed account from the store
    ///
    /// Accounts are returned in file order. Malformed lines are logged at
    /// `warn` and dropped.
    ///
    /// # Errors
    ///
    /// Returns `IoError` if the store exists but cannot be read.
    pub fn load(&self) -> Result<Vec<Account>, BankError> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(store = %self.path.display(), "store not found, starting empty");
                return Ok(Vec::new());
            }
            Err(e) => {
                return Err(BankError::IoError {
                    message: format!("Failed to open store '{}': {}", self.path.display(), e),
                })
            }
        };

        let mut accounts = Vec::new();
        let mut skipped = 0usize;

        for result in StoreReader::new(file) {
            match result {
                Ok(account) => accounts.push(account),
                Err(e @ BankError::MalformedRecord { .. }) => {
                    skipped += 1;
                    warn!(store = %self.path.display(), error = %e, "skipping malformed record");
                }
                Err(e) => return Err(e),
            }
        }

        debug!(
            store = %self.path.display(),
            loaded = accounts.len(),
            skipped,
            "store loaded"
        );

        Ok(accounts)
    }

    /// Overwrite the store with `accounts`
    ///
    /// # Errors
    ///
    /// Returns `IoError` if the parent directory, the temp file, or the final
    /// rename cannot be created. The existing store is untouched in that case.
    pub fn save<'a, I>(&self, accounts: I) -> Result<(), BankError>
    where
        I: IntoIterator<Item = &'a Account>,
    {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| BankError::IoError {
                    message: format!("Failed to create directory '{}': {}", parent.display(), e),
                })?;
            }
        }

        let temp_path = self.temp_path();
        let file = File::create(&temp_path).map_err(|e| BankError::IoError {
            message: format!("Failed to create '{}': {}", temp_path.display(), e),
        })?;

        let mut writer = BufWriter::new(file);
        let written = write_accounts(accounts, &mut writer)
            .and_then(|()| writer.flush().map_err(BankError::from))
            .and_then(|()| writer.get_ref().sync_all().map_err(BankError::from));

        if let Err(e) = written {
            let _ = fs::remove_file(&temp_path);
            return Err(e);
        }

        fs::rename(&temp_path, &self.path).map_err(|e| {
            let _ = fs::remove_file(&temp_path);
            BankError::IoError {
                message: format!("Failed to replace store '{}': {}", self.path.display(), e),
            }
        })?;

        debug!(store = %self.path.display(), "store saved");

        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".tmp");
        PathBuf::from(name)
    }
}
