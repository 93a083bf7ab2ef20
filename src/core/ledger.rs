//! Ledger module
//!
//! The `Ledger` owns every account and the backing store they are persisted
//! to. It is responsible for:
//! - Loading the store on open and rewriting it on `save`
//! - Creating accounts with generated ids and passcodes
//! - Login (id + passcode check) and deletion
//! - Transfers and mobile top-ups across accounts
//!
//! Creating and deleting an account rewrite the store immediately. Balance
//! changes (deposit, withdraw, transfer, top-up) do not; callers invoke
//! [`Ledger::save`] when they want them durable.

use crate::core::identifiers::{IdentifierSource, RandomIdentifiers};
use crate::io::AccountStore;
use crate::types::{Account, AccountCategory, AccountId, BankError};
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{info, warn};

/// How many candidate ids `create_account` draws before giving up
pub const MAX_ID_ATTEMPTS: usize = 1_000;

/// All accounts plus their persistence boundary
pub struct Ledger {
    /// Map of account ids to accounts; each key equals its value's `id`
    accounts: HashMap<AccountId, Account>,

    store: AccountStore,

    identifiers: Box<dyn IdentifierSource>,
}

impl fmt::Debug for Ledger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ledger")
            .field("accounts", &self.accounts.len())
            .field("store", &self.store)
            .finish_non_exhaustive()
    }
}

impl Ledger {
    /// Open the ledger backed by the store at `path`
    ///
    /// A missing store yields an empty ledger. Malformed store lines are
    /// skipped.
    ///
    /// # Errors
    ///
    /// Returns `IoError` if the store exists but cannot be read.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, BankError> {
        Self::open_with(path, Box::new(RandomIdentifiers))
    }

    /// Open the ledger with a custom id/passcode source
    pub fn open_with(
        path: impl Into<PathBuf>,
        identifiers: Box<dyn IdentifierSource>,
    ) -> Result<Self, BankError> {
        let mut ledger = Ledger {
            accounts: HashMap::new(),
            store: AccountStore::new(path),
            identifiers,
        };
        ledger.load()?;
        Ok(ledger)
    }

    /// Replace the in-memory accounts with the store's contents
    ///
    /// When the store holds the same id twice, the later line wins.
    pub fn load(&mut self) -> Result<(), BankError> {
        let mut accounts = HashMap::new();

        for account in self.store.load()? {
            if let Some(previous) = accounts.insert(account.id.clone(), account) {
                warn!(id = %previous.id, "duplicate account id in store, keeping the later record");
            }
        }

        self.accounts = accounts;
        Ok(())
    }

    /// Rewrite the whole store from the in-memory accounts
    ///
    /// Records are written sorted by id.
    pub fn save(&self) -> Result<(), BankError> {
        self.store.save(self.accounts())
    }

    /// Location of the backing store
    pub fn store_path(&self) -> &Path {
        self.store.path()
    }

    /// Number of accounts
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    /// Whether the ledger holds no accounts
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Whether an account with `id` exists
    pub fn contains(&self, id: &str) -> bool {
        self.accounts.contains_key(id)
    }

    /// Look up an account without checking its passcode
    pub fn get(&self, id: &str) -> Option<&Account> {
        self.accounts.get(id)
    }

    /// Get all accounts sorted by id
    pub fn accounts(&self) -> Vec<&Account> {
        let mut accounts: Vec<&Account> = self.accounts.values().collect();
        accounts.sort_by(|a, b| a.id.cmp(&b.id));
        accounts
    }

    /// Create an account from a category name (`Personal` or `Business`)
    ///
    /// # Errors
    ///
    /// - `InvalidCategory` if the name is not recognized
    /// - any error from [`Ledger::open_account`]
    pub fn create_account(&mut self, category: &str) -> Result<Account, BankError> {
        let category = AccountCategory::from_str(category)?;
        self.open_account(category)
    }

    /// Create a zero-balance account and persist the ledger
    ///
    /// The id is regenerated until it does not clash with an existing
    /// account. The returned copy is the only place the passcode is handed
    /// out.
    ///
    /// # Errors
    ///
    /// - `IdentifiersExhausted` if no free id turned up in `MAX_ID_ATTEMPTS` draws
    /// - `IoError` if the store cannot be written; the account is not kept
    pub fn open_account(&mut self, category: AccountCategory) -> Result<Account, BankError> {
        let id = self.free_account_id()?;
        let passcode = self.identifiers.next_passcode();
        let account = Account::new(id.clone(), passcode, category);

        self.accounts.insert(id.clone(), account.clone());

        if let Err(e) = self.save() {
            self.accounts.remove(&id);
            return Err(e);
        }

        info!(id = %id, category = %category, "account created");
        Ok(account)
    }

    fn free_account_id(&mut self) -> Result<AccountId, BankError> {
        for _ in 0..MAX_ID_ATTEMPTS {
            let candidate = self.identifiers.next_account_id();
            if !candidate.is_empty() && !self.accounts.contains_key(&candidate) {
                return Ok(candidate);
            }
        }
        Err(BankError::IdentifiersExhausted {
            attempts: MAX_ID_ATTEMPTS,
        })
    }

    /// Return the account matching `id` and `passcode`
    ///
    /// # Errors
    ///
    /// Returns `InvalidAccount` if the id is unknown or the passcode differs.
    /// Both cases produce the same message.
    pub fn login(&self, id: &str, passcode: &str) -> Result<&Account, BankError> {
        match self.accounts.get(id) {
            Some(account) if account.passcode == passcode => Ok(account),
            _ => Err(BankError::invalid_credentials()),
        }
    }

    /// Same as [`Ledger::login`] but hands out a mutable account
    pub fn login_mut(&mut self, id: &str, passcode: &str) -> Result<&mut Account, BankError> {
        match self.accounts.get_mut(id) {
            Some(account) if account.passcode == passcode => Ok(account),
            _ => Err(BankError::invalid_credentials()),
        }
    }

    /// Remove an account and persist the ledger
    ///
    /// # Errors
    ///
    /// - `InvalidAccount` if `id` is absent; the store is not touched
    /// - `IoError` if the store cannot be written; the account is restored
    pub fn delete_account(&mut self, id: &str) -> Result<(), BankError> {
        let account = self
            .accounts
            .remove(id)
            .ok_or_else(|| BankError::account_not_found(id))?;

        if let Err(e) = self.save() {
            self.accounts.insert(account.id.clone(), account);
            return Err(e);
        }

        info!(id = %id, "account deleted");
        Ok(())
    }

    /// Deposit into the account `id`
    pub fn deposit(&mut self, id: &str, amount: Decimal) -> Result<String, BankError> {
        self.require_mut(id)?.deposit(amount)
    }

    /// Withdraw from the account `id`
    pub fn withdraw(&mut self, id: &str, amount: Decimal) -> Result<String, BankError> {
        self.require_mut(id)?.withdraw(amount)
    }

    /// Transfer `amount` from account `from` to account `to`
    ///
    /// # Errors
    ///
    /// - `InvalidAccount` if `from` is absent
    /// - `InvalidRecipient` if `to` is absent or equal to `from`
    /// - any error from [`Account::transfer`], unchanged
    pub fn transfer(&mut self, from: &str, to: &str, amount: Decimal) -> Result<String, BankError> {
        // Take the sender out of the map so the recipient can be borrowed mutably
        let mut sender = self
            .accounts
            .remove(from)
            .ok_or_else(|| BankError::account_not_found(from))?;

        let result = sender.transfer(amount, self.accounts.get_mut(to));
        self.accounts.insert(sender.id.clone(), sender);
        result
    }

    /// Top up a phone from the account `id`
    ///
    /// # Errors
    ///
    /// - `InvalidAccount` if `id` is absent
    /// - `TopUpFailed` wrapping any withdrawal error
    pub fn top_up_mobile(
        &mut self,
        id: &str,
        phone_number: &str,
        amount: Decimal,
    ) -> Result<String, BankError> {
        top_up_mobile(self.require_mut(id)?, phone_number, amount)
    }

    fn require_mut(&mut self, id: &str) -> Result<&mut Account, BankError> {
        self.accounts
            .get_mut(id)
            .ok_or_else(|| BankError::account_not_found(id))
    }
}

/// Pay `amount` from `account` towards the phone `phone_number`
///
/// The phone number is only echoed back in the confirmation.
///
/// # Errors
///
/// Returns `TopUpFailed` carrying the message of the underlying
/// `InvalidAmount` or `InsufficientFunds` error.
pub fn top_up_mobile(
    account: &mut Account,
    phone_number: &str,
    amount: Decimal,
) -> Result<String, BankError> {
    account
        .withdraw(amount)
        .map_err(|e| BankError::top_up_failed(&e))?;

    Ok(format!(
        "Successfully topped up Nu: {} to phone {}",
        amount, phone_number
    ))
}
