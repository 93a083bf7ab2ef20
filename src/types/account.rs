//! Account-related types for the bank ledger
//!
//! This module defines the Account structure, its category, and the
//! primitive balance operations every other operation is composed from.

use super::error::BankError;
use rust_decimal::Decimal;
use std::fmt;
use std::str::FromStr;

/// Account identifier
///
/// Opaque string, unique within a ledger. Generated ids are 5-digit numbers.
pub type AccountId = String;

/// Classification of an account
///
/// Carries no behavior; it is recorded and persisted, nothing more.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccountCategory {
    Personal,
    Business,
}

impl AccountCategory {
    /// Name as written to the backing store
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountCategory::Personal => "Personal",
            AccountCategory::Business => "Business",
        }
    }
}

impl fmt::Display for AccountCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AccountCategory {
    type Err = BankError;

    /// Parse a category name, ignoring ASCII case and surrounding whitespace
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("personal") {
            Ok(AccountCategory::Personal)
        } else if trimmed.eq_ignore_ascii_case("business") {
            Ok(AccountCategory::Business)
        } else {
            Err(BankError::invalid_category(s))
        }
    }
}

/// A single holder's funds
///
/// `balance` never goes below zero: the only way to decrease it is
/// [`Account::withdraw`], which checks before it mutates.
#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    /// Unique account id
    pub id: AccountId,

    /// Numeric PIN used for login. Compared for equality only.
    pub passcode: String,

    /// Personal or Business
    pub category: AccountCategory,

    /// Current balance
    balance: Decimal,
}

impl Account {
    /// Create a new account with a zero balance
    pub fn new(
        id: impl Into<AccountId>,
        passcode: impl Into<String>,
        category: AccountCategory,
    ) -> Self {
        Account {
            id: id.into(),
            passcode: passcode.into(),
            category,
            balance: Decimal::ZERO,
        }
    }

    /// Rebuild an account with an existing balance (e.g. from a store record)
    ///
    /// # Errors
    ///
    /// Returns `InvalidAmount` if `balance` is negative.
    pub fn with_balance(
        id: impl Into<AccountId>,
        passcode: impl Into<String>,
        category: AccountCategory,
        balance: Decimal,
    ) -> Result<Self, BankError> {
        if balance < Decimal::ZERO {
            return Err(BankError::invalid_amount(balance));
        }
        let mut account = Account::new(id, passcode, category);
        account.balance = balance;
        Ok(account)
    }

    /// Current balance
    pub fn balance(&self) -> Decimal {
        self.balance
    }

    /// Add funds to the account
    ///
    /// # Returns
    ///
    /// A confirmation message with the amount and the new balance.
    ///
    /// # Errors
    ///
    /// - `InvalidAmount` if `amount <= 0`
    /// - `ArithmeticOverflow` if the new balance cannot be represented
    pub fn deposit(&mut self, amount: Decimal) -> Result<String, BankError> {
        ensure_positive(amount)?;

        self.balance = self
            .balance
            .checked_add(amount)
            .ok_or_else(|| BankError::arithmetic_overflow("deposit", &self.id))?;

        Ok(format!(
            "Deposited Nu: {}. New balance: Nu: {:.2}",
            amount, self.balance
        ))
    }

    /// Take funds out of the account
    ///
    /// Both checks run before the balance is touched, so a failed withdrawal
    /// leaves the account unchanged.
    ///
    /// # Errors
    ///
    /// - `InvalidAmount` if `amount <= 0`
    /// - `InsufficientFunds` if `amount > balance`
    pub fn withdraw(&mut self, amount: Decimal) -> Result<String, BankError> {
        ensure_positive(amount)?;

        if amount > self.balance {
            return Err(BankError::insufficient_funds(
                &self.id,
                self.balance,
                amount,
            ));
        }

        self.balance -= amount;

        Ok(format!(
            "Withdrew Nu: {}. New balance: Nu: {:.2}",
            amount, self.balance
        ))
    }

    /// Move funds from this account to `recipient`
    ///
    /// Withdraws from `self` first and deposits into the recipient only once
    /// the withdrawal succeeded. If the deposit leg fails the withdrawal is
    /// reversed, so on every error path both balances are unchanged.
    ///
    /// This is not crash-safe: a process dying between the two legs loses the
    /// withdrawn amount.
    ///
    /// # Errors
    ///
    /// - `InvalidRecipient` if `recipient` is `None`
    /// - any error from [`Account::withdraw`] or [`Account::deposit`], unchanged
    pub fn transfer(
        &mut self,
        amount: Decimal,
        recipient: Option<&mut Account>,
    ) -> Result<String, BankError> {
        let recipient = recipient.ok_or(BankError::InvalidRecipient)?;

        self.withdraw(amount)?;

        if let Err(e) = recipient.deposit(amount) {
            // Withdraw just took exactly `amount` out, adding it back cannot overflow
            self.balance += amount;
            return Err(e);
        }

        Ok(format!(
            "Successfully transferred Nu: {} to account {}",
            amount, recipient.id
        ))
    }
}

fn ensure_positive(amount: Decimal) -> Result<(), BankError> {
    if amount <= Decimal::ZERO {
        return Err(BankError::invalid_amount(amount));
    }
    Ok(())
}
