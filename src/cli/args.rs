use crate::types::AccountCategory;
use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;
use std::path::PathBuf;
use std::str::FromStr;

/// Store used when neither `--store` nor `BANK_STORE` is given
pub const DEFAULT_STORE: &str = "accounts.txt";

/// Manage bank accounts kept in a flat text store
#[derive(Parser, Debug)]
#[command(name = "bank")]
#[command(about = "Manage bank accounts kept in a flat text store", long_about = None)]
pub struct CliArgs {
    /// Backing store file
    #[arg(
        long = "store",
        value_name = "PATH",
        env = "BANK_STORE",
        default_value = DEFAULT_STORE,
        global = true,
        help = "Path to the account store"
    )]
    pub store: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

/// Id and passcode identifying the logged-in account
#[derive(Args, Debug, Clone, PartialEq)]
pub struct Credentials {
    #[arg(long, value_name = "ID", help = "Account id")]
    pub id: String,

    #[arg(long, value_name = "PIN", help = "Account passcode")]
    pub passcode: String,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Open a new account and print its id and passcode
    Create {
        #[arg(long, value_parser = parse_category, help = "Personal or Business")]
        category: AccountCategory,
    },

    /// Show the current balance
    Balance {
        #[command(flatten)]
        credentials: Credentials,
    },

    /// Add funds
    Deposit {
        #[command(flatten)]
        credentials: Credentials,

        #[arg(long, value_parser = parse_amount, allow_negative_numbers = true)]
        amount: Decimal,
    },

    /// Take funds out
    Withdraw {
        #[command(flatten)]
        credentials: Credentials,

        #[arg(long, value_parser = parse_amount, allow_negative_numbers = true)]
        amount: Decimal,
    },

    /// Send funds to another account
    Transfer {
        #[command(flatten)]
        credentials: Credentials,

        #[arg(long, value_name = "ID", help = "Recipient account id")]
        to: String,

        #[arg(long, value_parser = parse_amount, allow_negative_numbers = true)]
        amount: Decimal,
    },

    /// Pay for a mobile top-up
    TopUp {
        #[command(flatten)]
        credentials: Credentials,

        #[arg(long, value_name = "NUMBER", help = "Phone number to top up")]
        phone: String,

        #[arg(long, value_parser = parse_amount, allow_negative_numbers = true)]
        amount: Decimal,
    },

    /// Permanently delete the account
    Delete {
        #[command(flatten)]
        credentials: Credentials,
    },
}

fn parse_category(raw: &str) -> Result<AccountCategory, String> {
    AccountCategory::from_str(raw).map_err(|e| e.to_string())
}

fn parse_amount(raw: &str) -> Result<Decimal, String> {
    Decimal::from_str(raw.trim()).map_err(|_| format!("'{}' is not a valid amount", raw))
}
