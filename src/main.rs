//! Bank Ledger CLI
//!
//! Command-line front end for the account ledger.
//!
//! # Usage
//!
//! ```bash
//! bank create --category personal
//! bank balance --id 10001 --passcode 1234
//! bank deposit --id 10001 --passcode 1234 --amount 100
//! bank transfer --id 10001 --passcode 1234 --to 10002 --amount 50
//! bank top-up --id 10001 --passcode 1234 --phone 17171717 --amount 20
//! bank --store /var/lib/bank/accounts.txt delete --id 10001 --passcode 1234
//! ```
//!
//! The store defaults to `accounts.txt` in the working directory and can be
//! set with `--store` or the `BANK_STORE` environment variable. Log verbosity
//! follows `RUST_LOG`.
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Error (invalid credentials, insufficient funds, unreadable store, etc.)

use bank_ledger::cli;
use std::process;

fn main() {
    cli::logging::init();

    // Parse command-line arguments using clap
    let args = cli::parse_args();

    match cli::run(&args) {
        Ok(message) => println!("{}", message),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}
