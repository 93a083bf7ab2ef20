//! Command dispatch
//!
//! Turns a parsed [`Command`] into ledger calls and a message for the user.
//! Every command that needs an account logs in first. Balance mutations are
//! followed by an explicit [`Ledger::save`].

use crate::cli::args::{CliArgs, Command, Credentials};
use crate::core::Ledger;
use crate::types::{Account, BankError};

/// Open the ledger named by `args` and run its command
pub fn run(args: &CliArgs) -> Result<String, BankError> {
    let mut ledger = Ledger::open(&args.store)?;
    execute(&mut ledger, &args.command)
}

/// Run a single command against an open ledger
///
/// # Returns
///
/// The message to show the user.
///
/// # Errors
///
/// Any ledger or account error, unchanged.
pub fn execute(ledger: &mut Ledger, command: &Command) -> Result<String, BankError> {
    match command {
        Command::Create { category } => {
            let account = ledger.open_account(*category)?;
            Ok(format!(
                "Account created!\nID: {}\nPasscode: {}",
                account.id, account.passcode
            ))
        }
        Command::Balance { credentials } => {
            let account = login(ledger, credentials)?;
            Ok(format!("Current balance: Nu: {:.2}", account.balance()))
        }
        Command::Deposit {
            credentials,
            amount,
        } => {
            let message = ledger
                .login_mut(&credentials.id, &credentials.passcode)?
                .deposit(*amount)?;
            ledger.save()?;
            Ok(message)
        }
        Command::Withdraw {
            credentials,
            amount,
        } => {
            let message = ledger
                .login_mut(&credentials.id, &credentials.passcode)?
                .withdraw(*amount)?;
            ledger.save()?;
            Ok(message)
        }
        Command::Transfer {
            credentials,
            to,
            amount,
        } => {
            login(ledger, credentials)?;
            let message = ledger.transfer(&credentials.id, to, *amount)?;
            ledger.save()?;
            Ok(message)
        }
        Command::TopUp {
            credentials,
            phone,
            amount,
        } => {
            login(ledger, credentials)?;
            let message = ledger.top_up_mobile(&credentials.id, phone, *amount)?;
            ledger.save()?;
            Ok(message)
        }
        Command::Delete { credentials } => {
            login(ledger, credentials)?;
            ledger.delete_account(&credentials.id)?;
            Ok("Account deleted successfully".to_string())
        }
    }
}

fn login<'a>(ledger: &'a Ledger, credentials: &Credentials) -> Result<&'a Account, BankError> {
    ledger.login(&credentials.id, &credentials.passcode)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::SequenceIdentifiers;
    use crate::types::AccountCategory;
    use rust_decimal::Decimal;
    use std::fs;
    use tempfile::{tempdir, TempDir};

    fn seeded() -> (TempDir, Ledger) {
        let dir = tempdir().unwrap();
        let path = dir.path().join("accounts.txt");
        fs::write(&path, "10001,1234,Personal,500.0\n10002,5678,Business,1000.0\n").unwrap();
        let source = SequenceIdentifiers::new(["30001"], ["2468"]);
        let ledger = Ledger::open_with(&path, Box::new(source)).unwrap();
        (dir, ledger)
    }

    fn credentials(id: &str, passcode: &str) -> Credentials {
        Credentials {
            id: id.to_string(),
            passcode: passcode.to_string(),
        }
    }

    fn reload(ledger: &Ledger) -> Ledger {
        Ledger::open(ledger.store_path()).unwrap()
    }

    #[test]
    fn test_create_reports_id_and_passcode() {
        let (_dir, mut ledger) = seeded();

        let message = execute(
            &mut ledger,
            &Command::Create {
                category: AccountCategory::Business,
            },
        )
        .unwrap();

        assert_eq!(message, "Account created!\nID: 30001\nPasscode: 2468");
        assert!(reload(&ledger).contains("30001"));
    }

    #[test]
    fn test_balance_shows_two_decimals() {
        let (_dir, mut ledger) = seeded();

        let message = execute(
            &mut ledger,
            &Command::Balance {
                credentials: credentials("10001", "1234"),
            },
        )
        .unwrap();

        assert_eq!(message, "Current balance: Nu: 500.00");
    }

    #[test]
    fn test_deposit_is_persisted() {
        let (_dir, mut ledger) = seeded();

        execute(
            &mut ledger,
            &Command::Deposit {
                credentials: credentials("10001", "1234"),
                amount: Decimal::from(100),
            },
        )
        .unwrap();

        assert_eq!(reload(&ledger).get("10001").unwrap().balance(), Decimal::from(600));
    }

    #[test]
    fn test_failed_withdraw_is_not_persisted() {
        let (_dir, mut ledger) = seeded();
        let before = fs::read_to_string(ledger.store_path()).unwrap();

        let result = execute(
            &mut ledger,
            &Command::Withdraw {
                credentials: credentials("10001", "1234"),
                amount: Decimal::from(10000),
            },
        );

        assert!(matches!(result, Err(BankError::InsufficientFunds { .. })));
        assert_eq!(fs::read_to_string(ledger.store_path()).unwrap(), before);
    }

    #[test]
    fn test_transfer_is_persisted() {
        let (_dir, mut ledger) = seeded();

        let message = execute(
            &mut ledger,
            &Command::Transfer {
                credentials: credentials("10001", "1234"),
                to: "10002".to_string(),
                amount: Decimal::from(200),
            },
        )
        .unwrap();

        assert_eq!(message, "Successfully transferred Nu: 200 to account 10002");
        let reloaded = reload(&ledger);
        assert_eq!(reloaded.get("10001").unwrap().balance(), Decimal::from(300));
        assert_eq!(reloaded.get("10002").unwrap().balance(), Decimal::from(1200));
    }

    #[test]
    fn test_top_up_is_persisted() {
        let (_dir, mut ledger) = seeded();

        execute(
            &mut ledger,
            &Command::TopUp {
                credentials: credentials("10001", "1234"),
                phone: "17171717".to_string(),
                amount: Decimal::from(50),
            },
        )
        .unwrap();

        assert_eq!(reload(&ledger).get("10001").unwrap().balance(), Decimal::from(450));
    }

    #[test]
    fn test_delete_requires_login() {
        let (_dir, mut ledger) = seeded();

        let result = execute(
            &mut ledger,
            &Command::Delete {
                credentials: credentials("10001", "0000"),
            },
        );

        assert_eq!(result, Err(BankError::invalid_credentials()));
        assert!(reload(&ledger).contains("10001"));
    }

    #[test]
    fn test_delete_removes_account() {
        let (_dir, mut ledger) = seeded();

        let message = execute(
            &mut ledger,
            &Command::Delete {
                credentials: credentials("10001", "1234"),
            },
        )
        .unwrap();

        assert_eq!(message, "Account deleted successfully");
        assert!(!reload(&ledger).contains("10001"));
    }

    #[test]
    fn test_wrong_passcode_blocks_mutations() {
        let (_dir, mut ledger) = seeded();

        let commands = [
            Command::Deposit {
                credentials: credentials("10001", "9999"),
                amount: Decimal::ONE,
            },
            Command::Transfer {
                credentials: credentials("10001", "9999"),
                to: "10002".to_string(),
                amount: Decimal::ONE,
            },
            Command::TopUp {
                credentials: credentials("10001", "9999"),
                phone: "17171717".to_string(),
                amount: Decimal::ONE,
            },
        ];

        for command in &commands {
            assert_eq!(
                execute(&mut ledger, command),
                Err(BankError::invalid_credentials())
            );
        }
        assert_eq!(ledger.get("10001").unwrap().balance(), Decimal::from(500));
    }
}
