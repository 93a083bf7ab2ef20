//! Account id and passcode generation
//!
//! Generation sits behind the `IdentifierSource` trait so the ledger can be
//! driven by a deterministic source in tests.

use rand::Rng;
use std::ops::RangeInclusive;

/// Generated account ids are drawn from this range (5 digits)
pub const ACCOUNT_ID_RANGE: RangeInclusive<u32> = 10_000..=99_999;

/// Generated passcodes are drawn from this range (4 digits)
pub const PASSCODE_RANGE: RangeInclusive<u32> = 1_000..=9_999;

/// Source of new account ids and passcodes
///
/// Implementations do not need to avoid collisions; the ledger retries
/// until it gets an id that is not taken.
pub trait IdentifierSource {
    /// Produce a candidate account id
    fn next_account_id(&mut self) -> String;

    /// Produce a passcode for a new account
    fn next_passcode(&mut self) -> String;
}

/// Uniformly random ids and passcodes from the thread-local RNG
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomIdentifiers;

impl IdentifierSource for RandomIdentifiers {
    fn next_account_id(&mut self) -> String {
        rand::thread_rng().gen_range(ACCOUNT_ID_RANGE).to_string()
    }

    fn next_passcode(&mut self) -> String {
        rand::thread_rng().gen_range(PASSCODE_RANGE).to_string()
    }
}

/// Replays fixed ids and passcodes, cycling when exhausted
#[derive(Debug, Clone)]
pub struct SequenceIdentifiers {
    ids: Vec<String>,
    passcodes: Vec<String>,
    next_id: usize,
    next_passcode: usize,
}

impl SequenceIdentifiers {
    /// Create a source from the given ids and passcodes
    ///
    /// Empty lists yield empty strings.
    pub fn new<I, P>(ids: I, passcodes: P) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
        P: IntoIterator,
        P::Item: Into<String>,
    {
        Self {
            ids: ids.into_iter().map(Into::into).collect(),
            passcodes: passcodes.into_iter().map(Into::into).collect(),
            next_id: 0,
            next_passcode: 0,
        }
    }
}

fn cycle(values: &[String], cursor: &mut usize) -> String {
    if values.is_empty() {
        return String::new();
    }
    let value = values[*cursor % values.len()].clone();
    *cursor += 1;
    value
}

impl IdentifierSource for SequenceIdentifiers {
    fn next_account_id(&mut self) -> String {
        cycle(&self.ids, &mut self.next_id)
    }

    fn next_passcode(&mut self) -> String {
        cycle(&self.passcodes, &mut self.next_passcode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_ids_are_five_digits() {
        let mut source = RandomIdentifiers;

        for _ in 0..200 {
            let id = source.next_account_id();
            assert_eq!(id.len(), 5, "id {} is not 5 digits", id);
            let value: u32 = id.parse().unwrap();
            assert!(ACCOUNT_ID_RANGE.contains(&value));
        }
    }

    #[test]
    fn test_random_passcodes_are_four_digits() {
        let mut source = RandomIdentifiers;

        for _ in 0..200 {
            let passcode = source.next_passcode();
            assert_eq!(passcode.len(), 4, "passcode {} is not 4 digits", passcode);
            let value: u32 = passcode.parse().unwrap();
            assert!(PASSCODE_RANGE.contains(&value));
        }
    }

    #[test]
    fn test_sequence_cycles() {
        let mut source = SequenceIdentifiers::new(["10001", "10002"], ["1234"]);

        assert_eq!(source.next_account_id(), "10001");
        assert_eq!(source.next_account_id(), "10002");
        assert_eq!(source.next_account_id(), "10001");
        assert_eq!(source.next_passcode(), "1234");
        assert_eq!(source.next_passcode(), "1234");
    }

    #[test]
    fn test_empty_sequence_yields_empty_strings() {
        let mut source = SequenceIdentifiers::new(Vec::<String>::new(), Vec::<String>::new());

        assert_eq!(source.next_account_id(), "");
        assert_eq!(source.next_passcode(), "");
    }
}
