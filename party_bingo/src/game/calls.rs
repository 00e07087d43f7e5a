//! The number-call sequencer.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::cards::CardNumber;
use super::constants::{COLUMN_LETTERS, COLUMN_WIDTH, GRID_SIZE, MAX_CALL_NUMBER};
use super::shuffle::shuffle;

/// The column a called number belongs to: 0 for 1..=15, 1 for 16..=30,
/// 2 for 31..=45, 3 for 46..=60, 4 for 61..=74.
#[must_use]
pub fn column_of(number: CardNumber) -> usize {
    (usize::from(number.saturating_sub(1)) / usize::from(COLUMN_WIDTH)).min(GRID_SIZE - 1)
}

/// One drawn number.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Call {
    pub number: CardNumber,
}

impl Call {
    #[must_use]
    pub fn column(&self) -> usize {
        column_of(self.number)
    }

    #[must_use]
    pub fn letter(&self) -> char {
        COLUMN_LETTERS[self.column()]
    }
}

impl fmt::Display for Call {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.letter(), self.number)
    }
}

/// A shuffled, non-repeating sequence of every callable number.
///
/// The cursor only moves forward. Once the 74 numbers are spent the
/// sequence stays exhausted; there is no wraparound, so a number can never
/// be called twice in one game.
#[derive(Debug)]
pub struct CallSequence {
    numbers: Vec<CardNumber>,
    cursor: usize,
}

impl CallSequence {
    /// Build a fresh permutation of `1..=74` with the given shuffle pass
    /// count.
    #[must_use]
    pub fn generate(passes: usize) -> Self {
        let mut numbers: Vec<CardNumber> = (1..=MAX_CALL_NUMBER).collect();
        shuffle(&mut numbers, passes);
        Self { numbers, cursor: 0 }
    }

    /// A sequence with a fixed order, for deterministic tests.
    #[cfg(test)]
    pub(crate) fn from_permutation(numbers: Vec<CardNumber>) -> Self {
        Self { numbers, cursor: 0 }
    }

    /// Yield the next call, or `None` once every number has been called.
    pub fn advance(&mut self) -> Option<Call> {
        let number = self.numbers.get(self.cursor).copied()?;
        self.cursor += 1;
        Some(Call { number })
    }

    #[must_use]
    pub fn remaining(&self) -> usize {
        self.numbers.len() - self.cursor
    }

    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.cursor >= self.numbers.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn test_column_boundaries() {
        assert_eq!(column_of(1), 0);
        assert_eq!(column_of(15), 0);
        assert_eq!(column_of(16), 1);
        assert_eq!(column_of(30), 1);
        assert_eq!(column_of(31), 2);
        assert_eq!(column_of(45), 2);
        assert_eq!(column_of(46), 3);
        assert_eq!(column_of(60), 3);
        assert_eq!(column_of(61), 4);
        assert_eq!(column_of(74), 4);
    }

    #[test]
    fn test_call_letters() {
        assert_eq!(Call { number: 7 }.letter(), 'B');
        assert_eq!(Call { number: 22 }.letter(), 'I');
        assert_eq!(Call { number: 40 }.letter(), 'N');
        assert_eq!(Call { number: 52 }.letter(), 'G');
        assert_eq!(Call { number: 74 }.letter(), 'O');
    }

    #[test]
    fn test_call_display() {
        assert_eq!(Call { number: 7 }.to_string(), "B7");
        assert_eq!(Call { number: 61 }.to_string(), "O61");
    }

    #[test]
    fn test_generated_sequence_is_a_permutation() {
        let mut sequence = CallSequence::generate(10);
        let mut seen = BTreeSet::new();
        while let Some(call) = sequence.advance() {
            assert!((1..=MAX_CALL_NUMBER).contains(&call.number));
            assert!(seen.insert(call.number), "repeated call {}", call.number);
        }
        assert_eq!(seen.len(), usize::from(MAX_CALL_NUMBER));
    }

    #[test]
    fn test_sequence_does_not_wrap() {
        let mut sequence = CallSequence::from_permutation(vec![3, 1, 2]);
        assert_eq!(sequence.advance(), Some(Call { number: 3 }));
        assert_eq!(sequence.advance(), Some(Call { number: 1 }));
        assert_eq!(sequence.advance(), Some(Call { number: 2 }));
        assert!(sequence.is_exhausted());
        assert_eq!(sequence.advance(), None);
        assert_eq!(sequence.advance(), None);
    }

    #[test]
    fn test_sequence_emits_from_the_first_element() {
        let mut sequence = CallSequence::from_permutation(vec![42, 7]);
        assert_eq!(sequence.advance(), Some(Call { number: 42 }));
    }

    #[test]
    fn test_remaining_counts_down() {
        let mut sequence = CallSequence::generate(1);
        assert_eq!(sequence.remaining(), 74);
        sequence.advance();
        assert_eq!(sequence.remaining(), 73);
    }
}
