//! Card generation and the bounded card pool.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::constants::{
    CARDS_PER_SET, COLUMN_SHUFFLE_PASSES, COLUMN_WIDTH, FREE_COL, FREE_ROW, GRID_SIZE,
    SETS_PER_POOL,
};
use super::session::GameError;
use super::shuffle::shuffle;

/// A callable/cell value. Values fit comfortably in a byte.
pub type CardNumber = u8;

/// A player's 5x5 card, indexed `[row][col]`.
///
/// Column `c` holds five values drawn without replacement from
/// `c*15+1 ..= c*15+15`. The center cell (2, 2) carries a generated value
/// like any other cell but is treated as a pre-marked wildcard by both the
/// controller and the host's claim validation.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Card {
    numbers: [[CardNumber; GRID_SIZE]; GRID_SIZE],
}

impl Card {
    #[must_use]
    pub const fn new(numbers: [[CardNumber; GRID_SIZE]; GRID_SIZE]) -> Self {
        Self { numbers }
    }

    #[must_use]
    pub const fn numbers(&self) -> &[[CardNumber; GRID_SIZE]; GRID_SIZE] {
        &self.numbers
    }

    #[must_use]
    pub const fn number_at(&self, row: usize, col: usize) -> CardNumber {
        self.numbers[row][col]
    }

    /// Locate a value on the card.
    #[must_use]
    pub fn position_of(&self, number: CardNumber) -> Option<(usize, usize)> {
        for (row, values) in self.numbers.iter().enumerate() {
            for (col, value) in values.iter().enumerate() {
                if *value == number {
                    return Some((row, col));
                }
            }
        }
        None
    }

    #[must_use]
    pub fn contains(&self, number: CardNumber) -> bool {
        self.position_of(number).is_some()
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row, values) in self.numbers.iter().enumerate() {
            for (col, value) in values.iter().enumerate() {
                if row == FREE_ROW && col == FREE_COL {
                    write!(f, "  FR")?;
                } else {
                    write!(f, "{value:>4}")?;
                }
            }
            if row < GRID_SIZE - 1 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

/// The eligible values for one card column, in ascending order.
fn eligible_column_values(col: usize) -> Vec<CardNumber> {
    let base = col as CardNumber * COLUMN_WIDTH;
    (base + 1..=base + COLUMN_WIDTH).collect()
}

/// Generate one set of three cards from five shuffled column stacks.
///
/// Each stack holds the 15 eligible values for its column; three cards of
/// five rows pop exactly 15 values, so a value can never repeat in the same
/// column across the set.
#[must_use]
pub fn generate_set() -> [Card; CARDS_PER_SET] {
    let mut stacks: Vec<Vec<CardNumber>> = (0..GRID_SIZE)
        .map(|col| {
            let mut values = eligible_column_values(col);
            shuffle(&mut values, COLUMN_SHUFFLE_PASSES);
            values
        })
        .collect();

    std::array::from_fn(|_| {
        let mut numbers = [[0; GRID_SIZE]; GRID_SIZE];
        for (col, stack) in stacks.iter_mut().enumerate() {
            for row in 0..GRID_SIZE {
                numbers[row][col] = stack
                    .pop()
                    .expect("column stack holds exactly enough values for one set");
            }
        }
        Card::new(numbers)
    })
}

/// A bounded, pop-from-end pool of pre-generated cards.
///
/// Assignment is LIFO. Drawing from an empty pool is an explicit error;
/// callers that want on-demand growth call [`CardPool::replenish`] first.
#[derive(Debug)]
pub struct CardPool {
    cards: Vec<Card>,
}

impl CardPool {
    /// A pool of `sets` freshly generated sets.
    #[must_use]
    pub fn with_sets(sets: usize) -> Self {
        let mut cards = Vec::with_capacity(sets * CARDS_PER_SET);
        for _ in 0..sets {
            cards.extend(generate_set());
        }
        Self { cards }
    }

    /// The startup pool: five sets, fifteen cards.
    #[must_use]
    pub fn standard() -> Self {
        Self::with_sets(SETS_PER_POOL)
    }

    pub fn draw(&mut self) -> Result<Card, GameError> {
        self.cards.pop().ok_or(GameError::CardPoolExhausted)
    }

    /// Generate one more set on top of the pool.
    pub fn replenish(&mut self) {
        self.cards.extend(generate_set());
    }

    #[must_use]
    pub fn remaining(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

impl Default for CardPool {
    fn default() -> Self {
        Self::standard()
    }
}
