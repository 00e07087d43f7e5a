//! Game-wide constants.

use std::time::Duration;

/// Cards are square grids of this dimension.
pub const GRID_SIZE: usize = 5;

/// Count of eligible values per card column. Column `c` draws from
/// `c * COLUMN_WIDTH + 1 ..= c * COLUMN_WIDTH + COLUMN_WIDTH`.
pub const COLUMN_WIDTH: u8 = 15;

/// Highest callable number. Note that this is one short of the last
/// column's top card value (75), which therefore can never be called.
pub const MAX_CALL_NUMBER: u8 = 74;

/// Cards drawn from one batch of column stacks. Three cards of five rows
/// each consume a 15-value column stack exactly, which is what guarantees
/// no in-set column duplicates. Changing this requires revisiting
/// [`COLUMN_WIDTH`].
pub const CARDS_PER_SET: usize = 3;

/// Sets generated for the startup card pool (5 sets of 3 cards).
pub const SETS_PER_POOL: usize = 5;

/// Coordinates of the pre-marked wildcard cell.
pub const FREE_ROW: usize = 2;
pub const FREE_COL: usize = 2;

/// Column letters, indexed by column.
pub const COLUMN_LETTERS: [char; GRID_SIZE] = ['B', 'I', 'N', 'G', 'O'];

/// Shuffle passes for the call sequence.
pub const CALL_SHUFFLE_PASSES: usize = 10;

/// Shuffle passes for each column stack during card generation.
pub const COLUMN_SHUFFLE_PASSES: usize = 15;

/// How many trailing calls a controller keeps markable.
pub const MAX_ACTIVE_CALLS: usize = 3;

/// Named players required before the game auto-starts.
pub const DEFAULT_MIN_PLAYERS: usize = 2;

/// Wall-clock delay between number calls.
pub const DEFAULT_CALL_INTERVAL: Duration = Duration::from_secs(5);

/// Fast mode divides the call interval by this factor.
pub const FAST_MODE_DIVISOR: u32 = 10;

/// Display names longer than this are truncated.
pub const MAX_NAME_LENGTH: usize = 32;
