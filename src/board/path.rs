//! Fixed 76-cell path geometry.
//!
//! Cells `0..52` form the shared loop every player walks from a different
//! start offset. Cells `52..76` are the four private home stretches, six
//! cells per color in color order (Red 52-57, Green 58-63, Yellow 64-69,
//! Blue 70-75).

use crate::core::player::PlayerId;
use crate::core::token::{Steps, GOAL, LAST_SHARED};

/// Cells on the shared loop.
pub const SHARED_CELLS: usize = 52;
/// Cells in each private home stretch.
pub const HOME_STRETCH_CELLS: usize = 6;
/// Total path cells.
pub const PATH_CELLS: usize = SHARED_CELLS + 4 * HOME_STRETCH_CELLS;

/// Shared-loop cells where tokens cannot be captured.
pub const SAFE_CELLS: [usize; 8] = [1, 9, 14, 22, 27, 35, 40, 48];

/// Shared-loop cell of steps 0, indexed by color slot.
const START_INDEX: [usize; 4] = [1, 14, 40, 27];

/// 15x15 grid square (column, row) of every path cell.
const GRID: [(u8, u8); PATH_CELLS] = [
    // shared loop
    (0, 6), (1, 6), (2, 6), (3, 6), (4, 6), (5, 6),
    (6, 5), (6, 4), (6, 3), (6, 2), (6, 1), (6, 0),
    (7, 0),
    (8, 0), (8, 1), (8, 2), (8, 3), (8, 4), (8, 5),
    (9, 6), (10, 6), (11, 6), (12, 6), (13, 6), (14, 6),
    (14, 7),
    (14, 8), (13, 8), (12, 8), (11, 8), (10, 8), (9, 8),
    (8, 9), (8, 10), (8, 11), (8, 12), (8, 13), (8, 14),
    (7, 14),
    (6, 14), (6, 13), (6, 12), (6, 11), (6, 10), (6, 9),
    (5, 8), (4, 8), (3, 8), (2, 8), (1, 8), (0, 8),
    (0, 7),
    // Red stretch
    (1, 7), (2, 7), (3, 7), (4, 7), (5, 7), (6, 7),
    // Green stretch
    (7, 1), (7, 2), (7, 3), (7, 4), (7, 5), (7, 6),
    // Yellow stretch
    (7, 13), (7, 12), (7, 11), (7, 10), (7, 9), (7, 8),
    // Blue stretch
    (13, 7), (12, 7), (11, 7), (10, 7), (9, 7), (8, 7),
];

/// Shared-loop cell where a player's tokens enter.
#[must_use]
pub const fn start_cell(player: PlayerId) -> usize {
    START_INDEX[player.index()]
}

/// Absolute path cell of a token.
///
/// `steps <= 50` maps onto the shared loop, `51..=56` onto the player's
/// home stretch. Tokens at home (`-1`) occupy no path cell and yield `None`,
/// as does any value outside the token range.
///
/// ```
/// use ludo_core::board::absolute_cell;
/// use ludo_core::core::PlayerId;
///
/// assert_eq!(absolute_cell(PlayerId::RED, 0), Some(1));
/// assert_eq!(absolute_cell(PlayerId::GREEN, 50), Some(12));
/// assert_eq!(absolute_cell(PlayerId::RED, 54), Some(55));
/// assert_eq!(absolute_cell(PlayerId::RED, -1), None);
/// ```
#[must_use]
pub fn absolute_cell(player: PlayerId, steps: Steps) -> Option<usize> {
    match steps {
        0..=LAST_SHARED => Some((start_cell(player) + steps as usize) % SHARED_CELLS),
        51..=GOAL => Some(
            SHARED_CELLS + player.index() * HOME_STRETCH_CELLS + (steps - LAST_SHARED - 1) as usize,
        ),
        _ => None,
    }
}

/// Membership test against the safe-cell set.
#[must_use]
pub fn is_safe(cell: usize) -> bool {
    SAFE_CELLS.contains(&cell)
}

/// Grid square (column, row) of a path cell.
#[must_use]
pub fn grid_square(cell: usize) -> Option<(u8, u8)> {
    GRID.get(cell).copied()
}

/// Grid point (column, row) of a home-base slot.
///
/// Slots sit on grid-line intersections inside the owner's 6x6 corner:
/// Red top-left, Green top-right, Yellow bottom-left, Blue bottom-right.
/// Returns `None` for a token index outside `0..4`.
#[must_use]
pub fn home_slot(player: PlayerId, token: usize) -> Option<(u8, u8)> {
    if token >= 4 {
        return None;
    }
    let base_col = if matches!(player, PlayerId::GREEN | PlayerId::BLUE) { 9 } else { 0 };
    let base_row = if matches!(player, PlayerId::YELLOW | PlayerId::BLUE) { 9 } else { 0 };
    let token = token as u8;
    Some((base_col + 2 + (token % 2) * 2, base_row + 2 + (token / 2) * 2))
}
