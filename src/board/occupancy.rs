//! Who stands where.
//!
//! Capture resolution needs the opposing tokens on one shared-loop cell;
//! renderers need every token grouped by position so stacks can be fanned
//! out. Both enumerate tokens in color order (1 -> 4), then token index.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use super::path::absolute_cell;
use crate::core::action::TokenRef;
use crate::core::player::{PlayerId, Seating};
use crate::core::state::BoardState;
use crate::core::token::{self, HOME};

/// Tokens sharing one position.
pub type Stack = SmallVec<[TokenRef; 4]>;

/// Where a token is drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Position {
    /// Own home-base slot; never shared.
    Home(TokenRef),
    /// Absolute path cell.
    Cell(usize),
}

/// Opposing tokens on shared-loop `cell`, excluding `mover`'s own.
///
/// Only tokens with steps in `0..=50` can stand on a shared cell.
#[must_use]
pub fn opponents_at(board: &BoardState, mover: PlayerId, cell: usize) -> SmallVec<[TokenRef; 8]> {
    board
        .iter_tokens()
        .filter(|&(player, _, steps)| {
            player != mover
                && token::is_on_shared_loop(steps)
                && absolute_cell(player, steps) == Some(cell)
        })
        .map(|(player, index, _)| TokenRef::new(player, index))
        .collect()
}

/// Group the active players' tokens by position.
#[must_use]
pub fn stacks(board: &BoardState, seating: &Seating) -> FxHashMap<Position, Stack> {
    let mut map: FxHashMap<Position, Stack> = FxHashMap::default();
    for (player, index, steps) in board.iter_tokens() {
        if !seating.is_active(player) {
            continue;
        }
        let token = TokenRef::new(player, index);
        let position = match absolute_cell(player, steps) {
            Some(cell) if steps != HOME => Position::Cell(cell),
            _ => Position::Home(token),
        };
        map.entry(position).or_default().push(token);
    }
    map
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opponents_at_skips_mover_and_home_stretch() {
        let mut board = BoardState::new();
        // Red steps 9 -> cell 10; Green steps 48 -> cell 10
        board.set_tokens(PlayerId::RED, [9, -1, -1, -1]).unwrap();
        board.set_tokens(PlayerId::GREEN, [48, 52, -1, -1]).unwrap();

        let at = opponents_at(&board, PlayerId::RED, 10);
        assert_eq!(at.as_slice(), &[TokenRef::new(PlayerId::GREEN, 0)]);

        let at = opponents_at(&board, PlayerId::GREEN, 10);
        assert_eq!(at.as_slice(), &[TokenRef::new(PlayerId::RED, 0)]);
    }

    #[test]
    fn test_opponents_at_enumeration_order() {
        let mut board = BoardState::new();
        // Cell 30: Green steps 16, Blue steps 3, Yellow steps 42
        board.set_tokens(PlayerId::BLUE, [-1, 3, -1, -1]).unwrap();
        board.set_tokens(PlayerId::GREEN, [16, -1, 16, -1]).unwrap();
        board.set_tokens(PlayerId::YELLOW, [-1, -1, -1, 42]).unwrap();

        let at = opponents_at(&board, PlayerId::RED, 30);
        assert_eq!(
            at.as_slice(),
            &[
                TokenRef::new(PlayerId::GREEN, 0),
                TokenRef::new(PlayerId::GREEN, 2),
                TokenRef::new(PlayerId::YELLOW, 3),
                TokenRef::new(PlayerId::BLUE, 1),
            ]
        );
    }

    #[test]
    fn test_stacks_groups_shared_cells() {
        let seating = Seating::for_player_count(4).unwrap();
        let mut board = BoardState::new();
        board.set_tokens(PlayerId::RED, [5, 5, -1, 56]).unwrap();

        let stacks = stacks(&board, &seating);
        let cell = absolute_cell(PlayerId::RED, 5).unwrap();
        assert_eq!(stacks[&Position::Cell(cell)].len(), 2);
        // Home tokens each keep their own slot
        assert_eq!(stacks[&Position::Home(TokenRef::new(PlayerId::RED, 2))].len(), 1);
        // 4 players x 4 tokens, two of them sharing a cell
        assert_eq!(stacks.values().map(|s| s.len()).sum::<usize>(), 16);
        assert_eq!(stacks.len(), 15);
    }

    #[test]
    fn test_stacks_skip_inactive_players() {
        let seating = Seating::for_player_count(2).unwrap();
        let board = BoardState::new();
        let stacks = stacks(&board, &seating);
        assert_eq!(stacks.len(), 8);
        assert!(stacks.values().flatten().all(|t| seating.is_active(t.player)));
    }
}
