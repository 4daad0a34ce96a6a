//! Rules engine trait.
//!
//! Implementations decide:
//! - Which tokens may move for a die value
//! - How a move changes the board (captures, finishers)
//! - When the game is over
//!
//! ## Implementation Notes
//!
//! - `can_move` / `has_any_movable_token`: pure legality checks
//! - `apply_move`: must be deterministic and leave the board untouched on error
//! - `is_terminal`: return `None` while the game continues

use crate::core::action::{MoveOutcome, MoveSet, Selection};
use crate::core::error::RulesError;
use crate::core::player::{PlayerId, Seating};
use crate::core::state::BoardState;
use crate::core::token::{Steps, TOKENS_PER_PLAYER};

/// Result of a completed game.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameResult {
    /// First player to finish.
    pub winner: PlayerId,
    /// Finishers in completion order.
    pub finish_order: Vec<PlayerId>,
}

impl GameResult {
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        self.winner == player
    }

    /// 1-based finishing place, `None` for the player left on the board.
    #[must_use]
    pub fn place(&self, player: PlayerId) -> Option<usize> {
        self.finish_order
            .iter()
            .position(|&p| p == player)
            .map(|i| i + 1)
    }
}

/// How a roll resolves before any token moves.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Resolution {
    /// No token can move; the turn passes.
    NoMove,
    /// Exactly one sensible choice; it moves without asking.
    Auto { token: usize, selection: Selection },
    /// Player must pick one of these token indices.
    Choose(MoveSet),
}

/// Rules engine trait.
pub trait RulesEngine {
    /// Can a token at `steps` move `dice` pips?
    fn can_move(&self, steps: Steps, dice: u8) -> bool;

    /// Does the player have at least one legal move for this roll?
    fn has_any_movable_token(&self, board: &BoardState, player: PlayerId, dice: u8) -> bool;

    /// Apply a move of one token and resolve its consequences.
    fn apply_move(
        &self,
        board: &mut BoardState,
        player: PlayerId,
        token: usize,
        dice: u8,
    ) -> Result<MoveOutcome, RulesError>;

    /// Check if the game is over.
    fn is_terminal(&self, board: &BoardState, seating: &Seating) -> Option<GameResult>;

    // === Convenience Methods ===

    /// Token indices that may legally move, ascending.
    ///
    /// Empty whenever `has_any_movable_token` says no, even if a token would
    /// pass `can_move` on its own.
    fn movable_tokens(&self, board: &BoardState, player: PlayerId, dice: u8) -> MoveSet {
        if !self.has_any_movable_token(board, player, dice) {
            return MoveSet::new();
        }
        let tokens = board.tokens_of(player);
        (0..TOKENS_PER_PLAYER)
            .filter(|&i| self.can_move(tokens[i], dice))
            .collect()
    }

    /// Decide between no move, an automatic move and a player choice.
    fn resolve_turn(&self, board: &BoardState, player: PlayerId, dice: u8) -> Resolution {
        let movable = self.movable_tokens(board, player, dice);
        let tokens = board.tokens_of(player);

        let Some(&first) = movable.first() else {
            return Resolution::NoMove;
        };
        if movable.len() == 1 {
            return Resolution::Auto {
                token: first,
                selection: Selection::OnlyOption,
            };
        }
        if movable[1..].iter().all(|&i| tokens[i] == tokens[first]) {
            return Resolution::Auto {
                token: first,
                selection: Selection::Stacked,
            };
        }
        if dice == 6 && board.all_home(player) {
            return Resolution::Auto {
                token: 0,
                selection: Selection::EnterFromHome,
            };
        }
        Resolution::Choose(movable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_result_place() {
        let result = GameResult {
            winner: PlayerId::GREEN,
            finish_order: vec![PlayerId::GREEN, PlayerId::RED],
        };
        assert!(result.is_winner(PlayerId::GREEN));
        assert!(!result.is_winner(PlayerId::RED));
        assert_eq!(result.place(PlayerId::GREEN), Some(1));
        assert_eq!(result.place(PlayerId::RED), Some(2));
        assert_eq!(result.place(PlayerId::YELLOW), None);
    }
}
