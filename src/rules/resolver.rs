//! Classic house rules.
//!
//! - A token leaves home only on a six, landing on its start cell
//! - A token may not overshoot the goal
//! - With one token left and inside its home stretch, a six is not a move
//! - Landing on a non-safe shared cell sends one opposing token home: the
//!   last one in enumeration order (colors 1 -> 4, then token index), even
//!   when several opposing tokens share the cell
//! - A player whose four tokens reach the goal is recorded as a finisher
//! - The game ends once all but one active player have finished

use crate::board::{absolute_cell, is_safe, opponents_at};
use crate::core::action::{MoveOutcome, TokenRef};
use crate::core::error::RulesError;
use crate::core::player::{PlayerId, Seating};
use crate::core::state::BoardState;
use crate::core::token::{self, Steps, ENTRY, ENTRY_ROLL, GOAL, HOME, TOKENS_PER_PLAYER};
use crate::dice;

use super::engine::{GameResult, RulesEngine};

/// Turn resolver for the classic rule set.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TurnResolver;

impl TurnResolver {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Position a token ends on after moving `dice` pips from `steps`.
    ///
    /// Entering from home always lands on the start cell, whatever the die.
    #[must_use]
    pub(crate) fn target_steps(steps: Steps, dice: u8) -> Steps {
        if steps == HOME {
            ENTRY
        } else {
            steps + dice as Steps
        }
    }

    /// Send home the opposing token a move ending on `final_steps` captures.
    ///
    /// Captures only happen on the shared loop and never on a safe cell.
    /// Of several opposing tokens on the cell, only the last enumerated one
    /// is taken.
    pub fn evaluate_capture(
        &self,
        board: &mut BoardState,
        player: PlayerId,
        final_steps: Steps,
    ) -> Option<TokenRef> {
        if !token::is_on_shared_loop(final_steps) {
            return None;
        }
        let cell = absolute_cell(player, final_steps)?;
        if is_safe(cell) {
            return None;
        }
        let victim = *opponents_at(board, player, cell).last()?;
        board.tokens_of_mut(victim.player)[victim.index] = HOME;
        Some(victim)
    }

    /// Record the player as a finisher once all four tokens are home.
    ///
    /// Returns the 1-based place when newly recorded.
    pub fn check_goal_and_winners(&self, board: &mut BoardState, player: PlayerId) -> Option<usize> {
        if board.is_finished(player) {
            board.record_winner(player)
        } else {
            None
        }
    }
}

impl RulesEngine for TurnResolver {
    fn can_move(&self, steps: Steps, dice: u8) -> bool {
        if dice::validate(dice).is_err() || !token::is_valid(steps) {
            return false;
        }
        if steps == HOME {
            return dice == ENTRY_ROLL;
        }
        steps + dice as Steps <= GOAL
    }

    fn has_any_movable_token(&self, board: &BoardState, player: PlayerId, dice: u8) -> bool {
        let tokens = board.tokens_of(player);

        if dice == 6 && board.unfinished_count(player) == 1 {
            let last = tokens.iter().copied().filter(|&s| s < GOAL).last();
            if last.is_some_and(token::is_in_home_stretch) {
                return false;
            }
        }

        tokens.iter().any(|&s| self.can_move(s, dice))
    }

    fn apply_move(
        &self,
        board: &mut BoardState,
        player: PlayerId,
        token: usize,
        dice: u8,
    ) -> Result<MoveOutcome, RulesError> {
        dice::validate(dice)?;
        if token >= TOKENS_PER_PLAYER {
            return Err(RulesError::InvalidTokenIndex(token));
        }
        if !self.movable_tokens(board, player, dice).contains(&token) {
            return Err(RulesError::IllegalMove { player, token });
        }

        let from = board.tokens_of(player)[token];
        let to = Self::target_steps(from, dice);
        board.tokens_of_mut(player)[token] = to;

        let captured = self.evaluate_capture(board, player, to);
        let player_finished = self.check_goal_and_winners(board, player).is_some();

        Ok(MoveOutcome {
            token: TokenRef::new(player, token),
            from,
            to,
            captured,
            reached_goal: to == GOAL,
            player_finished,
        })
    }

    fn is_terminal(&self, board: &BoardState, seating: &Seating) -> Option<GameResult> {
        let winners = board.winners();
        if winners.len() + 1 < seating.len() {
            return None;
        }
        winners.first().map(|&winner| GameResult {
            winner,
            finish_order: winners.to_vec(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::action::Selection;
    use crate::rules::Resolution;

    fn board_with(player: PlayerId, tokens: [Steps; 4]) -> BoardState {
        let mut board = BoardState::new();
        board.set_tokens(player, tokens).unwrap();
        board
    }

    #[test]
    fn test_target_steps() {
        assert_eq!(TurnResolver::target_steps(HOME, 6), ENTRY);
        assert_eq!(TurnResolver::target_steps(12, 4), 16);
        assert_eq!(TurnResolver::target_steps(50, 6), GOAL);
    }

    #[test]
    fn test_can_move_from_home_needs_six() {
        let rules = TurnResolver::new();
        for dice in 1..=5 {
            assert!(!rules.can_move(HOME, dice));
        }
        assert!(rules.can_move(HOME, 6));
    }

    #[test]
    fn test_can_move_no_overshoot() {
        let rules = TurnResolver::new();
        assert!(rules.can_move(50, 6));
        assert!(rules.can_move(53, 3));
        assert!(!rules.can_move(53, 4));
        assert!(!rules.can_move(GOAL, 1));
    }

    #[test]
    fn test_last_token_in_home_stretch_blocks_six() {
        let rules = TurnResolver::new();
        let board = board_with(PlayerId::RED, [56, 56, 52, 56]);
        assert!(!rules.has_any_movable_token(&board, PlayerId::RED, 6));
        // Other rolls still work
        assert!(rules.has_any_movable_token(&board, PlayerId::RED, 4));
        assert!(rules.movable_tokens(&board, PlayerId::RED, 6).is_empty());
    }

    #[test]
    fn test_last_token_on_shared_loop_may_use_six() {
        let rules = TurnResolver::new();
        let board = board_with(PlayerId::RED, [56, 50, 56, 56]);
        assert!(rules.has_any_movable_token(&board, PlayerId::RED, 6));
    }

    #[test]
    fn test_home_stretch_six_rule_needs_single_token() {
        let rules = TurnResolver::new();
        // Two unfinished tokens: the exception does not apply
        let board = board_with(PlayerId::RED, [56, 51, 40, 56]);
        assert!(rules.has_any_movable_token(&board, PlayerId::RED, 6));
    }

    #[test]
    fn test_resolve_no_move() {
        let rules = TurnResolver::new();
        let board = BoardState::new();
        assert_eq!(rules.resolve_turn(&board, PlayerId::RED, 3), Resolution::NoMove);
    }

    #[test]
    fn test_resolve_single_option() {
        let rules = TurnResolver::new();
        let board = board_with(PlayerId::GREEN, [10, -1, -1, -1]);
        assert_eq!(
            rules.resolve_turn(&board, PlayerId::GREEN, 3),
            Resolution::Auto { token: 0, selection: Selection::OnlyOption }
        );
    }

    #[test]
    fn test_resolve_stacked_picks_lowest_index() {
        let rules = TurnResolver::new();
        let board = board_with(PlayerId::GREEN, [-1, 12, -1, 12]);
        assert_eq!(
            rules.resolve_turn(&board, PlayerId::GREEN, 2),
            Resolution::Auto { token: 1, selection: Selection::Stacked }
        );
    }

    #[test]
    fn test_resolve_all_home_six_enters_token_zero() {
        let rules = TurnResolver::new();
        let board = BoardState::new();
        // All four share position -1, so the stacked rule already selects 0
        let resolution = rules.resolve_turn(&board, PlayerId::BLUE, 6);
        assert!(matches!(resolution, Resolution::Auto { token: 0, .. }));
    }

    #[test]
    fn test_resolve_choose() {
        let rules = TurnResolver::new();
        let board = board_with(PlayerId::YELLOW, [-1, 3, 20, 56]);
        match rules.resolve_turn(&board, PlayerId::YELLOW, 6) {
            Resolution::Choose(set) => assert_eq!(set.as_slice(), &[0, 1, 2]),
            other => panic!("expected choice, got {other:?}"),
        }
    }

    #[test]
    fn test_apply_move_enter_from_home() {
        let rules = TurnResolver::new();
        let mut board = BoardState::new();
        let outcome = rules.apply_move(&mut board, PlayerId::RED, 2, 6).unwrap();
        assert_eq!(outcome.from, HOME);
        assert_eq!(outcome.to, ENTRY);
        assert_eq!(board.tokens_of(PlayerId::RED), &[-1, -1, 0, -1]);
    }

    #[test]
    fn test_apply_move_into_home_stretch() {
        let rules = TurnResolver::new();
        let mut board = board_with(PlayerId::RED, [48, -1, -1, -1]);
        let outcome = rules.apply_move(&mut board, PlayerId::RED, 0, 6).unwrap();
        assert_eq!(outcome.to, 54);
        assert_eq!(absolute_cell(PlayerId::RED, outcome.to), Some(55));
        assert!(!outcome.killed());
    }

    #[test]
    fn test_apply_move_rejects_illegal() {
        let rules = TurnResolver::new();
        let mut board = board_with(PlayerId::RED, [54, -1, -1, -1]);
        let before = board.clone();

        assert_eq!(
            rules.apply_move(&mut board, PlayerId::RED, 1, 3),
            Err(RulesError::IllegalMove { player: PlayerId::RED, token: 1 })
        );
        assert_eq!(
            rules.apply_move(&mut board, PlayerId::RED, 0, 3),
            Err(RulesError::IllegalMove { player: PlayerId::RED, token: 0 })
        );
        assert_eq!(
            rules.apply_move(&mut board, PlayerId::RED, 4, 1),
            Err(RulesError::InvalidTokenIndex(4))
        );
        assert_eq!(
            rules.apply_move(&mut board, PlayerId::RED, 0, 0),
            Err(RulesError::InvalidDice(0))
        );
        assert_eq!(board, before);
    }

    #[test]
    fn test_capture_sends_opponent_home() {
        let rules = TurnResolver::new();
        let mut board = BoardState::new();
        // Red steps 7 -> cell 8 (not safe); Green steps 46 -> cell 8
        board.set_tokens(PlayerId::RED, [4, -1, -1, -1]).unwrap();
        board.set_tokens(PlayerId::GREEN, [46, -1, -1, -1]).unwrap();

        let outcome = rules.apply_move(&mut board, PlayerId::RED, 0, 3).unwrap();
        assert_eq!(outcome.captured, Some(TokenRef::new(PlayerId::GREEN, 0)));
        assert_eq!(board.tokens_of(PlayerId::GREEN)[0], HOME);
    }

    #[test]
    fn test_no_capture_on_safe_cell() {
        let rules = TurnResolver::new();
        let mut board = BoardState::new();
        // Green steps 39 -> cell 1, Red's safe start cell
        board.set_tokens(PlayerId::GREEN, [39, -1, -1, -1]).unwrap();

        let outcome = rules.apply_move(&mut board, PlayerId::RED, 0, 6).unwrap();
        assert_eq!(absolute_cell(PlayerId::RED, outcome.to), Some(1));
        assert!(!outcome.killed());
        assert_eq!(board.tokens_of(PlayerId::GREEN)[0], 39);
    }

    #[test]
    fn test_capture_takes_only_last_enumerated() {
        let rules = TurnResolver::new();
        let mut board = BoardState::new();
        // Cell 30 holds Green #0, Green #2 and Blue #1
        board.set_tokens(PlayerId::GREEN, [16, -1, 16, -1]).unwrap();
        board.set_tokens(PlayerId::BLUE, [-1, 3, -1, -1]).unwrap();
        board.set_tokens(PlayerId::RED, [25, -1, -1, -1]).unwrap();

        let outcome = rules.apply_move(&mut board, PlayerId::RED, 0, 4).unwrap();
        assert_eq!(absolute_cell(PlayerId::RED, 29), Some(30));
        assert_eq!(outcome.captured, Some(TokenRef::new(PlayerId::BLUE, 1)));
        assert_eq!(board.tokens_of(PlayerId::GREEN), &[16, -1, 16, -1]);
        assert_eq!(board.tokens_of(PlayerId::BLUE)[1], HOME);
    }

    #[test]
    fn test_no_capture_in_home_stretch() {
        let rules = TurnResolver::new();
        let mut board = board_with(PlayerId::RED, [52, -1, -1, -1]);
        assert_eq!(rules.evaluate_capture(&mut board, PlayerId::RED, 52), None);
    }

    #[test]
    fn test_goal_records_winner_once() {
        let rules = TurnResolver::new();
        let mut board = board_with(PlayerId::YELLOW, [56, 56, 56, 53]);

        let outcome = rules.apply_move(&mut board, PlayerId::YELLOW, 3, 3).unwrap();
        assert!(outcome.reached_goal);
        assert!(outcome.player_finished);
        assert_eq!(board.winners(), &[PlayerId::YELLOW]);
        assert_eq!(rules.check_goal_and_winners(&mut board, PlayerId::YELLOW), None);
        assert_eq!(board.winners(), &[PlayerId::YELLOW]);
    }

    #[test]
    fn test_is_terminal_all_but_one() {
        let rules = TurnResolver::new();
        let seating = Seating::for_player_count(3).unwrap();
        let mut board = BoardState::new();
        board.record_winner(PlayerId::GREEN);
        assert_eq!(rules.is_terminal(&board, &seating), None);

        board.record_winner(PlayerId::RED);
        let result = rules.is_terminal(&board, &seating).unwrap();
        assert_eq!(result.winner, PlayerId::GREEN);
        assert_eq!(result.finish_order, vec![PlayerId::GREEN, PlayerId::RED]);
    }
}
