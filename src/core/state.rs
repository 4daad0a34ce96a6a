//! Board and session state.
//!
//! ## BoardState
//!
//! Token positions for all four color slots plus the ordered winners list.
//! Mutated only by the turn resolver while applying a move.
//!
//! ## GameState
//!
//! Everything a running session needs:
//! - Board state
//! - Turn phase, current seat and the pending roll awaiting a selection
//! - Dice streak and RNG
//! - Event history

use im::Vector;
use serde::{Deserialize, Serialize};

use super::action::{EventRecord, MoveSet, TurnEvent};
use super::error::RulesError;
use super::player::{PlayerId, PlayerMap, Seating};
use super::rng::GameRng;
use super::token::{self, Steps, TokenArray, ALL_HOME, GOAL, HOME};
use crate::dice::Die;
use crate::persist::PersistError;
use crate::rules::TurnPhase;

/// Token positions and finish order.
///
/// ```
/// use ludo_core::core::{BoardState, PlayerId};
///
/// let board = BoardState::new();
/// assert_eq!(board.tokens_of(PlayerId::RED), &[-1, -1, -1, -1]);
/// assert!(!board.is_finished(PlayerId::RED));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardState {
    tokens: PlayerMap<TokenArray>,
    winners: Vec<PlayerId>,
}

impl Default for BoardState {
    fn default() -> Self {
        Self::new()
    }
}

impl BoardState {
    /// Fresh board: every token at home, no winners.
    #[must_use]
    pub fn new() -> Self {
        Self {
            tokens: PlayerMap::with_value(ALL_HOME),
            winners: Vec::new(),
        }
    }

    /// A player's four token positions.
    #[must_use]
    pub fn tokens_of(&self, player: PlayerId) -> &TokenArray {
        &self.tokens[player]
    }

    pub(crate) fn tokens_of_mut(&mut self, player: PlayerId) -> &mut TokenArray {
        &mut self.tokens[player]
    }

    /// Position of a single token.
    pub fn steps(&self, player: PlayerId, index: usize) -> Result<Steps, RulesError> {
        self.tokens[player]
            .get(index)
            .copied()
            .ok_or(RulesError::InvalidTokenIndex(index))
    }

    /// Replace a player's token positions. Rejects values outside `-1..=56`.
    pub fn set_tokens(&mut self, player: PlayerId, tokens: TokenArray) -> Result<(), RulesError> {
        if let Some(&bad) = tokens.iter().find(|&&s| !token::is_valid(s)) {
            return Err(RulesError::InvalidSteps(bad));
        }
        self.tokens[player] = tokens;
        Ok(())
    }

    /// True iff all four tokens are at the goal.
    #[must_use]
    pub fn is_finished(&self, player: PlayerId) -> bool {
        self.tokens[player].iter().all(|&s| s == GOAL)
    }

    /// True iff all four tokens are still in the home base.
    #[must_use]
    pub fn all_home(&self, player: PlayerId) -> bool {
        self.tokens[player].iter().all(|&s| s == HOME)
    }

    /// Number of tokens not yet at the goal.
    #[must_use]
    pub fn unfinished_count(&self, player: PlayerId) -> usize {
        self.tokens[player].iter().filter(|&&s| s < GOAL).count()
    }

    /// Finishers in completion order. The first entry wins the round.
    #[must_use]
    pub fn winners(&self) -> &[PlayerId] {
        &self.winners
    }

    /// True once `player` is on the winners list.
    #[must_use]
    pub fn has_finished_recorded(&self, player: PlayerId) -> bool {
        self.winners.contains(&player)
    }

    /// Check the board is reachable under `seating`.
    ///
    /// Unseated colors must have every token at home. Winners must be
    /// distinct, seated and finished, and every finished seated player
    /// must be on the list.
    pub fn validate_against(&self, seating: &Seating) -> Result<(), PersistError> {
        if let Some(idle) = PlayerId::all().find(|&p| !seating.is_active(p) && !self.all_home(p)) {
            return Err(RulesError::InactivePlayer(idle).into());
        }
        for (i, &player) in self.winners.iter().enumerate() {
            if self.winners[..i].contains(&player) {
                return Err(PersistError::Invalid(format!("{player} listed twice in winners")));
            }
            if !seating.is_active(player) {
                return Err(PersistError::Invalid(format!("{player} is a winner but not seated")));
            }
            if !self.is_finished(player) {
                return Err(PersistError::Invalid(format!("{player} is a winner with tokens left")));
            }
        }
        if let Some(missing) = seating
            .active_players()
            .find(|&p| self.is_finished(p) && !self.has_finished_recorded(p))
        {
            return Err(PersistError::Invalid(format!("{missing} finished but is not a winner")));
        }
        Ok(())
    }

    /// Append a finisher once. Returns the 1-based place if newly recorded.
    pub(crate) fn record_winner(&mut self, player: PlayerId) -> Option<usize> {
        if self.winners.contains(&player) {
            return None;
        }
        self.winners.push(player);
        Some(self.winners.len())
    }

    pub(crate) fn set_winners(&mut self, winners: Vec<PlayerId>) {
        self.winners = winners;
    }

    /// Iterate over every token of every color slot, color order then index.
    pub fn iter_tokens(&self) -> impl Iterator<Item = (PlayerId, usize, Steps)> + '_ {
        self.tokens.iter().flat_map(|(player, tokens)| {
            tokens
                .iter()
                .enumerate()
                .map(move |(i, &steps)| (player, i, steps))
        })
    }
}

/// Roll waiting for the player to choose a token.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingRoll {
    pub player: PlayerId,
    pub dice: u8,
    pub movable: MoveSet,
}

/// Full session state.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameState {
    /// Token positions and winners.
    pub board: BoardState,

    /// Current turn phase.
    pub phase: TurnPhase,

    /// Seated players the state was created for.
    player_count: u8,

    /// 1-based seat whose turn it is.
    current_seat: u8,

    /// Roll awaiting a token choice (phase `TokenSelectable`).
    pub pending: Option<PendingRoll>,

    /// Die with the current player's six streak.
    pub die: Die,

    /// Turn number (starts at 1).
    pub turn_number: u32,

    /// Event sequence within the turn.
    sequence: u32,

    /// Every turn event so far.
    pub history: Vector<EventRecord>,

    /// Deterministic RNG.
    pub rng: GameRng,
}

impl GameState {
    /// Create a fresh state for `player_count` players with `seat` to move
    /// first.
    #[must_use]
    pub fn new(player_count: u8, seat: u8, rng: GameRng) -> Self {
        Self {
            board: BoardState::new(),
            phase: TurnPhase::AwaitingRoll,
            player_count,
            current_seat: seat,
            pending: None,
            die: Die::new(),
            turn_number: 1,
            sequence: 0,
            history: Vector::new(),
            rng,
        }
    }

    #[must_use]
    pub fn player_count(&self) -> u8 {
        self.player_count
    }

    #[must_use]
    pub fn current_seat(&self) -> u8 {
        self.current_seat
    }

    /// Hand the turn to `seat`, clearing the six streak.
    pub(crate) fn pass_to(&mut self, seat: u8) {
        self.current_seat = seat;
        self.die.reset_streak();
        self.turn_number += 1;
        self.sequence = 0;
    }

    /// Append an event to the history.
    pub fn record(&mut self, event: TurnEvent) {
        let sequence = self.sequence;
        self.sequence += 1;
        self.history.push_back(EventRecord {
            turn: self.turn_number,
            sequence,
            event,
        });
    }

    /// Compact binary snapshot of the whole state, RNG position included.
    pub fn to_snapshot(&self) -> Result<Vec<u8>, PersistError> {
        Ok(bincode::serialize(self)?)
    }

    /// Restore a state written by [`GameState::to_snapshot`].
    pub fn from_snapshot(bytes: &[u8]) -> Result<Self, PersistError> {
        let state: GameState = bincode::deserialize(bytes)?;
        for (_, tokens) in state.board.tokens.iter() {
            if !tokens.iter().all(|&s| token::is_valid(s)) {
                return Err(PersistError::Invalid("token steps out of range".into()));
            }
        }
        Ok(state)
    }
}
