//! Moves and the turn event history.
//!
//! A move is a (player, token index) pair applied with a die value. Sessions
//! record every turn step as a `TurnEvent`, in order, for replay and
//! debugging.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::player::PlayerId;
use super::token::{Steps, TOKENS_PER_PLAYER};

/// One token of one player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TokenRef {
    pub player: PlayerId,
    pub index: usize,
}

impl TokenRef {
    #[must_use]
    pub const fn new(player: PlayerId, index: usize) -> Self {
        Self { player, index }
    }
}

impl std::fmt::Display for TokenRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} #{}", self.player, self.index)
    }
}

/// Token indices that may legally move this roll, ascending.
pub type MoveSet = SmallVec<[usize; TOKENS_PER_PLAYER]>;

/// Result of applying one move.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveOutcome {
    pub token: TokenRef,
    pub from: Steps,
    pub to: Steps,
    /// Opposing token sent home, if any.
    pub captured: Option<TokenRef>,
    /// Token reached the goal with this move.
    pub reached_goal: bool,
    /// Move completed the player's last token; the player was recorded as
    /// a finisher.
    pub player_finished: bool,
}

impl MoveOutcome {
    #[must_use]
    pub fn killed(&self) -> bool {
        self.captured.is_some()
    }
}

/// How a moving token was chosen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Selection {
    /// Only one token could move.
    OnlyOption,
    /// All movable tokens shared one position; the lowest index moved.
    Stacked,
    /// Six with every token at home; token 0 entered.
    EnterFromHome,
    /// Player picked the token.
    Chosen,
}

/// A recorded turn step.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnEvent {
    /// A die was rolled (or supplied) for the player.
    Rolled { player: PlayerId, dice: u8 },
    /// A six that would have been the third in a row was thrown away.
    SixDiscarded { player: PlayerId },
    /// The roll allowed no move.
    NoMove { player: PlayerId, dice: u8 },
    /// A token moved.
    Moved {
        dice: u8,
        selection: Selection,
        outcome: MoveOutcome,
    },
    /// The player finished all four tokens.
    Finished { player: PlayerId, place: usize },
    /// Same player rolls again.
    ExtraTurn { player: PlayerId },
    /// Turn moved to another player.
    TurnPassed { from: PlayerId, to: PlayerId },
    /// Game ended.
    GameOver { winner: PlayerId },
}

/// A turn event with ordering metadata.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    /// Turn number when the event happened (starts at 1).
    pub turn: u32,
    /// Sequence number within the turn.
    pub sequence: u32,
    pub event: TurnEvent,
}
