//! Rule-level errors.
//!
//! Every fallible rules operation returns `Result<_, RulesError>` and leaves
//! state untouched when it fails.

use super::player::PlayerId;
use super::token::Steps;
use crate::rules::TurnPhase;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RulesError {
    /// Color id outside 1..=4.
    InvalidPlayer(u8),
    /// Player count outside 2..=4.
    InvalidPlayerCount(usize),
    /// Seat outside 1..=player count.
    InvalidSeat(u8),
    /// Token index outside 0..4.
    InvalidTokenIndex(usize),
    /// Token position outside -1..=56.
    InvalidSteps(Steps),
    /// Die value outside 1..=6.
    InvalidDice(u8),
    /// Player exists but is not seated in this game.
    InactivePlayer(PlayerId),
    /// Token is not in the legal-move set for this roll.
    IllegalMove { player: PlayerId, token: usize },
    /// Operation not allowed in the current turn phase.
    WrongPhase { expected: TurnPhase, actual: TurnPhase },
    /// The game has already ended.
    GameOver,
}

impl RulesError {
    /// Stable machine-readable code.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            RulesError::InvalidPlayer(_)
            | RulesError::InvalidSeat(_)
            | RulesError::InactivePlayer(_) => "invalid_player",
            RulesError::InvalidPlayerCount(_) => "invalid_player_count",
            RulesError::InvalidTokenIndex(_) | RulesError::IllegalMove { .. } => "illegal_move",
            RulesError::InvalidSteps(_) => "invalid_steps",
            RulesError::InvalidDice(_) => "invalid_dice",
            RulesError::WrongPhase { .. } => "wrong_phase",
            RulesError::GameOver => "game_over",
        }
    }
}

impl std::fmt::Display for RulesError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RulesError::InvalidPlayer(id) => write!(f, "player id {id} is not in 1..=4"),
            RulesError::InvalidPlayerCount(n) => write!(f, "player count {n} is not in 2..=4"),
            RulesError::InvalidSeat(seat) => write!(f, "seat {seat} is not in this game"),
            RulesError::InvalidTokenIndex(i) => write!(f, "token index {i} is not in 0..4"),
            RulesError::InvalidSteps(s) => write!(f, "token steps {s} is not in -1..=56"),
            RulesError::InvalidDice(v) => write!(f, "die value {v} is not in 1..=6"),
            RulesError::InactivePlayer(p) => write!(f, "{p} is not seated in this game"),
            RulesError::IllegalMove { player, token } => {
                write!(f, "{player} token {token} cannot move with this roll")
            }
            RulesError::WrongPhase { expected, actual } => {
                write!(f, "expected phase {expected:?}, turn is in {actual:?}")
            }
            RulesError::GameOver => f.write_str("the game is over"),
        }
    }
}

impl std::error::Error for RulesError {}
