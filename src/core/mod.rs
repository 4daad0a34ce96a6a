//! Core types: players, tokens, state, moves, RNG, configuration, errors.
//!
//! Everything else in the crate builds on these.

pub mod player;
pub mod token;
pub mod rng;
pub mod config;
pub mod action;
pub mod state;
pub mod error;

pub use player::{PlayerId, PlayerMap, Seating, MAX_PLAYERS};
pub use token::{Steps, TokenArray, ENTRY, GOAL, HOME, LAST_SHARED, TOKENS_PER_PLAYER};
pub use rng::{GameRng, GameRngState};
pub use config::{GameConfig, PlaybackTiming};
pub use action::{EventRecord, MoveOutcome, MoveSet, Selection, TokenRef, TurnEvent};
pub use state::{BoardState, GameState, PendingRoll};
pub use error::RulesError;
