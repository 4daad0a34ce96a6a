//! # ludo-core
//!
//! Turn and move resolution for four-color Ludo.
//!
//! ## Design Principles
//!
//! 1. **Rules Apart From Presentation**: moves apply atomically to the board;
//!    renderers replay them through `MovePlayback` and read cell positions
//!    from `board::absolute_cell`.
//!
//! 2. **Deterministic**: every die comes from a seeded ChaCha8 RNG whose
//!    position is part of the state, so a game replays exactly from its
//!    seed or snapshot.
//!
//! 3. **Reject, Never Correct**: illegal selections and unknown players are
//!    errors that leave state untouched.
//!
//! ## Modules
//!
//! - `core`: players, seating, token steps, state, events, RNG, configuration
//! - `board`: path geometry, safe cells and occupancy
//! - `dice`: the die and its consecutive-six house rule
//! - `rules`: `RulesEngine` trait, `TurnResolver` and the turn phase machine
//! - `playback`: step-by-step move playback for renderers
//! - `game`: `GameSession`, the driver tying it all together
//! - `persist`: flat saves and save slots

pub mod board;
pub mod core;
pub mod dice;
pub mod game;
pub mod persist;
pub mod playback;
pub mod rules;

// Re-export commonly used types
pub use crate::core::{
    BoardState, EventRecord, GameConfig, GameRng, GameRngState, GameState, MoveOutcome, MoveSet,
    PlaybackTiming, PlayerId, PlayerMap, RulesError, Seating, Selection, Steps, TokenArray,
    TokenRef, TurnEvent,
};

pub use crate::board::{absolute_cell, is_safe};

pub use crate::dice::Die;

pub use crate::rules::{GameResult, Resolution, RulesEngine, TurnPhase, TurnResolver};

pub use crate::playback::{MovePlayback, PlaybackStep};

pub use crate::game::{GameSession, RollOutcome, TurnReport};

pub use crate::persist::{FileStore, MemoryStore, PersistError, SaveStore, SavedGame};
