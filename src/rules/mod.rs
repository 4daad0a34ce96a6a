//! Turn and move resolution.
//!
//! `RulesEngine` is the seam a session drives; `TurnResolver` implements
//! the classic rule set. `TurnPhase` tracks where a turn stands.

pub mod engine;
pub mod phase;
pub mod resolver;

pub use engine::{GameResult, Resolution, RulesEngine};
pub use phase::TurnPhase;
pub use resolver::TurnResolver;
