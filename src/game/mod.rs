//! Session driver: rolls, selections, turn rotation and save slots.

pub mod session;

pub use session::{GameSession, RollOutcome, TurnReport};
