//! Game configuration.
//!
//! Drivers configure a session at startup:
//! - `GameConfig`: player count, seed, starting seat, legacy vs-computer flag
//! - `PlaybackTiming`: presentation delays handed to UI layers
//!
//! The rules never wait on timing values; they exist so a renderer can pace
//! `MovePlayback` the same way for every front end.

use serde::{Deserialize, Serialize};

use super::error::RulesError;
use super::player::Seating;

/// Presentation delays in milliseconds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaybackTiming {
    /// Time per step of a moving token.
    pub step_ms: u32,
    /// Token "pop" scale-up within a step.
    pub pop_ms: u32,
    /// Pause before an auto-selected move starts.
    pub auto_move_delay_ms: u32,
    /// Pause before the turn passes when no move is possible.
    pub no_move_delay_ms: u32,
    /// Pause between the die settling and move resolution.
    pub settle_ms: u32,
}

impl Default for PlaybackTiming {
    fn default() -> Self {
        Self {
            step_ms: 350,
            pop_ms: 175,
            auto_move_delay_ms: 500,
            no_move_delay_ms: 1000,
            settle_ms: 600,
        }
    }
}

impl PlaybackTiming {
    /// Timing with every delay at zero (headless drivers, tests).
    #[must_use]
    pub fn instant() -> Self {
        Self {
            step_ms: 0,
            pop_ms: 0,
            auto_move_delay_ms: 0,
            no_move_delay_ms: 0,
            settle_ms: 0,
        }
    }

    /// Nominal animation length of a move covering `steps` steps.
    #[must_use]
    pub fn duration(&self, steps: usize) -> std::time::Duration {
        std::time::Duration::from_millis(u64::from(self.step_ms) * steps as u64)
    }
}

/// Complete session configuration.
///
/// ```
/// use ludo_core::core::GameConfig;
///
/// let config = GameConfig::new(3).unwrap().with_seed(7).with_starting_seat(2);
/// assert_eq!(config.player_count(), 3);
/// assert_eq!(config.starting_seat, Some(2));
/// assert!(GameConfig::new(5).is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    seating: Seating,

    /// Seed for dice and the starting-seat draw.
    pub seed: u64,

    /// Fixed 1-based starting seat. `None` draws one from the RNG.
    pub starting_seat: Option<u8>,

    /// Legacy vs-computer flag. Persisted, drives no behavior.
    pub vs_computer: bool,

    /// Presentation pacing.
    pub timing: PlaybackTiming,
}

impl GameConfig {
    /// Create a configuration for 2, 3 or 4 players.
    pub fn new(player_count: usize) -> Result<Self, RulesError> {
        Ok(Self {
            seating: Seating::for_player_count(player_count)?,
            seed: 0,
            starting_seat: None,
            vs_computer: false,
            timing: PlaybackTiming::default(),
        })
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.seating.len()
    }

    #[must_use]
    pub fn seating(&self) -> &Seating {
        &self.seating
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Fix the starting seat. Out-of-range seats are rejected when the
    /// session is created.
    #[must_use]
    pub fn with_starting_seat(mut self, seat: u8) -> Self {
        self.starting_seat = Some(seat);
        self
    }

    #[must_use]
    pub fn with_vs_computer(mut self, vs_computer: bool) -> Self {
        self.vs_computer = vs_computer;
        self
    }

    #[must_use]
    pub fn with_timing(mut self, timing: PlaybackTiming) -> Self {
        self.timing = timing;
        self
    }
}
