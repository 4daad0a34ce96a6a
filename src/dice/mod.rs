//! Six-sided die with the consecutive-six house rule.
//!
//! A player may roll at most two sixes in a row. A six that would be the
//! third is discarded and the die is thrown again; the streak stays
//! saturated, so any further six is thrown away too until a non-six comes
//! up. The streak resets when the turn passes to another player.

use serde::{Deserialize, Serialize};

use crate::core::error::RulesError;
use crate::core::rng::GameRng;

/// Most sixes a player may keep in a row.
pub const MAX_CONSECUTIVE_SIXES: u8 = 2;

/// A settled roll.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Roll {
    /// Face shown, 1..=6.
    pub value: u8,
    /// Sixes thrown away before this value came up.
    pub discarded_sixes: u32,
}

/// Die state for the current player's roll streak.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Die {
    consecutive_sixes: u8,
}

impl Die {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sixes rolled in a row by the current player.
    #[must_use]
    pub fn streak(&self) -> u8 {
        self.consecutive_sixes
    }

    /// Roll until a value allowed by the house rule comes up.
    pub fn roll(&mut self, rng: &mut GameRng) -> Roll {
        let mut discarded_sixes = 0;
        loop {
            let value = rng.roll_d6();
            if self.observe(value) {
                return Roll {
                    value,
                    discarded_sixes,
                };
            }
            discarded_sixes += 1;
        }
    }

    /// Account for an externally supplied value.
    ///
    /// Returns false when the value is a six that must be discarded.
    pub fn observe(&mut self, value: u8) -> bool {
        if value == 6 {
            self.consecutive_sixes = self.consecutive_sixes.saturating_add(1);
            self.consecutive_sixes <= MAX_CONSECUTIVE_SIXES
        } else {
            self.consecutive_sixes = 0;
            true
        }
    }

    pub fn reset_streak(&mut self) {
        self.consecutive_sixes = 0;
    }
}

/// Reject die values outside 1..=6.
pub fn validate(value: u8) -> Result<u8, RulesError> {
    if (1..=6).contains(&value) {
        Ok(value)
    } else {
        Err(RulesError::InvalidDice(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate() {
        assert_eq!(validate(1), Ok(1));
        assert_eq!(validate(6), Ok(6));
        assert_eq!(validate(0), Err(RulesError::InvalidDice(0)));
        assert_eq!(validate(7), Err(RulesError::InvalidDice(7)));
    }

    #[test]
    fn test_third_six_is_discarded() {
        let mut die = Die::new();
        assert!(die.observe(6));
        assert!(die.observe(6));
        assert!(!die.observe(6));
        // Still saturated: another six is also thrown away
        assert!(!die.observe(6));
        assert!(die.observe(2));
        assert_eq!(die.streak(), 0);
        assert!(die.observe(6));
    }

    #[test]
    fn test_non_six_resets_streak() {
        let mut die = Die::new();
        die.observe(6);
        die.observe(3);
        assert_eq!(die.streak(), 0);
    }

    #[test]
    fn test_reset_streak() {
        let mut die = Die::new();
        die.observe(6);
        die.observe(6);
        die.reset_streak();
        assert!(die.observe(6));
    }

    #[test]
    fn test_roll_never_yields_third_six() {
        let mut rng = GameRng::new(11);
        let mut die = Die::new();
        let mut run = 0;
        for _ in 0..2000 {
            let roll = die.roll(&mut rng);
            assert!((1..=6).contains(&roll.value));
            if roll.value == 6 {
                run += 1;
                assert!(run <= MAX_CONSECUTIVE_SIXES);
            } else {
                run = 0;
            }
        }
    }

    #[test]
    fn test_roll_reports_discards() {
        let mut rng = GameRng::new(5);
        let mut die = Die::new();
        die.observe(6);
        die.observe(6);
        let roll = die.roll(&mut rng);
        assert_ne!(roll.value, 6);
    }
}
