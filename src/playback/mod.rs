//! Step-by-step playback of an applied move.
//!
//! Rules apply a move atomically. Presentation layers that want to walk a
//! token cell by cell consume a `MovePlayback`, which yields every
//! intermediate position between the old and new steps. It carries no rule
//! semantics: captures and finishes are already settled in the
//! `MoveOutcome` it was built from.
//!
//! ```
//! use ludo_core::core::{MoveOutcome, PlayerId, TokenRef};
//! use ludo_core::playback::MovePlayback;
//!
//! let outcome = MoveOutcome {
//!     token: TokenRef::new(PlayerId::RED, 0),
//!     from: 10,
//!     to: 13,
//!     captured: None,
//!     reached_goal: false,
//!     player_finished: false,
//! };
//! let steps: Vec<_> = MovePlayback::new(&outcome).map(|s| s.steps).collect();
//! assert_eq!(steps, vec![11, 12, 13]);
//! ```

use serde::{Deserialize, Serialize};

use crate::board::absolute_cell;
use crate::core::action::{MoveOutcome, TokenRef};
use crate::core::config::PlaybackTiming;
use crate::core::token::{Steps, ENTRY, HOME};

/// One intermediate position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaybackStep {
    /// 1-based frame number within the move.
    pub frame: usize,
    pub steps: Steps,
    /// Absolute path cell at these steps.
    pub cell: usize,
}

/// Iterator over the positions a moving token passes through.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovePlayback {
    token: TokenRef,
    current: Steps,
    target: Steps,
    frame: usize,
}

impl MovePlayback {
    /// Playback for a move already applied to the board.
    #[must_use]
    pub fn new(outcome: &MoveOutcome) -> Self {
        Self {
            token: outcome.token,
            current: outcome.from,
            target: outcome.to,
            frame: 0,
        }
    }

    /// Token being animated.
    #[must_use]
    pub fn token(&self) -> TokenRef {
        self.token
    }

    /// Nominal remaining animation length.
    #[must_use]
    pub fn duration(&self, timing: &PlaybackTiming) -> std::time::Duration {
        timing.duration(self.len())
    }
}

impl Iterator for MovePlayback {
    type Item = PlaybackStep;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current >= self.target {
            return None;
        }
        self.current = if self.current == HOME { ENTRY } else { self.current + 1 };
        self.frame += 1;
        let cell = absolute_cell(self.token.player, self.current)?;
        Some(PlaybackStep {
            frame: self.frame,
            steps: self.current,
            cell,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = if self.current >= self.target {
            0
        } else if self.current == HOME {
            // Entering covers HOME -> ENTRY in one frame
            1 + (self.target - ENTRY) as usize
        } else {
            (self.target - self.current) as usize
        };
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for MovePlayback {}
