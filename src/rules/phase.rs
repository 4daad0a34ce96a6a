//! Per-turn state machine.
//!
//! ```text
//! AwaitingRoll -> TokenSelectable -> Animating -> TurnResolved -> AwaitingRoll
//!       |                               ^               |
//!       +------- (auto-selected) -------+               +--> GameOver
//!       +------- (no move) ---------------> TurnResolved
//! ```
//!
//! `Animating` covers the atomic move application; the session never rests
//! in it, which is what guarantees at most one in-flight move per turn.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurnPhase {
    /// Current player must roll.
    #[default]
    AwaitingRoll,
    /// Several tokens can move; current player must pick one.
    TokenSelectable,
    /// A move is being applied.
    Animating,
    /// The roll is fully resolved; the driver decides who rolls next.
    TurnResolved,
    /// All but one active player have finished.
    GameOver,
}

impl TurnPhase {
    /// Legal successor phases.
    #[must_use]
    pub fn can_transition_to(self, next: TurnPhase) -> bool {
        use TurnPhase::*;
        matches!(
            (self, next),
            (AwaitingRoll, TokenSelectable)
                | (AwaitingRoll, Animating)
                | (AwaitingRoll, TurnResolved)
                | (TokenSelectable, Animating)
                | (Animating, TurnResolved)
                | (TurnResolved, AwaitingRoll)
                | (TurnResolved, GameOver)
        )
    }
}
