//! Token progress encoding.
//!
//! A token's position is a step counter relative to its owner's start cell:
//!
//! | steps    | meaning                          |
//! |----------|----------------------------------|
//! | `-1`     | in the home base, not yet entered |
//! | `0..=50` | on the shared 52-cell loop        |
//! | `51..=56`| on the private home stretch       |
//! | `56`     | finished                          |

/// Step counter of one token. Always within `HOME..=GOAL`.
pub type Steps = i8;

/// Positions of one player's four tokens.
pub type TokenArray = [Steps; TOKENS_PER_PLAYER];

pub const TOKENS_PER_PLAYER: usize = 4;

/// Token waiting in the home base.
pub const HOME: Steps = -1;
/// Steps of a token that has just entered the board.
pub const ENTRY: Steps = 0;
/// Last step on the shared loop.
pub const LAST_SHARED: Steps = 50;
/// Finished.
pub const GOAL: Steps = 56;

/// Die face that releases a token from home.
pub const ENTRY_ROLL: u8 = 6;

/// Fresh token array, all tokens at home.
pub const ALL_HOME: TokenArray = [HOME; TOKENS_PER_PLAYER];

#[must_use]
pub const fn is_valid(steps: Steps) -> bool {
    steps >= HOME && steps <= GOAL
}

#[must_use]
pub const fn is_on_shared_loop(steps: Steps) -> bool {
    steps >= ENTRY && steps <= LAST_SHARED
}

#[must_use]
pub const fn is_in_home_stretch(steps: Steps) -> bool {
    steps > LAST_SHARED && steps <= GOAL
}
