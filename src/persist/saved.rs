//! Flat save format.
//!
//! One record with a key per field, written as camelCase JSON:
//!
//! ```json
//! {
//!   "hasSavedGame": true,
//!   "totalPlayers": 2,
//!   "isVsComputer": false,
//!   "currentPlayer": 1,
//!   "redTokens": [-1, -1, -1, -1],
//!   "greenTokens": [0, 12, -1, -1],
//!   "yellowTokens": [56, 56, 56, 56],
//!   "blueTokens": [-1, -1, -1, -1],
//!   "winners": [3]
//! }
//! ```
//!
//! `currentPlayer` is the 1-based logical seat, not a color id. Inactive
//! colors keep their arrays.

use serde::{Deserialize, Serialize};

use super::error::PersistError;
use crate::core::player::{PlayerId, Seating};
use crate::core::state::BoardState;
use crate::core::token::{TokenArray, ALL_HOME};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedGame {
    pub has_saved_game: bool,
    pub total_players: u8,
    pub is_vs_computer: bool,
    pub current_player: u8,
    pub red_tokens: TokenArray,
    pub green_tokens: TokenArray,
    pub yellow_tokens: TokenArray,
    pub blue_tokens: TokenArray,
    /// Color ids in completion order.
    #[serde(default)]
    pub winners: Vec<u8>,
}

impl Default for SavedGame {
    fn default() -> Self {
        Self {
            has_saved_game: false,
            total_players: 4,
            is_vs_computer: false,
            current_player: 1,
            red_tokens: ALL_HOME,
            green_tokens: ALL_HOME,
            yellow_tokens: ALL_HOME,
            blue_tokens: ALL_HOME,
            winners: Vec::new(),
        }
    }
}

impl SavedGame {
    /// Token array stored for a color.
    #[must_use]
    pub fn tokens_of(&self, player: PlayerId) -> &TokenArray {
        match player {
            PlayerId::RED => &self.red_tokens,
            PlayerId::GREEN => &self.green_tokens,
            PlayerId::YELLOW => &self.yellow_tokens,
            _ => &self.blue_tokens,
        }
    }

    pub fn tokens_of_mut(&mut self, player: PlayerId) -> &mut TokenArray {
        match player {
            PlayerId::RED => &mut self.red_tokens,
            PlayerId::GREEN => &mut self.green_tokens,
            PlayerId::YELLOW => &mut self.yellow_tokens,
            _ => &mut self.blue_tokens,
        }
    }

    pub fn to_json(&self) -> Result<String, PersistError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, PersistError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Seating for the saved player count.
    pub fn seating(&self) -> Result<Seating, PersistError> {
        Ok(Seating::for_player_count(usize::from(self.total_players))?)
    }

    /// Rebuild and validate the board.
    ///
    /// Rejects out-of-range steps, unknown winner ids, and any board
    /// [`BoardState::validate_against`] refuses for the saved seating.
    pub fn board(&self) -> Result<BoardState, PersistError> {
        let seating = self.seating()?;
        let mut board = BoardState::new();
        for player in PlayerId::all() {
            board.set_tokens(player, *self.tokens_of(player))?;
        }
        let winners = self
            .winners
            .iter()
            .map(|&id| PlayerId::try_from(id))
            .collect::<Result<Vec<_>, _>>()?;
        board.set_winners(winners);
        board.validate_against(&seating)?;
        Ok(board)
    }

    /// Validate the current seat against the player count.
    pub fn current_seat(&self) -> Result<u8, PersistError> {
        let seating = self.seating()?;
        if seating.player_at(self.current_player).is_none() {
            return Err(PersistError::Invalid(format!(
                "current seat {} outside 1..={}",
                self.current_player,
                seating.len()
            )));
        }
        Ok(self.current_player)
    }
}
