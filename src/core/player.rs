//! Player identification, per-player storage and seating.
//!
//! ## PlayerId
//!
//! Type-safe color slot: Red=1, Green=2, Yellow=3, Blue=4. The inner value
//! is private, so an out-of-range identifier can never reach the rules;
//! raw ids are checked once via `PlayerId::try_from`.
//!
//! ## PlayerMap
//!
//! Fixed 4-slot per-player storage indexed by `PlayerId`. Inactive colors
//! still own a slot.
//!
//! ## Seating
//!
//! Maps logical seats (turn order, 1-based) onto colors for a 2, 3 or 4
//! player game.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::ops::{Index, IndexMut};

use super::error::RulesError;

/// Number of color slots on the board.
pub const MAX_PLAYERS: usize = 4;

/// Color slot identifier, 1..=4.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct PlayerId(u8);

impl PlayerId {
    pub const RED: PlayerId = PlayerId(1);
    pub const GREEN: PlayerId = PlayerId(2);
    pub const YELLOW: PlayerId = PlayerId(3);
    pub const BLUE: PlayerId = PlayerId(4);

    /// Raw color id (1..=4).
    #[must_use]
    pub const fn id(self) -> u8 {
        self.0
    }

    /// 0-based slot index, used for array storage.
    #[must_use]
    pub const fn index(self) -> usize {
        (self.0 - 1) as usize
    }

    /// Color name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self.0 {
            1 => "Red",
            2 => "Green",
            3 => "Yellow",
            _ => "Blue",
        }
    }

    /// All four color slots in enumeration order (1 -> 4).
    pub fn all() -> impl Iterator<Item = PlayerId> {
        (1..=MAX_PLAYERS as u8).map(PlayerId)
    }
}

impl TryFrom<u8> for PlayerId {
    type Error = RulesError;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        if (1..=MAX_PLAYERS as u8).contains(&id) {
            Ok(PlayerId(id))
        } else {
            Err(RulesError::InvalidPlayer(id))
        }
    }
}

impl From<PlayerId> for u8 {
    fn from(player: PlayerId) -> Self {
        player.0
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Per-player data storage with O(1) access.
///
/// Always holds exactly one entry per color slot.
///
/// ```
/// use ludo_core::core::{PlayerId, PlayerMap};
///
/// let mut finished: PlayerMap<u8> = PlayerMap::with_value(0);
/// finished[PlayerId::BLUE] = 2;
/// assert_eq!(finished[PlayerId::BLUE], 2);
/// assert_eq!(finished[PlayerId::RED], 0);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: [T; MAX_PLAYERS],
}

impl<T> PlayerMap<T> {
    /// Create a new PlayerMap with values from a factory function.
    pub fn new(factory: impl Fn(PlayerId) -> T) -> Self {
        Self {
            data: std::array::from_fn(|i| factory(PlayerId(i as u8 + 1))),
        }
    }

    /// Create a new PlayerMap with all entries set to the same value.
    pub fn with_value(value: T) -> Self
    where
        T: Clone,
    {
        Self::new(|_| value.clone())
    }

    #[must_use]
    pub fn get(&self, player: PlayerId) -> &T {
        &self.data[player.index()]
    }

    pub fn get_mut(&mut self, player: PlayerId) -> &mut T {
        &mut self.data[player.index()]
    }

    /// Iterate over (PlayerId, &T) pairs in color order.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8 + 1), v))
    }
}

impl<T: Default> Default for PlayerMap<T> {
    fn default() -> Self {
        Self::new(|_| T::default())
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        self.get(player)
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        self.get_mut(player)
    }
}

/// Turn order: logical seats mapped onto colors.
///
/// | players | seat 1 | seat 2 | seat 3 | seat 4 |
/// |---------|--------|--------|--------|--------|
/// | 2       | Yellow | Green  |        |        |
/// | 3       | Red    | Green  | Yellow |        |
/// | 4       | Red    | Green  | Blue   | Yellow |
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct Seating {
    seats: SmallVec<[PlayerId; MAX_PLAYERS]>,
}

impl Seating {
    /// Seating for a game with `player_count` players (2..=4).
    pub fn for_player_count(player_count: usize) -> Result<Self, RulesError> {
        let seats: &[PlayerId] = match player_count {
            2 => &[PlayerId::YELLOW, PlayerId::GREEN],
            3 => &[PlayerId::RED, PlayerId::GREEN, PlayerId::YELLOW],
            4 => &[PlayerId::RED, PlayerId::GREEN, PlayerId::BLUE, PlayerId::YELLOW],
            n => return Err(RulesError::InvalidPlayerCount(n)),
        };
        Ok(Self {
            seats: SmallVec::from_slice(seats),
        })
    }

    /// Number of active players.
    #[must_use]
    pub fn len(&self) -> usize {
        self.seats.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.seats.is_empty()
    }

    /// Color sitting at a 1-based seat.
    #[must_use]
    pub fn player_at(&self, seat: u8) -> Option<PlayerId> {
        let idx = usize::from(seat).checked_sub(1)?;
        self.seats.get(idx).copied()
    }

    /// Color at a 1-based seat, wrapping modulo the seat count.
    #[must_use]
    pub fn player_at_wrapping(&self, seat: u8) -> PlayerId {
        let n = self.seats.len();
        self.seats[(usize::from(seat) + n - 1) % n]
    }

    /// Color at a 1-based seat, rejecting seats outside `1..=len`.
    pub fn checked_seat(&self, seat: u8) -> Result<PlayerId, RulesError> {
        self.player_at(seat).ok_or(RulesError::InvalidSeat(seat))
    }

    /// 1-based seat of a color, if it is playing.
    #[must_use]
    pub fn seat_of(&self, player: PlayerId) -> Option<u8> {
        self.seats
            .iter()
            .position(|&p| p == player)
            .map(|i| i as u8 + 1)
    }

    /// True if the color takes part in this game.
    #[must_use]
    pub fn is_active(&self, player: PlayerId) -> bool {
        self.seats.contains(&player)
    }

    /// Active colors in color order (1 -> 4).
    pub fn active_players(&self) -> impl Iterator<Item = PlayerId> + '_ {
        PlayerId::all().filter(move |p| self.is_active(*p))
    }

    /// Next seat after `seat` in turn order whose player is not skipped.
    ///
    /// Wraps modulo the seat count. Returns `None` when every seat is skipped.
    pub fn next_seat(&self, seat: u8, skip: impl Fn(PlayerId) -> bool) -> Option<u8> {
        let n = self.seats.len() as u8;
        let mut next = seat;
        for _ in 0..n {
            next = if next >= n { 1 } else { next + 1 };
            let player = self.seats[usize::from(next) - 1];
            if !skip(player) {
                return Some(next);
            }
        }
        None
    }
}

impl TryFrom<usize> for Seating {
    type Error = RulesError;

    fn try_from(player_count: usize) -> Result<Self, Self::Error> {
        Self::for_player_count(player_count)
    }
}

impl From<Seating> for usize {
    fn from(seating: Seating) -> Self {
        seating.len()
    }
}
