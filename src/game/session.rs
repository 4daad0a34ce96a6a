//! Game session driver.
//!
//! `GameSession` owns the configuration, a rules engine and the full
//! `GameState`, and walks turns through the phase machine:
//!
//! 1. `roll` (or `play_roll` with an external die) in `AwaitingRoll`
//! 2. the rules resolve the roll: no move, an automatic move, or a choice
//! 3. `select_token` in `TokenSelectable` when a choice is needed
//! 4. after the move: game over, extra roll, or pass to the next seat
//!
//! Every step is appended to the state's history.

use crate::core::action::{EventRecord, MoveOutcome, MoveSet, Selection, TurnEvent};
use crate::core::config::GameConfig;
use crate::core::error::RulesError;
use crate::core::player::PlayerId;
use crate::core::rng::GameRng;
use crate::core::state::{BoardState, GameState, PendingRoll};
use crate::dice;
use crate::persist::{PersistError, SaveStore, SavedGame};
use crate::playback::MovePlayback;
use crate::rules::{GameResult, Resolution, RulesEngine, TurnPhase, TurnResolver};

/// Everything a driver needs after a move resolves.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TurnReport {
    pub player: PlayerId,
    pub dice: u8,
    pub selection: Selection,
    pub outcome: MoveOutcome,
    /// Same player rolls again.
    pub extra_turn: bool,
    /// Player to roll next, `None` once the game is over.
    pub next_player: Option<PlayerId>,
    /// Set when this move ended the game.
    pub result: Option<GameResult>,
}

impl TurnReport {
    /// Intermediate positions of the move, for presentation.
    #[must_use]
    pub fn playback(&self) -> MovePlayback {
        MovePlayback::new(&self.outcome)
    }
}

/// What a roll led to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RollOutcome {
    /// Supplied six was the third in a row and was thrown away. The same
    /// player rolls again.
    Discarded { player: PlayerId },
    /// No token could move; the turn passed.
    NoMove {
        player: PlayerId,
        dice: u8,
        next_player: PlayerId,
    },
    /// Player must call `select_token` with one of `movable`.
    AwaitingSelection {
        player: PlayerId,
        dice: u8,
        movable: MoveSet,
    },
    /// A token moved without asking.
    Moved(TurnReport),
}

impl RollOutcome {
    /// Die value that was played, if any.
    #[must_use]
    pub fn dice(&self) -> Option<u8> {
        match self {
            RollOutcome::Discarded { .. } => None,
            RollOutcome::NoMove { dice, .. } | RollOutcome::AwaitingSelection { dice, .. } => Some(*dice),
            RollOutcome::Moved(report) => Some(report.dice),
        }
    }

    #[must_use]
    pub fn report(&self) -> Option<&TurnReport> {
        match self {
            RollOutcome::Moved(report) => Some(report),
            _ => None,
        }
    }
}

/// A running game.
///
/// ```
/// use ludo_core::core::GameConfig;
/// use ludo_core::game::{GameSession, RollOutcome};
/// use ludo_core::rules::TurnPhase;
///
/// let config = GameConfig::new(2).unwrap().with_seed(42).with_starting_seat(1);
/// let mut session = GameSession::new(config).unwrap();
///
/// // Nobody can leave home without a six
/// let outcome = session.play_roll(3).unwrap();
/// assert!(matches!(outcome, RollOutcome::NoMove { .. }));
/// assert_eq!(session.current_seat(), 2);
/// assert_eq!(session.phase(), TurnPhase::AwaitingRoll);
/// ```
#[derive(Clone, Debug)]
pub struct GameSession<R: RulesEngine = TurnResolver> {
    config: GameConfig,
    rules: R,
    state: GameState,
}

impl GameSession<TurnResolver> {
    /// Start a fresh game under the classic rules.
    pub fn new(config: GameConfig) -> Result<Self, RulesError> {
        Self::with_rules(config, TurnResolver::new())
    }

    /// Rebuild a game from a flat save under the classic rules.
    ///
    /// The save carries no dice state, so `seed` starts a new die sequence.
    pub fn restore(saved: &SavedGame, seed: u64) -> Result<Self, PersistError> {
        Self::restore_with_rules(saved, seed, TurnResolver::new())
    }

    /// Continue the game in `store`, or start `fallback` when the slot is
    /// empty or unreadable.
    ///
    /// The restored game takes its seed and timing from `fallback`. Only an
    /// invalid `fallback` is an error.
    pub fn resume(store: &impl SaveStore, fallback: GameConfig) -> Result<Self, RulesError> {
        let restored = store
            .load()
            .and_then(|slot| slot.map(|saved| Self::restore(&saved, fallback.seed)).transpose());
        match restored {
            Ok(Some(mut session)) => {
                session.config.timing = fallback.timing;
                Ok(session)
            }
            Ok(None) | Err(_) => Self::new(fallback),
        }
    }
}

impl<R: RulesEngine> GameSession<R> {
    /// Start a fresh game with a custom rules engine.
    ///
    /// Without a configured starting seat one is drawn from the seeded RNG.
    pub fn with_rules(config: GameConfig, rules: R) -> Result<Self, RulesError> {
        let mut rng = GameRng::new(config.seed);
        let seat = match config.starting_seat {
            Some(seat) => {
                config.seating().checked_seat(seat)?;
                seat
            }
            None => (rng.gen_range_usize(0..config.player_count()) + 1) as u8,
        };
        let state = GameState::new(config.player_count() as u8, seat, rng);
        Ok(Self { config, rules, state })
    }

    /// Resume from a full state, e.g. one read back from a binary snapshot.
    ///
    /// The state must have been created for the same player count, and its
    /// board must fit that seating.
    pub fn from_state(config: GameConfig, rules: R, state: GameState) -> Result<Self, PersistError> {
        if usize::from(state.player_count()) != config.player_count() {
            return Err(PersistError::Invalid(format!(
                "state is for {} players, config for {}",
                state.player_count(),
                config.player_count()
            )));
        }
        config.seating().checked_seat(state.current_seat())?;
        state.board.validate_against(config.seating())?;
        Ok(Self { config, rules, state })
    }

    /// Rebuild a game from a flat save with a custom rules engine.
    pub fn restore_with_rules(saved: &SavedGame, seed: u64, rules: R) -> Result<Self, PersistError> {
        if !saved.has_saved_game {
            return Err(PersistError::Invalid("slot holds no game".into()));
        }
        let board = saved.board()?;
        let seat = saved.current_seat()?;
        let config = GameConfig::new(usize::from(saved.total_players))?
            .with_seed(seed)
            .with_starting_seat(seat)
            .with_vs_computer(saved.is_vs_computer);

        if rules.is_terminal(&board, config.seating()).is_some() {
            return Err(PersistError::Invalid("saved game is already over".into()));
        }
        let current = config.seating().player_at_wrapping(seat);
        if board.is_finished(current) {
            return Err(PersistError::Invalid(format!("{current} has finished but holds the turn")));
        }

        let mut state = GameState::new(saved.total_players, seat, GameRng::new(seed));
        state.board = board;
        Ok(Self { config, rules, state })
    }

    // === Queries ===

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn rules(&self) -> &R {
        &self.rules
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub fn board(&self) -> &BoardState {
        &self.state.board
    }

    #[must_use]
    pub fn phase(&self) -> TurnPhase {
        self.state.phase
    }

    /// 1-based seat holding the turn.
    #[must_use]
    pub fn current_seat(&self) -> u8 {
        self.state.current_seat()
    }

    #[must_use]
    pub fn current_player(&self) -> PlayerId {
        self.config.seating().player_at_wrapping(self.state.current_seat())
    }

    /// Tokens the current player may pick from, while a choice is pending.
    #[must_use]
    pub fn legal_moves(&self) -> Option<&MoveSet> {
        self.state.pending.as_ref().map(|pending| &pending.movable)
    }

    #[must_use]
    pub fn is_player_finished(&self, player: PlayerId) -> bool {
        self.state.board.is_finished(player)
    }

    /// Finishers in completion order.
    #[must_use]
    pub fn winners(&self) -> &[PlayerId] {
        self.state.board.winners()
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.state.phase == TurnPhase::GameOver
    }

    /// Final standings, once the game is over.
    #[must_use]
    pub fn result(&self) -> Option<GameResult> {
        self.rules.is_terminal(&self.state.board, self.config.seating())
    }

    /// First finisher, once the game is over.
    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        self.result().map(|result| result.winner)
    }

    #[must_use]
    pub fn history(&self) -> &im::Vector<EventRecord> {
        &self.state.history
    }

    // === Turn flow ===

    /// Roll the die for the current player and play the result.
    ///
    /// Sixes discarded by the house rule are recorded before the roll that
    /// counts.
    pub fn roll(&mut self) -> Result<RollOutcome, RulesError> {
        self.expect_phase(TurnPhase::AwaitingRoll)?;
        let player = self.current_player();
        let roll = self.state.die.roll(&mut self.state.rng);
        for _ in 0..roll.discarded_sixes {
            self.state.record(TurnEvent::SixDiscarded { player });
        }
        self.play_value(player, roll.value)
    }

    /// Play an externally supplied die value for the current player.
    ///
    /// A six that would be the third in a row is discarded; the caller
    /// should roll again.
    pub fn play_roll(&mut self, dice: u8) -> Result<RollOutcome, RulesError> {
        self.expect_phase(TurnPhase::AwaitingRoll)?;
        dice::validate(dice)?;
        let player = self.current_player();
        if !self.state.die.observe(dice) {
            self.state.record(TurnEvent::SixDiscarded { player });
            return Ok(RollOutcome::Discarded { player });
        }
        self.play_value(player, dice)
    }

    /// Move the chosen token for the pending roll.
    ///
    /// Indices outside the movable set are rejected and the selection stays
    /// open.
    pub fn select_token(&mut self, token: usize) -> Result<TurnReport, RulesError> {
        self.expect_phase(TurnPhase::TokenSelectable)?;
        let Some(pending) = self.state.pending.clone() else {
            return Err(RulesError::WrongPhase {
                expected: TurnPhase::TokenSelectable,
                actual: self.state.phase,
            });
        };
        if !pending.movable.contains(&token) {
            return Err(RulesError::IllegalMove {
                player: pending.player,
                token,
            });
        }
        self.apply(pending.player, pending.dice, token, Selection::Chosen)
    }

    // === Persistence ===

    /// Flat save of the current position.
    ///
    /// A finished game saves with `has_saved_game` unset.
    #[must_use]
    pub fn save(&self) -> SavedGame {
        let board = &self.state.board;
        let mut saved = SavedGame {
            has_saved_game: !self.is_over(),
            total_players: self.config.player_count() as u8,
            is_vs_computer: self.config.vs_computer,
            current_player: self.state.current_seat(),
            winners: board.winners().iter().map(|p| p.id()).collect(),
            ..SavedGame::default()
        };
        for player in PlayerId::all() {
            *saved.tokens_of_mut(player) = *board.tokens_of(player);
        }
        saved
    }

    /// Write the current position to `store`, or clear it once the game is
    /// over.
    pub fn autosave(&self, store: &mut impl SaveStore) -> Result<(), PersistError> {
        if self.is_over() {
            store.clear()
        } else {
            store.store(&self.save())
        }
    }

    // === Internals ===

    fn expect_phase(&self, expected: TurnPhase) -> Result<(), RulesError> {
        match self.state.phase {
            TurnPhase::GameOver => Err(RulesError::GameOver),
            actual if actual != expected => Err(RulesError::WrongPhase { expected, actual }),
            _ => Ok(()),
        }
    }

    fn enter(&mut self, next: TurnPhase) {
        debug_assert!(
            self.state.phase.can_transition_to(next),
            "bad phase transition {:?} -> {next:?}",
            self.state.phase
        );
        self.state.phase = next;
    }

    fn play_value(&mut self, player: PlayerId, dice: u8) -> Result<RollOutcome, RulesError> {
        self.state.record(TurnEvent::Rolled { player, dice });

        match self.rules.resolve_turn(&self.state.board, player, dice) {
            Resolution::NoMove => {
                self.state.record(TurnEvent::NoMove { player, dice });
                self.enter(TurnPhase::TurnResolved);
                let next_player = self.pass_turn(player);
                Ok(RollOutcome::NoMove {
                    player,
                    dice,
                    next_player,
                })
            }
            Resolution::Auto { token, selection } => {
                self.apply(player, dice, token, selection).map(RollOutcome::Moved)
            }
            Resolution::Choose(movable) => {
                self.state.pending = Some(PendingRoll {
                    player,
                    dice,
                    movable: movable.clone(),
                });
                self.enter(TurnPhase::TokenSelectable);
                Ok(RollOutcome::AwaitingSelection {
                    player,
                    dice,
                    movable,
                })
            }
        }
    }

    fn apply(
        &mut self,
        player: PlayerId,
        dice: u8,
        token: usize,
        selection: Selection,
    ) -> Result<TurnReport, RulesError> {
        let outcome = self
            .rules
            .apply_move(&mut self.state.board, player, token, dice)?;
        self.state.pending = None;
        self.enter(TurnPhase::Animating);

        self.state.record(TurnEvent::Moved {
            dice,
            selection,
            outcome: outcome.clone(),
        });
        if outcome.player_finished {
            let place = self.state.board.winners().len();
            self.state.record(TurnEvent::Finished { player, place });
        }
        self.enter(TurnPhase::TurnResolved);

        let result = self.rules.is_terminal(&self.state.board, self.config.seating());
        let mut extra_turn = false;
        let next_player = if let Some(result) = &result {
            self.state.record(TurnEvent::GameOver {
                winner: result.winner,
            });
            self.enter(TurnPhase::GameOver);
            None
        } else if !self.state.board.is_finished(player)
            && (outcome.killed() || outcome.reached_goal || dice == 6)
        {
            extra_turn = true;
            self.state.record(TurnEvent::ExtraTurn { player });
            self.enter(TurnPhase::AwaitingRoll);
            Some(player)
        } else {
            Some(self.pass_turn(player))
        };

        Ok(TurnReport {
            player,
            dice,
            selection,
            outcome,
            extra_turn,
            next_player,
            result,
        })
    }

    /// Hand the turn to the next seat whose player has not finished.
    fn pass_turn(&mut self, from: PlayerId) -> PlayerId {
        let board = &self.state.board;
        let current = self.state.current_seat();
        let seat = self
            .config
            .seating()
            .next_seat(current, |p| board.is_finished(p))
            .unwrap_or(current);
        let to = self.config.seating().player_at_wrapping(seat);

        self.state.pass_to(seat);
        self.state.record(TurnEvent::TurnPassed { from, to });
        self.enter(TurnPhase::AwaitingRoll);
        to
    }
}
