//! Save, resume and snapshot behavior.

use ludo_core::core::{GameConfig, GameState, PlayerId, RulesError};
use ludo_core::game::{GameSession, RollOutcome};
use ludo_core::persist::{FileStore, MemoryStore, PersistError, SaveStore, SavedGame};
use ludo_core::rules::TurnResolver;

fn advance(session: &mut GameSession, rolls: usize) {
    for _ in 0..rolls {
        if session.is_over() {
            break;
        }
        if let RollOutcome::AwaitingSelection { movable, .. } = session.roll().unwrap() {
            session.select_token(movable[0]).unwrap();
        }
    }
}

#[test]
fn test_autosave_then_resume() {
    let mut store = MemoryStore::new();
    let config = GameConfig::new(3).unwrap().with_seed(8).with_vs_computer(true);
    let mut session = GameSession::new(config.clone()).unwrap();
    advance(&mut session, 40);
    session.autosave(&mut store).unwrap();

    let resumed = GameSession::resume(&store, GameConfig::new(4).unwrap()).unwrap();
    assert_eq!(resumed.config().player_count(), 3);
    assert!(resumed.config().vs_computer);
    assert_eq!(resumed.board(), session.board());
    assert_eq!(resumed.current_seat(), session.current_seat());
    assert_eq!(resumed.winners(), session.winners());
}

#[test]
fn test_resume_empty_slot_starts_fresh() {
    let store = MemoryStore::new();
    let fallback = GameConfig::new(2).unwrap().with_seed(4);
    let session = GameSession::resume(&store, fallback).unwrap();
    assert_eq!(session.config().player_count(), 2);
    assert!(session.history().is_empty());
    for player in PlayerId::all() {
        assert!(session.board().all_home(player));
    }
}

#[test]
fn test_resume_rejects_impossible_save() {
    let mut store = MemoryStore::new();
    let saved = SavedGame {
        has_saved_game: true,
        total_players: 2,
        current_player: 1,
        yellow_tokens: [10, 57, -1, -1],
        ..SavedGame::default()
    };
    store.store(&saved).unwrap();
    assert!(matches!(
        GameSession::restore(&saved, 0),
        Err(PersistError::Rules(_))
    ));

    // Falls back instead of failing
    let fallback = GameConfig::new(4).unwrap();
    let session = GameSession::resume(&store, fallback).unwrap();
    assert_eq!(session.config().player_count(), 4);
}

#[test]
fn test_resume_rejects_unseated_color_on_board() {
    let mut store = MemoryStore::new();
    // Red has no seat in a two-player game but sits on Yellow's path
    let saved = SavedGame {
        has_saved_game: true,
        total_players: 2,
        current_player: 1,
        red_tokens: [5, -1, -1, -1],
        yellow_tokens: [17, -1, -1, -1],
        ..SavedGame::default()
    };
    store.store(&saved).unwrap();
    assert!(matches!(
        GameSession::restore(&saved, 0),
        Err(PersistError::Rules(RulesError::InactivePlayer(PlayerId::RED)))
    ));

    let fallback = GameConfig::new(2).unwrap().with_seed(9);
    let session = GameSession::resume(&store, fallback).unwrap();
    assert!(session.board().all_home(PlayerId::RED));
    assert!(session.board().all_home(PlayerId::YELLOW));
    assert!(session.history().is_empty());
}

#[test]
fn test_snapshot_for_other_player_count_rejected() {
    let config = GameConfig::new(4).unwrap().with_starting_seat(1);
    let mut session = GameSession::new(config).unwrap();
    session.play_roll(6).unwrap();
    assert_eq!(session.board().tokens_of(PlayerId::RED), &[0, -1, -1, -1]);

    let bytes = session.state().to_snapshot().unwrap();
    let state = GameState::from_snapshot(&bytes).unwrap();
    assert_eq!(state.player_count(), 4);
    assert!(matches!(
        GameSession::from_state(GameConfig::new(2).unwrap(), TurnResolver::new(), state.clone()),
        Err(PersistError::Invalid(_))
    ));

    let resumed = GameSession::from_state(GameConfig::new(4).unwrap(), TurnResolver::new(), state).unwrap();
    assert_eq!(resumed.current_player(), PlayerId::RED);
    assert_eq!(resumed.board(), session.board());
}

#[test]
fn test_restore_rejects_finished_game() {
    let saved = SavedGame {
        has_saved_game: true,
        total_players: 2,
        current_player: 2,
        yellow_tokens: [56; 4],
        winners: vec![3],
        ..SavedGame::default()
    };
    assert!(matches!(
        GameSession::restore(&saved, 0),
        Err(PersistError::Invalid(_))
    ));
}

#[test]
fn test_restore_rejects_turn_held_by_finisher() {
    let saved = SavedGame {
        has_saved_game: true,
        total_players: 3,
        current_player: 1,
        red_tokens: [56; 4],
        winners: vec![1],
        ..SavedGame::default()
    };
    assert!(GameSession::restore(&saved, 0).is_err());

    let saved = SavedGame {
        current_player: 2,
        ..saved
    };
    let session = GameSession::restore(&saved, 0).unwrap();
    assert_eq!(session.current_player(), PlayerId::GREEN);
    assert_eq!(session.winners(), &[PlayerId::RED]);
}

#[test]
fn test_restore_rejects_empty_slot_marker() {
    let saved = SavedGame::default();
    assert!(matches!(
        GameSession::restore(&saved, 0),
        Err(PersistError::Invalid(_))
    ));
}

#[test]
fn test_saved_json_shape() {
    let config = GameConfig::new(2).unwrap().with_starting_seat(1);
    let mut session = GameSession::new(config).unwrap();
    session.play_roll(6).unwrap();

    let json = session.save().to_json().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["hasSavedGame"], true);
    assert_eq!(value["totalPlayers"], 2);
    assert_eq!(value["currentPlayer"], 1);
    assert_eq!(value["yellowTokens"], serde_json::json!([0, -1, -1, -1]));
    assert_eq!(value["redTokens"], serde_json::json!([-1, -1, -1, -1]));
    assert_eq!(value["winners"], serde_json::json!([]));
}

#[test]
fn test_file_store_resume() {
    let path = std::env::temp_dir().join(format!("ludo-core-resume-{}.json", std::process::id()));
    let mut store = FileStore::new(&path);

    let config = GameConfig::new(4).unwrap().with_seed(21);
    let mut session = GameSession::new(config).unwrap();
    advance(&mut session, 30);
    session.autosave(&mut store).unwrap();

    let resumed = GameSession::resume(&store, GameConfig::new(2).unwrap()).unwrap();
    assert_eq!(resumed.board(), session.board());

    store.clear().unwrap();
    assert!(store.load().unwrap().is_none());
}

#[test]
fn test_snapshot_rejects_truncated_bytes() {
    let config = GameConfig::new(2).unwrap().with_seed(3);
    let mut session = GameSession::new(config).unwrap();
    advance(&mut session, 10);

    let bytes = session.state().to_snapshot().unwrap();
    assert!(matches!(
        GameState::from_snapshot(&bytes[..bytes.len() / 2]),
        Err(PersistError::Snapshot(_))
    ));
}
