#![deny(warnings)]
//! Save games and the leaderboard.
//!
//! A ledger is stored as a flat keyed JSON record under `gameState_<user>`
//! in a [`SaveStore`]. Saving also files the company's net worth into the
//! shared `scores` leaderboard.

pub mod scores;
pub mod snapshot;
pub mod store;

use chrono::NaiveDate;
use haul_core::Ledger;
use std::io;
use thiserror::Error;
use tracing::{info, warn};

pub use scores::{HighScore, Leaderboard, LEADERBOARD_SIZE, SCORES_KEY};
pub use snapshot::Snapshot;
pub use store::{DirStore, MemoryStore, SaveStore};

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("io: {0}")]
    Io(String),
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("snapshot is missing key `{0}`")]
    MissingKey(&'static str),
    #[error("invalid store key `{0}`")]
    InvalidKey(String),
    #[error("user name must not be empty")]
    EmptyUser,
    /// The game itself was written; only the leaderboard update failed.
    #[error("game saved but score not recorded: {0}")]
    ScoreNotRecorded(#[source] Box<SnapshotError>),
}

impl From<io::Error> for SnapshotError {
    fn from(e: io::Error) -> Self {
        SnapshotError::Io(e.to_string())
    }
}

/// Store key of a user's saved game.
pub fn game_key(user: &str) -> String {
    format!("gameState_{user}")
}

/// Persist `ledger` for `user` and record its score dated `date`.
///
/// The game is written first. A leaderboard failure after that returns
/// [`SnapshotError::ScoreNotRecorded`] and leaves the save loadable.
pub fn save_game<S: SaveStore + ?Sized>(
    store: &mut S,
    user: &str,
    ledger: &Ledger,
    date: NaiveDate,
) -> Result<(), SnapshotError> {
    if user.trim().is_empty() {
        return Err(SnapshotError::EmptyUser);
    }
    let body = Snapshot::capture(ledger)?.to_json()?;
    store.put(&game_key(user), body)?;

    let rank = record_score(store, ledger, date).map_err(|e| {
        warn!(user, error = %e, "game saved, score not recorded");
        SnapshotError::ScoreNotRecorded(Box::new(e))
    })?;
    info!(user, day = ledger.day, rank = ?rank, "game saved");
    Ok(())
}

fn record_score<S: SaveStore + ?Sized>(
    store: &mut S,
    ledger: &Ledger,
    date: NaiveDate,
) -> Result<Option<usize>, SnapshotError> {
    let mut board = Leaderboard::load(store)?;
    let rank = board.record(HighScore::of(ledger, date));
    board.store(store)?;
    Ok(rank)
}

/// Load a user's saved game. `Ok(None)` when nothing was saved.
pub fn load_game<S: SaveStore + ?Sized>(
    store: &S,
    user: &str,
) -> Result<Option<Ledger>, SnapshotError> {
    let Some(body) = store.get(&game_key(user))? else {
        return Ok(None);
    };
    let ledger = Snapshot::from_json(&body)?.restore()?;
    info!(user, day = ledger.day, "game loaded");
    Ok(Some(ledger))
}

/// Delete a user's saved game; scores stay. Returns whether a save existed.
pub fn delete_game<S: SaveStore + ?Sized>(
    store: &mut S,
    user: &str,
) -> Result<bool, SnapshotError> {
    store.remove(&game_key(user))
}

#[cfg(test)]
mod tests {
    use super::*;
    use haul_core::{LocationId, SimConfig};
    use haul_runtime::{Simulation, TruckOffer};
    use rust_decimal::Decimal;

    fn played_game(name: &str) -> Ledger {
        let cfg = SimConfig {
            satellites_per_hub: 2,
            job_board_ceiling: 50,
            ..SimConfig::default()
        };
        let mut sim = Simulation::new_game(cfg, name, &LocationId::new("hub-0"), 1).unwrap();
        let truck = sim.buy_truck("van_basic", TruckOffer::New, None).unwrap();
        let recruit = sim.ledger().recruits[0].id.clone();
        let driver = sim.hire_driver(&recruit).unwrap();
        sim.assign_driver(&driver, Some(&truck)).unwrap();
        for _ in 0..3 {
            sim.advance_day().unwrap();
        }
        sim.into_ledger()
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
    }

    #[test]
    fn save_then_load_restores_everything() {
        let ledger = played_game("Roundtrip");
        let mut store = MemoryStore::default();
        save_game(&mut store, "anna", &ledger, date()).unwrap();
        let loaded = load_game(&store, "anna").unwrap().unwrap();
        assert_eq!(loaded, ledger);
        assert_eq!(loaded.day, 4);
    }

    #[test]
    fn missing_save_is_none() {
        let store = MemoryStore::default();
        assert!(load_game(&store, "nobody").unwrap().is_none());
    }

    #[test]
    fn saving_records_a_score() {
        let ledger = played_game("Scorer");
        let mut store = MemoryStore::default();
        save_game(&mut store, "anna", &ledger, date()).unwrap();
        let board = Leaderboard::load(&store).unwrap();
        assert_eq!(board.entries().len(), 1);
        let top = &board.entries()[0];
        assert_eq!(top.company, "Scorer");
        assert_eq!(top.net_worth, haul_econ::net_worth(&ledger));
        assert!(top.net_worth > Decimal::ZERO);
    }

    #[test]
    fn corrupt_save_is_an_error_not_a_partial_load() {
        let mut store = MemoryStore::default();
        store.put(&game_key("anna"), r#"{"day": 3}"#.to_string()).unwrap();
        assert!(matches!(
            load_game(&store, "anna"),
            Err(SnapshotError::MissingKey(_))
        ));
    }

    #[test]
    fn empty_user_is_rejected() {
        let ledger = played_game("Nameless");
        let mut store = MemoryStore::default();
        assert!(matches!(
            save_game(&mut store, "  ", &ledger, date()),
            Err(SnapshotError::EmptyUser)
        ));
    }

    #[test]
    fn delete_removes_only_the_save() {
        let ledger = played_game("Gone");
        let mut store = MemoryStore::default();
        save_game(&mut store, "anna", &ledger, date()).unwrap();
        assert!(delete_game(&mut store, "anna").unwrap());
        assert!(!delete_game(&mut store, "anna").unwrap());
        assert!(load_game(&store, "anna").unwrap().is_none());
        assert_eq!(Leaderboard::load(&store).unwrap().entries().len(), 1);
    }

    /// Accepts every write except the leaderboard.
    #[derive(Default)]
    struct ScoresDown(MemoryStore);

    impl SaveStore for ScoresDown {
        fn get(&self, key: &str) -> Result<Option<String>, SnapshotError> {
            self.0.get(key)
        }

        fn put(&mut self, key: &str, value: String) -> Result<(), SnapshotError> {
            if key == SCORES_KEY {
                return Err(SnapshotError::Io("disk full".to_string()));
            }
            self.0.put(key, value)
        }

        fn remove(&mut self, key: &str) -> Result<bool, SnapshotError> {
            self.0.remove(key)
        }
    }

    #[test]
    fn failed_score_write_is_reported_and_save_survives() {
        let ledger = played_game("HalfSaved");
        let mut store = ScoresDown::default();
        let err = save_game(&mut store, "anna", &ledger, date()).unwrap_err();
        match &err {
            SnapshotError::ScoreNotRecorded(inner) => {
                assert!(matches!(**inner, SnapshotError::Io(_)));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(err.to_string().starts_with("game saved but score not recorded"));
        assert_eq!(load_game(&store, "anna").unwrap(), Some(ledger));
        assert!(Leaderboard::load(&store).unwrap().entries().is_empty());
    }
}
