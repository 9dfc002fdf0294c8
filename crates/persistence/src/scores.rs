//! Net-worth leaderboard shared by all users of a store.

use crate::store::SaveStore;
use crate::SnapshotError;
use chrono::NaiveDate;
use haul_core::Ledger;
use haul_econ::net_worth;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub const SCORES_KEY: &str = "scores";
pub const LEADERBOARD_SIZE: usize = 10;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HighScore {
    #[serde(rename = "companyName")]
    pub company: String,
    pub net_worth: Decimal,
    pub date: NaiveDate,
}

impl HighScore {
    /// Cash minus loan plus fleet value.
    pub fn of(ledger: &Ledger, date: NaiveDate) -> Self {
        Self {
            company: ledger.company.name.clone(),
            net_worth: net_worth(ledger),
            date,
        }
    }
}

/// Best scores, highest net worth first.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Leaderboard {
    entries: Vec<HighScore>,
}

impl Leaderboard {
    pub fn load<S: SaveStore + ?Sized>(store: &S) -> Result<Self, SnapshotError> {
        match store.get(SCORES_KEY)? {
            Some(body) => Ok(serde_json::from_str(&body)?),
            None => Ok(Self::default()),
        }
    }

    pub fn store<S: SaveStore + ?Sized>(&self, store: &mut S) -> Result<(), SnapshotError> {
        store.put(SCORES_KEY, serde_json::to_string(self)?)
    }

    pub fn entries(&self) -> &[HighScore] {
        &self.entries
    }

    /// Insert a score keeping order and the size cap. Returns its 0-based
    /// rank, or `None` when it did not make the board. Ties rank below
    /// earlier entries.
    pub fn record(&mut self, score: HighScore) -> Option<usize> {
        let rank = self
            .entries
            .iter()
            .position(|e| e.net_worth < score.net_worth)
            .unwrap_or(self.entries.len());
        if rank >= LEADERBOARD_SIZE {
            return None;
        }
        self.entries.insert(rank, score);
        self.entries.truncate(LEADERBOARD_SIZE);
        Some(rank)
    }
}
