//! Flat keyed snapshot of a ledger.

use crate::SnapshotError;
use haul_core::Ledger;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

/// Top-level keys, in write order.
pub const KEYS: [&str; 13] = [
    "day",
    "company",
    "trucks",
    "trailers",
    "drivers",
    "recruits",
    "jobs",
    "events",
    "activeJobs",
    "revenueHistory",
    "ids",
    "mapSeed",
    "gameOver",
];

/// One JSON value per ledger field.
#[derive(Clone, Debug, PartialEq)]
pub struct Snapshot {
    fields: Map<String, Value>,
}

impl Snapshot {
    pub fn capture(ledger: &Ledger) -> Result<Self, SnapshotError> {
        let mut s = Self { fields: Map::new() };
        s.put("day", &ledger.day)?;
        s.put("company", &ledger.company)?;
        s.put("trucks", &ledger.trucks)?;
        s.put("trailers", &ledger.trailers)?;
        s.put("drivers", &ledger.drivers)?;
        s.put("recruits", &ledger.recruits)?;
        s.put("jobs", &ledger.jobs)?;
        s.put("events", &ledger.events)?;
        s.put("activeJobs", &ledger.active_jobs)?;
        s.put("revenueHistory", &ledger.revenue_history)?;
        s.put("ids", &ledger.ids)?;
        s.put("mapSeed", &ledger.map_seed)?;
        s.put("gameOver", &ledger.game_over)?;
        Ok(s)
    }

    /// Rebuild the ledger. Fails on the first missing or malformed key, so a
    /// damaged snapshot never yields a half-filled ledger.
    pub fn restore(&self) -> Result<Ledger, SnapshotError> {
        Ok(Ledger {
            day: self.take("day")?,
            company: self.take("company")?,
            trucks: self.take("trucks")?,
            trailers: self.take("trailers")?,
            drivers: self.take("drivers")?,
            recruits: self.take("recruits")?,
            jobs: self.take("jobs")?,
            events: self.take("events")?,
            active_jobs: self.take("activeJobs")?,
            revenue_history: self.take("revenueHistory")?,
            ids: self.take("ids")?,
            map_seed: self.take("mapSeed")?,
            game_over: self.take("gameOver")?,
        })
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn to_json(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string(&self.fields)?)
    }

    pub fn from_json(body: &str) -> Result<Self, SnapshotError> {
        Ok(Self {
            fields: serde_json::from_str(body)?,
        })
    }

    fn put<T: Serialize>(&mut self, key: &str, value: &T) -> Result<(), SnapshotError> {
        self.fields.insert(key.to_string(), serde_json::to_value(value)?);
        Ok(())
    }

    fn take<T: DeserializeOwned>(&self, key: &'static str) -> Result<T, SnapshotError> {
        let value = self
            .fields
            .get(key)
            .ok_or(SnapshotError::MissingKey(key))?;
        Ok(T::deserialize(value)?)
    }
}
