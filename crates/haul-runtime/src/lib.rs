#![deny(warnings)]
//! Simulation runtime for Euro Haul.
//!
//! [`Simulation`] owns one game session: the ledger, the map it was founded
//! on, the configuration and a seeded RNG. Player actions and the daily tick
//! are the only ways the ledger changes.

pub mod actions;
pub mod config;
pub mod events;
pub mod new_game;
pub mod tick;

use haul_core::{validate_ledger, Geography, Ledger, Severity, SimConfig, ValidationError};
use haul_econ::BoardSpec;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

pub use actions::ActionError;
pub use config::{load_config, parse_config, ConfigError};
pub use haul_econ::pricing::TruckOffer;
pub use tick::{advance_day, TickError, TickReport};

/// One running game session.
pub struct Simulation {
    ledger: Ledger,
    geo: Geography,
    cfg: SimConfig,
    rng: ChaCha8Rng,
}

impl Simulation {
    /// Wrap an existing ledger. The RNG stream depends on the seed and the
    /// ledger's day so a resumed game does not replay earlier draws.
    pub fn from_parts(ledger: Ledger, geo: Geography, cfg: SimConfig) -> Self {
        let rng = ChaCha8Rng::seed_from_u64(cfg.rng_seed.wrapping_add(u64::from(ledger.day)));
        Self {
            ledger,
            geo,
            cfg,
            rng,
        }
    }

    /// Resume a saved ledger: rebuild its map and check every invariant.
    pub fn resume(ledger: Ledger, cfg: SimConfig) -> Result<Self, ValidationError> {
        let geo = Geography::generate(ledger.map_seed, cfg.satellites_per_hub);
        validate_ledger(&ledger, &geo)?;
        Ok(Self::from_parts(ledger, geo, cfg))
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn geography(&self) -> &Geography {
        &self.geo
    }

    pub fn config(&self) -> &SimConfig {
        &self.cfg
    }

    pub fn into_ledger(self) -> Ledger {
        self.ledger
    }

    pub fn is_game_over(&self) -> bool {
        self.ledger.game_over
    }

    /// Run one daily tick.
    pub fn advance_day(&mut self) -> Result<TickReport, TickError> {
        tick::advance_day(&mut self.ledger, &self.geo, &self.cfg, &mut self.rng)
    }

    pub(crate) fn board_spec(cfg: &SimConfig) -> BoardSpec {
        BoardSpec {
            per_priority_location: cfg.jobs_per_priority_location,
            ceiling: cfg.job_board_ceiling,
        }
    }

    fn notify(&mut self, title: &str, message: String, severity: Severity) {
        self.ledger
            .log_event(title, message, severity, self.cfg.event_log_cap);
    }
}

#[cfg(test)]
pub(crate) mod testkit {
    use super::*;
    use haul_core::{CargoType, Job, JobId, Location, LocationId};
    use haul_econ::distance_km;

    fn place(id: &str, name: &str, x: f64, y: f64, is_hub: bool) -> Location {
        Location {
            id: LocationId::new(id),
            name: name.to_string(),
            x,
            y,
            is_hub,
            country: "DE".to_string(),
        }
    }

    /// hub-0 → hub-1 is 400 km, hub-0 → hub-2 is 52 km.
    pub(crate) fn geo() -> Geography {
        Geography::from_locations(vec![
            place("hub-0", "Berlin", 0.0, 0.0, true),
            place("hub-1", "Hamburg", 400.0 / 5.2, 0.0, true),
            place("hub-2", "Potsdam", 0.0, 10.0, true),
            place("city-x", "Far Away", 900.0, 900.0, false),
        ])
    }

    pub(crate) fn cfg(capital: i64) -> SimConfig {
        SimConfig {
            starting_capital: rust_decimal::Decimal::from(capital),
            job_board_ceiling: 60,
            ..SimConfig::default()
        }
    }

    pub(crate) fn sim_with_capital(capital: i64) -> Simulation {
        Simulation::new_game_on(geo(), cfg(capital), "TestHaul", &LocationId::new("hub-0"), 3)
            .unwrap()
    }

    pub(crate) fn sim() -> Simulation {
        sim_with_capital(100_000)
    }

    /// Post a hand-made job paying 1000 EUR.
    pub(crate) fn job(
        s: &mut Simulation,
        from: &str,
        to: &str,
        cargo: CargoType,
        weight_t: f64,
    ) -> JobId {
        let (source, target) = (LocationId::new(from), LocationId::new(to));
        let km = distance_km(s.geo.get(&source).unwrap(), s.geo.get(&target).unwrap());
        let id = s.ledger.ids.job(s.ledger.day);
        s.ledger.jobs.push(Job {
            id: id.clone(),
            source,
            target,
            cargo,
            weight_t,
            payout_eur: rust_decimal::Decimal::from(1_000),
            distance_km: km.floor() as u32,
            expires_in_days: 5,
            urgent: false,
        });
        id
    }
}
