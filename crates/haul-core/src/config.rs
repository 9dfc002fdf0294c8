use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Simulation configuration parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Seed for the deterministic RNG driving ticks and actions.
    pub rng_seed: u64,
    /// Seed for satellite placement on the map.
    pub map_seed: u64,
    /// Company start capital in EUR, before any loan.
    pub starting_capital: Decimal,
    /// Satellite towns generated around each hub.
    pub satellites_per_hub: usize,
    /// Jobs guaranteed at each priority location per refresh.
    pub jobs_per_priority_location: usize,
    /// Board size filler jobs top up to.
    pub job_board_ceiling: usize,
    /// Cash level below which the company is bankrupt.
    pub bankruptcy_threshold: Decimal,
    /// Newest in-game events kept in the log.
    pub event_log_cap: usize,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            rng_seed: 42,
            map_seed: 1,
            starting_capital: Decimal::from(100_000),
            satellites_per_hub: 15,
            jobs_per_priority_location: 20,
            job_board_ceiling: 1000,
            bankruptcy_threshold: Decimal::from(-50_000),
            event_log_cap: 50,
        }
    }
}
