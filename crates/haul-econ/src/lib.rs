#![deny(warnings)]
//! Economic models for Euro Haul: road distance, fuel, money formulas and
//! the generators for the job board and the recruit pool.

pub mod jobs;
pub mod pricing;
pub mod recruits;
pub mod route;

use thiserror::Error;

pub use jobs::{generate_board, generate_job, BoardSpec};
pub use pricing::net_worth;
pub use recruits::generate_recruits;
pub use route::{distance_km, fuel_for_leg, route_km};

/// Errors produced by economic helpers.
#[derive(Debug, Error, PartialEq)]
pub enum EconError {
    /// Location id missing from the geography table.
    #[error("unknown location: {0}")]
    UnknownLocation(String),
}
