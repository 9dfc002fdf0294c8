#![deny(warnings)]
//! Core domain models and invariants for the Euro Haul trucking simulation.
//!
//! This crate defines the serializable types shared by every other crate:
//! the geography table, the vehicle/trailer catalog, the cargo compatibility
//! resolver and the company ledger with its cross-reference mutators.

pub mod catalog;
pub mod compat;
pub mod config;
pub mod fleet;
pub mod geography;
pub mod ids;
pub mod job;
pub mod ledger;
pub mod validate;

pub use catalog::{
    trailer_model, vehicle_model, LoanOffer, TrailerModel, TrailerType, VehicleClass,
    VehicleModel, WeightClass, DRIVER_NAMES, LOAN_OFFERS, TRAILER_MODELS, VEHICLE_MODELS,
};
pub use compat::{Equipment, LoadError, GENERAL_CLASS_CARGO};
pub use config::SimConfig;
pub use fleet::{Driver, DriverStatus, Trailer, Truck, TruckStatus};
pub use geography::{Geography, Location};
pub use ids::{DriverId, IdAllocator, JobId, LocationId, TrailerId, TruckId};
pub use job::{CargoType, Job};
pub use ledger::{Company, GameEvent, Ledger, RevenuePoint, Severity};
pub use validate::{validate_ledger, ValidationError};
