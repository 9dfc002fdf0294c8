//! Mutable fleet records: trucks, trailers and drivers.

use crate::catalog::{trailer_model, vehicle_model, TrailerModel, VehicleModel};
use crate::ids::{DriverId, JobId, LocationId, TrailerId, TruckId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Operating state of a truck.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TruckStatus {
    Idle,
    /// On a leg towards `destination`.
    Moving,
    /// Reserved save-format state. Nothing enters it; a restored truck in
    /// maintenance is kept as is and refuses jobs until set idle.
    Maintenance,
    /// Needs a repair before it may drive again.
    Broken,
}

/// An owned truck.
///
/// Invariants: `status == Moving` iff `destination.is_some()`;
/// `fuel` lies in `[0, max_fuel]`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Truck {
    pub id: TruckId,
    /// Catalog vehicle model id.
    pub model_id: String,
    pub mileage_km: f64,
    /// Condition in [0, 100]; decays with distance.
    pub condition: f64,
    pub status: TruckStatus,
    pub location: LocationId,
    pub destination: Option<LocationId>,
    pub fuel: f64,
    pub max_fuel: f64,
    /// Attached trailer, if any.
    pub trailer: Option<TrailerId>,
    /// Job currently being executed.
    pub job: Option<JobId>,
    pub driver: Option<DriverId>,
    pub bought_price_eur: Decimal,
    /// Resale basis.
    pub value_eur: Decimal,
}

impl Truck {
    pub fn model(&self) -> Option<&'static VehicleModel> {
        vehicle_model(&self.model_id)
    }

    pub fn is_moving(&self) -> bool {
        self.status == TruckStatus::Moving
    }
}

/// An owned trailer. While attached it shares its truck's location.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Trailer {
    pub id: TrailerId,
    /// Catalog trailer model id.
    pub model_id: String,
    pub condition: f64,
    pub location: LocationId,
    pub attached_to: Option<TruckId>,
    pub value_eur: Decimal,
}

impl Trailer {
    pub fn model(&self) -> Option<&'static TrailerModel> {
        trailer_model(&self.model_id)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DriverStatus {
    Idle,
    Driving,
    /// Reserved save-format state, carried through restore unchanged.
    Resting,
}

/// An employed driver or a candidate in the recruit pool.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Driver {
    pub id: DriverId,
    pub name: String,
    /// Paid every day.
    pub salary_eur: Decimal,
    /// Skill in [0, 10]; lowers fuel use.
    pub skill: f64,
    pub status: DriverStatus,
    pub truck: Option<TruckId>,
    /// Day the driver leaves. Once set it is never cleared.
    pub firing_day: Option<u32>,
}

/// Highest driver skill.
pub const MAX_SKILL: f64 = 10.0;
