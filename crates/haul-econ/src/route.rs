//! Road distance and fuel consumption.

use crate::EconError;
use haul_core::{Geography, Location, LocationId, VehicleModel};

/// Kilometres per unit of the normalized map plane.
pub const KM_PER_UNIT: f64 = 4.0;
/// Road routing overhead over the straight line.
pub const ROAD_CURVATURE: f64 = 1.3;
/// Fuel saved per driver skill point.
pub const SKILL_FUEL_SAVING: f64 = 0.03;
/// Speed gained per driver skill point.
pub const SKILL_SPEED_BONUS: f64 = 0.02;
/// Fuel in the tank must exceed the approach need by this factor to take a job.
pub const APPROACH_FUEL_MARGIN: f64 = 1.1;

/// Estimated road distance between two locations in km.
///
/// Symmetric, and zero only for coincident locations.
pub fn distance_km(a: &Location, b: &Location) -> f64 {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    (dx * dx + dy * dy).sqrt() * KM_PER_UNIT * ROAD_CURVATURE
}

/// Road distance between two location ids.
pub fn route_km(geo: &Geography, from: &LocationId, to: &LocationId) -> Result<f64, EconError> {
    let a = geo
        .get(from)
        .ok_or_else(|| EconError::UnknownLocation(from.0.clone()))?;
    let b = geo
        .get(to)
        .ok_or_else(|| EconError::UnknownLocation(to.0.clone()))?;
    Ok(distance_km(a, b))
}

/// Fuel burnt over `km` without any driver bonus.
pub fn base_fuel(km: f64, model: &VehicleModel) -> f64 {
    km / 100.0 * model.consumption_per_100km
}

/// Fuel burnt over a leg; a seated driver saves 3% per skill point.
pub fn fuel_for_leg(km: f64, model: &VehicleModel, driver_skill: Option<f64>) -> f64 {
    let fuel = base_fuel(km, model);
    match driver_skill {
        Some(skill) => fuel * (1.0 - skill * SKILL_FUEL_SAVING),
        None => fuel,
    }
}

/// Cruise speed with the driver's skill bonus. Informational; legs always
/// complete within one day.
pub fn effective_speed(model: &VehicleModel, driver_skill: Option<f64>) -> f64 {
    model.speed_kmh * (1.0 + driver_skill.unwrap_or(0.0) * SKILL_SPEED_BONUS)
}
