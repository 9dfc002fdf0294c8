//! Cargo categories and job records.

use crate::ids::{JobId, LocationId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Cargo category of a job. Sixteen categories in total.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CargoType {
    General,
    Refrigerated,
    Liquid,
    Chemicals,
    Heavy,
    Machinery,
    Electronics,
    Dangerous,
    Express,
    Mail,
    Furniture,
    Tools,
    Bulk,
    Logs,
    Vehicles,
    Livestock,
}

impl CargoType {
    pub const ALL: [CargoType; 16] = [
        CargoType::General,
        CargoType::Refrigerated,
        CargoType::Liquid,
        CargoType::Chemicals,
        CargoType::Heavy,
        CargoType::Machinery,
        CargoType::Electronics,
        CargoType::Dangerous,
        CargoType::Express,
        CargoType::Mail,
        CargoType::Furniture,
        CargoType::Tools,
        CargoType::Bulk,
        CargoType::Logs,
        CargoType::Vehicles,
        CargoType::Livestock,
    ];

    pub fn label(self) -> &'static str {
        match self {
            CargoType::General => "General Freight",
            CargoType::Refrigerated => "Refrigerated Goods",
            CargoType::Liquid => "Liquids",
            CargoType::Chemicals => "Chemicals",
            CargoType::Heavy => "Heavy Load",
            CargoType::Machinery => "Construction Machinery",
            CargoType::Electronics => "Electronics",
            CargoType::Dangerous => "Dangerous Goods",
            CargoType::Express => "Express Parcels",
            CargoType::Mail => "Mail",
            CargoType::Furniture => "Furniture",
            CargoType::Tools => "Tools & Parts",
            CargoType::Bulk => "Bulk (Sand/Gravel)",
            CargoType::Logs => "Logs",
            CargoType::Vehicles => "Vehicles",
            CargoType::Livestock => "Livestock",
        }
    }
}

impl fmt::Display for CargoType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A transport order on the job board.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub id: JobId,
    /// Pick-up location.
    pub source: LocationId,
    /// Delivery location; never equal to `source`.
    pub target: LocationId,
    pub cargo: CargoType,
    /// Load in tons.
    pub weight_t: f64,
    /// Settled on delivery.
    pub payout_eur: Decimal,
    /// Road distance source→target in km, floored at generation.
    pub distance_km: u32,
    /// Days left on the board while unassigned.
    pub expires_in_days: u32,
    pub urgent: bool,
}
