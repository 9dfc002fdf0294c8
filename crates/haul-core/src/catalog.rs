//! Fixed catalog of purchasable vehicles, trailers and loan offers.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Vehicle body class.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VehicleClass {
    /// Passenger car, SUV or pick-up with a small load area.
    LightCar,
    /// Sprinter-class van.
    Van,
    /// Semi tractor; carries nothing without a trailer.
    TractorUnit,
    /// Heavy-haul tractor.
    HeavyDuty,
    /// Battery-electric tractor.
    Electric,
}

impl VehicleClass {
    /// Trailer weight class this vehicle is able to pull.
    pub fn tows(self) -> WeightClass {
        match self {
            VehicleClass::LightCar | VehicleClass::Van => WeightClass::Light,
            VehicleClass::TractorUnit | VehicleClass::HeavyDuty | VehicleClass::Electric => {
                WeightClass::Heavy
            }
        }
    }
}

/// Trailer weight class.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeightClass {
    /// Car/van towable.
    Light,
    /// Semi-trailer for tractor units.
    Heavy,
}

/// Trailer body type; decides which cargo a trailer accepts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrailerType {
    Box,
    Refrigerated,
    Tanker,
    Flatbed,
    Lowboy,
    Tipper,
    Logger,
    CarCarrier,
    Livestock,
}

/// A purchasable vehicle model.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct VehicleModel {
    pub id: &'static str,
    pub name: &'static str,
    pub class: VehicleClass,
    /// List price when new, in EUR.
    pub price_eur: u32,
    /// Fuel (litres) or energy (kWh) per 100 km.
    pub consumption_per_100km: f64,
    /// Cruise speed in km/h.
    pub speed_kmh: f64,
    /// Reliability in [0, 1]; informational.
    pub reliability: f64,
    pub electric: bool,
    /// Engine power in hp; cosmetic.
    pub engine_hp: u32,
    /// Load the body carries without a trailer, in tons.
    pub body_capacity_t: f64,
}

impl VehicleModel {
    pub fn price(&self) -> Decimal {
        Decimal::from(self.price_eur)
    }
}

/// A purchasable trailer model.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TrailerModel {
    pub id: &'static str,
    pub name: &'static str,
    pub price_eur: u32,
    /// Payload in tons.
    pub capacity_t: f64,
    pub weight_class: WeightClass,
    pub kind: TrailerType,
}

impl TrailerModel {
    pub fn price(&self) -> Decimal {
        Decimal::from(self.price_eur)
    }
}

/// Start-up financing option offered when founding a company.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LoanOffer {
    pub id: &'static str,
    pub name: &'static str,
    pub amount_eur: u32,
    /// Annual interest in basis points.
    pub rate_bp: u32,
}

impl LoanOffer {
    pub fn amount(&self) -> Decimal {
        Decimal::from(self.amount_eur)
    }

    /// Annual rate as a fraction, e.g. 0.05.
    pub fn rate(&self) -> Decimal {
        Decimal::new(i64::from(self.rate_bp), 4)
    }
}

#[allow(clippy::too_many_arguments)]
const fn vehicle(
    id: &'static str,
    name: &'static str,
    class: VehicleClass,
    price_eur: u32,
    consumption_per_100km: f64,
    speed_kmh: f64,
    reliability: f64,
    engine_hp: u32,
    body_capacity_t: f64,
) -> VehicleModel {
    VehicleModel {
        id,
        name,
        class,
        price_eur,
        consumption_per_100km,
        speed_kmh,
        reliability,
        electric: matches!(class, VehicleClass::Electric),
        engine_hp,
        body_capacity_t,
    }
}

const fn trailer(
    id: &'static str,
    name: &'static str,
    price_eur: u32,
    capacity_t: f64,
    weight_class: WeightClass,
    kind: TrailerType,
) -> TrailerModel {
    TrailerModel {
        id,
        name,
        price_eur,
        capacity_t,
        weight_class,
        kind,
    }
}

use TrailerType as T;
use VehicleClass as V;
use WeightClass as W;

#[rustfmt::skip]
pub static VEHICLE_MODELS: [VehicleModel; 17] = [
    vehicle("car_combi", "Family Combi Diesel", V::LightCar,
        45_000, 7.0, 100.0, 0.96, 150, 0.4),
    vehicle("car_suv", "Allroad SUV V6", V::LightCar,
        75_000, 12.0, 100.0, 0.95, 280, 0.6),
    vehicle("car_pickup", "Ranger Pick-Up 4x4", V::LightCar,
        60_000, 11.0, 100.0, 0.93, 240, 0.9),
    vehicle("van_basic", "City Van 3.0t", V::Van,
        35_000, 9.0, 120.0, 0.94, 140, 1.2),
    vehicle("van_pro", "Express Maxi 3.5t", V::Van,
        48_000, 11.0, 120.0, 0.96, 190, 1.5),
    vehicle("van_box", "Cargo Box 5.0t", V::Van,
        55_000, 14.0, 110.0, 0.95, 180, 2.5),
    vehicle("daf_xf_480", "Dutch X-Series 480", V::TractorUnit,
        105_000, 28.0, 85.0, 0.95, 480, 0.0),
    vehicle("iveco_sway", "Torino S-Class 510", V::TractorUnit,
        108_000, 29.0, 85.0, 0.93, 510, 0.0),
    vehicle("renault_t", "Gaul T-Range 520", V::TractorUnit,
        112_000, 28.5, 85.0, 0.94, 520, 0.0),
    vehicle("man_tgx", "Bavaria TG-X 500", V::TractorUnit,
        125_000, 27.0, 85.0, 0.97, 500, 0.0),
    vehicle("actros_1851", "Stellar Prime 1851", V::TractorUnit,
        135_000, 26.0, 85.0, 0.98, 510, 0.0),
    vehicle("scania_r500", "Griffin R-Series 500", V::TractorUnit,
        145_000, 25.0, 85.0, 0.99, 500, 0.0),
    vehicle("volvo_fh_540", "Viking FH 540", V::TractorUnit,
        148_000, 24.5, 85.0, 0.99, 540, 0.0),
    vehicle("scania_v8_770", "Griffin King V8", V::HeavyDuty,
        210_000, 35.0, 85.0, 0.99, 770, 0.0),
    vehicle("volvo_fh16_750", "Viking 16-Liter 750", V::HeavyDuty,
        205_000, 36.0, 85.0, 0.98, 750, 0.0),
    vehicle("etruck_city", "Stellar E-Charged 300", V::Electric,
        190_000, 100.0, 85.0, 0.95, 400, 0.0),
    vehicle("tesla_semi", "Cyber Hauler Long Range", V::Electric,
        250_000, 120.0, 90.0, 0.92, 1020, 0.0),
];

#[rustfmt::skip]
pub static TRAILER_MODELS: [TrailerModel; 17] = [
    trailer("trailer_utility", "Utility Trailer 750kg", 1_500, 0.75, W::Light, T::Box),
    trailer("trailer_box_small", "Box Trailer 1.5t", 3_500, 1.5, W::Light, T::Box),
    trailer("trailer_flatbed", "Flatbed Trailer 2.0t", 4_200, 2.0, W::Light, T::Flatbed),
    trailer("trailer_car_trans", "Car Transporter 2.5t", 5_500, 2.5, W::Light, T::CarCarrier),
    trailer("trailer_horse", "Horse Trailer 2.0t", 6_000, 2.0, W::Light, T::Livestock),
    trailer("trailer_large_box", "Maxi Box 3.5t", 7_500, 3.5, W::Light, T::Box),
    trailer("semi_curtain", "Curtainsider Standard", 28_000, 25.0, W::Heavy, T::Box),
    trailer("semi_box", "Dry Box Semi", 32_000, 24.0, W::Heavy, T::Box),
    trailer("semi_fridge", "Reefer Semi", 55_000, 23.0, W::Heavy, T::Refrigerated),
    trailer("semi_tanker_food", "Food-Grade Tanker", 60_000, 28.0, W::Heavy, T::Tanker),
    trailer("semi_tanker_chem", "Chemical/ADR Tanker", 85_000, 26.0, W::Heavy, T::Tanker),
    trailer("semi_tipper_steel", "Steel Tipper", 42_000, 28.0, W::Heavy, T::Tipper),
    trailer("semi_logger", "Timber Trailer", 38_000, 30.0, W::Heavy, T::Logger),
    trailer("semi_lowboy", "Lowboy (3-Axle)", 65_000, 35.0, W::Heavy, T::Lowboy),
    trailer("semi_flatbed", "Flatbed Semi", 30_000, 26.0, W::Heavy, T::Flatbed),
    trailer("semi_car_trans", "Car Carrier Semi", 70_000, 18.0, W::Heavy, T::CarCarrier),
    trailer("semi_livestock", "Livestock Semi", 68_000, 22.0, W::Heavy, T::Livestock),
];

pub static LOAN_OFFERS: [LoanOffer; 4] = [
    LoanOffer {
        id: "loan_small",
        name: "Start-up Aid",
        amount_eur: 100_000,
        rate_bp: 300,
    },
    LoanOffer {
        id: "loan_medium",
        name: "Investment Loan",
        amount_eur: 250_000,
        rate_bp: 500,
    },
    LoanOffer {
        id: "loan_large",
        name: "Major Loan",
        amount_eur: 500_000,
        rate_bp: 800,
    },
    LoanOffer {
        id: "loan_none",
        name: "Self-financed",
        amount_eur: 0,
        rate_bp: 0,
    },
];

pub static DRIVER_NAMES: [&str; 30] = [
    "Müller", "Schmidt", "Schneider", "Fischer", "Weber", "Meyer", "Wagner", "Becker", "Schulz",
    "Hoffmann", "Kowalski", "Novak", "Rossi", "Dupont", "Smith", "Ivanov", "Garcia", "Andersson",
    "Jansen", "Lefevre", "Dubois", "Silva", "Santos", "Popov", "Petrov", "Nielsen", "Hansen",
    "Larsen", "Gruber", "Bauer",
];

/// Diesel price per litre, in cents.
pub const DIESEL_PRICE_CENTS: u32 = 165;
/// Electricity price per kWh-equivalent, in cents.
pub const ELECTRIC_PRICE_CENTS: u32 = 45;

pub fn vehicle_model(id: &str) -> Option<&'static VehicleModel> {
    VEHICLE_MODELS.iter().find(|m| m.id == id)
}

pub fn trailer_model(id: &str) -> Option<&'static TrailerModel> {
    TRAILER_MODELS.iter().find(|m| m.id == id)
}
