//! Cargo/equipment compatibility resolver.
//!
//! Pure rules deciding whether a truck, with or without a trailer, may load a
//! cargo category and whether its combined capacity covers the weight.

use crate::catalog::{TrailerModel, TrailerType, VehicleModel};
use crate::job::CargoType;
use thiserror::Error;

/// Categories a truck with its own load body may carry without a trailer.
pub const GENERAL_CLASS_CARGO: [CargoType; 6] = [
    CargoType::General,
    CargoType::Express,
    CargoType::Mail,
    CargoType::Tools,
    CargoType::Electronics,
    CargoType::Furniture,
];

/// Cargo categories accepted by each trailer body type.
pub fn accepted_cargo(kind: TrailerType) -> &'static [CargoType] {
    use CargoType as C;
    match kind {
        TrailerType::Box => &[
            C::General,
            C::Express,
            C::Mail,
            C::Furniture,
            C::Tools,
            C::Electronics,
        ],
        TrailerType::Refrigerated => &[C::Refrigerated, C::General, C::Express],
        TrailerType::Tanker => &[C::Liquid, C::Chemicals, C::Dangerous],
        TrailerType::Flatbed => &[C::Heavy, C::Machinery, C::General, C::Logs, C::Vehicles],
        TrailerType::Lowboy => &[C::Heavy, C::Machinery, C::Vehicles],
        TrailerType::Tipper => &[C::Bulk],
        TrailerType::Logger => &[C::Logs],
        TrailerType::CarCarrier => &[C::Vehicles],
        TrailerType::Livestock => &[C::Livestock],
    }
}

/// Why a load was refused.
#[derive(Debug, Error, PartialEq)]
pub enum LoadError {
    /// Body or trailer type cannot take this cargo.
    #[error("wrong body type: {equipment} cannot carry {cargo}")]
    CargoMismatch { cargo: CargoType, equipment: String },
    /// Combined capacity is below the job weight.
    #[error("overloaded: capacity {capacity_t:.2} t, load {weight_t:.2} t")]
    Overweight { capacity_t: f64, weight_t: f64 },
}

/// A truck's current equipment: its vehicle model plus the attached trailer model.
#[derive(Clone, Copy, Debug)]
pub struct Equipment<'a> {
    pub vehicle: &'a VehicleModel,
    pub trailer: Option<&'a TrailerModel>,
}

impl<'a> Equipment<'a> {
    pub fn new(vehicle: &'a VehicleModel, trailer: Option<&'a TrailerModel>) -> Self {
        Self { vehicle, trailer }
    }

    /// Whether this setup may legally load `cargo`.
    pub fn accepts(&self, cargo: CargoType) -> bool {
        match self.trailer {
            Some(t) => accepted_cargo(t.kind).contains(&cargo),
            None if self.vehicle.body_capacity_t > 0.0 => GENERAL_CLASS_CARGO.contains(&cargo),
            None => false,
        }
    }

    /// Body capacity plus trailer capacity, in tons.
    pub fn capacity_t(&self) -> f64 {
        self.vehicle.body_capacity_t + self.trailer.map_or(0.0, |t| t.capacity_t)
    }

    pub fn fits(&self, weight_t: f64) -> bool {
        self.capacity_t() >= weight_t
    }

    /// Type check first, then weight.
    pub fn check(&self, cargo: CargoType, weight_t: f64) -> Result<(), LoadError> {
        if !self.accepts(cargo) {
            return Err(LoadError::CargoMismatch {
                cargo,
                equipment: self.describe(),
            });
        }
        if !self.fits(weight_t) {
            return Err(LoadError::Overweight {
                capacity_t: self.capacity_t(),
                weight_t,
            });
        }
        Ok(())
    }

    fn describe(&self) -> String {
        match self.trailer {
            Some(t) => format!("{} + {}", self.vehicle.name, t.name),
            None => format!("{} (no trailer)", self.vehicle.name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{trailer_model, vehicle_model, TRAILER_MODELS, VEHICLE_MODELS};
    use proptest::prelude::*;

    fn cargo() -> impl Strategy<Value = CargoType> {
        (0..CargoType::ALL.len()).prop_map(|i| CargoType::ALL[i])
    }

    #[test]
    fn bare_tractor_rejects_everything() {
        let tractor = vehicle_model("daf_xf_480").unwrap();
        let eq = Equipment::new(tractor, None);
        for c in CargoType::ALL {
            assert!(!eq.accepts(c));
            assert!(matches!(
                eq.check(c, 0.1),
                Err(LoadError::CargoMismatch { .. })
            ));
        }
    }

    #[test]
    fn van_alone_takes_general_class_only() {
        let van = vehicle_model("van_basic").unwrap();
        let eq = Equipment::new(van, None);
        let accepted: Vec<_> = CargoType::ALL.into_iter().filter(|c| eq.accepts(*c)).collect();
        assert_eq!(accepted.len(), 6);
        assert!(accepted.iter().all(|c| GENERAL_CLASS_CARGO.contains(c)));
    }

    #[test]
    fn tanker_takes_liquids_only() {
        let tractor = vehicle_model("volvo_fh_540").unwrap();
        let tanker = trailer_model("semi_tanker_chem").unwrap();
        let eq = Equipment::new(tractor, Some(tanker));
        let mut accepted: Vec<_> = CargoType::ALL.into_iter().filter(|c| eq.accepts(*c)).collect();
        accepted.sort();
        assert_eq!(
            accepted,
            vec![CargoType::Liquid, CargoType::Chemicals, CargoType::Dangerous]
        );
    }

    #[test]
    fn capacity_combines_body_and_trailer() {
        let van = vehicle_model("van_pro").unwrap();
        let box_trailer = trailer_model("trailer_box_small").unwrap();
        let eq = Equipment::new(van, Some(box_trailer));
        assert!((eq.capacity_t() - 3.0).abs() < 1e-9);
        assert!(eq.check(CargoType::Mail, 3.0).is_ok());
        assert_eq!(
            eq.check(CargoType::Mail, 3.2),
            Err(LoadError::Overweight {
                capacity_t: eq.capacity_t(),
                weight_t: 3.2
            })
        );
    }

    proptest! {
        #[test]
        fn trailer_setup_follows_matrix(
            v in 0..VEHICLE_MODELS.len(),
            t in 0..TRAILER_MODELS.len(),
            c in cargo(),
        ) {
            let trl = &TRAILER_MODELS[t];
            let eq = Equipment::new(&VEHICLE_MODELS[v], Some(trl));
            prop_assert_eq!(eq.accepts(c), accepted_cargo(trl.kind).contains(&c));
        }

        #[test]
        fn accepted_light_load_within_body_passes(c in cargo(), w in 0.01f64..0.4) {
            let car = vehicle_model("car_combi").unwrap();
            let eq = Equipment::new(car, None);
            prop_assert_eq!(eq.check(c, w).is_ok(), GENERAL_CLASS_CARGO.contains(&c));
        }
    }
}
