//! Cross-record invariant checks for a ledger.

use crate::fleet::{TruckStatus, MAX_SKILL};
use crate::geography::Geography;
use crate::ledger::Ledger;
use rust_decimal::Decimal;
use thiserror::Error;

/// Validation errors for ledger invariants.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    /// A record points at a location missing from the map.
    #[error("unknown location: {0}")]
    UnknownLocation(String),
    /// Truck or trailer references a model not in the catalog.
    #[error("unknown catalog model: {0}")]
    UnknownModel(String),
    /// `Moving` status and destination disagree.
    #[error("truck {0}: moving status and destination disagree")]
    MovingWithoutDestination(String),
    /// Fuel outside [0, max].
    #[error("truck {0}: fuel out of range")]
    FuelOutOfRange(String),
    /// Condition outside [0, 100].
    #[error("{0}: condition out of range")]
    ConditionOutOfRange(String),
    /// Truck and trailer disagree about their coupling or location.
    #[error("trailer {0}: coupling is inconsistent")]
    TrailerLink(String),
    /// Truck and driver disagree about their seat.
    #[error("driver {0}: truck assignment is inconsistent")]
    DriverLink(String),
    /// Skill outside [0, 10].
    #[error("driver {0}: skill out of range")]
    SkillOutOfRange(String),
    /// Active-job entry without a job on the board or a matching truck.
    #[error("active job {0} is dangling")]
    DanglingJob(String),
    /// Negative loan principal.
    #[error("negative monetary value is invalid")]
    NegativeMoney,
}

/// Validate every cross-reference and range invariant of the ledger.
pub fn validate_ledger(ledger: &Ledger, geo: &Geography) -> Result<(), ValidationError> {
    if ledger.company.loan_eur < Decimal::ZERO {
        return Err(ValidationError::NegativeMoney);
    }
    for g in ledger.company.garages.iter().chain([&ledger.company.hq]) {
        if !geo.contains(g) {
            return Err(ValidationError::UnknownLocation(g.0.clone()));
        }
    }

    for t in &ledger.trucks {
        let id = t.id.0.clone();
        if t.model().is_none() {
            return Err(ValidationError::UnknownModel(t.model_id.clone()));
        }
        if !geo.contains(&t.location) {
            return Err(ValidationError::UnknownLocation(t.location.0.clone()));
        }
        if (t.status == TruckStatus::Moving) != t.destination.is_some() {
            return Err(ValidationError::MovingWithoutDestination(id));
        }
        if !(t.fuel.is_finite() && (0.0..=t.max_fuel).contains(&t.fuel)) {
            return Err(ValidationError::FuelOutOfRange(id));
        }
        if !(0.0..=100.0).contains(&t.condition) {
            return Err(ValidationError::ConditionOutOfRange(id));
        }
        if let Some(trl_id) = &t.trailer {
            let ok = ledger
                .trailer(trl_id)
                .is_some_and(|trl| {
                    trl.attached_to.as_ref() == Some(&t.id) && trl.location == t.location
                });
            if !ok {
                return Err(ValidationError::TrailerLink(trl_id.0.clone()));
            }
        }
        if let Some(drv_id) = &t.driver {
            let ok = ledger
                .driver(drv_id)
                .is_some_and(|d| d.truck.as_ref() == Some(&t.id));
            if !ok {
                return Err(ValidationError::DriverLink(drv_id.0.clone()));
            }
        }
    }

    for trl in &ledger.trailers {
        if trl.model().is_none() {
            return Err(ValidationError::UnknownModel(trl.model_id.clone()));
        }
        if !(0.0..=100.0).contains(&trl.condition) {
            return Err(ValidationError::ConditionOutOfRange(trl.id.0.clone()));
        }
        if let Some(truck_id) = &trl.attached_to {
            let ok = ledger
                .truck(truck_id)
                .is_some_and(|t| t.trailer.as_ref() == Some(&trl.id));
            if !ok {
                return Err(ValidationError::TrailerLink(trl.id.0.clone()));
            }
        }
    }

    for d in &ledger.drivers {
        if !(0.0..=MAX_SKILL).contains(&d.skill) {
            return Err(ValidationError::SkillOutOfRange(d.id.0.clone()));
        }
        if let Some(truck_id) = &d.truck {
            let ok = ledger
                .truck(truck_id)
                .is_some_and(|t| t.driver.as_ref() == Some(&d.id));
            if !ok {
                return Err(ValidationError::DriverLink(d.id.0.clone()));
            }
        }
    }

    for (truck_id, job_id) in &ledger.active_jobs {
        let bound = ledger
            .truck(truck_id)
            .is_some_and(|t| t.job.as_ref() == Some(job_id));
        if !bound || ledger.job(job_id).is_none() {
            return Err(ValidationError::DanglingJob(job_id.0.clone()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geography::Location;
    use crate::ids::{DriverId, LocationId, TrailerId, TruckId};
    use crate::ledger::tests::{company, driver, trailer, truck};

    fn geo() -> Geography {
        let loc = |id: &str, x: f64| Location {
            id: LocationId::new(id),
            name: id.to_string(),
            x,
            y: 0.0,
            is_hub: true,
            country: "DE".to_string(),
        };
        Geography::from_locations(vec![loc("hub-0", 0.0), loc("hub-1", 100.0)])
    }

    #[test]
    fn consistent_ledger_passes() {
        let mut l = Ledger::new(company("hub-0"), 1);
        l.trucks.push(truck("t1", "daf_xf_480", "hub-0"));
        l.trailers.push(trailer("r1", "semi_box", "hub-1"));
        l.drivers.push(driver("d1", 5.0));
        l.couple_trailer(&TruckId::new("t1"), &TrailerId::new("r1"));
        l.seat_driver(&DriverId::new("d1"), Some(&TruckId::new("t1")));
        assert_eq!(validate_ledger(&l, &geo()), Ok(()));
    }

    #[test]
    fn moving_without_destination_fails() {
        let mut l = Ledger::new(company("hub-0"), 1);
        let mut t = truck("t1", "van_basic", "hub-0");
        t.status = TruckStatus::Moving;
        l.trucks.push(t);
        assert_eq!(
            validate_ledger(&l, &geo()),
            Err(ValidationError::MovingWithoutDestination("t1".into()))
        );
    }

    #[test]
    fn one_sided_links_fail() {
        let mut l = Ledger::new(company("hub-0"), 1);
        let mut t = truck("t1", "van_basic", "hub-0");
        t.driver = Some(DriverId::new("d1"));
        l.trucks.push(t);
        l.drivers.push(driver("d1", 5.0));
        assert_eq!(
            validate_ledger(&l, &geo()),
            Err(ValidationError::DriverLink("d1".into()))
        );
    }

    #[test]
    fn reserved_states_are_consistent() {
        let mut l = Ledger::new(company("hub-0"), 1);
        let mut t = truck("t1", "van_basic", "hub-0");
        t.status = TruckStatus::Maintenance;
        l.trucks.push(t);
        let mut d = driver("d1", 5.0);
        d.status = crate::fleet::DriverStatus::Resting;
        l.drivers.push(d);
        l.company.reputation = 7;
        assert_eq!(validate_ledger(&l, &geo()), Ok(()));
    }

    #[test]
    fn fuel_overflow_fails() {
        let mut l = Ledger::new(company("hub-0"), 1);
        let mut t = truck("t1", "van_basic", "hub-0");
        t.fuel = t.max_fuel + 1.0;
        l.trucks.push(t);
        assert!(matches!(
            validate_ledger(&l, &geo()),
            Err(ValidationError::FuelOutOfRange(_))
        ));
    }
}
