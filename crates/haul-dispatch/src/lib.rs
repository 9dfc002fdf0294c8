#![deny(warnings)]
//! Automated dispatch: a greedy job-to-truck planner.
//!
//! The planner only proposes; applying a proposal goes through the regular
//! job assignment action, which re-checks everything.

use haul_core::{Geography, JobId, Ledger, Truck, TruckId, TruckStatus};
use haul_econ::fuel_for_leg;
use haul_econ::route::{base_fuel, distance_km, APPROACH_FUEL_MARGIN};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeSet;
use tracing::debug;

/// A suggested assignment.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Proposal {
    pub truck: TruckId,
    pub job: JobId,
    /// Empty drive to the job source.
    pub approach_km: f64,
    /// Approach plus delivery leg.
    pub total_km: f64,
    pub payout_eur: Decimal,
    /// Payout per km driven.
    pub score: f64,
}

fn ready(truck: &Truck, ledger: &Ledger) -> bool {
    truck.status == TruckStatus::Idle
        && truck.job.is_none()
        && !ledger.active_jobs.contains_key(&truck.id)
}

/// Best open job for one truck, skipping jobs in `taken`.
///
/// A job qualifies when the truck's equipment accepts the cargo and weight,
/// the approach fuel with margin is in the tank, and what is left after the
/// approach covers the delivery leg.
pub fn best_job(
    ledger: &Ledger,
    geo: &Geography,
    truck: &Truck,
    taken: &BTreeSet<JobId>,
) -> Option<Proposal> {
    if !ready(truck, ledger) {
        return None;
    }
    let equipment = ledger.equipment(truck)?;
    let here = geo.get(&truck.location)?;
    let skill = ledger.driver_skill(truck);

    let mut best: Option<Proposal> = None;
    for job in ledger.open_jobs() {
        if taken.contains(&job.id) || equipment.check(job.cargo, job.weight_t).is_err() {
            continue;
        }
        let (Some(source), Some(target)) = (geo.get(&job.source), geo.get(&job.target)) else {
            continue;
        };
        let approach_km = distance_km(here, source);
        let approach_fuel = base_fuel(approach_km, equipment.vehicle);
        if truck.fuel < approach_fuel * APPROACH_FUEL_MARGIN {
            continue;
        }
        let leg_km = distance_km(source, target);
        if truck.fuel - approach_fuel < fuel_for_leg(leg_km, equipment.vehicle, skill) {
            continue;
        }
        let total_km = approach_km + leg_km;
        let payout = job.payout_eur.to_f64().unwrap_or(0.0);
        let score = payout / total_km.max(1.0);
        let better = match &best {
            Some(b) => score > b.score,
            None => true,
        };
        if better {
            best = Some(Proposal {
                truck: truck.id.clone(),
                job: job.id.clone(),
                approach_km,
                total_km,
                payout_eur: job.payout_eur,
                score,
            });
        }
    }
    best
}

/// Propose at most one job per ready truck, each job at most once.
/// Trucks are served in fleet order.
pub fn plan(ledger: &Ledger, geo: &Geography) -> Vec<Proposal> {
    let mut taken = BTreeSet::new();
    let mut out = Vec::new();
    for truck in &ledger.trucks {
        if let Some(p) = best_job(ledger, geo, truck, &taken) {
            taken.insert(p.job.clone());
            out.push(p);
        }
    }
    debug!(
        trucks = ledger.trucks.len(),
        proposals = out.len(),
        "dispatch plan"
    );
    out
}
