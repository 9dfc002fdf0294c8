//! The daily tick.
//!
//! One call settles one day, in a fixed order: interest, truck legs and
//! deliveries, breakdowns, payroll, drivers leaving, revenue history, job
//! board refresh, recruit pool refresh, world events and the bankruptcy
//! check.

use crate::events::roll_world_event;
use crate::Simulation;
use haul_core::fleet::MAX_SKILL;
use haul_core::{
    DriverId, DriverStatus, GameEvent, Geography, JobId, Ledger, LocationId, RevenuePoint,
    Severity, SimConfig, TruckId, TruckStatus,
};
use haul_econ::pricing::{daily_interest, EMERGENCY_REFUEL_PENALTY_EUR};
use haul_econ::route::effective_speed;
use haul_econ::{fuel_for_leg, generate_board, generate_recruits, route_km};
use rand::Rng;
use rust_decimal::Decimal;
use std::collections::BTreeSet;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Tank share restored by an emergency refuel.
pub const EMERGENCY_REFUEL_SHARE: f64 = 0.2;
/// Condition points lost per km driven.
pub const WEAR_PER_KM: f64 = 0.0001;
/// Skill a driver gains per delivered job.
pub const SKILL_PER_DELIVERY: f64 = 0.1;
/// Daily breakdown chance of a worn truck.
pub const BREAKDOWN_CHANCE: f64 = 0.01;
/// Trucks below this condition may break down.
pub const BREAKDOWN_CONDITION: f64 = 60.0;
pub const REVENUE_HISTORY_LEN: usize = 10;
/// The recruit pool is replaced on every day divisible by this.
pub const RECRUIT_REFRESH_DAYS: u32 = 7;

#[derive(Debug, Error, PartialEq)]
pub enum TickError {
    #[error("the company is bankrupt; the game is over")]
    GameOver,
}

/// What happened during one tick.
#[derive(Clone, Debug, PartialEq)]
pub struct TickReport {
    /// The day that was settled.
    pub day_ended: u32,
    /// Job payouts credited today.
    pub revenue: Decimal,
    /// Net cash change over the tick.
    pub cash_delta: Decimal,
    /// Human-readable daily log.
    pub log: Vec<String>,
    /// Events added to the event log, oldest first.
    pub events: Vec<GameEvent>,
    /// Set when this tick ended the game.
    pub bankrupt: bool,
}

struct Tick<'a> {
    ledger: &'a mut Ledger,
    cfg: &'a SimConfig,
    revenue: Decimal,
    log: Vec<String>,
    events: Vec<GameEvent>,
}

impl Tick<'_> {
    fn event(&mut self, title: &str, message: String, severity: Severity) {
        let e = self
            .ledger
            .log_event(title, message, severity, self.cfg.event_log_cap);
        self.events.push(e);
    }

    fn place_name(geo: &Geography, id: &LocationId) -> String {
        geo.get(id).map_or_else(|| id.0.clone(), |l| l.name.clone())
    }

    fn accrue_interest(&mut self) {
        let c = &mut self.ledger.company;
        let interest = daily_interest(c.loan_eur, c.interest_rate);
        if interest > Decimal::ZERO {
            c.cash_eur -= interest;
            self.log.push(format!("Interest paid: -{interest} EUR"));
        }
    }

    fn advance_trucks<R: Rng + ?Sized>(&mut self, geo: &Geography, rng: &mut R) {
        let ids: Vec<TruckId> = self.ledger.trucks.iter().map(|t| t.id.clone()).collect();
        for id in &ids {
            self.advance_truck(id, geo);
            self.roll_breakdown(id, rng);
        }
    }

    fn advance_truck(&mut self, id: &TruckId, geo: &Geography) {
        let Some(truck) = self.ledger.truck(id) else {
            return;
        };
        let Some(dest) = truck.destination.clone().filter(|_| truck.is_moving()) else {
            return;
        };
        let Some(model) = truck.model() else {
            warn!(truck = %id, model = %truck.model_id, "unknown model, truck parked");
            return;
        };
        let km = match route_km(geo, &truck.location, &dest) {
            Ok(km) => km,
            Err(e) => {
                warn!(truck = %id, error = %e, "leg cannot be routed");
                return;
            }
        };
        let skill = self.ledger.driver_skill(truck);
        let fuel = fuel_for_leg(km, model, skill);
        debug!(
            truck = %id,
            km,
            fuel,
            speed = effective_speed(model, skill),
            "leg"
        );
        if truck.fuel < fuel {
            let (available, name) = (truck.fuel, model.name);
            self.strand(id, name, fuel, available);
        } else {
            self.arrive(id, &dest, km, fuel, geo);
        }
    }

    /// Out of fuel: the truck stays put, gets an expensive emergency refuel
    /// and its job goes back to the board.
    fn strand(&mut self, id: &TruckId, name: &str, needed: f64, available: f64) {
        if let Some(t) = self.ledger.truck_mut(id) {
            t.status = TruckStatus::Idle;
            t.destination = None;
            t.fuel = t.max_fuel * EMERGENCY_REFUEL_SHARE;
        }
        let penalty = Decimal::from(EMERGENCY_REFUEL_PENALTY_EUR);
        self.ledger.company.cash_eur -= penalty;
        let job = self.ledger.release_job(id);
        self.ledger.set_crew_status(id, DriverStatus::Idle);
        warn!(truck = %id, needed, available, job = ?job, "truck ran out of fuel");
        self.log
            .push(format!("{name} ran dry: emergency refuel -{penalty} EUR"));
        self.event(
            "Out of fuel!",
            format!("{name} is stranded. The emergency refuel was expensive."),
            Severity::Error,
        );
    }

    fn arrive(&mut self, id: &TruckId, dest: &LocationId, km: f64, fuel: f64, geo: &Geography) {
        let mut driver = None;
        if let Some(t) = self.ledger.truck_mut(id) {
            t.fuel = (t.fuel - fuel).max(0.0);
            t.status = TruckStatus::Idle;
            t.destination = None;
            t.condition = (t.condition - km * WEAR_PER_KM).max(0.0);
            t.mileage_km += km;
            driver = t.driver.clone();
        }
        self.ledger.relocate_truck(id, dest);
        self.ledger.set_crew_status(id, DriverStatus::Idle);

        let Some(job_id) = self.ledger.release_job(id) else {
            debug!(truck = %id, to = %dest, "empty run arrived");
            self.log
                .push(format!("Truck arrived in {} (empty run).", Self::place_name(geo, dest)));
            return;
        };
        self.deliver(id, &job_id, driver.as_ref());
    }

    fn deliver(&mut self, truck: &TruckId, job_id: &JobId, driver: Option<&DriverId>) {
        let Some(job) = self.ledger.remove_job(job_id) else {
            warn!(truck = %truck, job = %job_id, "delivered job missing from the board");
            return;
        };
        self.ledger.company.cash_eur += job.payout_eur;
        self.revenue += job.payout_eur;
        if let Some(d) = driver.and_then(|d| self.ledger.driver_mut(d)) {
            d.skill = (d.skill + SKILL_PER_DELIVERY).min(MAX_SKILL);
        }
        info!(truck = %truck, job = %job_id, payout = %job.payout_eur, "job delivered");
        self.log
            .push(format!("Job completed: +{} EUR", job.payout_eur));
    }

    fn roll_breakdown<R: Rng + ?Sized>(&mut self, id: &TruckId, rng: &mut R) {
        let Some(truck) = self.ledger.truck(id) else {
            return;
        };
        if truck.status == TruckStatus::Broken {
            return;
        }
        let worn = truck.condition < BREAKDOWN_CONDITION;
        if !rng.gen_bool(BREAKDOWN_CHANCE) || !worn {
            return;
        }
        let was_moving = truck.is_moving();
        if let Some(t) = self.ledger.truck_mut(id) {
            t.status = TruckStatus::Broken;
            t.destination = None;
        }
        if was_moving {
            self.ledger.release_job(id);
            self.ledger.set_crew_status(id, DriverStatus::Idle);
        }
        info!(truck = %id, "breakdown");
        self.event(
            "Breakdown!",
            format!("Truck {id} has engine damage and needs a repair."),
            Severity::Error,
        );
    }

    fn pay_salaries(&mut self) {
        let wages = self.ledger.payroll();
        if wages > Decimal::ZERO {
            self.ledger.company.cash_eur -= wages;
            self.log.push(format!("Salaries paid: -{wages} EUR"));
        }
    }

    /// Drivers under notice leave once `firing_day <= ended + 1`.
    fn release_leavers(&mut self, ended: u32) {
        let leaving: Vec<DriverId> = self
            .ledger
            .drivers
            .iter()
            .filter(|d| d.firing_day.is_some_and(|f| f <= ended + 1))
            .map(|d| d.id.clone())
            .collect();
        for id in leaving {
            if let Some(d) = self.ledger.remove_driver(&id) {
                info!(driver = %id, "driver left");
                self.log.push(format!("{} has left the company.", d.name));
            }
        }
    }

    fn record_revenue(&mut self, ended: u32) {
        let history = &mut self.ledger.revenue_history;
        history.push(RevenuePoint {
            day: ended,
            revenue_eur: self.revenue,
        });
        if history.len() > REVENUE_HISTORY_LEN {
            let excess = history.len() - REVENUE_HISTORY_LEN;
            history.drain(..excess);
        }
    }

    /// Keep assigned jobs as they are, age the open ones and add a fresh
    /// batch with every active location as priority.
    fn refresh_board<R: Rng + ?Sized>(&mut self, geo: &Geography, day: u32, rng: &mut R) {
        let assigned: BTreeSet<JobId> = self.ledger.active_jobs.values().cloned().collect();
        let old = std::mem::take(&mut self.ledger.jobs);
        let before = old.len();
        let mut board = Vec::with_capacity(before + self.cfg.job_board_ceiling);
        for mut job in old {
            if assigned.contains(&job.id) {
                board.push(job);
            } else if job.expires_in_days > 0 {
                job.expires_in_days -= 1;
                board.push(job);
            }
        }
        let kept = board.len();
        let priority = self.ledger.active_locations();
        let fresh = generate_board(
            geo,
            day,
            &priority,
            &Simulation::board_spec(self.cfg),
            &mut self.ledger.ids,
            rng,
        );
        board.extend(fresh);
        debug!(before, kept, total = board.len(), "job board refreshed");
        self.ledger.jobs = board;
    }

    fn refresh_recruits<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.ledger.recruits = generate_recruits(&mut self.ledger.ids, rng);
        self.log.push("New applicants are available.".to_string());
    }
}

/// Advance the simulation by exactly one day.
///
/// Fails only when the game is already over; fuel exhaustion and
/// breakdowns are in-game penalties, not errors.
pub fn advance_day<R: Rng + ?Sized>(
    ledger: &mut Ledger,
    geo: &Geography,
    cfg: &SimConfig,
    rng: &mut R,
) -> Result<TickReport, TickError> {
    if ledger.game_over {
        return Err(TickError::GameOver);
    }
    let ended = ledger.day;
    let cash_before = ledger.company.cash_eur;
    let mut tick = Tick {
        ledger,
        cfg,
        revenue: Decimal::ZERO,
        log: Vec::new(),
        events: Vec::new(),
    };

    tick.accrue_interest();
    tick.advance_trucks(geo, rng);
    tick.pay_salaries();
    tick.release_leavers(ended);
    tick.record_revenue(ended);
    tick.refresh_board(geo, ended + 1, rng);
    if ended % RECRUIT_REFRESH_DAYS == 0 {
        tick.refresh_recruits(rng);
    }
    if let Some(w) = roll_world_event(rng) {
        tick.event(w.title, w.message.to_string(), w.severity);
    }

    tick.ledger.day = ended + 1;
    let bankrupt = tick.ledger.company.cash_eur < cfg.bankruptcy_threshold;
    if bankrupt {
        tick.ledger.game_over = true;
        warn!(cash = %tick.ledger.company.cash_eur, "company bankrupt");
        tick.event(
            "Bankrupt",
            "Cash fell below the credit line. Game over.".to_string(),
            Severity::Error,
        );
    }

    let Tick {
        ledger,
        revenue,
        log,
        events,
        ..
    } = tick;
    let cash_delta = ledger.company.cash_eur - cash_before;
    info!(
        day = ended,
        %revenue,
        %cash_delta,
        cash = %ledger.company.cash_eur,
        trucks = ledger.trucks.len(),
        jobs = ledger.jobs.len(),
        "day closed"
    );
    Ok(TickReport {
        day_ended: ended,
        revenue,
        cash_delta,
        log,
        events,
        bankrupt,
    })
}
