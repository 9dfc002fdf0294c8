//! The company ledger: the single mutable game state.
//!
//! Relationships between records (truck↔trailer, truck↔driver, truck↔job)
//! are stored on both sides. Each relationship has exactly one mutator here
//! so both sides always change together.

use crate::compat::Equipment;
use crate::fleet::{Driver, DriverStatus, Trailer, Truck};
use crate::ids::{DriverId, IdAllocator, JobId, LocationId, TrailerId, TruckId};
use crate::job::Job;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, VecDeque};

/// Company financials and real estate.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Company {
    pub name: String,
    /// Cash balance in EUR; may go negative until bankruptcy.
    pub cash_eur: Decimal,
    /// Outstanding loan principal in EUR (>= 0).
    pub loan_eur: Decimal,
    /// Annual loan interest as a fraction.
    pub interest_rate: Decimal,
    pub hq: LocationId,
    /// Owned garage locations; always contains the HQ.
    pub garages: Vec<LocationId>,
    /// Workshop level 1..=5.
    pub garage_level: u8,
    /// Reserved save-format field. Starts at 0, is never scored and is
    /// carried through restore unchanged.
    pub reputation: i32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Info,
    Warning,
    Error,
    Success,
}

/// Entry of the in-game event log.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameEvent {
    pub id: String,
    pub title: String,
    pub message: String,
    pub severity: Severity,
    pub day: u32,
}

/// Settled job revenue of one finished day.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RevenuePoint {
    pub day: u32,
    pub revenue_eur: Decimal,
}

/// Full game state of one session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Ledger {
    /// Simulation clock, starting at 1.
    pub day: u32,
    pub company: Company,
    pub trucks: Vec<Truck>,
    pub trailers: Vec<Trailer>,
    pub drivers: Vec<Driver>,
    /// Candidates available for hire.
    pub recruits: Vec<Driver>,
    /// Job board, including jobs currently assigned to trucks.
    pub jobs: Vec<Job>,
    /// Truck id → job id of the job it is executing.
    pub active_jobs: BTreeMap<TruckId, JobId>,
    /// Newest first.
    pub events: VecDeque<GameEvent>,
    /// Most recent daily revenues, oldest first.
    pub revenue_history: Vec<RevenuePoint>,
    pub ids: IdAllocator,
    /// Seed the geography was generated from.
    pub map_seed: u64,
    /// Latched once the company went bankrupt.
    pub game_over: bool,
}

impl Ledger {
    /// Empty ledger for a freshly founded company on day 1.
    pub fn new(company: Company, map_seed: u64) -> Self {
        Self {
            day: 1,
            company,
            trucks: Vec::new(),
            trailers: Vec::new(),
            drivers: Vec::new(),
            recruits: Vec::new(),
            jobs: Vec::new(),
            active_jobs: BTreeMap::new(),
            events: VecDeque::new(),
            revenue_history: Vec::new(),
            ids: IdAllocator::default(),
            map_seed,
            game_over: false,
        }
    }

    pub fn truck(&self, id: &TruckId) -> Option<&Truck> {
        self.trucks.iter().find(|t| &t.id == id)
    }

    pub fn truck_mut(&mut self, id: &TruckId) -> Option<&mut Truck> {
        self.trucks.iter_mut().find(|t| &t.id == id)
    }

    pub fn trailer(&self, id: &TrailerId) -> Option<&Trailer> {
        self.trailers.iter().find(|t| &t.id == id)
    }

    pub fn trailer_mut(&mut self, id: &TrailerId) -> Option<&mut Trailer> {
        self.trailers.iter_mut().find(|t| &t.id == id)
    }

    pub fn driver(&self, id: &DriverId) -> Option<&Driver> {
        self.drivers.iter().find(|d| &d.id == id)
    }

    pub fn driver_mut(&mut self, id: &DriverId) -> Option<&mut Driver> {
        self.drivers.iter_mut().find(|d| &d.id == id)
    }

    pub fn job(&self, id: &JobId) -> Option<&Job> {
        self.jobs.iter().find(|j| &j.id == id)
    }

    pub fn is_job_assigned(&self, id: &JobId) -> bool {
        self.active_jobs.values().any(|j| j == id)
    }

    /// Jobs on the board that no truck is executing.
    pub fn open_jobs(&self) -> impl Iterator<Item = &Job> {
        self.jobs.iter().filter(|j| !self.is_job_assigned(&j.id))
    }

    pub fn owns_garage(&self, id: &LocationId) -> bool {
        self.company.garages.contains(id)
    }

    /// Vehicle model plus attached trailer model of a truck.
    pub fn equipment(&self, truck: &Truck) -> Option<Equipment<'static>> {
        let vehicle = truck.model()?;
        let trailer = match &truck.trailer {
            Some(id) => Some(self.trailer(id)?.model()?),
            None => None,
        };
        Some(Equipment::new(vehicle, trailer))
    }

    /// Skill of the driver assigned to a truck, if any.
    pub fn driver_skill(&self, truck: &Truck) -> Option<f64> {
        truck
            .driver
            .as_ref()
            .and_then(|id| self.driver(id))
            .map(|d| d.skill)
    }

    /// Move a truck and whatever it pulls.
    pub fn relocate_truck(&mut self, truck_id: &TruckId, to: &LocationId) {
        let Some(truck) = self.truck_mut(truck_id) else {
            return;
        };
        truck.location = to.clone();
        let trailer_id = truck.trailer.clone();
        if let Some(trailer) = trailer_id.and_then(|id| self.trailer_mut(&id)) {
            trailer.location = to.clone();
        }
    }

    /// Couple a trailer; the trailer joins the truck's location.
    pub fn couple_trailer(&mut self, truck_id: &TruckId, trailer_id: &TrailerId) {
        let Some(truck) = self.truck_mut(truck_id) else {
            return;
        };
        truck.trailer = Some(trailer_id.clone());
        let location = truck.location.clone();
        if let Some(trailer) = self.trailer_mut(trailer_id) {
            trailer.attached_to = Some(truck_id.clone());
            trailer.location = location;
        }
    }

    /// Uncouple whatever trailer a truck pulls and leave it at the truck's location.
    pub fn uncouple_trailer(&mut self, truck_id: &TruckId) -> Option<TrailerId> {
        let truck = self.truck_mut(truck_id)?;
        let trailer_id = truck.trailer.take()?;
        let location = truck.location.clone();
        if let Some(trailer) = self.trailer_mut(&trailer_id) {
            trailer.attached_to = None;
            trailer.location = location;
        }
        Some(trailer_id)
    }

    /// Seat a driver in a truck, or take them out of any truck with `None`.
    ///
    /// The driver's previous truck and the target truck's previous driver are
    /// both released.
    pub fn seat_driver(&mut self, driver_id: &DriverId, truck_id: Option<&TruckId>) {
        self.unseat_driver(driver_id);
        let Some(truck_id) = truck_id else {
            return;
        };
        let displaced = self.truck(truck_id).and_then(|t| t.driver.clone());
        if let Some(other) = displaced {
            self.unseat_driver(&other);
        }
        let moving = match self.truck_mut(truck_id) {
            Some(truck) => {
                truck.driver = Some(driver_id.clone());
                truck.is_moving()
            }
            None => return,
        };
        if let Some(driver) = self.driver_mut(driver_id) {
            driver.truck = Some(truck_id.clone());
            driver.status = if moving {
                DriverStatus::Driving
            } else {
                DriverStatus::Idle
            };
        }
    }

    fn unseat_driver(&mut self, driver_id: &DriverId) {
        for truck in self
            .trucks
            .iter_mut()
            .filter(|t| t.driver.as_ref() == Some(driver_id))
        {
            truck.driver = None;
        }
        if let Some(driver) = self.driver_mut(driver_id) {
            driver.truck = None;
            driver.status = DriverStatus::Idle;
        }
    }

    /// Update the status of the driver sitting in a truck.
    pub fn set_crew_status(&mut self, truck_id: &TruckId, status: DriverStatus) {
        let driver_id = self.truck(truck_id).and_then(|t| t.driver.clone());
        if let Some(driver) = driver_id.and_then(|id| self.driver_mut(&id)) {
            driver.status = status;
        }
    }

    /// Record that a truck started executing a job.
    pub fn bind_job(&mut self, truck_id: &TruckId, job_id: &JobId) {
        if let Some(truck) = self.truck_mut(truck_id) {
            truck.job = Some(job_id.clone());
            self.active_jobs.insert(truck_id.clone(), job_id.clone());
        }
    }

    /// Clear a truck's job link on both sides. The job stays on the board.
    pub fn release_job(&mut self, truck_id: &TruckId) -> Option<JobId> {
        if let Some(truck) = self.truck_mut(truck_id) {
            truck.job = None;
        }
        self.active_jobs.remove(truck_id)
    }

    /// Remove a job from the board entirely.
    pub fn remove_job(&mut self, job_id: &JobId) -> Option<Job> {
        let idx = self.jobs.iter().position(|j| &j.id == job_id)?;
        Some(self.jobs.remove(idx))
    }

    /// Remove a truck, releasing its driver, trailer and job.
    pub fn remove_truck(&mut self, truck_id: &TruckId) -> Option<Truck> {
        let driver = self.truck(truck_id)?.driver.clone();
        if let Some(driver) = driver {
            self.unseat_driver(&driver);
        }
        self.uncouple_trailer(truck_id);
        self.release_job(truck_id);
        let idx = self.trucks.iter().position(|t| &t.id == truck_id)?;
        Some(self.trucks.remove(idx))
    }

    /// Remove a trailer, uncoupling it first.
    pub fn remove_trailer(&mut self, trailer_id: &TrailerId) -> Option<Trailer> {
        let attached = self.trailer(trailer_id)?.attached_to.clone();
        if let Some(truck_id) = attached {
            self.uncouple_trailer(&truck_id);
        }
        let idx = self.trailers.iter().position(|t| &t.id == trailer_id)?;
        Some(self.trailers.remove(idx))
    }

    /// Remove a driver from the roster and free their truck seat.
    pub fn remove_driver(&mut self, driver_id: &DriverId) -> Option<Driver> {
        self.unseat_driver(driver_id);
        let idx = self.drivers.iter().position(|d| &d.id == driver_id)?;
        Some(self.drivers.remove(idx))
    }

    /// Prepend an event and keep only the newest `cap` entries.
    pub fn log_event(
        &mut self,
        title: impl Into<String>,
        message: impl Into<String>,
        severity: Severity,
        cap: usize,
    ) -> GameEvent {
        let event = GameEvent {
            id: self.ids.event(),
            title: title.into(),
            message: message.into(),
            severity,
            day: self.day,
        };
        self.events.push_front(event.clone());
        self.events.truncate(cap);
        event
    }

    /// Sum of all driver salaries.
    pub fn payroll(&self) -> Decimal {
        self.drivers.iter().map(|d| d.salary_eur).sum()
    }

    /// Every location holding a truck or an owned garage, deduplicated.
    pub fn active_locations(&self) -> Vec<LocationId> {
        let mut out: Vec<LocationId> = Vec::new();
        for id in self
            .trucks
            .iter()
            .map(|t| &t.location)
            .chain(self.company.garages.iter())
        {
            if !out.contains(id) {
                out.push(id.clone());
            }
        }
        out
    }
}
