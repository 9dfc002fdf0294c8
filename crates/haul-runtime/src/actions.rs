//! Player actions.
//!
//! Every action validates completely before it touches the ledger, so a
//! rejected action leaves no trace. Successful actions add an entry to the
//! in-game event log.

use crate::Simulation;
use haul_core::fleet::MAX_SKILL;
use haul_core::{
    trailer_model, vehicle_model, DriverId, DriverStatus, JobId, LoadError, LocationId, Severity,
    Trailer, TrailerId, Truck, TruckId, TruckStatus, WeightClass,
};
use haul_econ::pricing::{
    garage_upgrade_cost, refuel_cost, repair_cost, resale_value, used_trailer_price, TruckOffer,
    GARAGE_PRICE_EUR, HIRE_FEE_EUR, MAX_GARAGE_LEVEL, MIN_REFUEL_AMOUNT, TRAINING_FEE_EUR,
};
use haul_econ::route::{base_fuel, route_km, APPROACH_FUEL_MARGIN};
use rand::Rng;
use rust_decimal::Decimal;
use thiserror::Error;
use tracing::{debug, info};

/// Tank size of every delivered truck.
pub const DELIVERY_FUEL: f64 = 1000.0;
/// Days of notice between firing and leaving.
pub const NOTICE_DAYS: u32 = 3;

/// Why a player action was refused.
#[derive(Debug, Error, PartialEq)]
pub enum ActionError {
    #[error("the company is bankrupt")]
    GameOver,
    #[error("insufficient funds: costs {cost} EUR, cash is {cash} EUR")]
    InsufficientFunds { cost: Decimal, cash: Decimal },
    #[error("unknown catalog model: {0}")]
    UnknownModel(String),
    #[error("unknown truck: {0}")]
    UnknownTruck(String),
    #[error("unknown trailer: {0}")]
    UnknownTrailer(String),
    #[error("unknown driver: {0}")]
    UnknownDriver(String),
    #[error("no such candidate: {0}")]
    UnknownRecruit(String),
    #[error("job {0} is not on the board")]
    UnknownJob(String),
    #[error("unknown location: {0}")]
    UnknownLocation(String),
    #[error("no loan offer #{0}")]
    UnknownLoanOffer(usize),
    #[error("company name must not be empty")]
    EmptyName,
    #[error("{0} is not a hub")]
    NotAHub(String),
    #[error("no garage at {0}")]
    NoGarage(String),
    #[error("truck {truck} is {status:?}")]
    TruckUnavailable { truck: String, status: TruckStatus },
    #[error("truck {0} is already on a job")]
    TruckHasJob(String),
    #[error("truck {0} already pulls a trailer")]
    TruckHasTrailer(String),
    #[error("truck {0} has no trailer")]
    NoTrailer(String),
    #[error("trailer {0} is coupled to a truck on the road")]
    TrailerInUse(String),
    #[error("truck and trailer are at different locations")]
    DifferentLocation,
    #[error("{vehicle} cannot pull a {trailer:?} trailer")]
    WeightClassMismatch {
        vehicle: String,
        trailer: WeightClass,
    },
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error("insufficient fuel: {required:.1} needed, {available:.1} in the tank")]
    InsufficientFuel { required: f64, available: f64 },
    #[error("truck {0} is already there")]
    AlreadyThere(String),
    #[error("job {0} is already taken")]
    JobTaken(String),
    #[error("driver {0} is already under notice")]
    NoticeGiven(String),
    #[error("driver {0} is fully trained")]
    FullyTrained(String),
    #[error("truck {0} needs no repair")]
    NothingToRepair(String),
    #[error("truck {0} is nearly full")]
    TankFull(String),
    #[error("garage at {0} is already owned")]
    GarageOwned(String),
    #[error("workshop is at the top level")]
    MaxGarageLevel,
    #[error("no outstanding loan")]
    NoLoan,
    #[error("amount must be positive")]
    InvalidAmount,
}

fn rejected(action: &'static str) -> impl FnOnce(ActionError) -> ActionError {
    move |e| {
        debug!(action, error = %e, "action rejected");
        e
    }
}

impl Simulation {
    fn ensure_running(&self) -> Result<(), ActionError> {
        if self.ledger.game_over {
            return Err(ActionError::GameOver);
        }
        Ok(())
    }

    fn ensure_funds(&self, cost: Decimal) -> Result<(), ActionError> {
        let cash = self.ledger.company.cash_eur;
        if cash < cost {
            return Err(ActionError::InsufficientFunds { cost, cash });
        }
        Ok(())
    }

    fn find_truck(&self, id: &TruckId) -> Result<&Truck, ActionError> {
        self.ledger
            .truck(id)
            .ok_or_else(|| ActionError::UnknownTruck(id.0.clone()))
    }

    fn find_trailer(&self, id: &TrailerId) -> Result<&Trailer, ActionError> {
        self.ledger
            .trailer(id)
            .ok_or_else(|| ActionError::UnknownTrailer(id.0.clone()))
    }

    /// A truck that is parked and able to drive.
    fn parked_truck(&self, id: &TruckId) -> Result<&Truck, ActionError> {
        let truck = self.find_truck(id)?;
        if truck.status != TruckStatus::Idle {
            return Err(ActionError::TruckUnavailable {
                truck: id.0.clone(),
                status: truck.status,
            });
        }
        Ok(truck)
    }

    fn not_moving(&self, id: &TruckId) -> Result<&Truck, ActionError> {
        let truck = self.find_truck(id)?;
        if truck.is_moving() {
            return Err(ActionError::TruckUnavailable {
                truck: id.0.clone(),
                status: truck.status,
            });
        }
        Ok(truck)
    }

    fn delivery_garage(&self, garage: Option<&LocationId>) -> Result<LocationId, ActionError> {
        let at = garage.unwrap_or(&self.ledger.company.hq);
        if !self.ledger.owns_garage(at) {
            return Err(ActionError::NoGarage(at.0.clone()));
        }
        Ok(at.clone())
    }

    fn pay(&mut self, cost: Decimal) {
        self.ledger.company.cash_eur -= cost;
    }

    /// Buy a truck, delivered to an owned garage (the HQ by default).
    pub fn buy_truck(
        &mut self,
        model_id: &str,
        offer: TruckOffer,
        garage: Option<&LocationId>,
    ) -> Result<TruckId, ActionError> {
        self.ensure_running().map_err(rejected("buy_truck"))?;
        let model = vehicle_model(model_id)
            .ok_or_else(|| ActionError::UnknownModel(model_id.to_string()))
            .map_err(rejected("buy_truck"))?;
        let at = self.delivery_garage(garage).map_err(rejected("buy_truck"))?;
        let price = (model.price() * offer.price_factor()).floor();
        self.ensure_funds(price).map_err(rejected("buy_truck"))?;

        let id = self.ledger.ids.truck();
        self.pay(price);
        self.ledger.trucks.push(Truck {
            id: id.clone(),
            model_id: model.id.to_string(),
            mileage_km: offer.mileage_km(),
            condition: offer.condition(),
            status: TruckStatus::Idle,
            location: at,
            destination: None,
            fuel: DELIVERY_FUEL,
            max_fuel: DELIVERY_FUEL,
            trailer: None,
            job: None,
            driver: None,
            bought_price_eur: price,
            value_eur: price,
        });
        info!(truck = %id, model = model.id, ?offer, %price, "truck bought");
        self.notify(
            "Vehicle bought",
            format!("{} ({offer:?}) delivered.", model.name),
            Severity::Success,
        );
        Ok(id)
    }

    /// Buy a trailer. Used trailers cost 60% and arrive in condition 40..70.
    pub fn buy_trailer(
        &mut self,
        model_id: &str,
        used: bool,
        garage: Option<&LocationId>,
    ) -> Result<TrailerId, ActionError> {
        self.ensure_running().map_err(rejected("buy_trailer"))?;
        let model = trailer_model(model_id)
            .ok_or_else(|| ActionError::UnknownModel(model_id.to_string()))
            .map_err(rejected("buy_trailer"))?;
        let at = self.delivery_garage(garage).map_err(rejected("buy_trailer"))?;
        let price = if used {
            used_trailer_price(model.price())
        } else {
            model.price()
        };
        self.ensure_funds(price).map_err(rejected("buy_trailer"))?;

        let condition = if used {
            40.0 + self.rng.gen_range(0.0..30.0)
        } else {
            100.0
        };
        let id = self.ledger.ids.trailer();
        self.pay(price);
        self.ledger.trailers.push(Trailer {
            id: id.clone(),
            model_id: model.id.to_string(),
            condition,
            location: at,
            attached_to: None,
            value_eur: price,
        });
        info!(trailer = %id, model = model.id, used, %price, "trailer bought");
        let state = if used { "used" } else { "new" };
        self.notify(
            "Trailer bought",
            format!("{} ({state}) delivered.", model.name),
            Severity::Success,
        );
        Ok(id)
    }

    /// Sell a parked truck. Its driver is unseated and its trailer left behind.
    pub fn sell_truck(&mut self, truck_id: &TruckId) -> Result<Decimal, ActionError> {
        self.ensure_running().map_err(rejected("sell_truck"))?;
        let truck = self.not_moving(truck_id).map_err(rejected("sell_truck"))?;
        let proceeds = resale_value(truck.value_eur, truck.condition);

        self.ledger.remove_truck(truck_id);
        self.ledger.company.cash_eur += proceeds;
        info!(truck = %truck_id, %proceeds, "truck sold");
        self.notify("Sold", format!("Truck sold for {proceeds} EUR."), Severity::Info);
        Ok(proceeds)
    }

    /// Sell a trailer, uncoupling it first when its truck is parked.
    pub fn sell_trailer(&mut self, trailer_id: &TrailerId) -> Result<Decimal, ActionError> {
        self.ensure_running().map_err(rejected("sell_trailer"))?;
        let trailer = self.find_trailer(trailer_id).map_err(rejected("sell_trailer"))?;
        let on_the_road = trailer
            .attached_to
            .as_ref()
            .and_then(|t| self.ledger.truck(t))
            .is_some_and(|t| t.is_moving());
        if on_the_road {
            return Err(rejected("sell_trailer")(ActionError::TrailerInUse(trailer_id.0.clone())));
        }
        let proceeds = resale_value(trailer.value_eur, trailer.condition);

        self.ledger.remove_trailer(trailer_id);
        self.ledger.company.cash_eur += proceeds;
        info!(trailer = %trailer_id, %proceeds, "trailer sold");
        self.notify("Sold", format!("Trailer sold for {proceeds} EUR."), Severity::Info);
        Ok(proceeds)
    }

    /// Restore a truck to condition 100; broken trucks return to service.
    pub fn repair_truck(&mut self, truck_id: &TruckId) -> Result<Decimal, ActionError> {
        self.ensure_running().map_err(rejected("repair_truck"))?;
        let truck = self.not_moving(truck_id).map_err(rejected("repair_truck"))?;
        let cost = repair_cost(truck.condition, truck.status == TruckStatus::Broken);
        if cost.is_zero() {
            return Err(rejected("repair_truck")(ActionError::NothingToRepair(truck_id.0.clone())));
        }
        self.ensure_funds(cost).map_err(rejected("repair_truck"))?;

        self.pay(cost);
        if let Some(truck) = self.ledger.truck_mut(truck_id) {
            truck.condition = 100.0;
            if truck.status == TruckStatus::Broken {
                truck.status = TruckStatus::Idle;
            }
        }
        info!(truck = %truck_id, %cost, "truck repaired");
        self.notify("Repair", format!("Truck repaired for {cost} EUR."), Severity::Info);
        Ok(cost)
    }

    /// Hire a candidate from the recruit pool.
    pub fn hire_driver(&mut self, recruit_id: &DriverId) -> Result<DriverId, ActionError> {
        self.ensure_running().map_err(rejected("hire_driver"))?;
        let idx = self
            .ledger
            .recruits
            .iter()
            .position(|r| &r.id == recruit_id)
            .ok_or_else(|| ActionError::UnknownRecruit(recruit_id.0.clone()))
            .map_err(rejected("hire_driver"))?;
        let fee = Decimal::from(HIRE_FEE_EUR);
        self.ensure_funds(fee).map_err(rejected("hire_driver"))?;

        let mut driver = self.ledger.recruits.remove(idx);
        driver.id = self.ledger.ids.driver();
        driver.status = DriverStatus::Idle;
        driver.truck = None;
        let id = driver.id.clone();
        let name = driver.name.clone();
        self.ledger.drivers.push(driver);
        self.pay(fee);
        info!(driver = %id, %name, "driver hired");
        self.notify("Hired", format!("{name} joins the company."), Severity::Success);
        Ok(id)
    }

    /// Give notice. The driver keeps working and earning until the
    /// returned leaving day.
    pub fn fire_driver(&mut self, driver_id: &DriverId) -> Result<u32, ActionError> {
        self.ensure_running().map_err(rejected("fire_driver"))?;
        let day = self.ledger.day;
        let driver = self
            .ledger
            .driver_mut(driver_id)
            .ok_or_else(|| ActionError::UnknownDriver(driver_id.0.clone()))
            .map_err(rejected("fire_driver"))?;
        if driver.firing_day.is_some() {
            return Err(rejected("fire_driver")(ActionError::NoticeGiven(driver_id.0.clone())));
        }
        let leaves = day + NOTICE_DAYS;
        driver.firing_day = Some(leaves);
        let name = driver.name.clone();
        info!(driver = %driver_id, leaves, "notice given");
        self.notify(
            "Notice",
            format!("{name} leaves in {NOTICE_DAYS} days."),
            Severity::Warning,
        );
        Ok(leaves)
    }

    /// One training course: +1 skill, capped.
    pub fn train_driver(&mut self, driver_id: &DriverId) -> Result<f64, ActionError> {
        self.ensure_running().map_err(rejected("train_driver"))?;
        let driver = self
            .ledger
            .driver(driver_id)
            .ok_or_else(|| ActionError::UnknownDriver(driver_id.0.clone()))
            .map_err(rejected("train_driver"))?;
        if driver.firing_day.is_some() {
            return Err(rejected("train_driver")(ActionError::NoticeGiven(driver_id.0.clone())));
        }
        if driver.skill >= MAX_SKILL {
            return Err(rejected("train_driver")(ActionError::FullyTrained(driver_id.0.clone())));
        }
        let fee = Decimal::from(TRAINING_FEE_EUR);
        self.ensure_funds(fee).map_err(rejected("train_driver"))?;

        self.pay(fee);
        let mut name = String::new();
        let mut skill = 0.0;
        if let Some(d) = self.ledger.driver_mut(driver_id) {
            d.skill = (d.skill + 1.0).min(MAX_SKILL);
            skill = d.skill;
            name = d.name.clone();
        }
        info!(driver = %driver_id, skill, "driver trained");
        self.notify("Training", format!("{name} improved to {skill:.1}."), Severity::Success);
        Ok(skill)
    }

    /// Seat a driver in a truck, or take them off with `None`.
    pub fn assign_driver(
        &mut self,
        driver_id: &DriverId,
        truck_id: Option<&TruckId>,
    ) -> Result<(), ActionError> {
        self.ensure_running().map_err(rejected("assign_driver"))?;
        if self.ledger.driver(driver_id).is_none() {
            return Err(rejected("assign_driver")(ActionError::UnknownDriver(driver_id.0.clone())));
        }
        if let Some(t) = truck_id {
            self.find_truck(t).map_err(rejected("assign_driver"))?;
        }
        self.ledger.seat_driver(driver_id, truck_id);
        debug!(driver = %driver_id, truck = ?truck_id, "driver seated");
        let message = match truck_id {
            Some(t) => format!("Driver {driver_id} now drives {t}."),
            None => format!("Driver {driver_id} is off duty."),
        };
        self.notify("Crew change", message, Severity::Info);
        Ok(())
    }

    /// Couple a trailer standing at the truck's location.
    pub fn attach_trailer(
        &mut self,
        truck_id: &TruckId,
        trailer_id: &TrailerId,
    ) -> Result<(), ActionError> {
        self.ensure_running().map_err(rejected("attach_trailer"))?;
        self.check_attach(truck_id, trailer_id)
            .map_err(rejected("attach_trailer"))?;
        self.ledger.couple_trailer(truck_id, trailer_id);
        info!(truck = %truck_id, trailer = %trailer_id, "trailer attached");
        self.notify(
            "Coupled",
            format!("Trailer {trailer_id} coupled to {truck_id}."),
            Severity::Info,
        );
        Ok(())
    }

    fn check_attach(&self, truck_id: &TruckId, trailer_id: &TrailerId) -> Result<(), ActionError> {
        let truck = self.not_moving(truck_id)?;
        let trailer = self.find_trailer(trailer_id)?;
        if truck.trailer.is_some() {
            return Err(ActionError::TruckHasTrailer(truck_id.0.clone()));
        }
        if trailer.attached_to.is_some() {
            return Err(ActionError::TrailerInUse(trailer_id.0.clone()));
        }
        if truck.location != trailer.location {
            return Err(ActionError::DifferentLocation);
        }
        let vehicle = truck
            .model()
            .ok_or_else(|| ActionError::UnknownModel(truck.model_id.clone()))?;
        let trailer_model = trailer
            .model()
            .ok_or_else(|| ActionError::UnknownModel(trailer.model_id.clone()))?;
        if vehicle.class.tows() != trailer_model.weight_class {
            return Err(ActionError::WeightClassMismatch {
                vehicle: vehicle.name.to_string(),
                trailer: trailer_model.weight_class,
            });
        }
        Ok(())
    }

    /// Uncouple; the trailer stays where the truck stands.
    pub fn detach_trailer(&mut self, truck_id: &TruckId) -> Result<TrailerId, ActionError> {
        self.ensure_running().map_err(rejected("detach_trailer"))?;
        let truck = self.not_moving(truck_id).map_err(rejected("detach_trailer"))?;
        if truck.trailer.is_none() {
            return Err(rejected("detach_trailer")(ActionError::NoTrailer(truck_id.0.clone())));
        }
        let trailer_id = self
            .ledger
            .uncouple_trailer(truck_id)
            .ok_or_else(|| ActionError::NoTrailer(truck_id.0.clone()))?;
        info!(truck = %truck_id, trailer = %trailer_id, "trailer detached");
        self.notify(
            "Uncoupled",
            format!("Trailer {trailer_id} is ready at the yard."),
            Severity::Info,
        );
        Ok(trailer_id)
    }

    /// Take a job from the board.
    ///
    /// The truck drives to the job's source right away, burning the approach
    /// fuel, and sets off towards the target; the delivery leg is settled by
    /// the next tick.
    pub fn assign_job(&mut self, truck_id: &TruckId, job_id: &JobId) -> Result<(), ActionError> {
        self.ensure_running().map_err(rejected("assign_job"))?;
        let approach = self
            .check_assign(truck_id, job_id)
            .map_err(rejected("assign_job"))?;
        let Some(job) = self.ledger.job(job_id).cloned() else {
            return Err(ActionError::UnknownJob(job_id.0.clone()));
        };

        if let Some(truck) = self.ledger.truck_mut(truck_id) {
            truck.fuel = (truck.fuel - approach).max(0.0);
            truck.status = TruckStatus::Moving;
            truck.destination = Some(job.target.clone());
        }
        self.ledger.relocate_truck(truck_id, &job.source);
        self.ledger.bind_job(truck_id, job_id);
        self.ledger.set_crew_status(truck_id, DriverStatus::Driving);

        let target = self
            .geo
            .get(&job.target)
            .map_or(job.target.0.clone(), |l| l.name.clone());
        info!(
            truck = %truck_id,
            job = %job_id,
            approach_fuel = approach,
            payout = %job.payout_eur,
            "job started"
        );
        self.notify(
            "Job started",
            format!("{} {:.1} t to {target}.", job.cargo, job.weight_t),
            Severity::Info,
        );
        Ok(())
    }

    /// Validate a job assignment and return the approach fuel.
    fn check_assign(&self, truck_id: &TruckId, job_id: &JobId) -> Result<f64, ActionError> {
        let truck = self.parked_truck(truck_id)?;
        if truck.job.is_some() || self.ledger.active_jobs.contains_key(truck_id) {
            return Err(ActionError::TruckHasJob(truck_id.0.clone()));
        }
        let job = self
            .ledger
            .job(job_id)
            .ok_or_else(|| ActionError::UnknownJob(job_id.0.clone()))?;
        if self.ledger.is_job_assigned(job_id) {
            return Err(ActionError::JobTaken(job_id.0.clone()));
        }
        let equipment = self
            .ledger
            .equipment(truck)
            .ok_or_else(|| ActionError::UnknownModel(truck.model_id.clone()))?;
        equipment.check(job.cargo, job.weight_t)?;

        let km = route_km(&self.geo, &truck.location, &job.source)
            .map_err(|_| ActionError::UnknownLocation(job.source.0.clone()))?;
        let approach = base_fuel(km, equipment.vehicle);
        let required = approach * APPROACH_FUEL_MARGIN;
        if truck.fuel < required {
            return Err(ActionError::InsufficientFuel {
                required,
                available: truck.fuel,
            });
        }
        Ok(approach)
    }

    /// Send a truck without cargo to another location.
    pub fn send_empty(&mut self, truck_id: &TruckId, to: &LocationId) -> Result<(), ActionError> {
        self.ensure_running().map_err(rejected("send_empty"))?;
        self.check_send(truck_id, to).map_err(rejected("send_empty"))?;

        if let Some(truck) = self.ledger.truck_mut(truck_id) {
            truck.status = TruckStatus::Moving;
            truck.destination = Some(to.clone());
        }
        self.ledger.set_crew_status(truck_id, DriverStatus::Driving);
        let name = self.geo.get(to).map_or(to.0.clone(), |l| l.name.clone());
        info!(truck = %truck_id, to = %to, "empty run started");
        self.notify("Empty run", format!("On the way to {name}."), Severity::Info);
        Ok(())
    }

    fn check_send(&self, truck_id: &TruckId, to: &LocationId) -> Result<(), ActionError> {
        let truck = self.parked_truck(truck_id)?;
        if truck.job.is_some() {
            return Err(ActionError::TruckHasJob(truck_id.0.clone()));
        }
        if !self.geo.contains(to) {
            return Err(ActionError::UnknownLocation(to.0.clone()));
        }
        if &truck.location == to {
            return Err(ActionError::AlreadyThere(truck_id.0.clone()));
        }
        let model = truck
            .model()
            .ok_or_else(|| ActionError::UnknownModel(truck.model_id.clone()))?;
        let km = route_km(&self.geo, &truck.location, to)
            .map_err(|_| ActionError::UnknownLocation(truck.location.0.clone()))?;
        let required = base_fuel(km, model);
        if truck.fuel < required {
            return Err(ActionError::InsufficientFuel {
                required,
                available: truck.fuel,
            });
        }
        Ok(())
    }

    /// Fill the tank.
    pub fn refuel(&mut self, truck_id: &TruckId) -> Result<Decimal, ActionError> {
        self.ensure_running().map_err(rejected("refuel"))?;
        let truck = self.find_truck(truck_id).map_err(rejected("refuel"))?;
        let missing = truck.max_fuel - truck.fuel;
        if missing < MIN_REFUEL_AMOUNT {
            return Err(rejected("refuel")(ActionError::TankFull(truck_id.0.clone())));
        }
        let electric = truck.model().is_some_and(|m| m.electric);
        let cost = refuel_cost(missing, electric);
        self.ensure_funds(cost).map_err(rejected("refuel"))?;

        self.pay(cost);
        if let Some(truck) = self.ledger.truck_mut(truck_id) {
            truck.fuel = truck.max_fuel;
        }
        debug!(truck = %truck_id, missing, %cost, "refuelled");
        self.notify("Refuelled", format!("Tank filled for {cost} EUR."), Severity::Info);
        Ok(cost)
    }

    /// Open a garage at any location not owned yet.
    pub fn buy_garage(&mut self, at: &LocationId) -> Result<(), ActionError> {
        self.ensure_running().map_err(rejected("buy_garage"))?;
        if !self.geo.contains(at) {
            return Err(rejected("buy_garage")(ActionError::UnknownLocation(at.0.clone())));
        }
        if self.ledger.owns_garage(at) {
            return Err(rejected("buy_garage")(ActionError::GarageOwned(at.0.clone())));
        }
        let cost = Decimal::from(GARAGE_PRICE_EUR);
        self.ensure_funds(cost).map_err(rejected("buy_garage"))?;

        self.pay(cost);
        self.ledger.company.garages.push(at.clone());
        let name = self.geo.get(at).map_or(at.0.clone(), |l| l.name.clone());
        info!(location = %at, "garage bought");
        self.notify("Expansion", format!("New branch opened in {name}."), Severity::Success);
        Ok(())
    }

    /// Raise the workshop level by one.
    pub fn upgrade_garage(&mut self) -> Result<u8, ActionError> {
        self.ensure_running().map_err(rejected("upgrade_garage"))?;
        let level = self.ledger.company.garage_level;
        if level >= MAX_GARAGE_LEVEL {
            return Err(ActionError::MaxGarageLevel).map_err(rejected("upgrade_garage"));
        }
        let cost = garage_upgrade_cost(level);
        self.ensure_funds(cost).map_err(rejected("upgrade_garage"))?;

        self.pay(cost);
        self.ledger.company.garage_level = level + 1;
        info!(level = level + 1, %cost, "workshop upgraded");
        self.notify(
            "Workshop upgraded",
            format!("Workshop is now level {}.", level + 1),
            Severity::Success,
        );
        Ok(level + 1)
    }

    /// Pay back up to `amount` of the loan; returns what was paid.
    pub fn repay_loan(&mut self, amount: Decimal) -> Result<Decimal, ActionError> {
        self.ensure_running().map_err(rejected("repay_loan"))?;
        if amount <= Decimal::ZERO {
            return Err(ActionError::InvalidAmount).map_err(rejected("repay_loan"));
        }
        let loan = self.ledger.company.loan_eur;
        if loan.is_zero() {
            return Err(ActionError::NoLoan).map_err(rejected("repay_loan"));
        }
        let paid = amount.min(loan);
        self.ensure_funds(paid).map_err(rejected("repay_loan"))?;

        self.pay(paid);
        self.ledger.company.loan_eur -= paid;
        info!(%paid, remaining = %self.ledger.company.loan_eur, "loan repaid");
        self.notify(
            "Loan repaid",
            format!("{paid} EUR repaid, {} EUR outstanding.", self.ledger.company.loan_eur),
            Severity::Success,
        );
        Ok(paid)
    }
}
