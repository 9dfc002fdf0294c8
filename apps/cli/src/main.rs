#![deny(warnings)]
//! Headless driver: found a company (or resume a save), run the fleet on
//! autopilot for a number of days and print the books.

use anyhow::{bail, Context, Result};
use haul_core::{LocationId, SimConfig, TruckStatus};
use haul_runtime::{load_config, Simulation, TruckOffer};
use persistence::{load_game, save_game, DirStore, Leaderboard, SnapshotError};
use rust_decimal::Decimal;
use std::path::PathBuf;
use tracing::{info, warn, Level};
use tracing_subscriber::EnvFilter;

/// Idle trucks below this tank share get refuelled.
const REFUEL_BELOW: f64 = 0.3;

struct Args {
    days: u32,
    seed: Option<u64>,
    hq: String,
    loan: usize,
    company: String,
    config: Option<PathBuf>,
    save_dir: Option<PathBuf>,
    user: String,
    resume: bool,
}

fn parse_args() -> Args {
    let mut args = Args {
        days: 30,
        seed: None,
        hq: "hub-0".to_string(),
        loan: 3,
        company: "Euro Haul Logistics".to_string(),
        config: None,
        save_dir: None,
        user: "player".to_string(),
        resume: false,
    };
    let mut it = std::env::args().skip(1);
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "--days" => args.days = it.next().and_then(|s| s.parse().ok()).unwrap_or(args.days),
            "--seed" => args.seed = it.next().and_then(|s| s.parse().ok()),
            "--hq" => args.hq = it.next().unwrap_or(args.hq),
            "--loan" => args.loan = it.next().and_then(|s| s.parse().ok()).unwrap_or(args.loan),
            "--company" => args.company = it.next().unwrap_or(args.company),
            "--config" => args.config = it.next().map(PathBuf::from),
            "--save-dir" => args.save_dir = it.next().map(PathBuf::from),
            "--user" => args.user = it.next().unwrap_or(args.user),
            "--resume" => args.resume = true,
            other => warn!(arg = other, "ignoring unknown argument"),
        }
    }
    args
}

fn config(args: &Args) -> Result<SimConfig> {
    let mut cfg = match &args.config {
        Some(path) => load_config(path).with_context(|| format!("loading {}", path.display()))?,
        None => SimConfig::default(),
    };
    if let Some(seed) = args.seed {
        cfg.rng_seed = seed;
        cfg.map_seed = seed;
    }
    Ok(cfg)
}

/// A tractor with a curtain trailer when affordable, else a van. Staffed
/// with the most skilled recruit.
fn starter_rig(sim: &mut Simulation) -> Result<()> {
    let truck = match sim.buy_truck("daf_xf_480", TruckOffer::New, None) {
        Ok(truck) => {
            let trailer = sim.buy_trailer("semi_curtain", false, None)?;
            sim.attach_trailer(&truck, &trailer)?;
            truck
        }
        Err(e) => {
            info!(reason = %e, "no tractor budget, starting with a van");
            sim.buy_truck("van_basic", TruckOffer::New, None)?
        }
    };
    let best = sim
        .ledger()
        .recruits
        .iter()
        .max_by(|a, b| a.skill.total_cmp(&b.skill))
        .map(|d| d.id.clone());
    if let Some(recruit) = best {
        let driver = sim.hire_driver(&recruit)?;
        sim.assign_driver(&driver, Some(&truck))?;
    }
    Ok(())
}

/// Keep parked trucks serviceable, then hand out work.
fn autopilot(sim: &mut Simulation) {
    let parked: Vec<_> = sim
        .ledger()
        .trucks
        .iter()
        .filter(|t| t.status != TruckStatus::Moving)
        .map(|t| (t.id.clone(), t.status, t.fuel / t.max_fuel))
        .collect();
    for (id, status, tank) in parked {
        if status == TruckStatus::Broken {
            if let Err(e) = sim.repair_truck(&id) {
                warn!(truck = %id, reason = %e, "repair skipped");
            }
        }
        if tank < REFUEL_BELOW {
            if let Err(e) = sim.refuel(&id) {
                warn!(truck = %id, reason = %e, "refuel skipped");
            }
        }
    }
    for p in haul_dispatch::plan(sim.ledger(), sim.geography()) {
        match sim.assign_job(&p.truck, &p.job) {
            Ok(()) => info!(truck = %p.truck, job = %p.job, score = p.score, "dispatched"),
            Err(e) => warn!(truck = %p.truck, job = %p.job, reason = %e, "dispatch refused"),
        }
    }
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_max_level(Level::INFO)
        .init();

    let args = parse_args();
    let cfg = config(&args)?;
    info!(days = args.days, hq = %args.hq, user = %args.user, "starting CLI");

    let store = match &args.save_dir {
        Some(dir) => Some(DirStore::open(dir)?),
        None => None,
    };
    let saved = match (&store, args.resume) {
        (Some(store), true) => load_game(store, &args.user)?,
        (None, true) => bail!("--resume needs --save-dir"),
        _ => None,
    };
    let mut sim = match saved {
        Some(ledger) => Simulation::resume(ledger, cfg).context("saved game is inconsistent")?,
        None => {
            let hq = LocationId::new(args.hq.as_str());
            let mut sim = Simulation::new_game(cfg, &args.company, &hq, args.loan)?;
            starter_rig(&mut sim)?;
            sim
        }
    };

    let start_cash = sim.ledger().company.cash_eur;
    let mut revenue = Decimal::ZERO;
    let mut days_run = 0;
    for _ in 0..args.days {
        autopilot(&mut sim);
        let report = sim.advance_day()?;
        revenue += report.revenue;
        days_run += 1;
        for line in &report.log {
            info!(day = report.day_ended, "{line}");
        }
        if report.bankrupt {
            warn!(day = report.day_ended, "company went bankrupt");
            break;
        }
    }

    let ledger = sim.ledger();
    println!(
        "{} | day {} | ran {} days | game over: {}",
        ledger.company.name, ledger.day, days_run, ledger.game_over
    );
    println!(
        "KPI | cash: €{} ({:+}) | loan: €{} | revenue: €{} | net worth: €{}",
        ledger.company.cash_eur,
        ledger.company.cash_eur - start_cash,
        ledger.company.loan_eur,
        revenue,
        haul_econ::net_worth(ledger),
    );
    println!(
        "FLEET | trucks: {} | drivers: {} | open jobs: {}",
        ledger.trucks.len(),
        ledger.drivers.len(),
        ledger.open_jobs().count(),
    );

    if let Some(mut store) = store {
        let today = chrono::Utc::now().date_naive();
        match save_game(&mut store, &args.user, ledger, today) {
            Err(SnapshotError::ScoreNotRecorded(e)) => warn!(reason = %e, "score not recorded"),
            other => other?,
        }
        let board = Leaderboard::load(&store)?;
        for (rank, s) in board.entries().iter().enumerate() {
            println!("#{:<2} {:<30} €{:>14} {}", rank + 1, s.company, s.net_worth, s.date);
        }
        info!(dir = %store.root().display(), "saved");
    }
    Ok(())
}
