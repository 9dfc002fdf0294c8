//! Driver recruit pool generation.

use haul_core::{Driver, DriverStatus, IdAllocator, DRIVER_NAMES};
use rand::Rng;
use rust_decimal::Decimal;

/// Candidates offered per refresh.
pub const RECRUIT_POOL_SIZE: usize = 12;
pub const MIN_RECRUIT_SKILL: f64 = 1.0;
pub const MAX_RECRUIT_SKILL: f64 = 7.0;

/// Salary asked by a candidate: 2000 + 300 per skill point plus a random premium.
pub fn asking_salary<R: Rng + ?Sized>(skill: f64, rng: &mut R) -> Decimal {
    let salary = (2000.0 + skill * 300.0 + rng.gen_range(0.0..500.0)).floor();
    Decimal::from(salary as i64)
}

/// Build a fresh pool of candidates. Names are a surname plus an initial.
pub fn generate_recruits<R: Rng + ?Sized>(ids: &mut IdAllocator, rng: &mut R) -> Vec<Driver> {
    (0..RECRUIT_POOL_SIZE)
        .map(|i| {
            let surname = DRIVER_NAMES[rng.gen_range(0..DRIVER_NAMES.len())];
            let initial = char::from(b'A' + i as u8);
            // One decimal place keeps the pool readable.
            let skill = (rng.gen_range(MIN_RECRUIT_SKILL..MAX_RECRUIT_SKILL) * 10.0).floor() / 10.0;
            Driver {
                id: ids.recruit(),
                name: format!("{surname} {initial}."),
                salary_eur: asking_salary(skill, rng),
                skill,
                status: DriverStatus::Idle,
                truck: None,
                firing_day: None,
            }
        })
        .collect()
}
