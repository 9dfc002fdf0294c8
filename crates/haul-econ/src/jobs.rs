//! Job market generation.
//!
//! Every priority location (a place holding a player truck or garage) is
//! guaranteed a fixed number of fresh jobs; filler jobs sourced anywhere top
//! the board up to a ceiling without ever dropping priority jobs.

use crate::route::distance_km;
use haul_core::{CargoType, Geography, IdAllocator, Job, Location, LocationId};
use rand::Rng;
use rust_decimal::Decimal;
use tracing::{debug, warn};

/// Quotas for one board refresh.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoardSpec {
    pub per_priority_location: usize,
    pub ceiling: usize,
}

impl Default for BoardSpec {
    fn default() -> Self {
        Self {
            per_priority_location: 20,
            ceiling: 1000,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum LoadClass {
    Light,
    Heavy,
}

const LOAD_CLASS_TABLE: [(LoadClass, u32); 2] =
    [(LoadClass::Light, 35), (LoadClass::Heavy, 65)];

const LIGHT_CARGO: [CargoType; 6] = [
    CargoType::Express,
    CargoType::Mail,
    CargoType::Tools,
    CargoType::Furniture,
    CargoType::Electronics,
    CargoType::General,
];

/// Heavy cargo mix, weights in percent.
const HEAVY_CARGO_TABLE: [(CargoType, u32); 11] = [
    (CargoType::General, 45),
    (CargoType::Livestock, 5),
    (CargoType::Bulk, 5),
    (CargoType::Logs, 5),
    (CargoType::Vehicles, 5),
    (CargoType::Refrigerated, 5),
    (CargoType::Liquid, 5),
    (CargoType::Chemicals, 5),
    (CargoType::Dangerous, 5),
    (CargoType::Machinery, 5),
    (CargoType::Heavy, 10),
];

/// Probability that a job is urgent.
pub const URGENT_CHANCE: f64 = 0.10;
pub const URGENT_RATE_FACTOR: f64 = 1.5;
pub const URGENT_EXPIRY_DAYS: u32 = 2;
/// Payout divisor applied to distance × rate × weight.
pub const PAYOUT_DIVISOR: f64 = 6.0;
/// Payouts below this are replaced by a random minimum charge.
pub const MIN_PAYOUT_EUR: f64 = 100.0;

/// Draw one entry of a weighted table.
fn pick<T: Copy, R: Rng + ?Sized>(table: &[(T, u32)], rng: &mut R) -> T {
    let total: u32 = table.iter().map(|(_, w)| w).sum();
    let mut roll = rng.gen_range(0..total);
    for &(item, weight) in table {
        if roll < weight {
            return item;
        }
        roll -= weight;
    }
    table[table.len() - 1].0
}

/// Rate in EUR per ton per 100 km for heavy cargo.
pub fn heavy_base_rate(cargo: CargoType) -> f64 {
    match cargo {
        CargoType::Refrigerated => 2.5,
        CargoType::Dangerous | CargoType::Chemicals => 4.5,
        CargoType::Heavy | CargoType::Machinery => 5.0,
        CargoType::Liquid => 3.0,
        CargoType::Vehicles => 4.0,
        _ => 2.0,
    }
}

/// floor(distance × rate × weight / 6), before the minimum charge.
pub fn raw_payout(distance_km: f64, rate: f64, weight_t: f64) -> f64 {
    (distance_km * rate * weight_t / PAYOUT_DIVISOR).floor()
}

/// Rate after the urgency surcharge.
pub fn job_rate(base: f64, urgent: bool) -> f64 {
    if urgent {
        base * URGENT_RATE_FACTOR
    } else {
        base
    }
}

/// Apply the minimum charge: payouts under 100 become a whole amount
/// drawn from [100, 200). Draws from `rng` only in that case.
pub fn settle_payout<R: Rng + ?Sized>(raw: f64, rng: &mut R) -> f64 {
    if raw < MIN_PAYOUT_EUR {
        (MIN_PAYOUT_EUR + rng.gen_range(0.0..100.0)).floor()
    } else {
        raw
    }
}

/// Create one job sourced at `source` with a random destination.
///
/// `geo` must hold at least one location other than `source`.
pub fn generate_job<R: Rng + ?Sized>(
    geo: &Geography,
    source: &Location,
    day: u32,
    ids: &mut IdAllocator,
    rng: &mut R,
) -> Job {
    let all = geo.locations();
    let target = loop {
        let candidate = &all[rng.gen_range(0..all.len())];
        if candidate.id != source.id {
            break candidate;
        }
    };
    let distance = distance_km(source, target);

    let (cargo, weight_t, base_rate) = match pick(&LOAD_CLASS_TABLE, rng) {
        LoadClass::Light => {
            let cargo = LIGHT_CARGO[rng.gen_range(0..LIGHT_CARGO.len())];
            let weight = rng.gen_range(0.1..3.5);
            (cargo, weight, rng.gen_range(5.0..8.0))
        }
        LoadClass::Heavy => {
            let cargo = pick(&HEAVY_CARGO_TABLE, rng);
            let weight = f64::from(rng.gen_range(4u32..30));
            (cargo, weight, heavy_base_rate(cargo))
        }
    };

    let urgent = rng.gen_bool(URGENT_CHANCE);
    let rate = job_rate(base_rate, urgent);
    let payout = settle_payout(raw_payout(distance, rate, weight_t), rng);

    let expires_in_days = if urgent {
        URGENT_EXPIRY_DAYS
    } else {
        5 + rng.gen_range(0..5)
    };

    Job {
        id: ids.job(day),
        source: source.id.clone(),
        target: target.id.clone(),
        cargo,
        weight_t,
        payout_eur: Decimal::from(payout as i64),
        distance_km: distance.floor() as u32,
        expires_in_days,
        urgent,
    }
}

/// Produce a fresh job board for `day`.
///
/// Each distinct known priority location gets exactly
/// `spec.per_priority_location` jobs; filler jobs bring the total up to
/// `spec.ceiling` when there is room.
pub fn generate_board<R: Rng + ?Sized>(
    geo: &Geography,
    day: u32,
    priority: &[LocationId],
    spec: &BoardSpec,
    ids: &mut IdAllocator,
    rng: &mut R,
) -> Vec<Job> {
    if geo.len() < 2 {
        warn!(locations = geo.len(), "map too small for jobs");
        return Vec::new();
    }
    let mut seen: Vec<&LocationId> = Vec::with_capacity(priority.len());
    let mut jobs = Vec::new();
    for id in priority {
        if seen.contains(&id) {
            continue;
        }
        seen.push(id);
        let Some(source) = geo.get(id) else {
            warn!(location = %id, "priority location not on map");
            continue;
        };
        for _ in 0..spec.per_priority_location {
            jobs.push(generate_job(geo, source, day, ids, rng));
        }
    }
    let guaranteed = jobs.len();

    let all = geo.locations();
    for _ in 0..spec.ceiling.saturating_sub(guaranteed) {
        let source = &all[rng.gen_range(0..all.len())];
        jobs.push(generate_job(geo, source, day, ids, rng));
    }
    debug!(day, guaranteed, total = jobs.len(), "job board generated");
    jobs
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use rust_decimal::prelude::ToPrimitive;

    fn geo() -> Geography {
        Geography::generate(3, 2)
    }

    fn is_light(c: CargoType) -> bool {
        LIGHT_CARGO.contains(&c)
    }

    #[test]
    fn priority_quota_and_ceiling() {
        let geo = geo();
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let mut ids = IdAllocator::default();
        let prio = vec![
            LocationId::new("hub-0"),
            LocationId::new("hub-4"),
            LocationId::new("hub-0"),
        ];
        let board = generate_board(&geo, 1, &prio, &BoardSpec::default(), &mut ids, &mut rng);
        assert_eq!(board.len(), 1000);
        // Filler may also land on a priority hub, so count is at least the quota.
        for p in ["hub-0", "hub-4"] {
            let n = board.iter().filter(|j| j.source.as_str() == p).count();
            assert!(n >= 20, "{p}: {n}");
        }
        let guaranteed: Vec<_> = board.iter().take(40).collect();
        assert_eq!(guaranteed.iter().filter(|j| j.source.as_str() == "hub-0").count(), 20);
        assert_eq!(guaranteed.iter().filter(|j| j.source.as_str() == "hub-4").count(), 20);
    }

    #[test]
    fn priority_jobs_never_dropped_over_ceiling() {
        let geo = geo();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut ids = IdAllocator::default();
        let prio: Vec<_> = geo.hubs().map(|h| h.id.clone()).collect();
        let spec = BoardSpec {
            per_priority_location: 20,
            ceiling: 100,
        };
        let board = generate_board(&geo, 1, &prio, &spec, &mut ids, &mut rng);
        assert_eq!(board.len(), prio.len() * 20);
        for p in &prio {
            assert_eq!(board.iter().filter(|j| &j.source == p).count(), 20);
        }
    }

    #[test]
    fn unknown_priority_is_skipped() {
        let geo = geo();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut ids = IdAllocator::default();
        let spec = BoardSpec {
            per_priority_location: 20,
            ceiling: 0,
        };
        let board = generate_board(
            &geo,
            1,
            &[LocationId::new("atlantis")],
            &spec,
            &mut ids,
            &mut rng,
        );
        assert!(board.is_empty());
    }

    #[test]
    fn job_ids_unique() {
        let geo = geo();
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let mut ids = IdAllocator::default();
        let board = generate_board(&geo, 2, &[], &BoardSpec::default(), &mut ids, &mut rng);
        let mut seen: Vec<_> = board.iter().map(|j| j.id.clone()).collect();
        seen.sort();
        seen.dedup();
        assert_eq!(seen.len(), board.len());
    }

    #[test]
    fn light_heavy_mix_roughly_35_65() {
        let geo = geo();
        let mut rng = ChaCha8Rng::seed_from_u64(77);
        let mut ids = IdAllocator::default();
        let board = generate_board(&geo, 1, &[], &BoardSpec::default(), &mut ids, &mut rng);
        let light = board.iter().filter(|j| j.weight_t < 4.0).count() as f64;
        let share = light / board.len() as f64;
        assert!((0.28..0.42).contains(&share), "light share {share}");
        let urgent = board.iter().filter(|j| j.urgent).count() as f64 / board.len() as f64;
        assert!((0.05..0.15).contains(&urgent), "urgent share {urgent}");
    }

    #[test]
    fn weighted_pick_respects_zero_weight() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let table = [(1u8, 0), (2u8, 5)];
        for _ in 0..100 {
            assert_eq!(pick(&table, &mut rng), 2);
        }
    }

    #[test]
    fn payout_is_floored_sixth_of_distance_rate_weight() {
        assert_eq!(raw_payout(400.0, 2.0, 20.0), 2666.0);
        assert_eq!(raw_payout(100.0, 2.5, 5.0), 208.0);
        assert_eq!(raw_payout(52.0, 7.5, 1.0), 65.0);
        assert_eq!(raw_payout(0.0, 5.0, 29.0), 0.0);
    }

    #[test]
    fn urgent_jobs_pay_half_again() {
        assert_eq!(job_rate(2.0, false), 2.0);
        assert_eq!(job_rate(2.0, true), 3.0);
        assert_eq!(raw_payout(400.0, job_rate(2.0, true), 20.0), 4000.0);
        assert_eq!(raw_payout(600.0, job_rate(2.5, true), 12.0), 4500.0);
    }

    #[test]
    fn heavy_rates_per_cargo_class() {
        // 600 km, 12 t: payout is 1200 × rate.
        let expected = [
            (CargoType::General, 2.0, 2400.0),
            (CargoType::Livestock, 2.0, 2400.0),
            (CargoType::Bulk, 2.0, 2400.0),
            (CargoType::Logs, 2.0, 2400.0),
            (CargoType::Refrigerated, 2.5, 3000.0),
            (CargoType::Liquid, 3.0, 3600.0),
            (CargoType::Vehicles, 4.0, 4800.0),
            (CargoType::Chemicals, 4.5, 5400.0),
            (CargoType::Dangerous, 4.5, 5400.0),
            (CargoType::Machinery, 5.0, 6000.0),
            (CargoType::Heavy, 5.0, 6000.0),
        ];
        assert_eq!(expected.len(), HEAVY_CARGO_TABLE.len());
        for (cargo, rate, payout) in expected {
            assert!(HEAVY_CARGO_TABLE.iter().any(|(c, _)| *c == cargo), "{cargo}");
            assert_eq!(heavy_base_rate(cargo), rate, "{cargo}");
            assert_eq!(raw_payout(600.0, heavy_base_rate(cargo), 12.0), payout, "{cargo}");
        }
    }

    #[test]
    fn heavy_cargo_mix_follows_weights() {
        let mut rng = ChaCha8Rng::seed_from_u64(21);
        let draws = 40_000;
        let mut counts = std::collections::BTreeMap::new();
        for _ in 0..draws {
            *counts.entry(pick(&HEAVY_CARGO_TABLE, &mut rng)).or_insert(0u32) += 1;
        }
        for (cargo, weight) in HEAVY_CARGO_TABLE {
            let share = f64::from(counts.get(&cargo).copied().unwrap_or(0)) / f64::from(draws);
            let want = f64::from(weight) / 100.0;
            assert!((share - want).abs() < 0.015, "{cargo}: {share} vs {want}");
        }
    }

    #[test]
    fn minimum_charge_only_below_one_hundred() {
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        assert_eq!(settle_payout(100.0, &mut rng), 100.0);
        assert_eq!(settle_payout(2666.0, &mut rng), 2666.0);
        for raw in [0.0, 1.0, 65.0, 99.0] {
            let p = settle_payout(raw, &mut rng);
            assert!((100.0..200.0).contains(&p), "{raw} -> {p}");
            assert_eq!(p.fract(), 0.0);
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]
        #[test]
        fn settled_payout_never_below_minimum(raw in 0u32..100_000, seed in any::<u64>()) {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let raw = f64::from(raw);
            let p = settle_payout(raw, &mut rng);
            prop_assert!(p >= MIN_PAYOUT_EUR);
            prop_assert_eq!(p.fract(), 0.0);
            if raw < MIN_PAYOUT_EUR {
                prop_assert!(p < MIN_PAYOUT_EUR + 100.0);
            } else {
                prop_assert_eq!(p, raw);
            }
        }

        #[test]
        fn heavy_job_payout_matches_formula(seed in any::<u64>(), src in 0usize..180) {
            let geo = geo();
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let mut ids = IdAllocator::default();
            let source = &geo.locations()[src % geo.len()];
            let job = generate_job(&geo, source, 1, &mut ids, &mut rng);
            let target = geo.get(&job.target).unwrap();
            let km = distance_km(source, target);
            prop_assert_eq!(job.distance_km, km.floor() as u32);
            if job.weight_t >= 4.0 {
                let rate = job_rate(heavy_base_rate(job.cargo), job.urgent);
                let raw = raw_payout(km, rate, job.weight_t);
                let payout = job.payout_eur.to_f64().unwrap();
                if raw >= MIN_PAYOUT_EUR {
                    prop_assert_eq!(payout, raw);
                } else {
                    prop_assert!((100.0..200.0).contains(&payout));
                }
            }
        }

        #[test]
        fn generated_job_bounds(seed in any::<u64>(), src in 0usize..180) {
            let geo = geo();
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let mut ids = IdAllocator::default();
            let source = &geo.locations()[src % geo.len()];
            let job = generate_job(&geo, source, 1, &mut ids, &mut rng);
            prop_assert!(job.target != job.source);
            prop_assert!(job.payout_eur >= Decimal::from(100));
            if is_light(job.cargo) && job.weight_t < 4.0 {
                prop_assert!((0.1..3.5).contains(&job.weight_t));
            } else {
                prop_assert!((4.0..30.0).contains(&job.weight_t));
                prop_assert_eq!(job.weight_t.fract(), 0.0);
            }
            if job.urgent {
                prop_assert_eq!(job.expires_in_days, 2);
            } else {
                prop_assert!((5..10).contains(&job.expires_in_days));
            }
        }
    }
}
