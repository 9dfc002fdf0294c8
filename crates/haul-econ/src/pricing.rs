//! Money formulas: interest, purchase and resale prices, service costs.

use haul_core::catalog::{DIESEL_PRICE_CENTS, ELECTRIC_PRICE_CENTS};
use haul_core::Ledger;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Price of a new garage.
pub const GARAGE_PRICE_EUR: i64 = 250_000;
/// Per-level cost of a workshop upgrade.
pub const GARAGE_UPGRADE_STEP_EUR: i64 = 100_000;
pub const MAX_GARAGE_LEVEL: u8 = 5;
/// One-off signing fee when hiring a driver.
pub const HIRE_FEE_EUR: i64 = 1_000;
pub const TRAINING_FEE_EUR: i64 = 5_000;
/// Base charge added to repairs of broken-down trucks.
pub const BREAKDOWN_REPAIR_BASE_EUR: i64 = 2_000;
/// Repair cost per missing condition point.
pub const REPAIR_PER_POINT_EUR: i64 = 150;
/// Charged when a truck runs dry on the road.
pub const EMERGENCY_REFUEL_PENALTY_EUR: i64 = 5_000;
/// Minimum missing fuel for a refuel to be worth a stop.
pub const MIN_REFUEL_AMOUNT: f64 = 10.0;

/// Purchase condition of a truck.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TruckOffer {
    New,
    UsedGood,
    UsedBad,
}

impl TruckOffer {
    /// Fraction of list price charged.
    pub fn price_factor(self) -> Decimal {
        match self {
            TruckOffer::New => Decimal::ONE,
            TruckOffer::UsedGood => Decimal::new(7, 1),
            TruckOffer::UsedBad => Decimal::new(4, 1),
        }
    }

    pub fn condition(self) -> f64 {
        match self {
            TruckOffer::New => 100.0,
            TruckOffer::UsedGood => 70.0,
            TruckOffer::UsedBad => 40.0,
        }
    }

    pub fn mileage_km(self) -> f64 {
        match self {
            TruckOffer::New => 0.0,
            TruckOffer::UsedGood => 150_000.0,
            TruckOffer::UsedBad => 500_000.0,
        }
    }
}

fn dec(x: f64) -> Decimal {
    Decimal::from_f64(x).unwrap_or(Decimal::ZERO)
}

/// Daily interest: floor(principal × annual rate / 30).
pub fn daily_interest(loan: Decimal, annual_rate: Decimal) -> Decimal {
    (loan * annual_rate / Decimal::from(30)).floor()
}

/// Used trailer price: floor(list × 0.6).
pub fn used_trailer_price(list: Decimal) -> Decimal {
    (list * Decimal::new(6, 1)).floor()
}

/// Sale proceeds: floor(value × 0.8 × condition / 100).
pub fn resale_value(value: Decimal, condition: f64) -> Decimal {
    (value * Decimal::new(8, 1) * dec(condition) / Decimal::from(100)).floor()
}

/// Repair bill restoring condition 100.
pub fn repair_cost(condition: f64, broken: bool) -> Decimal {
    let base = if broken { BREAKDOWN_REPAIR_BASE_EUR } else { 0 };
    let damage = (100.0 - condition).max(0.0);
    (Decimal::from(base) + dec(damage) * Decimal::from(REPAIR_PER_POINT_EUR)).floor()
}

/// Cost of topping up `missing` units of fuel or energy.
pub fn refuel_cost(missing: f64, electric: bool) -> Decimal {
    let cents = if electric {
        ELECTRIC_PRICE_CENTS
    } else {
        DIESEL_PRICE_CENTS
    };
    (dec(missing) * Decimal::new(i64::from(cents), 2)).floor()
}

/// Workshop upgrade cost from the current level.
pub fn garage_upgrade_cost(level: u8) -> Decimal {
    Decimal::from(GARAGE_UPGRADE_STEP_EUR) * Decimal::from(level)
}

/// Net worth for the leaderboard: cash − loan + Σ truck value.
pub fn net_worth(ledger: &Ledger) -> Decimal {
    let fleet: Decimal = ledger.trucks.iter().map(|t| t.value_eur).sum();
    ledger.company.cash_eur - ledger.company.loan_eur + fleet
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn interest_is_floored_daily_share() {
        let i = daily_interest(Decimal::from(250_000), Decimal::new(5, 2));
        assert_eq!(i, Decimal::from(416));
        assert_eq!(daily_interest(Decimal::ZERO, Decimal::new(8, 2)), Decimal::ZERO);
    }

    #[test]
    fn repair_prices() {
        assert_eq!(repair_cost(100.0, false), Decimal::ZERO);
        assert_eq!(repair_cost(100.0, true), Decimal::from(2_000));
        assert_eq!(repair_cost(40.0, false), Decimal::from(9_000));
    }

    #[test]
    fn resale_and_used_prices() {
        assert_eq!(resale_value(Decimal::from(100_000), 50.0), Decimal::from(40_000));
        assert_eq!(used_trailer_price(Decimal::from(1_500)), Decimal::from(900));
        assert_eq!(refuel_cost(100.0, false), Decimal::from(165));
        assert_eq!(refuel_cost(100.0, true), Decimal::from(45));
        assert_eq!(garage_upgrade_cost(2), Decimal::from(200_000));
    }

    #[test]
    fn truck_offers() {
        assert_eq!(TruckOffer::UsedBad.price_factor() * Decimal::from(100), Decimal::from(40));
        assert_eq!(TruckOffer::UsedGood.condition(), 70.0);
    }

    proptest! {
        #[test]
        fn resale_never_exceeds_value(v in 0i64..1_000_000, c in 0.0f64..=100.0) {
            let value = Decimal::from(v);
            let r = resale_value(value, c);
            prop_assert!(r >= Decimal::ZERO);
            prop_assert!(r <= value);
        }
    }
}
