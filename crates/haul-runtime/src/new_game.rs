//! Founding a company.

use crate::{ActionError, Simulation};
use haul_core::{Company, Geography, Ledger, LocationId, Severity, SimConfig, LOAN_OFFERS};
use haul_econ::{generate_board, generate_recruits};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::info;

impl Simulation {
    /// Found a company at hub `hq` with the chosen loan offer.
    ///
    /// Cash starts at the configured capital plus the loan principal; the HQ
    /// is the only garage. The job board and recruit pool are filled once.
    pub fn new_game(
        cfg: SimConfig,
        name: &str,
        hq: &LocationId,
        loan_offer: usize,
    ) -> Result<Self, ActionError> {
        let geo = Geography::generate(cfg.map_seed, cfg.satellites_per_hub);
        Self::new_game_on(geo, cfg, name, hq, loan_offer)
    }

    /// Like [`Simulation::new_game`] on an explicit map.
    pub fn new_game_on(
        geo: Geography,
        cfg: SimConfig,
        name: &str,
        hq: &LocationId,
        loan_offer: usize,
    ) -> Result<Self, ActionError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ActionError::EmptyName);
        }
        let offer = LOAN_OFFERS
            .get(loan_offer)
            .ok_or(ActionError::UnknownLoanOffer(loan_offer))?;
        let location = geo
            .get(hq)
            .ok_or_else(|| ActionError::UnknownLocation(hq.0.clone()))?;
        if !location.is_hub {
            return Err(ActionError::NotAHub(hq.0.clone()));
        }

        let company = Company {
            name: name.to_string(),
            cash_eur: cfg.starting_capital + offer.amount(),
            loan_eur: offer.amount(),
            interest_rate: offer.rate(),
            hq: hq.clone(),
            garages: vec![hq.clone()],
            garage_level: 1,
            reputation: 0,
        };
        let mut ledger = Ledger::new(company, cfg.map_seed);
        let mut rng = ChaCha8Rng::seed_from_u64(cfg.rng_seed);
        ledger.jobs = generate_board(
            &geo,
            ledger.day,
            std::slice::from_ref(hq),
            &Self::board_spec(&cfg),
            &mut ledger.ids,
            &mut rng,
        );
        ledger.recruits = generate_recruits(&mut ledger.ids, &mut rng);
        let welcome = format!("{name} opens its doors in {}.", location.name);
        ledger.log_event("Company founded", welcome, Severity::Success, cfg.event_log_cap);
        info!(
            company = name,
            hq = %hq,
            loan = %offer.amount(),
            jobs = ledger.jobs.len(),
            "new game"
        );

        let mut sim = Self::from_parts(ledger, geo, cfg);
        sim.rng = rng;
        Ok(sim)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn cfg() -> SimConfig {
        SimConfig {
            satellites_per_hub: 3,
            ..SimConfig::default()
        }
    }

    #[test]
    fn founding_with_loan() {
        let sim = Simulation::new_game(cfg(), "Haulers", &LocationId::new("hub-0"), 1).unwrap();
        let l = sim.ledger();
        assert_eq!(l.day, 1);
        assert_eq!(l.company.cash_eur, Decimal::from(350_000));
        assert_eq!(l.company.loan_eur, Decimal::from(250_000));
        assert_eq!(l.company.interest_rate, Decimal::new(5, 2));
        assert_eq!(l.company.garages, vec![LocationId::new("hub-0")]);
        assert_eq!(l.jobs.len(), 1000);
        assert!(l.jobs.iter().filter(|j| j.source.as_str() == "hub-0").count() >= 20);
        assert_eq!(l.recruits.len(), 12);
        assert_eq!(l.events.len(), 1);
    }

    #[test]
    fn hq_must_be_a_known_hub() {
        let err = Simulation::new_game(cfg(), "X", &LocationId::new("city-Berlin-0"), 3)
            .err()
            .unwrap();
        assert_eq!(err, ActionError::NotAHub("city-Berlin-0".into()));
        let err = Simulation::new_game(cfg(), "X", &LocationId::new("nowhere"), 3)
            .err()
            .unwrap();
        assert_eq!(err, ActionError::UnknownLocation("nowhere".into()));
        let err = Simulation::new_game(cfg(), "X", &LocationId::new("hub-0"), 9)
            .err()
            .unwrap();
        assert_eq!(err, ActionError::UnknownLoanOffer(9));
        let err = Simulation::new_game(cfg(), "  ", &LocationId::new("hub-0"), 3)
            .err()
            .unwrap();
        assert_eq!(err, ActionError::EmptyName);
    }
}
