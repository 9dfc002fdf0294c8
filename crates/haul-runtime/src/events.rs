//! Flavor world events. Purely informational; they never touch the books.

use haul_core::Severity;
use rand::Rng;

/// Daily chance that a world event is reported.
pub const WORLD_EVENT_CHANCE: f64 = 0.2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WorldEvent {
    pub title: &'static str,
    pub message: &'static str,
    pub severity: Severity,
}

pub static WORLD_EVENTS: [WorldEvent; 4] = [
    WorldEvent {
        title: "Congestion on the A7",
        message: "Delays across the north.",
        severity: Severity::Warning,
    },
    WorldEvent {
        title: "Strike in France",
        message: "Border crossings blocked.",
        severity: Severity::Warning,
    },
    WorldEvent {
        title: "Diesel prices falling",
        message: "Fuel is cheaper this week.",
        severity: Severity::Success,
    },
    WorldEvent {
        title: "Snowstorm",
        message: "Dangerous road conditions in the Alps.",
        severity: Severity::Info,
    },
];

/// Roll for today's world event.
pub fn roll_world_event<R: Rng + ?Sized>(rng: &mut R) -> Option<&'static WorldEvent> {
    if rng.gen_bool(WORLD_EVENT_CHANCE) {
        Some(&WORLD_EVENTS[rng.gen_range(0..WORLD_EVENTS.len())])
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn roughly_one_day_in_five() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let hits = (0..5_000).filter(|_| roll_world_event(&mut rng).is_some()).count();
        assert!((800..1_200).contains(&hits), "{hits}");
    }
}
