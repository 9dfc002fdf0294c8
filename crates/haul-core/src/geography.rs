//! Geography table: named hubs with procedurally placed satellite towns.

use crate::ids::LocationId;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Side length of the normalized map plane.
pub const MAP_EXTENT: f64 = 1000.0;

/// A named place on the map. Immutable after generation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// Stable identifier, referenced by every other record.
    pub id: LocationId,
    /// Display name.
    pub name: String,
    /// Horizontal coordinate in [0, 1000].
    pub x: f64,
    /// Vertical coordinate in [0, 1000].
    pub y: f64,
    /// Major city that may host the headquarters.
    pub is_hub: bool,
    /// ISO-like country code.
    pub country: String,
}

struct HubSeed {
    name: &'static str,
    x: f64,
    y: f64,
    country: &'static str,
}

const fn hub(name: &'static str, x: f64, y: f64, country: &'static str) -> HubSeed {
    HubSeed {
        name,
        x,
        y,
        country,
    }
}

static HUBS: [HubSeed; 60] = [
    hub("Berlin", 550.0, 350.0, "DE"),
    hub("Hamburg", 520.0, 280.0, "DE"),
    hub("Munich", 560.0, 480.0, "DE"),
    hub("Frankfurt", 500.0, 400.0, "DE"),
    hub("Cologne", 450.0, 380.0, "DE"),
    hub("Stuttgart", 490.0, 450.0, "DE"),
    hub("Leipzig", 560.0, 380.0, "DE"),
    hub("Nuremberg", 540.0, 430.0, "DE"),
    hub("Paris", 350.0, 450.0, "FR"),
    hub("Lyon", 380.0, 550.0, "FR"),
    hub("Marseille", 400.0, 650.0, "FR"),
    hub("Bordeaux", 280.0, 580.0, "FR"),
    hub("Strasbourg", 430.0, 440.0, "FR"),
    hub("Lille", 370.0, 360.0, "FR"),
    hub("London", 320.0, 320.0, "UK"),
    hub("Manchester", 300.0, 280.0, "UK"),
    hub("Birmingham", 290.0, 300.0, "UK"),
    hub("Glasgow", 280.0, 220.0, "UK"),
    hub("Dublin", 220.0, 280.0, "IE"),
    hub("Madrid", 200.0, 700.0, "ES"),
    hub("Barcelona", 350.0, 750.0, "ES"),
    hub("Valencia", 280.0, 750.0, "ES"),
    hub("Seville", 180.0, 800.0, "ES"),
    hub("Bilbao", 220.0, 650.0, "ES"),
    hub("Lisbon", 100.0, 720.0, "PT"),
    hub("Porto", 100.0, 680.0, "PT"),
    hub("Rome", 580.0, 720.0, "IT"),
    hub("Milan", 500.0, 600.0, "IT"),
    hub("Turin", 460.0, 600.0, "IT"),
    hub("Venice", 550.0, 620.0, "IT"),
    hub("Naples", 600.0, 780.0, "IT"),
    hub("Amsterdam", 400.0, 330.0, "NL"),
    hub("Rotterdam", 390.0, 340.0, "NL"),
    hub("Brussels", 380.0, 360.0, "BE"),
    hub("Antwerp", 385.0, 350.0, "BE"),
    hub("Zurich", 480.0, 520.0, "CH"),
    hub("Vienna", 620.0, 500.0, "AT"),
    hub("Salzburg", 580.0, 510.0, "AT"),
    hub("Warsaw", 700.0, 350.0, "PL"),
    hub("Krakow", 700.0, 400.0, "PL"),
    hub("Gdansk", 680.0, 280.0, "PL"),
    hub("Poznan", 650.0, 350.0, "PL"),
    hub("Prague", 600.0, 420.0, "CZ"),
    hub("Budapest", 680.0, 550.0, "HU"),
    hub("Copenhagen", 530.0, 200.0, "DK"),
    hub("Stockholm", 650.0, 150.0, "SE"),
    hub("Gothenburg", 580.0, 180.0, "SE"),
    hub("Oslo", 500.0, 100.0, "NO"),
    hub("Helsinki", 700.0, 120.0, "FI"),
    hub("Riga", 750.0, 250.0, "LV"),
    hub("Vilnius", 780.0, 300.0, "LT"),
    hub("Tallinn", 750.0, 180.0, "EE"),
    hub("Athens", 800.0, 850.0, "GR"),
    hub("Thessaloniki", 780.0, 800.0, "GR"),
    hub("Istanbul", 900.0, 800.0, "TR"),
    hub("Bucharest", 820.0, 580.0, "RO"),
    hub("Sofia", 800.0, 650.0, "BG"),
    hub("Belgrade", 750.0, 600.0, "RS"),
    hub("Zagreb", 660.0, 580.0, "HR"),
    hub("Ljubljana", 610.0, 560.0, "SI"),
];

const SUFFIXES: [&str; 12] = [
    "North",
    "South",
    "Harbour",
    "Industrial",
    "Logistics Park",
    "Suburb",
    "Centre",
    "West",
    "East",
    "Business Park",
    "Airport",
    "Fairground",
];

/// Immutable set of locations with id lookup.
#[derive(Clone, Debug, Default)]
pub struct Geography {
    locations: Vec<Location>,
    index: BTreeMap<LocationId, usize>,
}

impl Geography {
    /// Build a table from explicit locations (tests, custom scenarios).
    pub fn from_locations(locations: Vec<Location>) -> Self {
        let index = locations
            .iter()
            .enumerate()
            .map(|(i, l)| (l.id.clone(), i))
            .collect();
        Self { locations, index }
    }

    /// Generate the European map. The same seed always yields the same map.
    pub fn generate(seed: u64, satellites_per_hub: usize) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut locations = Vec::with_capacity(HUBS.len() * (satellites_per_hub + 1));
        for (i, h) in HUBS.iter().enumerate() {
            locations.push(Location {
                id: LocationId(format!("hub-{i}")),
                name: h.name.to_string(),
                x: h.x,
                y: h.y,
                is_hub: true,
                country: h.country.to_string(),
            });
            for j in 0..satellites_per_hub {
                let angle = rng.gen_range(0.0..std::f64::consts::TAU);
                let offset = rng.gen_range(10.0..50.0);
                let suffix = SUFFIXES[rng.gen_range(0..SUFFIXES.len())];
                locations.push(Location {
                    id: LocationId(format!("city-{}-{j}", h.name)),
                    name: format!("{} {suffix}", h.name),
                    x: (h.x + angle.cos() * offset).clamp(0.0, MAP_EXTENT),
                    y: (h.y + angle.sin() * offset).clamp(0.0, MAP_EXTENT),
                    is_hub: false,
                    country: h.country.to_string(),
                });
            }
        }
        locations.sort_by(|a, b| a.name.cmp(&b.name));
        Self::from_locations(locations)
    }

    pub fn get(&self, id: &LocationId) -> Option<&Location> {
        self.index.get(id).map(|&i| &self.locations[i])
    }

    pub fn contains(&self, id: &LocationId) -> bool {
        self.index.contains_key(id)
    }

    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    pub fn hubs(&self) -> impl Iterator<Item = &Location> {
        self.locations.iter().filter(|l| l.is_hub)
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }
}
