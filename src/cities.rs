//! Nearby-city registry.
//!
//! A fixed table of neighbouring towns for a handful of metro areas, used to
//! suggest alternative places to check when the air at home is bad. Keys are
//! `"<City>,<CountryCode>"`; lookups match on the city part only.
//!
//! This is a hand-maintained list, not a geocoder. Cities outside the table
//! simply have no neighbours.

use rand::Rng;
use rand::seq::SliceRandom;
use serde::Serialize;

/// How many neighbours `random_nearby_cities` returns when the caller does
/// not ask for a specific number.
pub const DEFAULT_NEARBY_COUNT: usize = 3;

// ---------------------------------------------------------------------------
// City metadata
// ---------------------------------------------------------------------------

/// A town near one of the registered metro areas.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NearbyCity {
    pub name: &'static str,
    /// Display country name (not the ISO code used in registry keys).
    pub country: &'static str,
    /// WGS84 latitude.
    pub lat: f64,
    /// WGS84 longitude.
    pub lon: f64,
    /// Approximate distance from the metro centre, in km.
    pub distance_km: u32,
}

/// A registered metro area and its neighbours.
pub struct MetroEntry {
    /// `"<City>,<CountryCode>"`, e.g. `"London,GB"`.
    pub key: &'static str,
    pub nearby: &'static [NearbyCity],
}

const fn city(name: &'static str, country: &'static str, lat: f64, lon: f64, distance_km: u32) -> NearbyCity {
    NearbyCity { name, country, lat, lon, distance_km }
}

/// All registered metro areas. Lookup order is table order, so earlier
/// entries win when a query matches more than one key.
pub static CITY_REGISTRY: &[MetroEntry] = &[
    // India
    MetroEntry {
        key: "Delhi,IN",
        nearby: &[
            city("Noida", "India", 28.5355, 77.391, 25),
            city("Ghaziabad", "India", 28.6692, 77.4538, 35),
            city("Greater Noida", "India", 28.4744, 77.545, 35),
        ],
    },
    MetroEntry {
        key: "Noida,IN",
        nearby: &[
            city("Delhi", "India", 28.6139, 77.209, 25),
            city("Greater Noida", "India", 28.4744, 77.545, 15),
            city("Ghaziabad", "India", 28.6692, 77.4538, 30),
        ],
    },
    MetroEntry {
        key: "Mumbai,IN",
        nearby: &[
            city("Thane", "India", 19.218, 72.9781, 30),
            city("Navi Mumbai", "India", 19.0176, 73.0822, 25),
            city("Pune", "India", 18.5204, 73.8567, 150),
        ],
    },
    MetroEntry {
        key: "Bangalore,IN",
        nearby: &[
            city("Whitefield", "India", 12.9698, 77.7499, 20),
            city("Indiranagar", "India", 13.0346, 77.6245, 10),
            city("Koramangala", "India", 12.9352, 77.6245, 8),
        ],
    },
    // UK
    MetroEntry {
        key: "London,GB",
        nearby: &[
            city("Westminster", "UK", 51.4975, -0.1357, 2),
            city("Greenwich", "UK", 51.4769, 0.0, 10),
            city("Richmond", "UK", 51.4545, -0.3033, 15),
            city("Croydon", "UK", 51.3766, -0.0955, 20),
        ],
    },
    // USA
    MetroEntry {
        key: "New York,US",
        nearby: &[
            city("Jersey City", "USA", 40.7178, -74.0431, 3),
            city("Newark", "USA", 40.7357, -74.1724, 15),
            city("Hoboken", "USA", 40.7355, -74.0314, 5),
        ],
    },
    MetroEntry {
        key: "Los Angeles,US",
        nearby: &[
            city("Long Beach", "USA", 33.7701, -118.1937, 35),
            city("Pasadena", "USA", 34.1478, -118.1445, 20),
            city("Anaheim", "USA", 33.8354, -117.9985, 40),
        ],
    },
    // France
    MetroEntry {
        key: "Paris,FR",
        nearby: &[
            city("Versailles", "France", 48.8047, 2.1203, 17),
            city("Neuilly-sur-Seine", "France", 48.8829, 2.2676, 8),
            city("Boulogne-Billancourt", "France", 48.8329, 2.2397, 5),
        ],
    },
];

/// Finds the registry entry for a city query such as `"london"` or
/// `"Delhi,IN"`.
///
/// Only the text before the first comma is used. It matches any key that
/// contains it, ignoring case. An empty query therefore matches the first
/// entry.
pub fn find_metro(city_name: &str) -> Option<&'static MetroEntry> {
    let query = city_name.split(',').next().unwrap_or_default().to_lowercase();
    CITY_REGISTRY
        .iter()
        .find(|entry| entry.key.to_lowercase().contains(&query))
}

/// Neighbouring towns for a city query, or an empty slice when the city is
/// not registered.
pub fn nearby_cities(city_name: &str) -> &'static [NearbyCity] {
    find_metro(city_name).map(|entry| entry.nearby).unwrap_or(&[])
}

/// Up to `count` neighbours in uniformly shuffled order.
pub fn random_nearby_cities_with<R: Rng + ?Sized>(
    city_name: &str,
    count: usize,
    rng: &mut R,
) -> Vec<NearbyCity> {
    let mut nearby = nearby_cities(city_name).to_vec();
    nearby.shuffle(rng);
    nearby.truncate(count);
    nearby
}

/// `random_nearby_cities_with` using the thread-local RNG.
pub fn random_nearby_cities(city_name: &str, count: usize) -> Vec<NearbyCity> {
    random_nearby_cities_with(city_name, count, &mut rand::thread_rng())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
