//! Known cities, their neighbours and great-circle distances.
//!
//! The table is small and fixed. Unknown cities have no neighbours and
//! no coordinates.

use serde::{Deserialize, Serialize};

/// Mean Earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A geographic coordinate in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    /// Latitude in degrees (-90 to 90)
    pub lat: f64,
    /// Longitude in degrees (-180 to 180)
    pub lng: f64,
}

impl Coordinate {
    /// Creates a new coordinate.
    #[inline]
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

struct KnownCity {
    name: &'static str,
    coordinate: Coordinate,
    neighbours: &'static [&'static str],
}

const CITIES: &[KnownCity] = &[
    KnownCity { name: "Bangalore", coordinate: Coordinate::new(12.9716, 77.5946), neighbours: &["Chennai", "Hyderabad", "Pune"] },
    KnownCity { name: "Mumbai", coordinate: Coordinate::new(19.0760, 72.8777), neighbours: &["Pune", "Surat"] },
    KnownCity { name: "Delhi", coordinate: Coordinate::new(28.7041, 77.1025), neighbours: &["Lucknow", "Jaipur"] },
    KnownCity { name: "Chennai", coordinate: Coordinate::new(13.0827, 80.2707), neighbours: &["Bangalore", "Hyderabad"] },
    KnownCity { name: "Pune", coordinate: Coordinate::new(18.5204, 73.8567), neighbours: &["Mumbai", "Bangalore"] },
    KnownCity { name: "Kolkata", coordinate: Coordinate::new(22.5726, 88.3639), neighbours: &["Lucknow"] },
    KnownCity { name: "Hyderabad", coordinate: Coordinate::new(17.3850, 78.4867), neighbours: &["Chennai", "Bangalore"] },
    KnownCity { name: "Jaipur", coordinate: Coordinate::new(26.9124, 75.7873), neighbours: &["Delhi", "Lucknow"] },
    KnownCity { name: "Lucknow", coordinate: Coordinate::new(26.8467, 80.9462), neighbours: &["Delhi", "Kolkata", "Jaipur"] },
    KnownCity { name: "Surat", coordinate: Coordinate::new(21.1702, 72.8311), neighbours: &["Mumbai"] },
];

fn lookup(city: &str) -> Option<&'static KnownCity> {
    let city = city.trim();
    CITIES.iter().find(|known| known.name.eq_ignore_ascii_case(city))
}

/// Names of all cities in the table.
pub fn known_cities() -> impl Iterator<Item = &'static str> {
    CITIES.iter().map(|known| known.name)
}

/// The city itself followed by its neighbours.
///
/// Known cities come back with their canonical spelling; an unknown city
/// comes back trimmed and alone. A blank city yields an empty list.
///
/// # Example
/// ```
/// use impactmatch_matching::nearby::nearby_cities;
///
/// assert_eq!(nearby_cities("mumbai"), vec!["Mumbai", "Pune", "Surat"]);
/// assert_eq!(nearby_cities("Goa"), vec!["Goa"]);
/// ```
pub fn nearby_cities(city: &str) -> Vec<String> {
    match lookup(city) {
        Some(known) => std::iter::once(known.name)
            .chain(known.neighbours.iter().copied())
            .map(String::from)
            .collect(),
        None if city.trim().is_empty() => Vec::new(),
        None => vec![city.trim().to_string()],
    }
}

/// Coordinates of a known city.
pub fn city_coordinates(city: &str) -> Option<Coordinate> {
    lookup(city).map(|known| known.coordinate)
}

/// Great-circle distance in kilometers (haversine formula).
pub fn haversine_distance(a: &Coordinate, b: &Coordinate) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lng = (b.lng - a.lng).to_radians();

    let h = (d_lat / 2.0).sin().powi(2)
        + a.lat.to_radians().cos() * b.lat.to_radians().cos() * (d_lng / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_KM * c
}

/// Distance between two known cities, if both are in the table.
pub fn distance_between_cities(from: &str, to: &str) -> Option<f64> {
    Some(haversine_distance(&city_coordinates(from)?, &city_coordinates(to)?))
}
