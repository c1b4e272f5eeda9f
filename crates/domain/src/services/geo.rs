//! GPS proximity validation for clock-in/out.

use geo::{point, HaversineDistance};

use crate::models::Restaurant;

/// Great-circle distance between two coordinates in meters.
pub fn distance_meters(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let a = point!(x: lon1, y: lat1);
    let b = point!(x: lon2, y: lat2);
    a.haversine_distance(&b)
}

/// Whether a position is within the restaurant's configured clock-in radius.
pub fn within_radius(restaurant: &Restaurant, latitude: f64, longitude: f64) -> bool {
    distance_meters(restaurant.latitude, restaurant.longitude, latitude, longitude)
        <= f64::from(restaurant.radius_meters)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn restaurant(lat: f64, lon: f64, radius: i32) -> Restaurant {
        Restaurant {
            id: 1,
            name: "Test".to_string(),
            address: None,
            latitude: lat,
            longitude: lon,
            radius_meters: radius,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_distance_zero_for_same_point() {
        assert!(distance_meters(40.4168, -3.7038, 40.4168, -3.7038) < 0.001);
    }

    #[test]
    fn test_distance_known_pair() {
        // Madrid -> Barcelona is roughly 505 km.
        let d = distance_meters(40.4168, -3.7038, 41.3874, 2.1686);
        assert!(d > 490_000.0 && d < 520_000.0);
    }

    #[test]
    fn test_within_radius() {
        let r = restaurant(40.4168, -3.7038, 100);
        // ~30 m north.
        assert!(within_radius(&r, 40.41707, -3.7038));
        // ~1 km north.
        assert!(!within_radius(&r, 40.4258, -3.7038));
    }
}
