//! Restaurant domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A registered restaurant location. Clock-in/out attempts are validated
/// against its coordinates and radius.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Restaurant {
    pub id: i32,
    pub name: String,
    pub address: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub radius_meters: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request payload for registering a restaurant.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateRestaurantRequest {
    #[validate(length(min = 1, max = 255, message = "Name is required"))]
    pub name: String,

    pub address: Option<String>,

    #[validate(range(min = -90.0, max = 90.0, message = "Latitude out of range"))]
    pub latitude: f64,

    #[validate(range(min = -180.0, max = 180.0, message = "Longitude out of range"))]
    pub longitude: f64,

    #[validate(range(min = 10, max = 10000, message = "Radius must be 10-10000 meters"))]
    #[serde(default = "default_radius_meters")]
    pub radius_meters: i32,
}

fn default_radius_meters() -> i32 {
    100
}

/// Request payload for updating a restaurant (partial update).
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRestaurantRequest {
    #[validate(length(min = 1, max = 255, message = "Name must not be empty"))]
    pub name: Option<String>,

    pub address: Option<String>,

    #[validate(range(min = -90.0, max = 90.0, message = "Latitude out of range"))]
    pub latitude: Option<f64>,

    #[validate(range(min = -180.0, max = 180.0, message = "Longitude out of range"))]
    pub longitude: Option<f64>,

    #[validate(range(min = 10, max = 10000, message = "Radius must be 10-10000 meters"))]
    pub radius_meters: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_defaults_radius() {
        let req: CreateRestaurantRequest = serde_json::from_str(
            r#"{"name":"Il Bandito","address":"Calle Mayor 1","latitude":40.4,"longitude":-3.7}"#,
        )
        .unwrap();
        assert_eq!(req.radius_meters, 100);
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_create_request_rejects_bad_coordinates() {
        let req = CreateRestaurantRequest {
            name: "Test".to_string(),
            address: None,
            latitude: 120.0,
            longitude: 0.0,
            radius_meters: 100,
        };
        assert!(req.validate().is_err());
    }
}
