//! Restaurant entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database row mapping for the restaurants table.
#[derive(Debug, Clone, FromRow)]
pub struct RestaurantEntity {
    pub id: i32,
    pub name: String,
    pub address: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub radius_meters: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<RestaurantEntity> for domain::models::Restaurant {
    fn from(entity: RestaurantEntity) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            address: entity.address,
            latitude: entity.latitude,
            longitude: entity.longitude,
            radius_meters: entity.radius_meters,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_restaurant_entity_to_domain() {
        let entity = RestaurantEntity {
            id: 1,
            name: "Il Bandito".to_string(),
            address: Some("Calle Mayor 1".to_string()),
            latitude: 40.4168,
            longitude: -3.7038,
            radius_meters: 100,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let model: domain::models::Restaurant = entity.clone().into();
        assert_eq!(model.id, entity.id);
        assert_eq!(model.radius_meters, 100);
    }
}
