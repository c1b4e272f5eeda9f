//! Restaurant repository for database operations.

use domain::models::Restaurant;
use sqlx::PgPool;

use crate::entities::RestaurantEntity;

/// Repository for restaurant database operations.
#[derive(Clone)]
pub struct RestaurantRepository {
    pool: PgPool,
}

impl RestaurantRepository {
    /// Create a new repository instance.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Register a restaurant.
    pub async fn create(
        &self,
        name: &str,
        address: Option<&str>,
        latitude: f64,
        longitude: f64,
        radius_meters: i32,
    ) -> Result<Restaurant, sqlx::Error> {
        let entity = sqlx::query_as::<_, RestaurantEntity>(
            r#"
            INSERT INTO restaurants (name, address, latitude, longitude, radius_meters)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, address, latitude, longitude, radius_meters, created_at, updated_at
            "#,
        )
        .bind(name)
        .bind(address)
        .bind(latitude)
        .bind(longitude)
        .bind(radius_meters)
        .fetch_one(&self.pool)
        .await?;

        Ok(entity.into())
    }

    /// Find a restaurant by ID.
    pub async fn find_by_id(&self, id: i32) -> Result<Option<Restaurant>, sqlx::Error> {
        let entity = sqlx::query_as::<_, RestaurantEntity>(
            r#"
            SELECT id, name, address, latitude, longitude, radius_meters, created_at, updated_at
            FROM restaurants
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(entity.map(Into::into))
    }

    /// Partially update a restaurant. Returns the updated row, or None if it
    /// does not exist.
    pub async fn update(
        &self,
        id: i32,
        name: Option<&str>,
        address: Option<&str>,
        latitude: Option<f64>,
        longitude: Option<f64>,
        radius_meters: Option<i32>,
    ) -> Result<Option<Restaurant>, sqlx::Error> {
        let entity = sqlx::query_as::<_, RestaurantEntity>(
            r#"
            UPDATE restaurants
            SET name = COALESCE($2, name),
                address = COALESCE($3, address),
                latitude = COALESCE($4, latitude),
                longitude = COALESCE($5, longitude),
                radius_meters = COALESCE($6, radius_meters),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, name, address, latitude, longitude, radius_meters, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(address)
        .bind(latitude)
        .bind(longitude)
        .bind(radius_meters)
        .fetch_optional(&self.pool)
        .await?;

        Ok(entity.map(Into::into))
    }
}
