//! Restaurant management handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use domain::models::restaurant::{CreateRestaurantRequest, UpdateRestaurantRequest};
use domain::models::Restaurant;
use persistence::repositories::RestaurantRepository;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;

pub async fn create_restaurant(
    State(state): State<AppState>,
    Json(req): Json<CreateRestaurantRequest>,
) -> Result<(StatusCode, Json<Restaurant>), ApiError> {
    req.validate()?;

    let repo = RestaurantRepository::new(state.pool.clone());
    let restaurant = repo
        .create(
            &req.name,
            req.address.as_deref(),
            req.latitude,
            req.longitude,
            req.radius_meters,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(restaurant)))
}

pub async fn get_restaurant(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Restaurant>, ApiError> {
    let repo = RestaurantRepository::new(state.pool.clone());
    let restaurant = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Restaurant not found".into()))?;

    Ok(Json(restaurant))
}

pub async fn update_restaurant(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(req): Json<UpdateRestaurantRequest>,
) -> Result<Json<Restaurant>, ApiError> {
    req.validate()?;

    let repo = RestaurantRepository::new(state.pool.clone());
    let restaurant = repo
        .update(
            id,
            req.name.as_deref(),
            req.address.as_deref(),
            req.latitude,
            req.longitude,
            req.radius_meters,
        )
        .await?
        .ok_or_else(|| ApiError::NotFound("Restaurant not found".into()))?;

    Ok(Json(restaurant))
}
