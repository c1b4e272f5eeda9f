//! Incident report handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use domain::models::incident::{CreateIncidentRequest, UpdateIncidentStatusRequest};
use domain::models::Incident;
use persistence::repositories::{EmployeeRepository, IncidentRepository, RestaurantRepository};
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;

pub async fn create_incident(
    State(state): State<AppState>,
    Json(req): Json<CreateIncidentRequest>,
) -> Result<(StatusCode, Json<Incident>), ApiError> {
    req.validate()?;

    let employees = EmployeeRepository::new(state.pool.clone());
    if employees.find_by_id(req.employee_id).await?.is_none() {
        return Err(ApiError::NotFound("Employee not found".into()));
    }

    let repo = IncidentRepository::new(state.pool.clone());
    let incident = repo
        .create(
            req.employee_id,
            req.timeclock_id,
            req.incident_type,
            &req.reason,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(incident)))
}

pub async fn list_employee_incidents(
    State(state): State<AppState>,
    Path(employee_id): Path<i32>,
) -> Result<Json<Vec<Incident>>, ApiError> {
    let employees = EmployeeRepository::new(state.pool.clone());
    if employees.find_by_id(employee_id).await?.is_none() {
        return Err(ApiError::NotFound("Employee not found".into()));
    }

    let repo = IncidentRepository::new(state.pool.clone());
    let incidents = repo.list_for_employee(employee_id).await?;

    Ok(Json(incidents))
}

pub async fn list_restaurant_incidents(
    State(state): State<AppState>,
    Path(restaurant_id): Path<i32>,
) -> Result<Json<Vec<Incident>>, ApiError> {
    let restaurants = RestaurantRepository::new(state.pool.clone());
    if restaurants.find_by_id(restaurant_id).await?.is_none() {
        return Err(ApiError::NotFound("Restaurant not found".into()));
    }

    let employees = EmployeeRepository::new(state.pool.clone());
    let ids: Vec<i32> = employees
        .list_by_restaurant(restaurant_id)
        .await?
        .iter()
        .map(|e| e.id)
        .collect();
    if ids.is_empty() {
        return Ok(Json(Vec::new()));
    }

    let repo = IncidentRepository::new(state.pool.clone());
    let incidents = repo.list_for_employees(&ids).await?;

    Ok(Json(incidents))
}

pub async fn update_incident_status(
    State(state): State<AppState>,
    Path(incident_id): Path<i32>,
    Json(req): Json<UpdateIncidentStatusRequest>,
) -> Result<Json<Incident>, ApiError> {
    let repo = IncidentRepository::new(state.pool.clone());
    let incident = repo
        .update_status(incident_id, req.status)
        .await?
        .ok_or_else(|| ApiError::NotFound("Incident not found".into()))?;

    Ok(Json(incident))
}
