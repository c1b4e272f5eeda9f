//! Employee management handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use domain::models::employee::{CreateEmployeeRequest, UpdateEmployeeRequest};
use domain::models::Employee;
use persistence::repositories::{EmployeeRepository, RestaurantRepository, ScheduleRepository};
use shared::password::hash_password;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;

/// Create an employee together with their weekly schedule.
pub async fn create_employee(
    State(state): State<AppState>,
    Json(req): Json<CreateEmployeeRequest>,
) -> Result<(StatusCode, Json<Employee>), ApiError> {
    req.validate()?;

    let restaurants = RestaurantRepository::new(state.pool.clone());
    if restaurants.find_by_id(req.restaurant_id).await?.is_none() {
        return Err(ApiError::NotFound("Restaurant not found".into()));
    }

    let password_hash = hash_password(&req.password)
        .map_err(|e| ApiError::Internal(format!("Password hashing failed: {}", e)))?;

    let employees = EmployeeRepository::new(state.pool.clone());
    let employee = employees
        .create(
            req.restaurant_id,
            &req.name,
            &req.username,
            &password_hash,
            req.phone.as_deref(),
            req.late_grace_minutes,
        )
        .await?;

    let schedules = ScheduleRepository::new(state.pool.clone());
    schedules
        .replace_for_employee(employee.id, &req.schedule.to_slots())
        .await?;

    Ok((StatusCode::CREATED, Json(employee)))
}

pub async fn get_employee(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Employee>, ApiError> {
    let repo = EmployeeRepository::new(state.pool.clone());
    let employee = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Employee not found".into()))?;

    Ok(Json(employee))
}

/// Update an employee profile. A schedule in the payload replaces the
/// stored week wholesale.
pub async fn update_employee(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(req): Json<UpdateEmployeeRequest>,
) -> Result<Json<Employee>, ApiError> {
    req.validate()?;

    let password_hash = match &req.password {
        Some(password) => Some(
            hash_password(password)
                .map_err(|e| ApiError::Internal(format!("Password hashing failed: {}", e)))?,
        ),
        None => None,
    };

    let employees = EmployeeRepository::new(state.pool.clone());
    let employee = employees
        .update(
            id,
            req.name.as_deref(),
            req.username.as_deref(),
            password_hash.as_deref(),
            req.phone.as_deref(),
            req.late_grace_minutes,
            req.is_active,
        )
        .await?
        .ok_or_else(|| ApiError::NotFound("Employee not found".into()))?;

    if let Some(schedule) = &req.schedule {
        let schedules = ScheduleRepository::new(state.pool.clone());
        schedules
            .replace_for_employee(employee.id, &schedule.to_slots())
            .await?;
    }

    Ok(Json(employee))
}

pub async fn list_restaurant_employees(
    State(state): State<AppState>,
    Path(restaurant_id): Path<i32>,
) -> Result<Json<Vec<Employee>>, ApiError> {
    let restaurants = RestaurantRepository::new(state.pool.clone());
    if restaurants.find_by_id(restaurant_id).await?.is_none() {
        return Err(ApiError::NotFound("Restaurant not found".into()));
    }

    let repo = EmployeeRepository::new(state.pool.clone());
    let employees = repo.list_by_restaurant(restaurant_id).await?;

    Ok(Json(employees))
}
