//! Weekly schedule handlers.

use axum::{
    extract::{Path, State},
    Json,
};
use domain::models::schedule::WeeklyScheduleInput;
use persistence::repositories::{EmployeeRepository, ScheduleRepository};
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;

pub async fn get_employee_schedule(
    State(state): State<AppState>,
    Path(employee_id): Path<i32>,
) -> Result<Json<WeeklyScheduleInput>, ApiError> {
    let employees = EmployeeRepository::new(state.pool.clone());
    if employees.find_by_id(employee_id).await?.is_none() {
        return Err(ApiError::NotFound("Employee not found".into()));
    }

    let schedules = ScheduleRepository::new(state.pool.clone());
    let slots = schedules.list_for_employee(employee_id).await?;

    Ok(Json(WeeklyScheduleInput::from_slots(&slots)))
}

/// Replace an employee's whole week.
pub async fn put_employee_schedule(
    State(state): State<AppState>,
    Path(employee_id): Path<i32>,
    Json(req): Json<WeeklyScheduleInput>,
) -> Result<Json<WeeklyScheduleInput>, ApiError> {
    req.validate()?;

    let employees = EmployeeRepository::new(state.pool.clone());
    if employees.find_by_id(employee_id).await?.is_none() {
        return Err(ApiError::NotFound("Employee not found".into()));
    }

    let schedules = ScheduleRepository::new(state.pool.clone());
    schedules
        .replace_for_employee(employee_id, &req.to_slots())
        .await?;

    let slots = schedules.list_for_employee(employee_id).await?;
    Ok(Json(WeeklyScheduleInput::from_slots(&slots)))
}
