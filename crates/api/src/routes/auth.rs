//! Employee authentication handlers.

use axum::{extract::State, Json};
use domain::models::employee::{EmployeeLoginRequest, EmployeeLoginResponse};
use domain::models::schedule::WeeklyScheduleInput;
use persistence::repositories::{EmployeeRepository, ScheduleRepository};
use shared::password::verify_password;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;

/// Employee login: verifies the password hash and returns the profile
/// with the weekly schedule the dashboard renders.
pub async fn employee_login(
    State(state): State<AppState>,
    Json(req): Json<EmployeeLoginRequest>,
) -> Result<Json<EmployeeLoginResponse>, ApiError> {
    req.validate()?;

    let employees = EmployeeRepository::new(state.pool.clone());
    let employee = employees
        .find_by_username(&req.username)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Invalid username or password".into()))?;

    let verified = verify_password(&req.password, &employee.password_hash)
        .map_err(|e| ApiError::Internal(format!("Password verification failed: {}", e)))?;
    if !verified {
        return Err(ApiError::Unauthorized("Invalid username or password".into()));
    }
    if !employee.is_active {
        return Err(ApiError::Forbidden("Employee account is deactivated".into()));
    }

    let schedules = ScheduleRepository::new(state.pool.clone());
    let slots = schedules.list_for_employee(employee.id).await?;

    Ok(Json(EmployeeLoginResponse {
        employee_id: employee.id,
        restaurant_id: employee.restaurant_id,
        name: employee.name,
        late_grace_minutes: employee.late_grace_minutes,
        schedule: WeeklyScheduleInput::from_slots(&slots),
    }))
}
