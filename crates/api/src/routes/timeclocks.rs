//! Clock-in/clock-out handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use domain::models::timeclock::{ClockInResponse, ClockRequest, CorrectClockEntryRequest};
use domain::models::{ClockEntry, Employee, EntrySlot, Restaurant, Weekday};
use domain::services::geo;
use persistence::repositories::{
    EmployeeRepository, RestaurantRepository, ScheduleRepository, TimeclockRepository,
};
use shared::time::{local_day_bounds_utc, local_parts, parse_entry_minutes};
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;

/// Default page size for history listings.
const HISTORY_LIMIT: i64 = 100;

/// Clock in with a GPS position check and grace-period lateness.
pub async fn clock_in(
    State(state): State<AppState>,
    Path(employee_id): Path<i32>,
    Json(req): Json<ClockRequest>,
) -> Result<(StatusCode, Json<ClockInResponse>), ApiError> {
    req.validate()?;

    let (employee, restaurant) = load_employee_and_restaurant(&state, employee_id).await?;
    check_position(&restaurant, &req, "clock in")?;

    let timeclocks = TimeclockRepository::new(state.pool.clone());
    if timeclocks.find_open_for_employee(employee.id).await?.is_some() {
        return Err(ApiError::Conflict(
            "You must clock out before clocking in again".into(),
        ));
    }

    let now = Utc::now();
    let is_late = lateness(&state, &employee, now).await?;

    let entry = timeclocks
        .clock_in(employee.id, now, is_late, req.latitude, req.longitude)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ClockInResponse {
            entry_id: entry.id,
            is_late: entry.is_late,
        }),
    ))
}

/// Clock out of the currently open entry.
pub async fn clock_out(
    State(state): State<AppState>,
    Path(employee_id): Path<i32>,
    Json(req): Json<ClockRequest>,
) -> Result<Json<ClockEntry>, ApiError> {
    req.validate()?;

    let (employee, restaurant) = load_employee_and_restaurant(&state, employee_id).await?;
    check_position(&restaurant, &req, "clock out")?;

    let timeclocks = TimeclockRepository::new(state.pool.clone());
    let open = timeclocks
        .find_open_for_employee(employee.id)
        .await?
        .ok_or_else(|| ApiError::Conflict("You must clock in before clocking out".into()))?;

    let entry = timeclocks
        .close(open.id, Utc::now())
        .await?
        .ok_or_else(|| ApiError::Conflict("Entry was already closed".into()))?;

    Ok(Json(entry))
}

pub async fn list_employee_timeclocks(
    State(state): State<AppState>,
    Path(employee_id): Path<i32>,
) -> Result<Json<Vec<ClockEntry>>, ApiError> {
    let employees = EmployeeRepository::new(state.pool.clone());
    if employees.find_by_id(employee_id).await?.is_none() {
        return Err(ApiError::NotFound("Employee not found".into()));
    }

    let timeclocks = TimeclockRepository::new(state.pool.clone());
    let entries = timeclocks
        .list_for_employee(employee_id, HISTORY_LIMIT)
        .await?;

    Ok(Json(entries))
}

/// Restaurant-wide clock entry listing, filtered in the database rather
/// than post-hoc in the handler.
pub async fn list_restaurant_timeclocks(
    State(state): State<AppState>,
    Path(restaurant_id): Path<i32>,
) -> Result<Json<Vec<ClockEntry>>, ApiError> {
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

    let timeclocks = TimeclockRepository::new(state.pool.clone());
    let entries = timeclocks.list_for_employees(&ids, HISTORY_LIMIT).await?;

    Ok(Json(entries))
}

/// Administrative correction of a clock entry's timestamps.
pub async fn correct_clock_entry(
    State(state): State<AppState>,
    Path(entry_id): Path<i32>,
    Json(req): Json<CorrectClockEntryRequest>,
) -> Result<Json<ClockEntry>, ApiError> {
    let timeclocks = TimeclockRepository::new(state.pool.clone());
    let entry = timeclocks
        .find_by_id(entry_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Clock entry not found".into()))?;

    req.check_times(entry.entry_time, entry.exit_time)
        .map_err(ApiError::Validation)?;

    let updated = timeclocks
        .correct(entry_id, req.entry_time, req.exit_time, req.is_late)
        .await?
        .ok_or_else(|| ApiError::NotFound("Clock entry not found".into()))?;

    Ok(Json(updated))
}

async fn load_employee_and_restaurant(
    state: &AppState,
    employee_id: i32,
) -> Result<(Employee, Restaurant), ApiError> {
    let employees = EmployeeRepository::new(state.pool.clone());
    let employee = employees
        .find_by_id(employee_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Employee not found".into()))?;
    if !employee.is_active {
        return Err(ApiError::Forbidden("Employee account is deactivated".into()));
    }

    let restaurants = RestaurantRepository::new(state.pool.clone());
    let restaurant = restaurants
        .find_by_id(employee.restaurant_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Restaurant not found".into()))?;

    Ok((employee, restaurant))
}

fn check_position(
    restaurant: &Restaurant,
    req: &ClockRequest,
    action: &str,
) -> Result<(), ApiError> {
    if !geo::within_radius(restaurant, req.latitude, req.longitude) {
        return Err(ApiError::Forbidden(format!(
            "You are too far from the restaurant to {}",
            action
        )));
    }
    Ok(())
}

/// Grace-period lateness check.
///
/// The first clock-in of the day is measured against the first scheduled
/// slot; a clock-in after an already closed shift is measured against the
/// second slot. Missing or unparsable schedule times count as on time.
async fn lateness(
    state: &AppState,
    employee: &Employee,
    now: chrono::DateTime<chrono::Utc>,
) -> Result<bool, ApiError> {
    let tz = state.time_zone();
    let parts = local_parts(now, tz);
    let Some(weekday) = Weekday::from_index(parts.day_of_week) else {
        return Ok(false);
    };

    let timeclocks = TimeclockRepository::new(state.pool.clone());
    let (day_start, day_end) = local_day_bounds_utc(now, tz);
    let todays_entries = timeclocks
        .list_created_between(employee.id, day_start, day_end)
        .await?;
    let has_closed_shift = todays_entries.iter().any(|e| e.exit_time.is_some());

    let schedules = ScheduleRepository::new(state.pool.clone());
    let slot = if has_closed_shift {
        schedules
            .find_for_day_and_slot(employee.id, weekday, EntrySlot::Second.as_i16())
            .await?
    } else {
        schedules.find_first_for_day(employee.id, weekday).await?
    };

    let Some(slot) = slot.filter(|s| s.is_work_day) else {
        return Ok(false);
    };
    let Some(scheduled_minute) = parse_entry_minutes(&slot.entry_time) else {
        return Ok(false);
    };

    let grace = u32::try_from(employee.late_grace_minutes).unwrap_or(0);
    Ok(parts.minute_of_day() > scheduled_minute + grace)
}
