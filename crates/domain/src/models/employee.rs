//! Employee domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::schedule::WeeklyScheduleInput;

/// A restaurant employee. Never hard-deleted; deactivated via `is_active`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: i32,
    pub restaurant_id: i32,
    pub name: String,
    pub username: String,
    /// Argon2id PHC hash, never serialized to clients.
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub phone: Option<String>,
    /// Minutes after the scheduled entry before a clock-in counts as late.
    pub late_grace_minutes: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request payload for creating an employee together with their weekly
/// schedule.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateEmployeeRequest {
    pub restaurant_id: i32,

    #[validate(length(min = 1, max = 255, message = "Name is required"))]
    pub name: String,

    #[validate(length(min = 3, max = 100, message = "Username must be at least 3 characters"))]
    pub username: String,

    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,

    #[validate(length(max = 20, message = "Phone must be at most 20 characters"))]
    pub phone: Option<String>,

    #[validate(range(min = 0, max = 120, message = "Grace period must be 0-120 minutes"))]
    #[serde(default = "default_grace_minutes")]
    pub late_grace_minutes: i32,

    #[serde(default)]
    #[validate(nested)]
    pub schedule: WeeklyScheduleInput,
}

fn default_grace_minutes() -> i32 {
    5
}

/// Request payload for updating an employee profile and schedule.
///
/// The schedule, when present, replaces the stored week wholesale.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEmployeeRequest {
    #[validate(length(min = 1, max = 255, message = "Name must not be empty"))]
    pub name: Option<String>,

    #[validate(length(min = 3, max = 100, message = "Username must be at least 3 characters"))]
    pub username: Option<String>,

    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: Option<String>,

    #[validate(length(max = 20, message = "Phone must be at most 20 characters"))]
    pub phone: Option<String>,

    #[validate(range(min = 0, max = 120, message = "Grace period must be 0-120 minutes"))]
    pub late_grace_minutes: Option<i32>,

    pub is_active: Option<bool>,

    #[validate(nested)]
    pub schedule: Option<WeeklyScheduleInput>,
}

/// Employee login request.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeLoginRequest {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Employee login response: profile plus the weekly schedule the dashboard
/// renders.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeLoginResponse {
    pub employee_id: i32,
    pub restaurant_id: i32,
    pub name: String,
    pub late_grace_minutes: i32,
    pub schedule: WeeklyScheduleInput,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_validation() {
        let req: CreateEmployeeRequest = serde_json::from_str(
            r#"{"restaurantId":1,"name":"Ana","username":"ana","password":"secret123"}"#,
        )
        .unwrap();
        assert!(req.validate().is_ok());
        assert_eq!(req.late_grace_minutes, 5);
    }

    #[test]
    fn test_create_request_rejects_short_password() {
        let req: CreateEmployeeRequest = serde_json::from_str(
            r#"{"restaurantId":1,"name":"Ana","username":"ana","password":"abc"}"#,
        )
        .unwrap();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_employee_serialization_hides_password_hash() {
        let employee = Employee {
            id: 1,
            restaurant_id: 1,
            name: "Ana".to_string(),
            username: "ana".to_string(),
            password_hash: "$argon2id$secret".to_string(),
            phone: None,
            late_grace_minutes: 5,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let json = serde_json::to_string(&employee).unwrap();
        assert!(!json.contains("argon2id"));
        assert!(json.contains("\"username\":\"ana\""));
    }
}
