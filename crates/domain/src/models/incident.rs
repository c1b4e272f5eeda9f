//! Incident domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Kind of incident an employee can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "incident_type", rename_all = "snake_case")]
pub enum IncidentType {
    LateArrival,
    EarlyExit,
    Other,
}

/// Review state of an incident.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "incident_status", rename_all = "snake_case")]
pub enum IncidentStatus {
    Pending,
    Approved,
    Rejected,
}

/// An employee-reported incident, reviewed by an admin.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Incident {
    pub id: i32,
    pub employee_id: i32,
    pub timeclock_id: Option<i32>,
    pub incident_type: IncidentType,
    pub reason: String,
    pub status: IncidentStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request payload for reporting an incident.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateIncidentRequest {
    pub employee_id: i32,

    pub timeclock_id: Option<i32>,

    #[serde(rename = "type")]
    pub incident_type: IncidentType,

    #[validate(length(min = 1, max = 2000, message = "Reason is required"))]
    pub reason: String,
}

/// Request payload for an admin status decision.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateIncidentStatusRequest {
    pub status: IncidentStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_incident_type_serde_names() {
        assert_eq!(
            serde_json::to_string(&IncidentType::LateArrival).unwrap(),
            "\"late_arrival\""
        );
        assert_eq!(
            serde_json::from_str::<IncidentType>("\"early_exit\"").unwrap(),
            IncidentType::EarlyExit
        );
    }

    #[test]
    fn test_create_request_requires_reason() {
        let req = CreateIncidentRequest {
            employee_id: 1,
            timeclock_id: None,
            incident_type: IncidentType::Other,
            reason: String::new(),
        };
        assert!(req.validate().is_err());
    }
}
