//! Incident repository for database operations.

use domain::models::incident::{Incident, IncidentStatus, IncidentType};
use sqlx::PgPool;

use crate::entities::IncidentEntity;

const INCIDENT_COLUMNS: &str =
    "id, employee_id, timeclock_id, type, reason, status, created_at, updated_at";

/// Repository for incident database operations.
#[derive(Clone)]
pub struct IncidentRepository {
    pool: PgPool,
}

impl IncidentRepository {
    /// Create a new repository instance.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// File a new incident. Status starts as pending.
    pub async fn create(
        &self,
        employee_id: i32,
        timeclock_id: Option<i32>,
        incident_type: IncidentType,
        reason: &str,
    ) -> Result<Incident, sqlx::Error> {
        let entity = sqlx::query_as::<_, IncidentEntity>(&format!(
            r#"
            INSERT INTO incidents (employee_id, timeclock_id, type, reason)
            VALUES ($1, $2, $3, $4)
            RETURNING {INCIDENT_COLUMNS}
            "#,
        ))
        .bind(employee_id)
        .bind(timeclock_id)
        .bind(incident_type)
        .bind(reason)
        .fetch_one(&self.pool)
        .await?;

        Ok(entity.into())
    }

    /// List an employee's incidents, newest first.
    pub async fn list_for_employee(&self, employee_id: i32) -> Result<Vec<Incident>, sqlx::Error> {
        let entities = sqlx::query_as::<_, IncidentEntity>(&format!(
            r#"
            SELECT {INCIDENT_COLUMNS}
            FROM incidents
            WHERE employee_id = $1
            ORDER BY created_at DESC
            "#,
        ))
        .bind(employee_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(entities.into_iter().map(Into::into).collect())
    }

    /// Fetch incidents for a set of employees in one round trip.
    pub async fn list_for_employees(
        &self,
        employee_ids: &[i32],
    ) -> Result<Vec<Incident>, sqlx::Error> {
        let entities = sqlx::query_as::<_, IncidentEntity>(&format!(
            r#"
            SELECT {INCIDENT_COLUMNS}
            FROM incidents
            WHERE employee_id = ANY($1)
            ORDER BY created_at DESC
            "#,
        ))
        .bind(employee_ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(entities.into_iter().map(Into::into).collect())
    }

    /// Resolve or reject an incident. Returns the updated row, or None if
    /// the incident does not exist.
    pub async fn update_status(
        &self,
        id: i32,
        status: IncidentStatus,
    ) -> Result<Option<Incident>, sqlx::Error> {
        let entity = sqlx::query_as::<_, IncidentEntity>(&format!(
            r#"
            UPDATE incidents
            SET status = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING {INCIDENT_COLUMNS}
            "#,
        ))
        .bind(id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await?;

        Ok(entity.map(Into::into))
    }
}
