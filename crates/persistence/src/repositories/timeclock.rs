//! Timeclock repository for database operations.

use chrono::{DateTime, Utc};
use domain::models::ClockEntry;
use sqlx::PgPool;

use crate::entities::ClockEntryEntity;

const CLOCK_COLUMNS: &str = "id, employee_id, entry_time, exit_time, is_late, latitude, \
     longitude, created_at, updated_at";

/// Repository for clock entry database operations.
#[derive(Clone)]
pub struct TimeclockRepository {
    pool: PgPool,
}

impl TimeclockRepository {
    /// Create a new repository instance.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Open a new clock entry.
    pub async fn clock_in(
        &self,
        employee_id: i32,
        entry_time: DateTime<Utc>,
        is_late: bool,
        latitude: f64,
        longitude: f64,
    ) -> Result<ClockEntry, sqlx::Error> {
        let entity = sqlx::query_as::<_, ClockEntryEntity>(&format!(
            r#"
            INSERT INTO timeclocks (employee_id, entry_time, is_late, latitude, longitude)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {CLOCK_COLUMNS}
            "#,
        ))
        .bind(employee_id)
        .bind(entry_time)
        .bind(is_late)
        .bind(latitude)
        .bind(longitude)
        .fetch_one(&self.pool)
        .await?;

        Ok(entity.into())
    }

    /// Close an open entry by stamping its exit time. Returns the updated
    /// row, or None if the entry does not exist or is already closed.
    pub async fn close(
        &self,
        entry_id: i32,
        exit_time: DateTime<Utc>,
    ) -> Result<Option<ClockEntry>, sqlx::Error> {
        let entity = sqlx::query_as::<_, ClockEntryEntity>(&format!(
            r#"
            UPDATE timeclocks
            SET exit_time = $2, updated_at = NOW()
            WHERE id = $1 AND exit_time IS NULL
            RETURNING {CLOCK_COLUMNS}
            "#,
        ))
        .bind(entry_id)
        .bind(exit_time)
        .fetch_optional(&self.pool)
        .await?;

        Ok(entity.map(Into::into))
    }

    /// Find a clock entry by ID.
    pub async fn find_by_id(&self, id: i32) -> Result<Option<ClockEntry>, sqlx::Error> {
        let entity = sqlx::query_as::<_, ClockEntryEntity>(&format!(
            "SELECT {CLOCK_COLUMNS} FROM timeclocks WHERE id = $1",
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(entity.map(Into::into))
    }

    /// Find an employee's open entry (no exit time yet), newest first.
    pub async fn find_open_for_employee(
        &self,
        employee_id: i32,
    ) -> Result<Option<ClockEntry>, sqlx::Error> {
        let entity = sqlx::query_as::<_, ClockEntryEntity>(&format!(
            r#"
            SELECT {CLOCK_COLUMNS}
            FROM timeclocks
            WHERE employee_id = $1 AND exit_time IS NULL
            ORDER BY created_at DESC
            LIMIT 1
            "#,
        ))
        .bind(employee_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(entity.map(Into::into))
    }

    /// List an employee's entries created inside a UTC range, newest first.
    ///
    /// The range is the caller's local civil day converted to UTC bounds.
    pub async fn list_created_between(
        &self,
        employee_id: i32,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<ClockEntry>, sqlx::Error> {
        let entities = sqlx::query_as::<_, ClockEntryEntity>(&format!(
            r#"
            SELECT {CLOCK_COLUMNS}
            FROM timeclocks
            WHERE employee_id = $1 AND created_at >= $2 AND created_at < $3
            ORDER BY created_at DESC
            "#,
        ))
        .bind(employee_id)
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await?;

        Ok(entities.into_iter().map(Into::into).collect())
    }

    /// List an employee's full history, newest first.
    pub async fn list_for_employee(
        &self,
        employee_id: i32,
        limit: i64,
    ) -> Result<Vec<ClockEntry>, sqlx::Error> {
        let entities = sqlx::query_as::<_, ClockEntryEntity>(&format!(
            r#"
            SELECT {CLOCK_COLUMNS}
            FROM timeclocks
            WHERE employee_id = $1
            ORDER BY created_at DESC
            LIMIT $2
            "#,
        ))
        .bind(employee_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(entities.into_iter().map(Into::into).collect())
    }

    /// Fetch entries for a set of employees in one round trip, newest
    /// first.
    pub async fn list_for_employees(
        &self,
        employee_ids: &[i32],
        limit: i64,
    ) -> Result<Vec<ClockEntry>, sqlx::Error> {
        let entities = sqlx::query_as::<_, ClockEntryEntity>(&format!(
            r#"
            SELECT {CLOCK_COLUMNS}
            FROM timeclocks
            WHERE employee_id = ANY($1)
            ORDER BY created_at DESC
            LIMIT $2
            "#,
        ))
        .bind(employee_ids)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(entities.into_iter().map(Into::into).collect())
    }

    /// List every open entry in the system. The exit reminder waves scan
    /// this to find employees still clocked in.
    pub async fn list_open(&self) -> Result<Vec<ClockEntry>, sqlx::Error> {
        let entities = sqlx::query_as::<_, ClockEntryEntity>(&format!(
            r#"
            SELECT {CLOCK_COLUMNS}
            FROM timeclocks
            WHERE exit_time IS NULL AND entry_time IS NOT NULL
            ORDER BY employee_id
            "#,
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(entities.into_iter().map(Into::into).collect())
    }

    /// Fetch entries created inside a UTC range for a set of employees in
    /// one round trip.
    pub async fn list_created_between_for_employees(
        &self,
        employee_ids: &[i32],
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<ClockEntry>, sqlx::Error> {
        let entities = sqlx::query_as::<_, ClockEntryEntity>(&format!(
            r#"
            SELECT {CLOCK_COLUMNS}
            FROM timeclocks
            WHERE employee_id = ANY($1) AND created_at >= $2 AND created_at < $3
            ORDER BY employee_id, created_at DESC
            "#,
        ))
        .bind(employee_ids)
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await?;

        Ok(entities.into_iter().map(Into::into).collect())
    }

    /// Administrative correction of an entry's timestamps. Returns the
    /// updated row, or None if the entry does not exist.
    pub async fn correct(
        &self,
        entry_id: i32,
        entry_time: Option<DateTime<Utc>>,
        exit_time: Option<DateTime<Utc>>,
        is_late: Option<bool>,
    ) -> Result<Option<ClockEntry>, sqlx::Error> {
        let entity = sqlx::query_as::<_, ClockEntryEntity>(&format!(
            r#"
            UPDATE timeclocks
            SET entry_time = COALESCE($2, entry_time),
                exit_time = COALESCE($3, exit_time),
                is_late = COALESCE($4, is_late),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {CLOCK_COLUMNS}
            "#,
        ))
        .bind(entry_id)
        .bind(entry_time)
        .bind(exit_time)
        .bind(is_late)
        .fetch_optional(&self.pool)
        .await?;

        Ok(entity.map(Into::into))
    }
}
