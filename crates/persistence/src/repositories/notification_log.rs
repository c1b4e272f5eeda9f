//! Notification log repository for database operations.

use std::collections::HashSet;

use chrono::NaiveDate;
use domain::models::ReminderKey;
use sqlx::PgPool;

/// Repository for the reminder deduplication ledger.
#[derive(Clone)]
pub struct NotificationLogRepository {
    pool: PgPool,
}

impl NotificationLogRepository {
    /// Create a new repository instance.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Record a reminder as sent. Returns true if this call inserted the
    /// row, false if the reminder was already recorded.
    ///
    /// The unique index on the composite key makes concurrent engine runs
    /// race-safe: exactly one caller observes true.
    pub async fn record(&self, key: &ReminderKey) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            INSERT INTO notification_logs (employee_id, entry_time, schedule_date, entry_slot)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (employee_id, entry_time, schedule_date, entry_slot) DO NOTHING
            "#,
        )
        .bind(key.employee_id)
        .bind(&key.entry_time)
        .bind(key.schedule_date)
        .bind(key.entry_slot)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Check whether a reminder has already been sent.
    pub async fn exists(&self, key: &ReminderKey) -> Result<bool, sqlx::Error> {
        let row: Option<(i32,)> = sqlx::query_as(
            r#"
            SELECT 1
            FROM notification_logs
            WHERE employee_id = $1 AND entry_time = $2 AND schedule_date = $3 AND entry_slot = $4
            "#,
        )
        .bind(key.employee_id)
        .bind(&key.entry_time)
        .bind(key.schedule_date)
        .bind(key.entry_slot)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.is_some())
    }

    /// Fetch, in one round trip, which employees already received the
    /// reminder labelled `entry_time` for the given date and slot.
    pub async fn notified_employees(
        &self,
        employee_ids: &[i32],
        entry_time: &str,
        schedule_date: NaiveDate,
        entry_slot: i16,
    ) -> Result<HashSet<i32>, sqlx::Error> {
        let rows: Vec<(i32,)> = sqlx::query_as(
            r#"
            SELECT employee_id
            FROM notification_logs
            WHERE employee_id = ANY($1)
              AND entry_time = $2 AND schedule_date = $3 AND entry_slot = $4
            "#,
        )
        .bind(employee_ids)
        .bind(entry_time)
        .bind(schedule_date)
        .bind(entry_slot)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|(id,)| id).collect())
    }
}
