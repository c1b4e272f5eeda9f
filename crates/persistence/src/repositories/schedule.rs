//! Schedule repository for database operations.

use domain::models::{NewScheduleSlot, ScheduleSlot, Weekday};
use sqlx::PgPool;
use tracing::warn;

use crate::entities::ScheduleSlotEntity;

/// Repository for schedule database operations.
#[derive(Clone)]
pub struct ScheduleRepository {
    pool: PgPool,
}

impl ScheduleRepository {
    /// Create a new repository instance.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List all schedule rows of an employee.
    pub async fn list_for_employee(
        &self,
        employee_id: i32,
    ) -> Result<Vec<ScheduleSlot>, sqlx::Error> {
        let entities = sqlx::query_as::<_, ScheduleSlotEntity>(
            r#"
            SELECT id, employee_id, day_of_week, entry_slot, entry_time, is_work_day,
                   created_at, updated_at
            FROM schedules
            WHERE employee_id = $1
            ORDER BY day_of_week, entry_slot
            "#,
        )
        .bind(employee_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(convert_rows(entities))
    }

    /// List all active (work-day) slots for a weekday, across employees.
    ///
    /// This is the reminder engine's feed for entry reminders.
    pub async fn list_active_for_day(
        &self,
        day: Weekday,
    ) -> Result<Vec<ScheduleSlot>, sqlx::Error> {
        let entities = sqlx::query_as::<_, ScheduleSlotEntity>(
            r#"
            SELECT id, employee_id, day_of_week, entry_slot, entry_time, is_work_day,
                   created_at, updated_at
            FROM schedules
            WHERE day_of_week = $1 AND is_work_day = TRUE
            ORDER BY employee_id, entry_slot
            "#,
        )
        .bind(day.as_index())
        .fetch_all(&self.pool)
        .await?;

        Ok(convert_rows(entities))
    }

    /// Find a specific slot of an employee's day.
    pub async fn find_for_day_and_slot(
        &self,
        employee_id: i32,
        day: Weekday,
        entry_slot: i16,
    ) -> Result<Option<ScheduleSlot>, sqlx::Error> {
        let entity = sqlx::query_as::<_, ScheduleSlotEntity>(
            r#"
            SELECT id, employee_id, day_of_week, entry_slot, entry_time, is_work_day,
                   created_at, updated_at
            FROM schedules
            WHERE employee_id = $1 AND day_of_week = $2 AND entry_slot = $3
            "#,
        )
        .bind(employee_id)
        .bind(day.as_index())
        .bind(entry_slot)
        .fetch_optional(&self.pool)
        .await?;

        Ok(entity.and_then(|e| ScheduleSlot::try_from(e).ok()))
    }

    /// Find the first slot of an employee's day (lowest entry_slot).
    pub async fn find_first_for_day(
        &self,
        employee_id: i32,
        day: Weekday,
    ) -> Result<Option<ScheduleSlot>, sqlx::Error> {
        let entity = sqlx::query_as::<_, ScheduleSlotEntity>(
            r#"
            SELECT id, employee_id, day_of_week, entry_slot, entry_time, is_work_day,
                   created_at, updated_at
            FROM schedules
            WHERE employee_id = $1 AND day_of_week = $2
            ORDER BY entry_slot
            LIMIT 1
            "#,
        )
        .bind(employee_id)
        .bind(day.as_index())
        .fetch_optional(&self.pool)
        .await?;

        Ok(entity.and_then(|e| ScheduleSlot::try_from(e).ok()))
    }

    /// Replace an employee's whole week: delete all rows, insert the new
    /// ones, in a single transaction.
    pub async fn replace_for_employee(
        &self,
        employee_id: i32,
        slots: &[NewScheduleSlot],
    ) -> Result<(), sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM schedules WHERE employee_id = $1")
            .bind(employee_id)
            .execute(&mut *tx)
            .await?;

        for slot in slots {
            sqlx::query(
                r#"
                INSERT INTO schedules (employee_id, day_of_week, entry_slot, entry_time, is_work_day)
                VALUES ($1, $2, $3, $4, $5)
                "#,
            )
            .bind(employee_id)
            .bind(slot.day_of_week.as_index())
            .bind(slot.entry_slot.as_i16())
            .bind(&slot.entry_time)
            .bind(slot.is_work_day)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await
    }
}

/// Convert rows, dropping (and logging) any that fail enum conversion.
fn convert_rows(entities: Vec<ScheduleSlotEntity>) -> Vec<ScheduleSlot> {
    entities
        .into_iter()
        .filter_map(|entity| match ScheduleSlot::try_from(entity) {
            Ok(slot) => Some(slot),
            Err(e) => {
                warn!(error = %e, "Skipping corrupt schedule row");
                None
            }
        })
        .collect()
}
