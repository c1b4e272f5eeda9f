//! Push subscription repository for database operations.

use domain::models::PushSubscription;
use sqlx::PgPool;

use crate::entities::PushSubscriptionEntity;

/// Repository for push subscription database operations.
#[derive(Clone)]
pub struct PushSubscriptionRepository {
    pool: PgPool,
}

impl PushSubscriptionRepository {
    /// Create a new repository instance.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Register a subscription, or refresh it if the endpoint is already
    /// known. A browser re-subscribing keeps one row per endpoint.
    pub async fn upsert(
        &self,
        employee_id: i32,
        endpoint: &str,
        p256dh: &str,
        auth: &str,
    ) -> Result<PushSubscription, sqlx::Error> {
        let entity = sqlx::query_as::<_, PushSubscriptionEntity>(
            r#"
            INSERT INTO push_subscriptions (employee_id, endpoint, p256dh, auth)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (endpoint) DO UPDATE
            SET employee_id = EXCLUDED.employee_id,
                p256dh = EXCLUDED.p256dh,
                auth = EXCLUDED.auth,
                updated_at = NOW()
            RETURNING id, employee_id, endpoint, p256dh, auth, created_at, updated_at
            "#,
        )
        .bind(employee_id)
        .bind(endpoint)
        .bind(p256dh)
        .bind(auth)
        .fetch_one(&self.pool)
        .await?;

        Ok(entity.into())
    }

    /// Remove a subscription by endpoint. Returns true if a row was deleted.
    pub async fn delete_by_endpoint(&self, endpoint: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM push_subscriptions WHERE endpoint = $1")
            .bind(endpoint)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Fetch subscriptions for a set of employees in one round trip.
    pub async fn list_for_employees(
        &self,
        employee_ids: &[i32],
    ) -> Result<Vec<PushSubscription>, sqlx::Error> {
        let entities = sqlx::query_as::<_, PushSubscriptionEntity>(
            r#"
            SELECT id, employee_id, endpoint, p256dh, auth, created_at, updated_at
            FROM push_subscriptions
            WHERE employee_id = ANY($1)
            ORDER BY employee_id, created_at
            "#,
        )
        .bind(employee_ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(entities.into_iter().map(Into::into).collect())
    }
}
