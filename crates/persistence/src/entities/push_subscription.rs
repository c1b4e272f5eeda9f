//! Push subscription entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database row mapping for the push_subscriptions table.
#[derive(Debug, Clone, FromRow)]
pub struct PushSubscriptionEntity {
    pub id: i32,
    pub employee_id: i32,
    pub endpoint: String,
    pub p256dh: String,
    pub auth: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<PushSubscriptionEntity> for domain::models::PushSubscription {
    fn from(entity: PushSubscriptionEntity) -> Self {
        Self {
            id: entity.id,
            employee_id: entity.employee_id,
            endpoint: entity.endpoint,
            p256dh: entity.p256dh,
            auth: entity.auth,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}
