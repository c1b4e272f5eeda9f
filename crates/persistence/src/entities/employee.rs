//! Employee entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database row mapping for the employees table.
#[derive(Debug, Clone, FromRow)]
pub struct EmployeeEntity {
    pub id: i32,
    pub restaurant_id: i32,
    pub name: String,
    pub username: String,
    pub password_hash: String,
    pub phone: Option<String>,
    pub late_grace_minutes: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<EmployeeEntity> for domain::models::Employee {
    fn from(entity: EmployeeEntity) -> Self {
        Self {
            id: entity.id,
            restaurant_id: entity.restaurant_id,
            name: entity.name,
            username: entity.username,
            password_hash: entity.password_hash,
            phone: entity.phone,
            late_grace_minutes: entity.late_grace_minutes,
            is_active: entity.is_active,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}
