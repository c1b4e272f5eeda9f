//! Employee repository for database operations.

use domain::models::Employee;
use sqlx::PgPool;

use crate::entities::EmployeeEntity;

const EMPLOYEE_COLUMNS: &str = "id, restaurant_id, name, username, password_hash, phone, \
     late_grace_minutes, is_active, created_at, updated_at";

/// Repository for employee database operations.
#[derive(Clone)]
pub struct EmployeeRepository {
    pool: PgPool,
}

impl EmployeeRepository {
    /// Create a new repository instance.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new employee.
    pub async fn create(
        &self,
        restaurant_id: i32,
        name: &str,
        username: &str,
        password_hash: &str,
        phone: Option<&str>,
        late_grace_minutes: i32,
    ) -> Result<Employee, sqlx::Error> {
        let entity = sqlx::query_as::<_, EmployeeEntity>(&format!(
            r#"
            INSERT INTO employees (restaurant_id, name, username, password_hash, phone, late_grace_minutes)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {EMPLOYEE_COLUMNS}
            "#,
        ))
        .bind(restaurant_id)
        .bind(name)
        .bind(username)
        .bind(password_hash)
        .bind(phone)
        .bind(late_grace_minutes)
        .fetch_one(&self.pool)
        .await?;

        Ok(entity.into())
    }

    /// Find an employee by ID.
    pub async fn find_by_id(&self, id: i32) -> Result<Option<Employee>, sqlx::Error> {
        let entity = sqlx::query_as::<_, EmployeeEntity>(&format!(
            "SELECT {EMPLOYEE_COLUMNS} FROM employees WHERE id = $1",
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(entity.map(Into::into))
    }

    /// Find an employee by username.
    pub async fn find_by_username(&self, username: &str) -> Result<Option<Employee>, sqlx::Error> {
        let entity = sqlx::query_as::<_, EmployeeEntity>(&format!(
            "SELECT {EMPLOYEE_COLUMNS} FROM employees WHERE username = $1",
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(entity.map(Into::into))
    }

    /// List all employees of a restaurant.
    pub async fn list_by_restaurant(&self, restaurant_id: i32) -> Result<Vec<Employee>, sqlx::Error> {
        let entities = sqlx::query_as::<_, EmployeeEntity>(&format!(
            "SELECT {EMPLOYEE_COLUMNS} FROM employees WHERE restaurant_id = $1 ORDER BY name",
        ))
        .bind(restaurant_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(entities.into_iter().map(Into::into).collect())
    }

    /// Partially update an employee profile. Returns the updated row, or
    /// None if the employee does not exist.
    #[allow(clippy::too_many_arguments)]
    pub async fn update(
        &self,
        id: i32,
        name: Option<&str>,
        username: Option<&str>,
        password_hash: Option<&str>,
        phone: Option<&str>,
        late_grace_minutes: Option<i32>,
        is_active: Option<bool>,
    ) -> Result<Option<Employee>, sqlx::Error> {
        let entity = sqlx::query_as::<_, EmployeeEntity>(&format!(
            r#"
            UPDATE employees
            SET name = COALESCE($2, name),
                username = COALESCE($3, username),
                password_hash = COALESCE($4, password_hash),
                phone = COALESCE($5, phone),
                late_grace_minutes = COALESCE($6, late_grace_minutes),
                is_active = COALESCE($7, is_active),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {EMPLOYEE_COLUMNS}
            "#,
        ))
        .bind(id)
        .bind(name)
        .bind(username)
        .bind(password_hash)
        .bind(phone)
        .bind(late_grace_minutes)
        .bind(is_active)
        .fetch_optional(&self.pool)
        .await?;

        Ok(entity.map(Into::into))
    }
}
