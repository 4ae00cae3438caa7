//! Duty database queries.
//!
//! Every operation is a single parameterized statement. Update and delete
//! report the affected row count so callers can tell a miss from a hit.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::DbPool;
use crate::models::{DutyId, DutyName};
use crate::Result;

/// Duty record from the database.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct Duty {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

/// List all duties, newest first.
///
/// Rows created within the same millisecond fall back to insertion order.
pub async fn list_duties(pool: &DbPool) -> Result<Vec<Duty>> {
    let duties = sqlx::query_as::<_, Duty>(
        r#"
        SELECT id, name, created_at, updated_at
        FROM todos
        ORDER BY created_at DESC, rowid DESC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(duties)
}

/// Insert a duty and return the stored record.
///
/// The id and both timestamps come from column defaults.
pub async fn create_duty(pool: &DbPool, name: &DutyName) -> Result<Duty> {
    let duty = sqlx::query_as::<_, Duty>(
        r#"
        INSERT INTO todos (name)
        VALUES (?)
        RETURNING id, name, created_at, updated_at
        "#,
    )
    .bind(name.as_str())
    .fetch_one(pool)
    .await?;

    Ok(duty)
}

/// Rename a duty. Returns the number of rows affected.
pub async fn update_duty_name(pool: &DbPool, id: &DutyId, name: &DutyName) -> Result<u64> {
    let result = sqlx::query("UPDATE todos SET name = ? WHERE id = ?")
        .bind(name.as_str())
        .bind(id.to_string())
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}

/// Delete a duty. Returns the number of rows affected.
pub async fn delete_duty(pool: &DbPool, id: &DutyId) -> Result<u64> {
    let result = sqlx::query("DELETE FROM todos WHERE id = ?")
        .bind(id.to_string())
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}

/// Count all duties.
pub async fn count_duties(pool: &DbPool) -> Result<i64> {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM todos")
        .fetch_one(pool)
        .await?;

    Ok(count)
}
