//! Database layer for the duty list.
//!
//! Provides SQLite connection pooling, the startup bootstrap routine
//! and the duty queries.

mod bootstrap;
mod duties;
mod pool;

pub use bootstrap::*;
pub use duties::*;
pub use pool::*;

use crate::Result;
use std::path::Path;
use tracing::info;

/// Type alias for the SQLite connection pool.
pub type DbPool = sqlx::SqlitePool;

/// Construct the database connection pool.
///
/// Creates parent directories if needed. Connections are opened lazily,
/// so an unreachable store surfaces in the bootstrap probe where it can
/// be retried.
pub async fn init_pool(path: &str, config: PoolConfig) -> Result<DbPool> {
    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| crate::Error::Internal(format!("Failed to create {:?}: {}", parent, e)))?;
        }
    }

    let options = config.build_connect_options(path)?;
    let pool = config.build_pool_options().connect_lazy_with(options);

    info!("Database pool initialized: {}", path);

    Ok(pool)
}

/// Apply the schema from schema.sql.
///
/// Uses IF NOT EXISTS clauses so it's safe to run multiple times.
pub async fn initialize_schema(pool: &DbPool) -> Result<()> {
    let schema = include_str!("../../schema.sql");

    info!("Initializing database schema");

    // Split by semicolons and execute each statement
    for statement in schema.split(';') {
        // Strip comment lines, keeping only actual SQL
        let clean_stmt: String = statement
            .lines()
            .filter(|line| !line.trim().starts_with("--"))
            .collect::<Vec<_>>()
            .join("\n");
        let clean_stmt = clean_stmt.trim();
        if clean_stmt.is_empty() {
            continue;
        }
        sqlx::query(clean_stmt).execute(pool).await?;
    }

    info!("Database schema initialized successfully");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_schema_initialization() {
        let pool = init_pool(":memory:", PoolConfig::test()).await.unwrap();
        initialize_schema(&pool).await.unwrap();

        let tables: Vec<(String,)> = sqlx::query_as(
            "SELECT name FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%' ORDER BY name"
        )
        .fetch_all(&pool)
        .await
        .unwrap();
        let table_names: Vec<&str> = tables.iter().map(|(n,)| n.as_str()).collect();
        assert_eq!(table_names, vec!["todos"]);

        let indexes: Vec<(String,)> = sqlx::query_as(
            "SELECT name FROM sqlite_master WHERE type='index' AND tbl_name='todos' AND name NOT LIKE 'sqlite_%'"
        )
        .fetch_all(&pool)
        .await
        .unwrap();
        assert_eq!(indexes, vec![("todos_created_at_index".to_string(),)]);
    }

    #[tokio::test]
    async fn test_schema_initialization_is_repeatable() {
        let pool = init_pool(":memory:", PoolConfig::test()).await.unwrap();
        initialize_schema(&pool).await.unwrap();
        initialize_schema(&pool).await.unwrap();
    }

    #[tokio::test]
    async fn test_init_pool_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/data/duties.db");

        let pool = init_pool(path.to_str().unwrap(), PoolConfig::test())
            .await
            .unwrap();
        health_check(&pool).await.unwrap();

        assert!(path.exists());
    }
}
