//! Bootstrap Integration Tests
//!
//! Runs the startup initialization against file-backed SQLite databases,
//! including stores that are not reachable yet.

use std::path::Path;
use std::time::Duration;

use duties::db::{self, DbPool, InitOutcome, PoolConfig, RetryPolicy, SEED_DUTIES};
use duties::Error;

/// Pool over an existing database file; never creates it.
fn pool_without_create(path: &Path) -> DbPool {
    let config = PoolConfig {
        acquire_timeout: Duration::from_secs(1),
        ..PoolConfig::test()
    };
    let options = config
        .build_connect_options(path.to_str().unwrap())
        .unwrap()
        .create_if_missing(false);
    config.build_pool_options().connect_lazy_with(options)
}

#[tokio::test]
async fn test_bootstrap_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("duties.db");
    let path = path.to_str().unwrap();
    let policy = RetryPolicy::fixed(Duration::from_millis(10)).with_max_attempts(3);

    let pool = db::init_pool(path, PoolConfig::test()).await.unwrap();
    assert_eq!(db::initialize(&pool, &policy).await.unwrap(), InitOutcome::Created);
    pool.close().await;

    let pool = db::init_pool(path, PoolConfig::test()).await.unwrap();
    assert_eq!(
        db::initialize(&pool, &policy).await.unwrap(),
        InitOutcome::AlreadyInitialized
    );

    let names: Vec<String> = db::list_duties(&pool)
        .await
        .unwrap()
        .into_iter()
        .map(|d| d.name)
        .collect();
    assert_eq!(names.len(), SEED_DUTIES.len());
    assert!(SEED_DUTIES.iter().all(|seed| names.iter().any(|n| n == seed)));
}

#[tokio::test]
async fn test_bootstrap_gives_up_on_unreachable_store() {
    let dir = tempfile::tempdir().unwrap();
    let pool = pool_without_create(&dir.path().join("missing.db"));
    let policy = RetryPolicy::fixed(Duration::from_millis(5)).with_max_attempts(2);

    let result = db::initialize(&pool, &policy).await;

    assert!(matches!(result, Err(Error::Database(_))));
}

#[tokio::test]
async fn test_bootstrap_retries_until_store_appears() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("late.db");
    let pool = pool_without_create(&path);
    let policy = RetryPolicy::fixed(Duration::from_millis(50)).with_max_attempts(100);

    let late_path = path.clone();
    let creator = tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(150)).await;
        std::fs::File::create(&late_path).unwrap();
    });

    let outcome = db::initialize(&pool, &policy).await.unwrap();
    creator.await.unwrap();

    assert_eq!(outcome, InitOutcome::Created);
    assert_eq!(db::count_duties(&pool).await.unwrap(), 2);
}
