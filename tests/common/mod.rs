//! Common test utilities and helpers.

#![allow(dead_code)]

use axum_test::TestServer;
use duties::api;
use duties::db::{self, DbPool, Duty, PoolConfig};
use duties::models::DutyName;
use duties::AppState;
use std::time::Duration;

/// Create an in-memory database with the schema applied and no rows.
pub async fn setup_test_db() -> DbPool {
    let pool = db::init_pool(":memory:", PoolConfig::test())
        .await
        .expect("Failed to create test database");
    db::initialize_schema(&pool)
        .await
        .expect("Failed to apply schema");
    pool
}

/// Build the full application (routes, CORS, tracing) over the given pool.
pub fn build_test_server(pool: DbPool) -> TestServer {
    let app = api::app(AppState::new(pool), Duration::from_secs(84600));
    TestServer::new(app).expect("Failed to create test server")
}

/// Build a test server over a fresh, empty database.
pub async fn build_test_app() -> (TestServer, DbPool) {
    let pool = setup_test_db().await;
    let server = build_test_server(pool.clone());
    (server, pool)
}

/// Insert a duty directly into the store.
pub async fn insert_duty(pool: &DbPool, name: &str) -> Duty {
    let name = DutyName::parse(Some(name)).expect("valid test name");
    db::create_duty(pool, &name)
        .await
        .expect("Failed to insert test duty")
}
