//! Startup initialization of the duty store.
//!
//! Probes the store, checks that identifiers can be generated, and creates
//! and seeds the `todos` table when it is missing. Failed attempts are
//! retried according to a [`RetryPolicy`].

use std::time::Duration;

use tracing::{error, info, warn};

use super::{initialize_schema, pool::health_check, DbPool};
use crate::{Error, Result};

/// Names of the rows inserted on first run.
pub const SEED_DUTIES: [&str; 2] = ["First Item", "Second Item"];

/// How the bootstrap routine retries failed attempts.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    /// Wait before the second attempt.
    pub delay: Duration,
    /// Give up after this many attempts. `None` retries forever.
    pub max_attempts: Option<u32>,
    /// Factor applied to the delay after every failed attempt.
    pub backoff_multiplier: f64,
    /// Upper bound for the delay.
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            delay: Duration::from_secs(5),
            max_attempts: None,
            backoff_multiplier: 1.0,
            max_delay: Duration::from_secs(60),
        }
    }
}

impl RetryPolicy {
    /// Fixed delay, unbounded attempts.
    pub fn fixed(delay: Duration) -> Self {
        Self {
            delay,
            ..Default::default()
        }
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = Some(max_attempts);
        self
    }

    pub fn with_backoff(mut self, multiplier: f64, max_delay: Duration) -> Self {
        self.backoff_multiplier = multiplier;
        self.max_delay = max_delay;
        self
    }

    /// Delay to wait after the given (1-based) failed attempt.
    pub fn delay_after(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(i32::MAX as u32) as i32;
        let factor = self.backoff_multiplier.max(1.0).powi(exponent);
        let secs = self.delay.as_secs_f64() * factor;

        if !secs.is_finite() || secs >= self.max_delay.as_secs_f64() {
            return self.max_delay.max(self.delay);
        }

        Duration::from_secs_f64(secs)
    }

    fn exhausted(&self, attempt: u32) -> bool {
        self.max_attempts.is_some_and(|max| attempt >= max)
    }
}

/// What the bootstrap routine found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitOutcome {
    /// The table was missing and has been created and seeded.
    Created,
    /// The table already existed; nothing was changed.
    AlreadyInitialized,
}

/// Initialize the store, retrying until it succeeds or the policy gives up.
pub async fn initialize(pool: &DbPool, policy: &RetryPolicy) -> Result<InitOutcome> {
    let mut attempt: u32 = 0;

    loop {
        attempt += 1;

        match try_initialize(pool).await {
            Ok(outcome) => {
                info!(attempt, ?outcome, "Database setup completed");
                return Ok(outcome);
            }
            Err(e) => {
                error!(attempt, error = %e, "Error setting up database");

                if policy.exhausted(attempt) {
                    warn!(attempt, "Giving up on database setup");
                    return Err(e);
                }

                let delay = policy.delay_after(attempt);
                warn!(attempt, delay_ms = delay.as_millis() as u64, "Retrying database setup");
                tokio::time::sleep(delay).await;
            }
        }
    }
}

/// A single initialization attempt.
pub async fn try_initialize(pool: &DbPool) -> Result<InitOutcome> {
    health_check(pool).await?;
    ensure_id_generation(pool).await?;

    if table_exists(pool).await? {
        info!("Database is already initialized");
        return Ok(InitOutcome::AlreadyInitialized);
    }

    initialize_schema(pool).await?;
    seed(pool).await?;

    Ok(InitOutcome::Created)
}

/// Check that the store can produce the random bytes identifiers are built from.
pub async fn ensure_id_generation(pool: &DbPool) -> Result<()> {
    let (len,): (i64,) = sqlx::query_as("SELECT length(randomblob(16))")
        .fetch_one(pool)
        .await?;

    if len != 16 {
        return Err(Error::Internal(format!(
            "identifier generation unavailable: got {} random bytes",
            len
        )));
    }

    Ok(())
}

/// Whether the `todos` table exists.
pub async fn table_exists(pool: &DbPool) -> Result<bool> {
    let (exists,): (i64,) = sqlx::query_as(
        "SELECT EXISTS (SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'todos')",
    )
    .fetch_one(pool)
    .await?;

    Ok(exists != 0)
}

async fn seed(pool: &DbPool) -> Result<()> {
    sqlx::query("INSERT INTO todos (name) VALUES (?), (?)")
        .bind(SEED_DUTIES[0])
        .bind(SEED_DUTIES[1])
        .execute(pool)
        .await?;

    info!(count = SEED_DUTIES.len(), "Seeded example duties");

    Ok(())
}
