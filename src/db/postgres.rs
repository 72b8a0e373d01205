use std::time::Duration;

use sqlx::{postgres::PgPoolOptions, PgPool};

/// Creates a PostgreSQL connection pool
///
/// The pool is built lazily: no connection is attempted until the first
/// query, so the catalog-backed read path keeps serving even when the
/// relational store is down at startup. Connections are acquired per
/// operation and returned to the pool immediately after use.
pub fn create_pool(database_url: &str) -> anyhow::Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .acquire_timeout(Duration::from_secs(3))
        .connect_lazy(database_url)?;

    Ok(pool)
}
