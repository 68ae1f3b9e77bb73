//! Storage collaborator: plain row accessors over SQLite.
//!
//! Every accessor takes its executor explicitly (a pool, a pooled connection
//! or an open transaction), so a caller decides what forms one unit of work.

use std::str::FromStr;

use log::{debug, info};
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions},
    Executor,
};

pub mod games;
pub mod players;
pub mod ships;
pub mod shots;

const SCHEMA: &str = include_str!("schema.sql");

fn is_in_memory(database_url: &str) -> bool {
    database_url.contains(":memory:") || database_url.contains("mode=memory")
}

/// Opens the connection pool. An in-memory database lives inside a single
/// connection, so it is always limited to one that is never recycled.
pub async fn connect(database_url: &str, max_connections: u32) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    let max_connections = if is_in_memory(database_url) { 1 } else { max_connections.max(1) };
    debug!("opening pool with {} connection(s)", max_connections);

    SqlitePoolOptions::new()
        .max_connections(max_connections)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
}

/// Creates the tables that do not exist yet.
pub async fn init_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    pool.execute(SCHEMA).await?;
    info!("database schema ready");
    Ok(())
}

/// True when the statement was refused by a key or uniqueness constraint
/// rather than by a broken database.
pub fn is_constraint_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => {
            // SQLITE_CONSTRAINT and its FOREIGNKEY, TRIGGER, PRIMARYKEY and UNIQUE variants
            matches!(db_err.code().as_deref(), Some("19" | "787" | "1811" | "1555" | "2067"))
                || db_err.message().contains("constraint failed")
        }
        _ => false,
    }
}
