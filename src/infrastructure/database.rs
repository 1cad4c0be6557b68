use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use tracing::info;

use crate::config::DatabaseConfig;

/// Parent tables first; member references team.
///
/// SQLite integers are 64-bit, so `member.age` is checked against the
/// `i32` range it is decoded into.
const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS team (
        team_id INTEGER PRIMARY KEY AUTOINCREMENT,
        name    TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS member (
        member_id INTEGER PRIMARY KEY AUTOINCREMENT,
        username  TEXT NULL,
        age       INTEGER NOT NULL CHECK (age BETWEEN -2147483648 AND 2147483647),
        team_id   INTEGER NULL REFERENCES team (team_id)
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_member_team_id ON member (team_id)",
];

/// Opens a SQLite pool with foreign keys enforced
///
/// An in-memory URL gets a single connection that is never recycled:
/// every SQLite in-memory connection is a separate database.
pub async fn establish_connection(config: &DatabaseConfig) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(&config.url)?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = if config.is_in_memory() {
        SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None::<Duration>)
            .max_lifetime(None::<Duration>)
            .connect_with(options)
            .await?
    } else {
        SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .connect_with(options)
            .await?
    };

    info!(url = %config.url, "Successfully connected to the database");
    Ok(pool)
}

/// Creates the member/team tables if they do not exist yet
pub async fn create_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    info!("Starting database schema synchronization...");

    for statement in SCHEMA {
        sqlx::query(statement).execute(pool).await.map_err(|e| {
            tracing::error!("Failed to apply schema statement: {}", e);
            e
        })?;
    }

    info!("Database schema synchronization completed");
    Ok(())
}

/// Fresh in-memory database with the schema applied
pub async fn connect_in_memory() -> Result<SqlitePool, sqlx::Error> {
    let pool = establish_connection(&DatabaseConfig::in_memory()).await?;
    create_schema(&pool).await?;
    Ok(pool)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn schema_is_idempotent() {
        let pool = connect_in_memory().await.unwrap();

        create_schema(&pool).await.unwrap();

        let (tables,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name IN ('member', 'team')",
        )
        .fetch_one(&pool)
        .await
        .unwrap();
        assert_eq!(tables, 2);
    }

    #[tokio::test]
    async fn foreign_keys_are_enforced() {
        let pool = connect_in_memory().await.unwrap();

        let (enabled,): (i64,) = sqlx::query_as("PRAGMA foreign_keys")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(enabled, 1);
    }
}
