use std::env;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::Connection;

// Type aliases for the database connection pool
pub type DbPool = Pool<SqliteConnectionManager>;
pub type DbConnection = r2d2::PooledConnection<SqliteConnectionManager>;

/// Handle to the contact scanner store.
///
/// Wraps a connection pool; every operation checks out a connection at
/// entry and returns it to the pool on every exit path, so no state leaks
/// between calls. Query methods live in the component modules
/// ([`crate::contacts`], [`crate::groups`], [`crate::topics`],
/// [`crate::activity`], [`crate::alerts`]) as `impl Database` blocks.
pub struct Database {
    pool: DbPool,
}

impl Database {
    /// Open (or create) the store at the given path with the default pool size
    pub fn new(database_url: &str) -> Result<Self> {
        Self::with_pool_size(database_url, 10)
    }

    /// Open (or create) the store with an explicit pool size
    pub fn with_pool_size(database_url: &str, max_connections: u32) -> Result<Self> {
        let path = strip_sqlite_prefix(database_url);

        // Create parent directory if it doesn't exist
        if let Some(parent) = Path::new(path).parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let manager = SqliteConnectionManager::file(path);
        let pool = Pool::builder()
            .max_size(max_connections)
            .build(manager)
            .context("Failed to create database connection pool")?;

        // Ensure the schema exists; tables are created only if absent, the
        // scanner remains the owner of all data population.
        let conn = pool.get()?;
        Self::run_migrations(&conn)?;

        Ok(Self { pool })
    }

    /// Run database migrations
    fn run_migrations(conn: &Connection) -> Result<()> {
        conn.execute_batch(include_str!(
            "../migrations/2025-06-10-000000_create_directory_tables/up.sql"
        ))
        .context("Failed to run directory schema migration")?;

        Ok(())
    }

    /// Get a connection from the pool
    pub fn get_connection(&self) -> Result<DbConnection> {
        self.pool.get().context("Failed to get database connection")
    }

    /// Current number of idle connections, for pool gauges
    #[must_use]
    pub fn idle_connections(&self) -> u32 {
        self.pool.state().idle_connections
    }
}

/// Accept both bare paths and `sqlite:`/`sqlite://` URLs
fn strip_sqlite_prefix(url: &str) -> &str {
    url.strip_prefix("sqlite://")
        .or_else(|| url.strip_prefix("sqlite:"))
        .unwrap_or(url)
}

/// Open the store from the environment or the default scanner location
pub fn establish_connection() -> Result<Database> {
    let database_url =
        env::var("DATABASE_URL").unwrap_or_else(|_| "store/messages.db".to_string());

    Database::new(&database_url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_url_prefixes() {
        assert_eq!(strip_sqlite_prefix("sqlite://a/b.db"), "a/b.db");
        assert_eq!(strip_sqlite_prefix("sqlite:a/b.db"), "a/b.db");
        assert_eq!(strip_sqlite_prefix("a/b.db"), "a/b.db");
    }
}
