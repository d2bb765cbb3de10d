use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection};
use sqlx::{Connection, Executor};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

use crate::config::DatabaseConfig;
use super::session::DbSession;

/// Drops and recreates the `user` and `post` tables.
const SCHEMA: &str = include_str!("schema.sql");

/// Errors from DatabaseManager and request sessions
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Database session already released")]
    SessionReleased,

    #[error("Failed to prepare database directory: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Opens connections to the blog's SQLite file.
///
/// Holds no connections itself; every request gets its own [`DbSession`]
/// which opens a connection on first use.
#[derive(Debug, Clone)]
pub struct DatabaseManager {
    path: PathBuf,
    options: SqliteConnectOptions,
}

impl DatabaseManager {
    pub fn new(config: &DatabaseConfig) -> Self {
        let options = SqliteConnectOptions::new()
            .filename(&config.path)
            .create_if_missing(true)
            .foreign_keys(true)
            .busy_timeout(Duration::from_millis(config.busy_timeout_ms));

        Self {
            path: config.path.clone(),
            options,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Open a fresh connection. Creates the parent directory on first use.
    pub async fn connect(&self) -> Result<SqliteConnection, DatabaseError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let conn = SqliteConnection::connect_with(&self.options).await?;
        debug!("Opened database connection to {}", self.path.display());
        Ok(conn)
    }

    /// New request-scoped session; no connection is opened until it is acquired.
    pub fn session(&self) -> DbSession {
        DbSession::new(self.clone())
    }

    /// Clear existing data and create fresh tables.
    pub async fn init_db(&self) -> Result<(), DatabaseError> {
        let session = self.session();
        let result = match session.acquire().await {
            Ok(mut conn) => init_schema(&mut conn).await,
            Err(e) => Err(e),
        };
        session.release().await;
        result
    }
}

/// Run the embedded schema script on an open connection.
pub async fn init_schema(conn: &mut SqliteConnection) -> Result<(), DatabaseError> {
    conn.execute(SCHEMA).await?;
    info!("Initialized the database schema");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;

    fn manager_in(dir: &tempfile::TempDir) -> DatabaseManager {
        let config = AppConfig::for_database(dir.path().join("instance").join("flaskr.sqlite"));
        DatabaseManager::new(&config.database)
    }

    #[tokio::test]
    async fn connect_creates_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let manager = manager_in(&dir);

        let conn = manager.connect().await.unwrap();
        conn.close().await.unwrap();

        assert!(manager.path().exists());
    }

    #[tokio::test]
    async fn init_db_creates_tables_and_clears_data() {
        let dir = tempfile::tempdir().unwrap();
        let manager = manager_in(&dir);
        manager.init_db().await.unwrap();

        let mut conn = manager.connect().await.unwrap();
        sqlx::query("INSERT INTO user (username, password) VALUES ('a', 'x')")
            .execute(&mut conn)
            .await
            .unwrap();
        conn.close().await.unwrap();

        manager.init_db().await.unwrap();

        let mut conn = manager.connect().await.unwrap();
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM user")
            .fetch_one(&mut conn)
            .await
            .unwrap();
        assert_eq!(count, 0);
    }
}
