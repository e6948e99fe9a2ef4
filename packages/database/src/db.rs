//! Database connection utilities.
//!
//! A [`Connector`] opens one fresh connection per call. The dashboard never
//! pools or reuses connections: each fetch connects, runs, and drops.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use switchy_database::Database;
use switchy_database_connection::{Credentials, init_sqlite_rusqlite};

use crate::{DatabaseConfig, DbError};

/// Opens connections to the store.
#[async_trait]
pub trait Connector: Send + Sync {
    /// Opens a new connection.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Connection`] if the store is unreachable or
    /// rejects the credentials.
    async fn connect(&self) -> Result<Box<dyn Database>, DbError>;

    /// Describes the connection target for log lines. Never includes
    /// credentials.
    fn describe(&self) -> String;
}

/// Connects to the `PostgreSQL` store described by a [`DatabaseConfig`].
#[derive(Debug, Clone)]
pub struct PostgresConnector {
    config: DatabaseConfig,
}

impl PostgresConnector {
    #[must_use]
    pub const fn new(config: DatabaseConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl Connector for PostgresConnector {
    async fn connect(&self) -> Result<Box<dyn Database>, DbError> {
        let url = self.config.to_url();

        // `Credentials` rejects `?sslmode=...` style parameters; native-tls
        // negotiates TLS on its own.
        let url_base = url.split('?').next().unwrap_or(&url);

        let creds = Credentials::from_url(url_base).map_err(|e| DbError::Connection {
            message: format!("Invalid connection settings: {e}"),
        })?;

        switchy_database_connection::init_postgres_raw_native_tls(creds)
            .await
            .map_err(|e| DbError::Connection {
                message: e.to_string(),
            })
    }

    fn describe(&self) -> String {
        self.config.describe()
    }
}

/// Connects to a local `SQLite` file holding a `police_check` table.
#[derive(Debug, Clone)]
pub struct SqliteConnector {
    path: PathBuf,
}

impl SqliteConnector {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the database file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl Connector for SqliteConnector {
    async fn connect(&self) -> Result<Box<dyn Database>, DbError> {
        init_sqlite_rusqlite(Some(self.path.as_path())).map_err(|e| DbError::Connection {
            message: format!("Failed to open {}: {e}", self.path.display()),
        })
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
