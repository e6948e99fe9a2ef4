#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Store access for the `SecureCheck` dashboard.
//!
//! Uses `switchy_database` for connections and raw SQL execution. Every
//! fetch opens its own connection, runs one statement, materializes the
//! rows into a [`TabularResult`](securecheck_database_models::TabularResult)
//! and drops the connection. Store failures never escape [`access::DataAccess::fetch`]:
//! they are logged and turned into an empty result.

pub mod access;
pub mod config;
pub mod db;

pub use access::DataAccess;
pub use config::DatabaseConfig;

/// Errors that can occur during store operations.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    /// The store could not be reached or rejected the credentials.
    #[error("Connection error: {message}")]
    Connection {
        /// Description of what went wrong.
        message: String,
    },

    /// Database query error.
    #[error("Database error: {0}")]
    Database(#[from] switchy_database::DatabaseError),

    /// Configuration could not be loaded or parsed.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of what went wrong.
        message: String,
    },
}
