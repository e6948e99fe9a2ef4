//! Store connection settings.
//!
//! Settings come from three layers, later ones winning: built-in defaults,
//! an optional TOML file, and `SECURECHECK_DB_*` environment variables.
//! `DATABASE_URL`, when set, replaces the individual fields entirely.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::DbError;

/// Environment variable overriding [`DatabaseConfig::host`].
pub const ENV_HOST: &str = "SECURECHECK_DB_HOST";
/// Environment variable overriding [`DatabaseConfig::port`].
pub const ENV_PORT: &str = "SECURECHECK_DB_PORT";
/// Environment variable overriding [`DatabaseConfig::user`].
pub const ENV_USER: &str = "SECURECHECK_DB_USER";
/// Environment variable overriding [`DatabaseConfig::password`].
pub const ENV_PASSWORD: &str = "SECURECHECK_DB_PASSWORD";
/// Environment variable overriding [`DatabaseConfig::database`].
pub const ENV_DATABASE: &str = "SECURECHECK_DB_NAME";
/// Full connection URL; wins over every individual field.
pub const ENV_URL: &str = "DATABASE_URL";

/// Connection settings for the `PostgreSQL` store holding `police_check`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Store hostname.
    pub host: String,
    /// Store port.
    pub port: u16,
    /// Login user.
    pub user: String,
    /// Login password. May be empty.
    pub password: String,
    /// Database name.
    pub database: String,
    /// Complete connection URL, used verbatim when present.
    pub url: Option<String>,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 5432,
            user: "postgres".to_string(),
            password: String::new(),
            database: "securecheck_db".to_string(),
            url: None,
        }
    }
}

impl std::fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("database", &self.database)
            .field("url", &self.url.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl DatabaseConfig {
    /// Loads settings from defaults, an optional TOML file, and the process
    /// environment.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Config`] if the file cannot be read or parsed, or
    /// an environment variable holds an invalid value.
    pub fn load(path: Option<&Path>) -> Result<Self, DbError> {
        let base = match path {
            Some(path) => {
                let contents = std::fs::read_to_string(path).map_err(|e| DbError::Config {
                    message: format!("Failed to read {}: {e}", path.display()),
                })?;
                Self::from_toml_str(&contents)?
            }
            None => Self::default(),
        };

        base.with_overrides(|key| std::env::var(key).ok())
    }

    /// Loads settings from defaults and the process environment only.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Config`] if an environment variable holds an
    /// invalid value.
    pub fn from_env() -> Result<Self, DbError> {
        Self::load(None)
    }

    /// Parses settings from TOML. Missing keys keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Config`] if the TOML is malformed.
    pub fn from_toml_str(toml_str: &str) -> Result<Self, DbError> {
        toml::de::from_str(toml_str).map_err(|e| DbError::Config {
            message: format!("Invalid database config: {e}"),
        })
    }

    /// Applies overrides from `lookup`, keyed by the `SECURECHECK_DB_*` and
    /// `DATABASE_URL` variable names.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Config`] if the port override is not a valid
    /// port number.
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, DbError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup(ENV_HOST) {
            self.host = host;
        }
        if let Some(port) = lookup(ENV_PORT) {
            self.port = port.trim().parse().map_err(|e| DbError::Config {
                message: format!("Invalid {ENV_PORT} '{port}': {e}"),
            })?;
        }
        if let Some(user) = lookup(ENV_USER) {
            self.user = user;
        }
        if let Some(password) = lookup(ENV_PASSWORD) {
            self.password = password;
        }
        if let Some(database) = lookup(ENV_DATABASE) {
            self.database = database;
        }
        if let Some(url) = lookup(ENV_URL).filter(|u| !u.is_empty()) {
            self.url = Some(url);
        }
        Ok(self)
    }

    /// Returns the `postgres://` URL for these settings.
    #[must_use]
    pub fn to_url(&self) -> String {
        if let Some(url) = &self.url {
            return url.clone();
        }
        if self.password.is_empty() {
            format!(
                "postgres://{}@{}:{}/{}",
                self.user, self.host, self.port, self.database
            )
        } else {
            format!(
                "postgres://{}:{}@{}:{}/{}",
                self.user, self.password, self.host, self.port, self.database
            )
        }
    }

    /// Describes the target without credentials, for log lines.
    #[must_use]
    pub fn describe(&self) -> String {
        if self.url.is_some() {
            return format!("{ENV_URL} target");
        }
        format!("{}:{}/{}", self.host, self.port, self.database)
    }
}
