#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Standalone entry point for the `SecureCheck` API server.
//!
//! Reads the database settings from the environment (and from the TOML
//! file named by `SECURECHECK_CONFIG`, if set) and serves on
//! `BIND_ADDR:PORT`.

use std::path::PathBuf;

use securecheck_database::DatabaseConfig;

#[actix_web::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init_custom_env("RUST_LOG");

    let config_path = std::env::var_os("SECURECHECK_CONFIG").map(PathBuf::from);
    let config = DatabaseConfig::load(config_path.as_deref())?;

    securecheck_server::run_server(config).await?;
    Ok(())
}
