//! Interactive mode for the server.
//!
//! Prompts for the bind address and port before starting the server.

use dialoguer::{Confirm, Input};
use securecheck_database::DatabaseConfig;

use crate::BindAddress;

/// Runs the server in interactive mode, prompting for where to listen.
///
/// The prompts default to `BIND_ADDR` / `PORT` when set. Declining the
/// confirmation returns without starting anything.
///
/// # Errors
///
/// Returns an `std::io::Result` error if the underlying server fails to
/// start.
#[allow(clippy::future_not_send)]
pub async fn run(config: DatabaseConfig) -> std::io::Result<()> {
    println!("SecureCheck Server");
    println!();

    let defaults = BindAddress::from_env();

    let host: String = Input::new()
        .with_prompt("Bind address")
        .default(defaults.host.clone())
        .interact_text()
        .unwrap_or(defaults.host);

    let port: u16 = Input::new()
        .with_prompt("Port")
        .default(defaults.port)
        .interact_text()
        .unwrap_or(defaults.port);

    if !Confirm::new()
        .with_prompt(format!("Start server on {host}:{port}?"))
        .default(true)
        .interact()
        .unwrap_or(true)
    {
        println!("Cancelled.");
        return Ok(());
    }

    super::serve(config, BindAddress { host, port }).await
}
