//! Environment configuration and logging setup.

use std::net::SocketAddr;

use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

/// Environment variable holding the OpenWeather API key.
pub const API_KEY_ENV: &str = "OPENWEATHER_API_KEY";

/// Fixed server bind address.
pub const SERVER_ADDR: ([u8; 4], u16) = ([0, 0, 0, 0], 8000);

/// Default server URL for the client.
pub const DEFAULT_SERVER_URL: &str = "http://localhost:8000";

/// Server settings resolved from the environment.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub addr: SocketAddr,
    pub api_key: Option<String>,
}

impl ServerConfig {
    /// Reads the configuration, loading a `.env` file from the working
    /// directory first when one exists. Variables already set in the process
    /// environment win. A missing API key is only a warning: weather lookups
    /// report it per request.
    pub fn from_env() -> Self {
        match dotenvy::dotenv() {
            Ok(path) => debug!(path = %path.display(), "loaded .env"),
            Err(e) if e.not_found() => {}
            Err(e) => warn!(error = %e, "ignoring unreadable .env file"),
        }

        let api_key = api_key_from(std::env::var(API_KEY_ENV).ok());
        if api_key.is_none() {
            warn!(
                "{} is not set; create a .env file containing {}=<your key> \
                 or export it before starting the server",
                API_KEY_ENV, API_KEY_ENV
            );
        }

        Self {
            addr: SocketAddr::from(SERVER_ADDR),
            api_key,
        }
    }
}

/// Blank values count as unset.
fn api_key_from(raw: Option<String>) -> Option<String> {
    raw.filter(|k| !k.trim().is_empty())
}

/// Installs the global `tracing` subscriber.
///
/// `RUST_LOG` wins when set; otherwise `default_filter` applies. Output goes to
/// stderr so the interactive client's stdout stays clean.
pub fn init_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}
