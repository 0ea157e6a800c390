//! Server State
//!
//! The server keeps no mutable state across requests. [`AppState`] only
//! bundles the read-only collaborators each request needs.

use std::{sync::Arc, time::Duration};

use super::provider::{OpenWeatherProvider, WeatherProvider};

// =============================================================================
// Application State
// =============================================================================

/// Shared application state that can be safely passed between threads
pub type SharedState = Arc<AppState>;

/// Cadence of the `/sse` heartbeat stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeartbeatConfig {
    /// Number of ping frames sent after the ready event
    pub pings: u32,

    /// Delay before each ping
    pub interval: Duration,
}

impl Default for HeartbeatConfig {
    fn default() -> Self {
        Self {
            pings: 10,
            interval: Duration::from_secs(1),
        }
    }
}

/// Core application state
pub struct AppState {
    /// Upstream weather source used by `get_weather`.
    pub provider: Arc<dyn WeatherProvider>,

    /// Heartbeat cadence for `/sse`.
    pub heartbeat: HeartbeatConfig,
}

impl AppState {
    /// Creates state backed by the OpenWeather API.
    pub fn new(api_key: Option<String>) -> Self {
        Self::with_provider(Arc::new(OpenWeatherProvider::new(api_key)))
    }

    /// Creates state around an arbitrary provider.
    pub fn with_provider(provider: Arc<dyn WeatherProvider>) -> Self {
        Self {
            provider,
            heartbeat: HeartbeatConfig::default(),
        }
    }

    /// Overrides the heartbeat cadence.
    pub fn with_heartbeat(mut self, heartbeat: HeartbeatConfig) -> Self {
        self.heartbeat = heartbeat;
        self
    }
}
