//! Weather Domain Module
//!
//! This module contains the weather business logic, including:
//! - The table of supported Moroccan cities
//! - Domain models (WeatherRecord, upstream payload shapes)
//! - Domain errors surfaced inside successful tool results
//! - The upstream weather provider and the shared server state

pub mod cities;
pub mod errors;
pub mod models;
pub mod provider;
pub mod state;

// Re-export commonly used types for convenience
pub use errors::WeatherError;
pub use models::WeatherRecord;
pub use provider::{OpenWeatherProvider, WeatherProvider};
pub use state::{AppState, HeartbeatConfig, SharedState};
