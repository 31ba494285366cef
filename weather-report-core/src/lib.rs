//! Core library for the `weather-report` app.
//!
//! This crate defines:
//! - Shared domain models (locations, weather readings)
//! - The configured location catalog
//! - The met.no forecast client and its failure taxonomy
//! - Configuration and per-user settings persistence
//!
//! It is used by `weather-report-cli`, but can also be reused by other front-ends.

pub mod config;
pub mod error;
pub mod location;
pub mod model;
pub mod provider;
pub mod settings;

pub use config::{Config, HttpConfig};
pub use error::{WeatherServiceFailure, WeatherServiceFailureReason};
pub use location::LocationCatalog;
pub use model::{Location, LocationSettings, WeatherReading};
pub use provider::{WeatherService, YrWeatherService, service_from_config};
pub use settings::UserSettings;
