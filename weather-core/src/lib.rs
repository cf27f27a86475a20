//! Core library for the weather server.
//!
//! This crate defines:
//! - Configuration handling
//! - Abstraction over the weather provider, with an OpenWeather implementation
//! - The display model and the fallback chain that always produces one
//!
//! It is used by `weather-server`, but can also be reused by other binaries or services.

pub mod config;
pub mod forecast;
pub mod icon;
pub mod model;
pub mod provider;
pub mod resolver;
pub mod samples;

pub use config::Config;
pub use icon::{Icon, classify};
pub use model::{CurrentConditions, ForecastDay, ForecastSample, WeatherRecord};
pub use provider::{ProviderError, WeatherProvider, provider_from_config};
pub use resolver::{Tier, WeatherResolver};
