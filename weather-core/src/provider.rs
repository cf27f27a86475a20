use crate::{
    Config,
    model::{CurrentConditions, ForecastSample},
    provider::openweather::OpenWeatherProvider,
};
use async_trait::async_trait;
use std::fmt::Debug;
use thiserror::Error;

pub mod openweather;

/// Ways an outbound call can fail. All of them send the resolver to its fallbacks.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Connection errors and timeouts.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("provider responded with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed payload: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("payload is missing {0}")]
    MissingField(&'static str),
}

#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn fetch_current(&self, city: &str) -> Result<CurrentConditions, ProviderError>;

    /// Time-ordered samples at the provider's native interval.
    async fn fetch_forecast(&self, city: &str) -> Result<Vec<ForecastSample>, ProviderError>;
}

/// Construct the live provider from config.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Box<dyn WeatherProvider>> {
    if config.api_key().is_none() {
        tracing::warn!(
            "No API key configured; live lookups will fail and fall back to sample data. \
             Hint: run `weather configure` or set API_KEY."
        );
    }

    Ok(Box::new(OpenWeatherProvider::new(config)?))
}

pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
