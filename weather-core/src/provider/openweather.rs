use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::{
    Config,
    model::{CurrentConditions, ForecastSample},
    provider::{ProviderError, truncate_body},
};

use super::WeatherProvider;

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(config: &Config) -> Result<Self, ProviderError> {
        let http = Client::builder().timeout(config.timeout()).build()?;

        Ok(Self {
            api_key: config.api_key().unwrap_or_default().to_string(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, endpoint: &str, city: &str) -> Result<T, ProviderError> {
        let url = format!("{}/{}", self.base_url, endpoint);

        let res = self
            .http
            .get(&url)
            .query(&[
                ("q", city),
                ("appid", self.api_key.as_str()),
                ("units", "metric"),
            ])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(ProviderError::Status {
                status: status.as_u16(),
                body: truncate_body(&body),
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    feels_like: f64,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwSys {
    country: String,
    sunrise: i64,
    sunset: i64,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
    sys: OwSys,
    #[serde(default)]
    timezone: i32,
}

#[derive(Debug, Deserialize)]
struct OwForecastMain {
    temp: f64,
}

#[derive(Debug, Deserialize)]
struct OwForecastEntry {
    dt: i64,
    main: OwForecastMain,
    weather: Vec<OwWeather>,
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    list: Vec<OwForecastEntry>,
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn fetch_current(&self, city: &str) -> Result<CurrentConditions, ProviderError> {
        let parsed: OwCurrentResponse = self.get_json("weather", city).await?;

        let description = parsed
            .weather
            .into_iter()
            .next()
            .map(|w| w.description)
            .ok_or(ProviderError::MissingField("weather description"))?;

        Ok(CurrentConditions {
            name: parsed.name,
            country: parsed.sys.country,
            temperature_c: parsed.main.temp,
            feels_like_c: parsed.main.feels_like,
            humidity_pct: parsed.main.humidity,
            wind_speed_mps: parsed.wind.speed,
            sunrise: unix_to_utc(parsed.sys.sunrise).ok_or(ProviderError::MissingField("sunrise"))?,
            sunset: unix_to_utc(parsed.sys.sunset).ok_or(ProviderError::MissingField("sunset"))?,
            utc_offset_secs: parsed.timezone,
            description,
        })
    }

    async fn fetch_forecast(&self, city: &str) -> Result<Vec<ForecastSample>, ProviderError> {
        let parsed: OwForecastResponse = self.get_json("forecast", city).await?;

        parsed
            .list
            .into_iter()
            .map(|entry| -> Result<ForecastSample, ProviderError> {
                let description = entry
                    .weather
                    .into_iter()
                    .next()
                    .map(|w| w.description)
                    .ok_or(ProviderError::MissingField("forecast weather description"))?;

                Ok(ForecastSample {
                    time: unix_to_utc(entry.dt).ok_or(ProviderError::MissingField("forecast time"))?,
                    temperature_c: entry.main.temp,
                    description,
                })
            })
            .collect()
    }
}

fn unix_to_utc(ts: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(ts, 0)
}
