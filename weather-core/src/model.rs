use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The display record served for every resolution, whichever tier produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherRecord {
    pub location: String,
    pub temperature: i32,
    pub feels_like: i32,
    pub description: String,
    pub humidity: u8,
    /// km/h
    pub wind_speed: i32,
    pub sunrise: String,
    pub sunset: String,
    pub forecast: Vec<ForecastDay>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForecastDay {
    pub day: String,
    pub icon: String,
    pub temp: i32,
    pub desc: String,
}

impl ForecastDay {
    pub fn new(day: &str, icon: &str, temp: i32, desc: &str) -> Self {
        Self {
            day: day.to_string(),
            icon: icon.to_string(),
            temp,
            desc: desc.to_string(),
        }
    }
}

/// Current conditions as reported by a provider, before normalization.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentConditions {
    pub name: String,
    pub country: String,
    pub temperature_c: f64,
    pub feels_like_c: f64,
    pub humidity_pct: u8,
    pub wind_speed_mps: f64,
    pub sunrise: DateTime<Utc>,
    pub sunset: DateTime<Utc>,
    /// Seconds east of UTC for the reported place.
    pub utc_offset_secs: i32,
    pub description: String,
}

/// One entry of a sub-daily forecast feed.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastSample {
    pub time: DateTime<Utc>,
    pub temperature_c: f64,
    pub description: String,
}
