//! Hand-authored records served when the live provider is unavailable.

use crate::model::{ForecastDay, WeatherRecord};

pub const SAMPLE_CITIES: &[&str] = &["london", "new york", "tokyo"];

/// Exact match on the lowercased city name.
pub fn lookup(city: &str) -> Option<WeatherRecord> {
    let key = city.trim().to_lowercase();

    let record = match key.as_str() {
        "london" => WeatherRecord {
            location: "London, UK".into(),
            temperature: 12,
            feels_like: 8,
            description: "Partly cloudy".into(),
            humidity: 70,
            wind_speed: 8,
            sunrise: "05:45".into(),
            sunset: "18:45".into(),
            forecast: vec![
                ForecastDay::new("Sat", "☀️", 15, "Sunny"),
                ForecastDay::new("Sun", "⛅", 13, "Cloudy"),
                ForecastDay::new("Mon", "🌧️", 10, "Rainy"),
            ],
        },
        "new york" => WeatherRecord {
            location: "New York, USA".into(),
            temperature: 22,
            feels_like: 25,
            description: "Clear sky".into(),
            humidity: 45,
            wind_speed: 12,
            sunrise: "06:15".into(),
            sunset: "19:30".into(),
            forecast: vec![
                ForecastDay::new("Sat", "☀️", 25, "Sunny"),
                ForecastDay::new("Sun", "☀️", 27, "Hot"),
                ForecastDay::new("Mon", "⛅", 23, "Partly cloudy"),
            ],
        },
        "tokyo" => WeatherRecord {
            location: "Tokyo, Japan".into(),
            temperature: 18,
            feels_like: 20,
            description: "Light rain".into(),
            humidity: 85,
            wind_speed: 6,
            sunrise: "05:30".into(),
            sunset: "18:15".into(),
            forecast: vec![
                ForecastDay::new("Sat", "🌧️", 16, "Rainy"),
                ForecastDay::new("Sun", "⛅", 19, "Cloudy"),
                ForecastDay::new("Mon", "☀️", 22, "Sunny"),
            ],
        },
        _ => return None,
    };

    Some(record)
}
