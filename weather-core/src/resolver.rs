//! Produces a [`WeatherRecord`] for any city, falling back from the live
//! provider to the sample table and finally to a generic record.

use chrono::{Datelike, FixedOffset, Local, Offset, Utc, Weekday};
use tracing::{debug, info, warn};

use crate::{
    Config,
    forecast::{FORECAST_DAYS, normalize, title_case},
    icon::Icon,
    model::{CurrentConditions, ForecastDay, WeatherRecord},
    provider::WeatherProvider,
    samples,
};

/// Which stage of the fallback chain produced a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    Live,
    Sample,
    Default,
}

impl Tier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Live => "live",
            Tier::Sample => "sample",
            Tier::Default => "default",
        }
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug)]
pub struct WeatherResolver {
    provider: Box<dyn WeatherProvider>,
    stride: usize,
}

impl WeatherResolver {
    pub fn new(provider: Box<dyn WeatherProvider>, config: &Config) -> Self {
        Self::with_stride(provider, config.forecast_stride)
    }

    pub fn with_stride(provider: Box<dyn WeatherProvider>, stride: usize) -> Self {
        let stride = if stride == 0 {
            warn!("forecast stride of 0 is meaningless, using 1");
            1
        } else {
            stride
        };

        Self { provider, stride }
    }

    /// Never fails; the worst case is a generic record for `city`.
    pub async fn resolve(&self, city: &str) -> WeatherRecord {
        let today = Local::now().weekday();
        self.resolve_on(city, today).await.0
    }

    pub async fn resolve_on(&self, city: &str, today: Weekday) -> (WeatherRecord, Tier) {
        let (record, tier) = match self.live(city, today).await {
            Some(record) => (record, Tier::Live),
            None => match samples::lookup(city) {
                Some(record) => (record, Tier::Sample),
                None => (default_record(city), Tier::Default),
            },
        };

        info!(city, tier = %tier, "resolved weather");
        (record, tier)
    }

    async fn live(&self, city: &str, today: Weekday) -> Option<WeatherRecord> {
        let current = match self.provider.fetch_current(city).await {
            Ok(current) => current,
            Err(e) => {
                warn!(city, error = %e, "current conditions unavailable");
                return None;
            }
        };

        let forecast = match self.provider.fetch_forecast(city).await {
            Ok(samples) => normalize(&samples, today, self.stride),
            Err(e) => {
                warn!(city, error = %e, "forecast unavailable");
                Vec::new()
            }
        };

        let forecast = if forecast.len() == FORECAST_DAYS {
            forecast
        } else {
            debug!(city, days = forecast.len(), "forecast too short, synthesizing");
            synthesized_forecast(current.temperature_c as i32)
        };

        Some(compose(&current, forecast))
    }
}

/// Builds the display record from live current conditions.
pub fn compose(current: &CurrentConditions, forecast: Vec<ForecastDay>) -> WeatherRecord {
    let offset = FixedOffset::east_opt(current.utc_offset_secs).unwrap_or_else(|| Utc.fix());

    WeatherRecord {
        location: format!("{}, {}", current.name, current.country),
        temperature: current.temperature_c as i32,
        feels_like: current.feels_like_c as i32,
        description: title_case(&current.description),
        humidity: current.humidity_pct,
        wind_speed: mps_to_kmh(current.wind_speed_mps),
        sunrise: current.sunrise.with_timezone(&offset).format("%H:%M").to_string(),
        sunset: current.sunset.with_timezone(&offset).format("%H:%M").to_string(),
        forecast,
    }
}

pub fn mps_to_kmh(speed: f64) -> i32 {
    (speed * 3.6) as i32
}

/// Stand-in forecast derived from the current temperature.
pub fn synthesized_forecast(temperature: i32) -> Vec<ForecastDay> {
    vec![
        ForecastDay::new("Tomorrow", Icon::Cloudy.as_str(), temperature + 2, "Cloudy"),
        ForecastDay::new("Day 2", Icon::Sunny.as_str(), temperature + 3, "Sunny"),
        ForecastDay::new("Day 3", Icon::Rainy.as_str(), temperature - 1, "Rainy"),
    ]
}

/// Generic record for a city neither the provider nor the sample table knows.
pub fn default_record(city: &str) -> WeatherRecord {
    WeatherRecord {
        location: title_case(city),
        temperature: 20,
        feels_like: 22,
        description: "Partly cloudy".into(),
        humidity: 60,
        wind_speed: 10,
        sunrise: "06:00".into(),
        sunset: "18:00".into(),
        forecast: vec![
            ForecastDay::new("Sat", Icon::Cloudy.as_str(), 22, "Cloudy"),
            ForecastDay::new("Sun", Icon::Sunny.as_str(), 25, "Sunny"),
            ForecastDay::new("Mon", Icon::Rainy.as_str(), 18, "Rainy"),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ForecastSample;
    use crate::provider::ProviderError;
    use async_trait::async_trait;
    use chrono::{DateTime, TimeZone};
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug, Default)]
    struct StubProvider {
        current: Option<CurrentConditions>,
        forecast: Option<Vec<ForecastSample>>,
        forecast_calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl WeatherProvider for StubProvider {
        async fn fetch_current(&self, _city: &str) -> Result<CurrentConditions, ProviderError> {
            self.current
                .clone()
                .ok_or(ProviderError::Status { status: 503, body: "down".into() })
        }

        async fn fetch_forecast(&self, _city: &str) -> Result<Vec<ForecastSample>, ProviderError> {
            self.forecast_calls.fetch_add(1, Ordering::SeqCst);
            self.forecast
                .clone()
                .ok_or(ProviderError::MissingField("list"))
        }
    }

    fn at(ts: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(ts, 0).unwrap()
    }

    fn london_now() -> CurrentConditions {
        CurrentConditions {
            name: "London".into(),
            country: "GB".into(),
            temperature_c: 19.9,
            feels_like_c: 18.6,
            humidity_pct: 72,
            wind_speed_mps: 10.0,
            // 2023-11-14 22:13:20 UTC and 2023-11-15 06:33:20 UTC
            sunrise: at(1_700_000_000),
            sunset: at(1_700_030_000),
            utc_offset_secs: 0,
            description: "broken clouds".into(),
        }
    }

    fn feed(len: usize) -> Vec<ForecastSample> {
        (0..len)
            .map(|i| ForecastSample {
                time: at(1_700_000_000 + i as i64 * 10_800),
                temperature_c: 10.0 + i as f64 / 8.0,
                description: "light snow".into(),
            })
            .collect()
    }

    fn resolver(stub: StubProvider) -> WeatherResolver {
        WeatherResolver::with_stride(Box::new(stub), 8)
    }

    #[tokio::test]
    async fn live_path_composes_record() {
        let r = resolver(StubProvider {
            current: Some(london_now()),
            forecast: Some(feed(40)),
            ..Default::default()
        });

        let (record, tier) = r.resolve_on("London", Weekday::Thu).await;

        assert_eq!(tier, Tier::Live);
        assert_eq!(record.location, "London, GB");
        assert_eq!(record.temperature, 19);
        assert_eq!(record.feels_like, 18);
        assert_eq!(record.description, "Broken Clouds");
        assert_eq!(record.humidity, 72);
        assert_eq!(record.wind_speed, 36);
        assert_eq!(record.sunrise, "22:13");
        assert_eq!(record.sunset, "06:33");
        assert_eq!(
            record.forecast,
            vec![
                ForecastDay::new("Fri", "❄️", 11, "Light Snow"),
                ForecastDay::new("Sat", "❄️", 12, "Light Snow"),
                ForecastDay::new("Sun", "❄️", 13, "Light Snow"),
            ]
        );
    }

    #[tokio::test]
    async fn sun_times_use_city_offset() {
        let mut now = london_now();
        now.utc_offset_secs = 9 * 3600;

        let record = compose(&now, synthesized_forecast(19));
        assert_eq!(record.sunrise, "07:13");
        assert_eq!(record.sunset, "15:33");
    }

    #[tokio::test]
    async fn missing_forecast_is_synthesized_from_current_temperature() {
        let r = resolver(StubProvider {
            current: Some(london_now()),
            forecast: None,
            ..Default::default()
        });

        let (record, tier) = r.resolve_on("London", Weekday::Mon).await;

        assert_eq!(tier, Tier::Live);
        assert_eq!(record.temperature, 19);
        assert_eq!(
            record.forecast,
            vec![
                ForecastDay::new("Tomorrow", "⛅", 21, "Cloudy"),
                ForecastDay::new("Day 2", "☀️", 22, "Sunny"),
                ForecastDay::new("Day 3", "🌧️", 18, "Rainy"),
            ]
        );
    }

    #[tokio::test]
    async fn short_forecast_is_replaced_wholesale() {
        let r = resolver(StubProvider {
            current: Some(london_now()),
            forecast: Some(feed(20)),
            ..Default::default()
        });

        let (record, _) = r.resolve_on("London", Weekday::Mon).await;
        assert_eq!(record.forecast, synthesized_forecast(19));
    }

    #[tokio::test]
    async fn failed_current_skips_forecast_and_uses_sample() {
        let stub = StubProvider {
            current: None,
            forecast: Some(feed(40)),
            ..Default::default()
        };
        let r = resolver(stub);

        let (record, tier) = r.resolve_on("LONDON", Weekday::Mon).await;

        assert_eq!(tier, Tier::Sample);
        assert_eq!(Some(record), samples::lookup("london"));
    }

    #[tokio::test]
    async fn forecast_not_requested_when_current_fails() {
        let stub = StubProvider::default();
        let calls = Arc::clone(&stub.forecast_calls);
        let r = resolver(stub);

        r.resolve_on("Tokyo", Weekday::Mon).await;

        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn unknown_city_gets_default_record() {
        let r = resolver(StubProvider::default());

        let (record, tier) = r.resolve_on("nowhereville", Weekday::Mon).await;

        assert_eq!(tier, Tier::Default);
        assert_eq!(record, default_record("nowhereville"));
        assert_eq!(record.location, "Nowhereville");
        assert_eq!(record.temperature, 20);
        assert_eq!(record.forecast[0], ForecastDay::new("Sat", "⛅", 22, "Cloudy"));
    }

    #[tokio::test]
    async fn every_tier_yields_three_days() {
        let live = resolver(StubProvider {
            current: Some(london_now()),
            forecast: Some(feed(3)),
            ..Default::default()
        });
        let offline = resolver(StubProvider::default());

        for city in ["London", "new york", "Tokyo", "Atlantis", "São Paulo"] {
            assert_eq!(live.resolve(city).await.forecast.len(), FORECAST_DAYS);
            assert_eq!(offline.resolve(city).await.forecast.len(), FORECAST_DAYS);
        }
    }

    #[test]
    fn zero_stride_is_clamped() {
        let r = WeatherResolver::with_stride(Box::new(StubProvider::default()), 0);
        assert_eq!(r.stride, 1);
    }

    #[test]
    fn wind_speed_truncates() {
        assert_eq!(mps_to_kmh(10.0), 36);
        assert_eq!(mps_to_kmh(4.1), 14);
        assert_eq!(mps_to_kmh(0.0), 0);
    }
}
