use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::{Password, PasswordDisplayMode, Text};
use weather_core::{Config, WeatherRecord, WeatherResolver, provider_from_config};

use crate::web::{self, AppState};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Weather server")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Serve the web page and JSON API.
    Serve {
        #[arg(long, default_value = "0.0.0.0")]
        host: String,

        #[arg(long, short, default_value_t = 5000)]
        port: u16,
    },

    /// Store the provider API key and base URL.
    Configure,

    /// Resolve the weather for a city once and print it.
    Show {
        city: String,

        /// Print the raw JSON record.
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Serve { host, port } => {
                let config = load_config()?;
                let default_city = config.default_city.clone();
                let state = AppState::new(build_resolver(&config)?, default_city);
                web::run(state, &host, port).await?;
            }
            Command::Configure => configure()?,
            Command::Show { city, json } => {
                let config = load_config()?;
                let record = build_resolver(&config)?.resolve(city.trim()).await;

                if json {
                    println!("{}", serde_json::to_string_pretty(&record)?);
                } else {
                    print_record(&record);
                }
            }
        }

        Ok(())
    }
}

fn load_config() -> anyhow::Result<Config> {
    Config::load()?.apply_env(|key| std::env::var(key).ok())
}

fn build_resolver(config: &Config) -> anyhow::Result<Arc<WeatherResolver>> {
    let provider = provider_from_config(config)?;
    Ok(Arc::new(WeatherResolver::new(provider, config)))
}

fn configure() -> anyhow::Result<()> {
    // Environment overrides are not persisted.
    let mut config = Config::load()?;

    let api_key = Password::new("OpenWeather API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;

    let base_url = Text::new("Base URL:")
        .with_default(&config.base_url)
        .prompt()
        .context("Failed to read base URL")?;

    if !api_key.trim().is_empty() {
        config.set_api_key(api_key.trim().to_string());
    }
    config.base_url = base_url.trim().to_string();
    config.save()?;

    println!("Saved configuration to {}", Config::config_file_path()?.display());
    Ok(())
}

fn print_record(record: &WeatherRecord) {
    println!("{}", record.location);
    println!(
        "  {}°C (feels like {}°C), {}",
        record.temperature, record.feels_like, record.description
    );
    println!(
        "  Humidity {}%, wind {} km/h",
        record.humidity, record.wind_speed
    );
    println!("  Sunrise {}, sunset {}", record.sunrise, record.sunset);

    for day in &record.forecast {
        println!("  {:<8} {} {:>3}°C  {}", day.day, day.icon, day.temp, day.desc);
    }
}
