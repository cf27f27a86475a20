//! Turns a sub-daily forecast feed into three daily display entries.

use chrono::Weekday;

use crate::{
    icon::classify,
    model::{ForecastDay, ForecastSample},
};

/// Number of days ahead shown in every record.
pub const FORECAST_DAYS: usize = 3;

/// Samples per day in OpenWeather's 5 day / 3 hour feed.
pub const OPENWEATHER_STRIDE: usize = 8;

/// Picks the sample `i * stride` for each of the next three days.
///
/// Returns fewer than [`FORECAST_DAYS`] entries when the feed is too short;
/// callers must treat anything but a full set as unusable.
pub fn normalize(samples: &[ForecastSample], today: Weekday, stride: usize) -> Vec<ForecastDay> {
    let mut day = today;

    (1..=FORECAST_DAYS)
        .map_while(|i| {
            day = day.succ();
            let sample = samples.get(i * stride)?;
            Some(ForecastDay {
                day: weekday_label(day).to_string(),
                icon: classify(&sample.description).as_str().to_string(),
                temp: sample.temperature_c as i32,
                desc: title_case(&sample.description),
            })
        })
        .collect()
}

pub fn weekday_label(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Mon",
        Weekday::Tue => "Tue",
        Weekday::Wed => "Wed",
        Weekday::Thu => "Thu",
        Weekday::Fri => "Fri",
        Weekday::Sat => "Sat",
        Weekday::Sun => "Sun",
    }
}

/// Uppercases the first letter of every alphabetic run and lowercases the rest.
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_word = false;

    for c in text.chars() {
        if c.is_alphabetic() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }

    out
}
