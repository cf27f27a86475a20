//! Server-rendered HTML pages.

use std::fmt::Write;

use weather_core::WeatherRecord;

const STYLE: &str = r#"
body { font-family: system-ui, sans-serif; background: linear-gradient(#4a90d9, #87ceeb); color: #fff; margin: 0; min-height: 100vh; }
main { max-width: 32rem; margin: 0 auto; padding: 2rem 1rem; }
form { display: flex; gap: .5rem; margin-bottom: 1.5rem; }
input { flex: 1; padding: .6rem; border-radius: .4rem; border: none; font-size: 1rem; }
button { padding: .6rem 1rem; border-radius: .4rem; border: none; cursor: pointer; }
.card { background: rgba(255,255,255,.15); border-radius: 1rem; padding: 1.5rem; }
.temp { font-size: 3.5rem; margin: .25rem 0; }
.details, .forecast { display: grid; grid-template-columns: repeat(3, 1fr); gap: .5rem; margin-top: 1rem; text-align: center; }
.error { color: #ffdede; min-height: 1.2rem; }
"#;

const SCRIPT: &str = r#"
const form = document.getElementById('search');
form.addEventListener('submit', async (event) => {
  event.preventDefault();
  const city = document.getElementById('city').value.trim();
  const error = document.getElementById('error');
  error.textContent = '';
  if (!city) { error.textContent = 'Please enter a city name'; return; }
  const res = await fetch('/search', {
    method: 'POST',
    headers: { 'Content-Type': 'application/json' },
    body: JSON.stringify({ city }),
  });
  const data = await res.json();
  if (!res.ok) { error.textContent = data.error; return; }
  const set = (id, text) => { document.getElementById(id).textContent = text; };
  set('location', data.location);
  set('temperature', `${data.temperature}°C`);
  set('description', data.description);
  set('feels-like', `Feels like ${data.feels_like}°C`);
  set('humidity', `${data.humidity}%`);
  set('wind', `${data.wind_speed} km/h`);
  set('sun', `${data.sunrise} / ${data.sunset}`);
  data.forecast.forEach((day, i) => {
    set(`day-${i}`, day.day);
    set(`icon-${i}`, day.icon);
    set(`temp-${i}`, `${day.temp}°C`);
    set(`desc-${i}`, day.desc);
  });
});
"#;

pub fn index(record: &WeatherRecord) -> String {
    let mut forecast = String::new();
    for (i, day) in record.forecast.iter().enumerate() {
        // Writing to a String cannot fail.
        let _ = write!(
            forecast,
            r#"<div><div id="day-{i}">{}</div><div id="icon-{i}">{}</div><div id="temp-{i}">{}°C</div><small id="desc-{i}">{}</small></div>"#,
            escape(&day.day),
            escape(&day.icon),
            day.temp,
            escape(&day.desc),
        );
    }

    let body = format!(
        r#"<main>
<form id="search"><input id="city" placeholder="Search city..." autocomplete="off"><button type="submit">Search</button></form>
<p id="error" class="error"></p>
<section class="card">
<h1 id="location">{location}</h1>
<div id="temperature" class="temp">{temperature}°C</div>
<div id="description">{description}</div>
<div id="feels-like">Feels like {feels_like}°C</div>
<div class="details">
<div>Humidity<br><span id="humidity">{humidity}%</span></div>
<div>Wind<br><span id="wind">{wind_speed} km/h</span></div>
<div>Sunrise / sunset<br><span id="sun">{sunrise} / {sunset}</span></div>
</div>
<div class="forecast">{forecast}</div>
</section>
</main>
<script>{SCRIPT}</script>"#,
        location = escape(&record.location),
        temperature = record.temperature,
        description = escape(&record.description),
        feels_like = record.feels_like,
        humidity = record.humidity,
        wind_speed = record.wind_speed,
        sunrise = escape(&record.sunrise),
        sunset = escape(&record.sunset),
    );

    layout("Weather", &body)
}

pub fn not_found() -> String {
    layout(
        "Not found",
        r#"<main><h1>404</h1><p>This page does not exist.</p><p><a href="/">Back to the weather</a></p></main>"#,
    )
}

pub fn internal_error() -> String {
    layout(
        "Server error",
        r#"<main><h1>500</h1><p>Something went wrong on our side.</p><p><a href="/">Back to the weather</a></p></main>"#,
    )
}

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{}</title>\n<style>{STYLE}</style>\n</head>\n<body>\n{body}\n</body>\n</html>\n",
        escape(title)
    )
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
