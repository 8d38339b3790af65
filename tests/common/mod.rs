#![allow(clippy::cast_precision_loss)]
#![allow(dead_code)]

use std::time::Duration;

use serde_json::{Value, json};
use weather_pro::app::settings::{Endpoints, Settings};
use wiremock::MockServer;

pub fn mock_settings(server: &MockServer) -> Settings {
    Settings {
        endpoints: Endpoints::rooted_at(&server.uri()),
        request_timeout: Duration::from_secs(5),
        ..Settings::default()
    }
}

pub fn current_block(temperature: f64, weather_code: u16) -> Value {
    json!({
        "time": "2026-02-12T10:00",
        "temperature_2m": temperature,
        "relative_humidity_2m": 73,
        "apparent_temperature": temperature - 1.4,
        "is_day": 1,
        "precipitation": 0.4,
        "rain": 0.4,
        "weather_code": weather_code,
        "cloud_cover": 88,
        "pressure_msl": 1008.2,
        "surface_pressure": 1001.5,
        "wind_speed_10m": 12.0,
        "wind_direction_10m": 220,
        "wind_gusts_10m": 31.0
    })
}

/// Forecast body with `hours` hourly entries and `days` daily entries.
pub fn forecast_body(temperature: f64, hours: usize, days: usize) -> Value {
    let times: Vec<String> = (0..hours)
        .map(|idx| format!("2026-02-{:02}T{:02}:00", 12 + idx / 24, idx % 24))
        .collect();
    let temps: Vec<f64> = (0..hours).map(|idx| temperature + idx as f64 * 0.5).collect();
    let dates: Vec<String> = (0..days).map(|idx| format!("2026-02-{:02}", 12 + idx)).collect();
    let sunrises: Vec<String> = dates.iter().map(|date| format!("{date}T07:21")).collect();
    let sunsets: Vec<String> = dates.iter().map(|date| format!("{date}T17:09")).collect();

    json!({
        "latitude": 59.33,
        "longitude": 18.07,
        "utc_offset_seconds": 3600,
        "timezone": "Europe/Stockholm",
        "current": current_block(temperature, 61),
        "hourly": {
            "time": times,
            "temperature_2m": temps,
            "relative_humidity_2m": vec![70; hours],
            "dew_point_2m": vec![2.1; hours],
            "apparent_temperature": temps.iter().map(|t| t - 1.0).collect::<Vec<_>>(),
            "precipitation_probability": vec![40; hours],
            "precipitation": vec![0.2; hours],
            "rain": vec![0.2; hours],
            "weather_code": vec![61; hours],
            "cloud_cover": vec![90; hours],
            "visibility": vec![12000; hours],
            "wind_speed_10m": vec![11.6; hours],
            "wind_direction_10m": vec![225; hours],
            "uv_index": vec![1.2; hours]
        },
        "daily": {
            "time": dates,
            "weather_code": vec![61; days],
            "temperature_2m_max": vec![9.4; days],
            "temperature_2m_min": vec![2.5; days],
            "apparent_temperature_max": vec![7.0; days],
            "apparent_temperature_min": vec![-0.6; days],
            "sunrise": sunrises,
            "sunset": sunsets,
            "uv_index_max": vec![1.8; days],
            "precipitation_sum": vec![3.2; days],
            "rain_sum": vec![3.2; days],
            "precipitation_probability_max": vec![70; days],
            "wind_speed_10m_max": vec![24.4; days],
            "wind_gusts_10m_max": vec![41.0; days],
            "wind_direction_10m_dominant": vec![230; days]
        }
    })
}

pub fn full_forecast_body(temperature: f64) -> Value {
    forecast_body(temperature, 48, 7)
}

pub fn air_quality_body(european_aqi: u32) -> Value {
    json!({
        "current": {
            "time": "2026-02-12T10:00",
            "european_aqi": european_aqi,
            "pm2_5": 8.1,
            "pm10": 14.0,
            "carbon_monoxide": 180.0,
            "nitrogen_dioxide": 12.3,
            "sulphur_dioxide": 1.1,
            "ozone": 61.0,
            "dust": 0.0
        }
    })
}

pub fn search_body(names: &[(&str, &str, f64, f64)]) -> Value {
    let results: Vec<Value> = names
        .iter()
        .map(|(name, admin1, latitude, longitude)| {
            json!({
                "name": name,
                "admin1": admin1,
                "country": "United States",
                "latitude": latitude,
                "longitude": longitude
            })
        })
        .collect();
    json!({ "results": results })
}
