use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;

use super::{
    error::FetchError,
    http::{DEFAULT_TIMEOUT, build_client, get_json},
};
use crate::domain::weather::{Coordinate, CurrentConditions, RequestUnits, WeatherCode};

pub const FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";

const CURRENT_FIELDS: &str = "temperature_2m,relative_humidity_2m,apparent_temperature,is_day,precipitation,rain,weather_code,cloud_cover,pressure_msl,surface_pressure,wind_speed_10m,wind_direction_10m,wind_gusts_10m";
const HOURLY_FIELDS: &str = "temperature_2m,relative_humidity_2m,dew_point_2m,apparent_temperature,precipitation_probability,precipitation,rain,weather_code,cloud_cover,visibility,wind_speed_10m,wind_direction_10m,uv_index";
const DAILY_FIELDS: &str = "weather_code,temperature_2m_max,temperature_2m_min,apparent_temperature_max,apparent_temperature_min,sunrise,sunset,uv_index_max,precipitation_sum,rain_sum,precipitation_probability_max,wind_speed_10m_max,wind_gusts_10m_max,wind_direction_10m_dominant";

#[derive(Debug, Clone)]
pub struct ForecastClient {
    client: Client,
    base_url: String,
}

impl Default for ForecastClient {
    fn default() -> Self {
        Self::new()
    }
}

impl ForecastClient {
    #[must_use]
    pub fn new() -> Self {
        Self::with_base_url(FORECAST_URL)
    }

    #[must_use]
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    #[must_use]
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client: build_client(timeout),
            base_url: base_url.into(),
        }
    }

    /// Combined current + hourly + daily request in the given units.
    pub async fn fetch(
        &self,
        coordinate: Coordinate,
        units: RequestUnits,
    ) -> Result<ForecastPayload, FetchError> {
        let query = [
            ("latitude", coordinate.latitude.to_string()),
            ("longitude", coordinate.longitude.to_string()),
            ("current", CURRENT_FIELDS.to_string()),
            ("hourly", HOURLY_FIELDS.to_string()),
            ("daily", DAILY_FIELDS.to_string()),
            ("temperature_unit", units.temperature.query_value().to_string()),
            ("wind_speed_unit", units.wind_speed.query_value().to_string()),
            (
                "precipitation_unit",
                units.precipitation.query_value().to_string(),
            ),
            ("timezone", "auto".to_string()),
        ];

        get_json(&self.client, &self.base_url, &query, "forecast").await
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ForecastPayload {
    #[serde(default)]
    pub utc_offset_seconds: i32,
    pub current: CurrentBlock,
    #[serde(default)]
    pub hourly: HourlyBlock,
    #[serde(default)]
    pub daily: DailyBlock,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CurrentBlock {
    pub temperature_2m: f64,
    pub relative_humidity_2m: f64,
    pub apparent_temperature: f64,
    pub is_day: u8,
    #[serde(default)]
    pub precipitation: f64,
    pub rain: Option<f64>,
    pub weather_code: WeatherCode,
    #[serde(default)]
    pub cloud_cover: f64,
    pub pressure_msl: f64,
    pub surface_pressure: Option<f64>,
    pub wind_speed_10m: f64,
    pub wind_direction_10m: f64,
    pub wind_gusts_10m: Option<f64>,
}

impl From<&CurrentBlock> for CurrentConditions {
    fn from(block: &CurrentBlock) -> Self {
        Self {
            temperature: block.temperature_2m,
            feels_like: block.apparent_temperature,
            humidity: block.relative_humidity_2m,
            pressure: block.pressure_msl,
            surface_pressure: block.surface_pressure,
            cloud_cover: block.cloud_cover,
            wind_speed: block.wind_speed_10m,
            wind_direction: block.wind_direction_10m,
            wind_gusts: block.wind_gusts_10m,
            weather_code: block.weather_code,
            is_daylight: block.is_day == 1,
            precipitation: block.precipitation,
            rain: block.rain,
        }
    }
}

/// Parallel arrays indexed by position in `time`. Missing arrays decode as
/// empty so the normalizer can report which field fell short.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct HourlyBlock {
    pub time: Vec<String>,
    pub temperature_2m: Vec<Option<f64>>,
    pub relative_humidity_2m: Vec<Option<f64>>,
    pub dew_point_2m: Vec<Option<f64>>,
    pub apparent_temperature: Vec<Option<f64>>,
    pub precipitation_probability: Vec<Option<f64>>,
    pub precipitation: Vec<Option<f64>>,
    pub rain: Vec<Option<f64>>,
    pub weather_code: Vec<Option<WeatherCode>>,
    pub cloud_cover: Vec<Option<f64>>,
    pub visibility: Vec<Option<f64>>,
    pub wind_speed_10m: Vec<Option<f64>>,
    pub wind_direction_10m: Vec<Option<f64>>,
    pub uv_index: Vec<Option<f64>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DailyBlock {
    pub time: Vec<String>,
    pub weather_code: Vec<Option<WeatherCode>>,
    pub temperature_2m_max: Vec<Option<f64>>,
    pub temperature_2m_min: Vec<Option<f64>>,
    pub apparent_temperature_max: Vec<Option<f64>>,
    pub apparent_temperature_min: Vec<Option<f64>>,
    pub sunrise: Vec<Option<String>>,
    pub sunset: Vec<Option<String>>,
    pub uv_index_max: Vec<Option<f64>>,
    pub precipitation_sum: Vec<Option<f64>>,
    pub rain_sum: Vec<Option<f64>>,
    pub precipitation_probability_max: Vec<Option<f64>>,
    pub wind_speed_10m_max: Vec<Option<f64>>,
    pub wind_gusts_10m_max: Vec<Option<f64>>,
    pub wind_direction_10m_dominant: Vec<Option<f64>>,
}
