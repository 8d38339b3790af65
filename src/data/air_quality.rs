use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;

use super::{
    error::FetchError,
    http::{DEFAULT_TIMEOUT, build_client, get_json},
};
use crate::domain::weather::{AirQualitySnapshot, Coordinate};

pub const AIR_QUALITY_URL: &str = "https://air-quality-api.open-meteo.com/v1/air-quality";

const CURRENT_FIELDS: &str =
    "european_aqi,pm10,pm2_5,carbon_monoxide,nitrogen_dioxide,sulphur_dioxide,ozone,dust";

#[derive(Debug, Clone)]
pub struct AirQualityClient {
    client: Client,
    base_url: String,
}

impl Default for AirQualityClient {
    fn default() -> Self {
        Self::new()
    }
}

impl AirQualityClient {
    #[must_use]
    pub fn new() -> Self {
        Self::with_base_url(AIR_QUALITY_URL)
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

    pub async fn fetch(&self, coordinate: Coordinate) -> Result<AirQualitySnapshot, FetchError> {
        let query = [
            ("latitude", coordinate.latitude.to_string()),
            ("longitude", coordinate.longitude.to_string()),
            ("current", CURRENT_FIELDS.to_string()),
        ];

        let payload: AirQualityResponse =
            get_json(&self.client, &self.base_url, &query, "air quality").await?;
        Ok(payload.current.unwrap_or_default())
    }
}

#[derive(Debug, Deserialize)]
struct AirQualityResponse {
    #[serde(default)]
    current: Option<AirQualitySnapshot>,
}
