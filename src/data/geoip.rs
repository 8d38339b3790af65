use std::time::Duration;

use futures::future::{BoxFuture, FutureExt};
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;

use super::http::{build_client, get_json};
use crate::domain::weather::Coordinate;

pub const GEOIP_URL: &str = "https://ipapi.co/json/";

const GEOIP_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GeolocationError {
    #[error("location access declined")]
    Declined,
    #[error("location lookup failed: {0}")]
    Failed(String),
    #[error("location lookup timed out")]
    TimedOut,
}

/// Source of the device's current coordinate.
pub trait GeolocationProvider: Send + Sync {
    fn locate(&self) -> BoxFuture<'_, Result<Coordinate, GeolocationError>>;
}

/// Approximate position from the caller's public IP address.
#[derive(Debug, Clone)]
pub struct IpGeolocation {
    client: Client,
    url: String,
}

impl Default for IpGeolocation {
    fn default() -> Self {
        Self::new()
    }
}

impl IpGeolocation {
    #[must_use]
    pub fn new() -> Self {
        Self::with_url(GEOIP_URL)
    }

    #[must_use]
    pub fn with_url(url: impl Into<String>) -> Self {
        Self {
            client: build_client(GEOIP_TIMEOUT),
            url: url.into(),
        }
    }

    async fn lookup(&self) -> Result<Coordinate, GeolocationError> {
        let no_query: [(&str, &str); 0] = [];
        let response: IpApiResponse = get_json(&self.client, &self.url, &no_query, "ip geolocation")
            .await
            .map_err(|err| GeolocationError::Failed(err.to_string()))?;

        match (response.latitude, response.longitude) {
            (Some(latitude), Some(longitude)) => Ok(Coordinate::new(latitude, longitude)),
            _ => Err(GeolocationError::Failed(
                "response carried no coordinates".to_string(),
            )),
        }
    }
}

impl GeolocationProvider for IpGeolocation {
    fn locate(&self) -> BoxFuture<'_, Result<Coordinate, GeolocationError>> {
        self.lookup().boxed()
    }
}

/// Always answers with the same coordinate, e.g. one given on the command line.
#[derive(Debug, Clone, Copy)]
pub struct FixedGeolocation(pub Coordinate);

impl GeolocationProvider for FixedGeolocation {
    fn locate(&self) -> BoxFuture<'_, Result<Coordinate, GeolocationError>> {
        futures::future::ready(Ok(self.0)).boxed()
    }
}

/// A provider that never grants access.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeclinedGeolocation;

impl GeolocationProvider for DeclinedGeolocation {
    fn locate(&self) -> BoxFuture<'_, Result<Coordinate, GeolocationError>> {
        futures::future::ready(Err(GeolocationError::Declined)).boxed()
    }
}

/// Run `provider` with an upper bound on how long it may take.
pub async fn locate_with_timeout(
    provider: &dyn GeolocationProvider,
    timeout: Duration,
) -> Result<Coordinate, GeolocationError> {
    tokio::time::timeout(timeout, provider.locate())
        .await
        .unwrap_or(Err(GeolocationError::TimedOut))
}

#[derive(Debug, Deserialize)]
struct IpApiResponse {
    latitude: Option<f64>,
    longitude: Option<f64>,
}
