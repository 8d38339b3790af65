use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use super::{
    error::FetchError,
    http::{build_client, get_json},
};
use crate::domain::weather::{Coordinate, LocationCandidate, UNKNOWN_LOCATION};

pub const GEOCODE_SEARCH_URL: &str = "https://geocoding-api.open-meteo.com/v1/search";
pub const GEOCODE_REVERSE_URL: &str = "https://geocoding-api.open-meteo.com/v1/reverse";

pub const MAX_CANDIDATES: usize = 5;
pub const MIN_QUERY_CHARS: usize = 2;

const GEOCODE_TIMEOUT: Duration = Duration::from_secs(8);

/// Forward search and reverse lookup against the geocoding provider.
/// Neither operation surfaces an error to its caller.
#[derive(Debug, Clone)]
pub struct GeocodeClient {
    client: Client,
    search_url: String,
    reverse_url: String,
}

impl Default for GeocodeClient {
    fn default() -> Self {
        Self::new()
    }
}

impl GeocodeClient {
    #[must_use]
    pub fn new() -> Self {
        Self::with_urls(GEOCODE_SEARCH_URL, GEOCODE_REVERSE_URL)
    }

    #[must_use]
    pub fn with_urls(search_url: impl Into<String>, reverse_url: impl Into<String>) -> Self {
        Self::with_timeout(search_url, reverse_url, GEOCODE_TIMEOUT)
    }

    #[must_use]
    pub fn with_timeout(
        search_url: impl Into<String>,
        reverse_url: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            client: build_client(timeout),
            search_url: search_url.into(),
            reverse_url: reverse_url.into(),
        }
    }

    /// Up to [`MAX_CANDIDATES`] matches in provider order. The query is trimmed
    /// first and its length counted in characters; anything shorter than
    /// [`MIN_QUERY_CHARS`] returns nothing without touching the network.
    pub async fn search(&self, query: &str) -> Vec<LocationCandidate> {
        let query = query.trim();
        if query.chars().count() < MIN_QUERY_CHARS {
            return Vec::new();
        }

        match self.try_search(query).await {
            Ok(candidates) => candidates,
            Err(FetchError::NoResults { .. }) => {
                debug!(query, "location search found nothing");
                Vec::new()
            }
            Err(err) => {
                warn!(query, error = %err, "location search failed");
                Vec::new()
            }
        }
    }

    /// Display name for `coordinate`, or [`UNKNOWN_LOCATION`] on any failure.
    pub async fn resolve_name(&self, coordinate: Coordinate) -> String {
        match self.try_resolve_name(coordinate).await {
            Ok(name) => name,
            Err(err) => {
                debug!(
                    latitude = coordinate.latitude,
                    longitude = coordinate.longitude,
                    error = %err,
                    "reverse geocoding fell back to unknown location"
                );
                UNKNOWN_LOCATION.to_string()
            }
        }
    }

    async fn try_search(&self, query: &str) -> Result<Vec<LocationCandidate>, FetchError> {
        let count = MAX_CANDIDATES.to_string();
        let payload: GeocodeResponse = get_json(
            &self.client,
            &self.search_url,
            &[
                ("name", query),
                ("count", count.as_str()),
                ("language", "en"),
                ("format", "json"),
            ],
            "geocoding search",
        )
        .await?;

        let candidates: Vec<LocationCandidate> = payload
            .results
            .unwrap_or_default()
            .into_iter()
            .take(MAX_CANDIDATES)
            .map(LocationCandidate::from)
            .collect();

        if candidates.is_empty() {
            return Err(FetchError::NoResults {
                endpoint: "geocoding search",
            });
        }
        Ok(candidates)
    }

    async fn try_resolve_name(&self, coordinate: Coordinate) -> Result<String, FetchError> {
        let payload: ReverseResponse = get_json(
            &self.client,
            &self.reverse_url,
            &[
                ("latitude", coordinate.latitude.to_string()),
                ("longitude", coordinate.longitude.to_string()),
            ],
            "reverse geocoding",
        )
        .await?;

        payload
            .results
            .unwrap_or_default()
            .into_iter()
            .next()
            .and_then(ReverseResult::preferred_name)
            .ok_or(FetchError::NoResults {
                endpoint: "reverse geocoding",
            })
    }
}

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    results: Option<Vec<GeocodeResult>>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    name: String,
    latitude: f64,
    longitude: f64,
    country: Option<String>,
    admin1: Option<String>,
}

impl From<GeocodeResult> for LocationCandidate {
    fn from(entry: GeocodeResult) -> Self {
        Self {
            name: entry.name,
            admin1: entry.admin1,
            country: entry.country,
            coordinate: Coordinate::new(entry.latitude, entry.longitude),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ReverseResponse {
    results: Option<Vec<ReverseResult>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ReverseResult {
    name: Option<String>,
    city: Option<String>,
    admin1: Option<String>,
}

impl ReverseResult {
    /// name, then city, then top-level region; blanks do not count.
    fn preferred_name(self) -> Option<String> {
        [self.name, self.city, self.admin1]
            .into_iter()
            .flatten()
            .map(|value| value.trim().to_string())
            .find(|value| !value.is_empty())
    }
}
