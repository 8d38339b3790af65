use std::time::Duration;

use reqwest::Client;
use serde::{Serialize, de::DeserializeOwned};

use super::error::FetchError;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

pub(crate) fn build_client(timeout: Duration) -> Client {
    Client::builder()
        .timeout(timeout)
        .build()
        .unwrap_or_default()
}

/// GET `url` and decode the body as JSON, classifying every failure.
pub(crate) async fn get_json<T, Q>(
    client: &Client,
    url: &str,
    query: &Q,
    endpoint: &'static str,
) -> Result<T, FetchError>
where
    T: DeserializeOwned,
    Q: Serialize + ?Sized,
{
    let response = client
        .get(url)
        .query(query)
        .send()
        .await
        .map_err(|source| FetchError::NetworkFailure { endpoint, source })?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::HttpError { endpoint, status });
    }

    let body = response
        .bytes()
        .await
        .map_err(|source| FetchError::NetworkFailure { endpoint, source })?;

    serde_json::from_slice(&body).map_err(|source| FetchError::ParseFailure { endpoint, source })
}
