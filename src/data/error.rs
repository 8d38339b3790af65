use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    /// Connection, TLS, timeout or body-read failure.
    #[error("{endpoint} request failed: {source}")]
    NetworkFailure {
        endpoint: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{endpoint} returned HTTP {status}")]
    HttpError {
        endpoint: &'static str,
        status: StatusCode,
    },

    #[error("failed to parse {endpoint} payload: {source}")]
    ParseFailure {
        endpoint: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// Valid JSON that cannot fill a fixed-length series.
    #[error("malformed {field}: {detail}")]
    MalformedPayload { field: &'static str, detail: String },

    #[error("{endpoint} returned no results")]
    NoResults { endpoint: &'static str },
}

impl FetchError {
    pub(crate) fn too_short(field: &'static str, actual: usize, required: usize) -> Self {
        Self::MalformedPayload {
            field,
            detail: format!("{actual} entries, need at least {required}"),
        }
    }

    pub(crate) fn missing_value(field: &'static str, index: usize) -> Self {
        Self::MalformedPayload {
            field,
            detail: format!("no usable value at index {index}"),
        }
    }

    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::NetworkFailure { source, .. } if source.is_timeout())
    }

    #[must_use]
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::HttpError { status, .. } => Some(*status),
            _ => None,
        }
    }
}
