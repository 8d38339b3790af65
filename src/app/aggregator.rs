use chrono::Utc;
use thiserror::Error;
use tracing::{debug, warn};

use super::settings::Settings;
use crate::{
    data::{
        FetchError,
        air_quality::AirQualityClient,
        forecast::ForecastClient,
        normalize::{HourlyStart, hourly_start_index, normalize_daily, normalize_hourly},
    },
    domain::weather::{AirQualitySnapshot, CurrentConditions, Location, Snapshot, UnitSystem},
};

pub const USER_FACING_FAILURE: &str = "Failed to load weather data. Please try again.";

/// The forecast half of an aggregation failed; nothing may be committed.
#[derive(Debug, Error)]
#[error("Failed to load weather data. Please try again.")]
pub struct AggregationError {
    #[source]
    cause: FetchError,
}

impl AggregationError {
    #[must_use]
    pub fn cause(&self) -> &FetchError {
        &self.cause
    }

    #[must_use]
    pub fn user_message(&self) -> &'static str {
        USER_FACING_FAILURE
    }
}

impl From<FetchError> for AggregationError {
    fn from(cause: FetchError) -> Self {
        Self { cause }
    }
}

/// Fetches forecast and air quality side by side and assembles a [`Snapshot`].
#[derive(Debug, Clone)]
pub struct WeatherAggregator {
    forecast: ForecastClient,
    air_quality: AirQualityClient,
    hourly_start: HourlyStart,
}

impl WeatherAggregator {
    #[must_use]
    pub fn new(forecast: ForecastClient, air_quality: AirQualityClient) -> Self {
        Self {
            forecast,
            air_quality,
            hourly_start: HourlyStart::default(),
        }
    }

    #[must_use]
    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(
            ForecastClient::with_timeout(&settings.endpoints.forecast, settings.request_timeout),
            AirQualityClient::with_timeout(
                &settings.endpoints.air_quality,
                settings.request_timeout,
            ),
        )
        .with_hourly_start(settings.hourly_start)
    }

    #[must_use]
    pub fn with_hourly_start(mut self, hourly_start: HourlyStart) -> Self {
        self.hourly_start = hourly_start;
        self
    }

    /// Forecast failures are fatal; air-quality failures leave the reading absent.
    pub async fn fetch_all(
        &self,
        location: &Location,
        units: UnitSystem,
    ) -> Result<Snapshot, AggregationError> {
        self.assemble(location, units).await.map_err(|err| {
            warn!(location = location.name(), error = %err, "weather aggregation failed");
            AggregationError::from(err)
        })
    }

    async fn assemble(
        &self,
        location: &Location,
        units: UnitSystem,
    ) -> Result<Snapshot, FetchError> {
        let coordinate = location.coordinate();
        let forecast = self.forecast.fetch(coordinate, units.request_units());
        let air_quality = async {
            let reading = self.air_quality.fetch(coordinate).await.unwrap_or_else(|err| {
                warn!(error = %err, "air quality unavailable, continuing without it");
                AirQualitySnapshot::absent()
            });
            Ok::<_, FetchError>(reading)
        };

        let (payload, air_quality) = tokio::try_join!(forecast, air_quality)?;

        let start = hourly_start_index(
            &payload.hourly,
            self.hourly_start,
            payload.utc_offset_seconds,
            Utc::now(),
        )?;
        let hourly = normalize_hourly(&payload.hourly, start)?;
        let daily = normalize_daily(&payload.daily)?;
        debug!(location = location.name(), start, "forecast normalized");

        Ok(Snapshot {
            location: location.clone(),
            units,
            current: CurrentConditions::from(&payload.current),
            hourly,
            daily,
            air_quality,
            last_update: Utc::now(),
        })
    }
}
