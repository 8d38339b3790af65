use std::time::Duration;

use crate::{
    cli::{Cli, HourlyStartArg, UnitsArg},
    data::{
        DEFAULT_TIMEOUT, air_quality::AIR_QUALITY_URL, forecast::FORECAST_URL,
        geocode::{GEOCODE_REVERSE_URL, GEOCODE_SEARCH_URL},
        geoip::GEOIP_URL,
        normalize::HourlyStart,
    },
    domain::weather::{Location, UnitSystem},
};

const MIN_REFRESH_SECS: u64 = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub forecast: String,
    pub air_quality: String,
    pub geocode_search: String,
    pub geocode_reverse: String,
    pub ip_geolocation: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            forecast: FORECAST_URL.to_string(),
            air_quality: AIR_QUALITY_URL.to_string(),
            geocode_search: GEOCODE_SEARCH_URL.to_string(),
            geocode_reverse: GEOCODE_REVERSE_URL.to_string(),
            ip_geolocation: GEOIP_URL.to_string(),
        }
    }
}

impl Endpoints {
    /// Every endpoint rooted at one base URL, using the provider's paths.
    #[must_use]
    pub fn rooted_at(base: &str) -> Self {
        let base = base.trim_end_matches('/');
        Self {
            forecast: format!("{base}/v1/forecast"),
            air_quality: format!("{base}/v1/air-quality"),
            geocode_search: format!("{base}/v1/search"),
            geocode_reverse: format!("{base}/v1/reverse"),
            ip_geolocation: format!("{base}/json/"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub endpoints: Endpoints,
    pub request_timeout: Duration,
    pub geolocation_timeout: Duration,
    pub hourly_start: HourlyStart,
    pub units: UnitSystem,
    pub default_location: Location,
    /// Periodic refresh; `None` refreshes only on demand.
    pub refresh_interval: Option<Duration>,
    /// Schedule a backoff retry after a failed refresh.
    pub auto_retry: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            endpoints: Endpoints::default(),
            request_timeout: DEFAULT_TIMEOUT,
            geolocation_timeout: Duration::from_secs(5),
            hourly_start: HourlyStart::default(),
            units: UnitSystem::default(),
            default_location: Location::default(),
            refresh_interval: None,
            auto_retry: false,
        }
    }
}

impl Settings {
    #[must_use]
    pub fn from_cli(cli: &Cli) -> Self {
        let defaults = Endpoints::default();
        let endpoints = Endpoints {
            forecast: cli.forecast_url.clone().unwrap_or(defaults.forecast),
            air_quality: cli.air_quality_url.clone().unwrap_or(defaults.air_quality),
            geocode_search: cli.geocode_url.clone().unwrap_or(defaults.geocode_search),
            geocode_reverse: cli
                .reverse_geocode_url
                .clone()
                .unwrap_or(defaults.geocode_reverse),
            ip_geolocation: cli.geoip_url.clone().unwrap_or(defaults.ip_geolocation),
        };

        Self {
            endpoints,
            request_timeout: Duration::from_secs(cli.timeout),
            units: match cli.units {
                UnitsArg::Metric => UnitSystem::Metric,
                UnitsArg::Imperial => UnitSystem::Imperial,
            },
            hourly_start: match cli.hourly_start {
                HourlyStartArg::FirstEntry => HourlyStart::FirstEntry,
                HourlyStartArg::CurrentHour => HourlyStart::CurrentHour,
            },
            refresh_interval: cli
                .watch
                .then(|| Duration::from_secs(cli.refresh_interval.max(MIN_REFRESH_SECS))),
            auto_retry: cli.watch,
            ..Self::default()
        }
    }
}
