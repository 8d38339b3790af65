#![allow(clippy::missing_errors_doc)]

use clap::{ArgAction, Parser, ValueEnum};

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum UnitsArg {
    Metric,
    Imperial,
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum HourlyStartArg {
    FirstEntry,
    CurrentHour,
}

#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Parser, Clone)]
#[command(
    name = "weather-pro",
    version,
    about = "Current conditions, 24-hour and 7-day forecast with air quality"
)]
pub struct Cli {
    /// City name; resolved to the best geocoding match
    #[arg(conflicts_with_all = ["lat", "lon"])]
    pub city: Option<String>,

    /// Unit system for temperature and wind speed
    #[arg(long, value_enum, default_value_t = UnitsArg::Metric)]
    pub units: UnitsArg,

    /// Direct latitude (requires --lon)
    #[arg(long, allow_hyphen_values = true)]
    pub lat: Option<f64>,

    /// Direct longitude (requires --lat)
    #[arg(long, allow_hyphen_values = true)]
    pub lon: Option<f64>,

    /// List geocoding candidates for a query and exit
    #[arg(long, value_name = "QUERY")]
    pub search: Option<String>,

    /// Print the snapshot as JSON
    #[arg(long)]
    pub json: bool,

    /// Keep running and refresh periodically
    #[arg(long)]
    pub watch: bool,

    /// Refresh interval in seconds for --watch
    #[arg(long, default_value_t = 600)]
    pub refresh_interval: u64,

    /// Where the 24-hour window starts in the hourly forecast
    #[arg(long, value_enum, default_value_t = HourlyStartArg::FirstEntry)]
    pub hourly_start: HourlyStartArg,

    /// Skip IP geolocation and start from the default location
    #[arg(long)]
    pub no_geolocate: bool,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u64).range(1..=120))]
    pub timeout: u64,

    /// Forecast endpoint override
    #[arg(long, hide = true)]
    pub forecast_url: Option<String>,

    /// Air-quality endpoint override
    #[arg(long, hide = true)]
    pub air_quality_url: Option<String>,

    /// Forward geocoding endpoint override
    #[arg(long, hide = true)]
    pub geocode_url: Option<String>,

    /// Reverse geocoding endpoint override
    #[arg(long, hide = true)]
    pub reverse_geocode_url: Option<String>,

    /// IP geolocation endpoint override
    #[arg(long, hide = true)]
    pub geoip_url: Option<String>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn validate(&self) -> anyhow::Result<()> {
        match (self.lat, self.lon) {
            (Some(_), None) | (None, Some(_)) => {
                anyhow::bail!("--lat and --lon must be provided together")
            }
            (Some(lat), Some(lon))
                if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) =>
            {
                anyhow::bail!("coordinates out of range: {lat}, {lon}")
            }
            _ => Ok(()),
        }
    }

    /// Default `tracing` filter directive for the requested verbosity.
    #[must_use]
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    }
}
