use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

mod conditions;
mod units;

pub use conditions::{
    AirQualityBand, AirQualityInfo, IconCategory, SkyTone, UvBand, WEATHER_CODE_LABELS,
    air_quality_band, describe_weather_code, icon_category, sky_tone, uv_band,
};
pub use units::{PrecipitationUnit, RequestUnits, TemperatureUnit, WindSpeedUnit};

/// Integer condition code as published by the forecast provider (WMO table).
pub type WeatherCode = u16;

pub const HOURLY_POINTS: usize = 24;
pub const DAILY_POINTS: usize = 7;

pub const UNKNOWN_LOCATION: &str = "Unknown Location";

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// A resolved place. Replaced wholesale on every change, never edited in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    coordinate: Coordinate,
    name: String,
}

impl Location {
    #[must_use]
    pub fn new(coordinate: Coordinate, name: impl Into<String>) -> Self {
        Self {
            coordinate,
            name: name.into(),
        }
    }

    #[must_use]
    pub fn from_coords(lat: f64, lon: f64) -> Self {
        Self::new(Coordinate::new(lat, lon), format!("{lat:.4}, {lon:.4}"))
    }

    #[must_use]
    pub fn coordinate(&self) -> Coordinate {
        self.coordinate
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Default for Location {
    fn default() -> Self {
        Self::new(Coordinate::new(51.5074, -0.1278), "London")
    }
}

impl From<&LocationCandidate> for Location {
    fn from(candidate: &LocationCandidate) -> Self {
        Self::new(candidate.coordinate, candidate.name.clone())
    }
}

/// One forward-geocoding hit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationCandidate {
    pub name: String,
    pub admin1: Option<String>,
    pub country: Option<String>,
    pub coordinate: Coordinate,
}

impl LocationCandidate {
    #[must_use]
    pub fn display_name(&self) -> String {
        match (&self.admin1, &self.country) {
            (Some(admin), Some(country)) => format!("{}, {}, {}", self.name, admin, country),
            (None, Some(country)) => format!("{}, {}", self.name, country),
            (Some(admin), None) => format!("{}, {}", self.name, admin),
            (None, None) => self.name.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitSystem {
    #[default]
    Metric,
    Imperial,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrentConditions {
    pub temperature: f64,
    pub feels_like: f64,
    pub humidity: f64,
    pub pressure: f64,
    pub surface_pressure: Option<f64>,
    pub cloud_cover: f64,
    pub wind_speed: f64,
    pub wind_direction: f64,
    pub wind_gusts: Option<f64>,
    pub weather_code: WeatherCode,
    pub is_daylight: bool,
    pub precipitation: f64,
    pub rain: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourlyPoint {
    pub time: NaiveDateTime,
    pub temperature: i32,
    pub feels_like: i32,
    pub precipitation_probability: f64,
    pub humidity: Option<f64>,
    pub dew_point: Option<f64>,
    pub precipitation: Option<f64>,
    pub rain: Option<f64>,
    pub wind_speed: i32,
    pub wind_direction: Option<f64>,
    pub weather_code: WeatherCode,
    pub icon: IconCategory,
    pub uv_index: f64,
    pub cloud_cover: Option<f64>,
    pub visibility: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyPoint {
    pub date: NaiveDate,
    pub temperature_max: i32,
    pub temperature_min: i32,
    pub feels_like_max: Option<i32>,
    pub feels_like_min: Option<i32>,
    pub weather_code: WeatherCode,
    pub icon: IconCategory,
    pub precipitation_probability: f64,
    pub precipitation_sum: Option<f64>,
    pub rain_sum: Option<f64>,
    pub sunrise: Option<NaiveDateTime>,
    pub sunset: Option<NaiveDateTime>,
    pub uv_index_max: Option<f64>,
    pub wind_speed_max: i32,
    pub wind_gusts_max: Option<i32>,
    pub wind_direction_dominant: Option<f64>,
}

/// Exactly [`HOURLY_POINTS`] consecutive hours.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct HourlySeries(Vec<HourlyPoint>);

impl HourlySeries {
    /// Returns `None` unless `points` holds exactly [`HOURLY_POINTS`] entries.
    #[must_use]
    pub fn new(points: Vec<HourlyPoint>) -> Option<Self> {
        (points.len() == HOURLY_POINTS).then_some(Self(points))
    }

    #[must_use]
    pub fn points(&self) -> &[HourlyPoint] {
        &self.0
    }

    #[must_use]
    pub fn first(&self) -> &HourlyPoint {
        &self.0[0]
    }
}

/// Exactly [`DAILY_POINTS`] consecutive days.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct DailySeries(Vec<DailyPoint>);

impl DailySeries {
    /// Returns `None` unless `points` holds exactly [`DAILY_POINTS`] entries.
    #[must_use]
    pub fn new(points: Vec<DailyPoint>) -> Option<Self> {
        (points.len() == DAILY_POINTS).then_some(Self(points))
    }

    #[must_use]
    pub fn points(&self) -> &[DailyPoint] {
        &self.0
    }

    #[must_use]
    pub fn today(&self) -> &DailyPoint {
        &self.0[0]
    }
}

/// Current pollutant readings. Every field stays `None` when the provider
/// omitted it so callers can render "N/A" instead of a misleading zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AirQualitySnapshot {
    pub european_aqi: Option<f64>,
    pub pm2_5: Option<f64>,
    pub pm10: Option<f64>,
    pub carbon_monoxide: Option<f64>,
    pub nitrogen_dioxide: Option<f64>,
    pub sulphur_dioxide: Option<f64>,
    pub ozone: Option<f64>,
    pub dust: Option<f64>,
}

impl AirQualitySnapshot {
    #[must_use]
    pub fn absent() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_absent(&self) -> bool {
        *self == Self::absent()
    }

    #[must_use]
    pub fn band(&self) -> AirQualityInfo {
        air_quality_band(self.european_aqi)
    }
}

/// Everything the display layer needs for one location, fetched in one pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub location: Location,
    pub units: UnitSystem,
    pub current: CurrentConditions,
    pub hourly: HourlySeries,
    pub daily: DailySeries,
    pub air_quality: AirQualitySnapshot,
    pub last_update: DateTime<Utc>,
}

impl Snapshot {
    #[must_use]
    pub fn description(&self) -> &'static str {
        describe_weather_code(self.current.weather_code)
    }

    #[must_use]
    pub fn icon(&self) -> IconCategory {
        icon_category(self.current.weather_code)
    }

    #[must_use]
    pub fn sky_tone(&self) -> SkyTone {
        sky_tone(self.current.weather_code, self.current.is_daylight)
    }
}

/// Nearest integer with halves rounded toward positive infinity (-2.5 -> -2, 2.5 -> 3).
#[must_use]
pub fn round_to_int(value: f64) -> i32 {
    (value + 0.5).floor() as i32
}

#[must_use]
pub fn parse_datetime(value: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M").ok()
}

#[must_use]
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}
