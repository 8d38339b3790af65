use serde::Serialize;

use super::UnitSystem;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TemperatureUnit {
    Celsius,
    Fahrenheit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum WindSpeedUnit {
    KilometresPerHour,
    MilesPerHour,
}

/// Precipitation is always requested in millimetres, whatever the unit system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PrecipitationUnit {
    Millimetres,
}

/// Unit parameters sent with a forecast request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RequestUnits {
    pub temperature: TemperatureUnit,
    pub wind_speed: WindSpeedUnit,
    pub precipitation: PrecipitationUnit,
}

impl UnitSystem {
    #[must_use]
    pub fn request_units(self) -> RequestUnits {
        let (temperature, wind_speed) = match self {
            Self::Metric => (TemperatureUnit::Celsius, WindSpeedUnit::KilometresPerHour),
            Self::Imperial => (TemperatureUnit::Fahrenheit, WindSpeedUnit::MilesPerHour),
        };
        RequestUnits {
            temperature,
            wind_speed,
            precipitation: PrecipitationUnit::Millimetres,
        }
    }
}

impl TemperatureUnit {
    #[must_use]
    pub fn query_value(self) -> &'static str {
        match self {
            Self::Celsius => "celsius",
            Self::Fahrenheit => "fahrenheit",
        }
    }

    #[must_use]
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Celsius => "°C",
            Self::Fahrenheit => "°F",
        }
    }
}

impl WindSpeedUnit {
    #[must_use]
    pub fn query_value(self) -> &'static str {
        match self {
            Self::KilometresPerHour => "kmh",
            Self::MilesPerHour => "mph",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::KilometresPerHour => "km/h",
            Self::MilesPerHour => "mph",
        }
    }
}

impl PrecipitationUnit {
    #[must_use]
    pub fn query_value(self) -> &'static str {
        "mm"
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        "mm"
    }
}
