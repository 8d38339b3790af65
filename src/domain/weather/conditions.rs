use serde::Serialize;

use super::WeatherCode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum IconCategory {
    Clear,
    PartlyCloudy,
    Overcast,
    Fog,
    Drizzle,
    Rain,
    Snow,
    RainShowers,
    SnowShowers,
    Thunder,
    Cloud,
}

/// Ordered from no data through increasing severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum AirQualityBand {
    Unknown,
    Good,
    Fair,
    Moderate,
    Poor,
    VeryPoor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AirQualityInfo {
    pub band: AirQualityBand,
    pub description: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum UvBand {
    Low,
    Moderate,
    High,
    VeryHigh,
    Extreme,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SkyTone {
    Night,
    Clear,
    Cloudy,
    Rain,
    Snow,
    Storm,
    Default,
}

/// Which codes a classification row claims.
#[derive(Debug, Clone, Copy)]
enum CodeMatch {
    AnyOf(&'static [WeatherCode]),
    Between(WeatherCode, WeatherCode),
    AtLeast(WeatherCode),
}

impl CodeMatch {
    fn matches(self, code: WeatherCode) -> bool {
        match self {
            Self::AnyOf(codes) => codes.contains(&code),
            Self::Between(low, high) => (low..=high).contains(&code),
            Self::AtLeast(low) => code >= low,
        }
    }
}

// Evaluated top to bottom, first match wins.
const ICON_RULES: &[(CodeMatch, IconCategory)] = &[
    (CodeMatch::AnyOf(&[0, 1]), IconCategory::Clear),
    (CodeMatch::AnyOf(&[2]), IconCategory::PartlyCloudy),
    (CodeMatch::AnyOf(&[3]), IconCategory::Overcast),
    (CodeMatch::AnyOf(&[45, 48]), IconCategory::Fog),
    (CodeMatch::Between(51, 55), IconCategory::Drizzle),
    (CodeMatch::Between(61, 67), IconCategory::Rain),
    (CodeMatch::Between(71, 77), IconCategory::Snow),
    (CodeMatch::Between(80, 82), IconCategory::RainShowers),
    (CodeMatch::Between(85, 86), IconCategory::SnowShowers),
    (CodeMatch::AtLeast(95), IconCategory::Thunder),
];

const SKY_RULES: &[(CodeMatch, SkyTone)] = &[
    (CodeMatch::AnyOf(&[0, 1]), SkyTone::Clear),
    (CodeMatch::AnyOf(&[2, 3]), SkyTone::Cloudy),
    (CodeMatch::Between(61, 67), SkyTone::Rain),
    (CodeMatch::Between(71, 77), SkyTone::Snow),
    (CodeMatch::AtLeast(95), SkyTone::Storm),
];

// Inclusive upper bounds, ascending.
const AQI_BANDS: &[(f64, AirQualityBand)] = &[
    (20.0, AirQualityBand::Good),
    (40.0, AirQualityBand::Fair),
    (60.0, AirQualityBand::Moderate),
    (80.0, AirQualityBand::Poor),
];

const UV_BANDS: &[(f64, UvBand)] = &[
    (2.0, UvBand::Low),
    (5.0, UvBand::Moderate),
    (7.0, UvBand::High),
    (10.0, UvBand::VeryHigh),
];

pub const WEATHER_CODE_LABELS: &[(WeatherCode, &str)] = &[
    (0, "Clear sky"),
    (1, "Mainly clear"),
    (2, "Partly cloudy"),
    (3, "Overcast"),
    (45, "Foggy"),
    (48, "Depositing rime fog"),
    (51, "Light drizzle"),
    (53, "Moderate drizzle"),
    (55, "Dense drizzle"),
    (56, "Light freezing drizzle"),
    (57, "Dense freezing drizzle"),
    (61, "Slight rain"),
    (63, "Moderate rain"),
    (65, "Heavy rain"),
    (66, "Light freezing rain"),
    (67, "Heavy freezing rain"),
    (71, "Slight snow"),
    (73, "Moderate snow"),
    (75, "Heavy snow"),
    (77, "Snow grains"),
    (80, "Slight rain showers"),
    (81, "Moderate rain showers"),
    (82, "Violent rain showers"),
    (85, "Slight snow showers"),
    (86, "Heavy snow showers"),
    (95, "Thunderstorm"),
    (96, "Thunderstorm with slight hail"),
    (99, "Thunderstorm with heavy hail"),
];

#[must_use]
pub fn describe_weather_code(code: WeatherCode) -> &'static str {
    WEATHER_CODE_LABELS
        .iter()
        .find_map(|(candidate, label)| (*candidate == code).then_some(*label))
        .unwrap_or("Unknown")
}

#[must_use]
pub fn icon_category(code: WeatherCode) -> IconCategory {
    first_match(ICON_RULES, code).unwrap_or(IconCategory::Cloud)
}

/// Backdrop classification; night wins over every condition.
#[must_use]
pub fn sky_tone(code: WeatherCode, is_day: bool) -> SkyTone {
    if !is_day {
        return SkyTone::Night;
    }
    first_match(SKY_RULES, code).unwrap_or(SkyTone::Default)
}

#[must_use]
pub fn air_quality_band(aqi: Option<f64>) -> AirQualityInfo {
    let band = match aqi {
        None => AirQualityBand::Unknown,
        Some(value) => first_at_most(AQI_BANDS, value).unwrap_or(AirQualityBand::VeryPoor),
    };
    AirQualityInfo {
        band,
        description: band.description(),
    }
}

#[must_use]
pub fn uv_band(uv: f64) -> UvBand {
    first_at_most(UV_BANDS, uv).unwrap_or(UvBand::Extreme)
}

fn first_match<T: Copy>(rules: &[(CodeMatch, T)], code: WeatherCode) -> Option<T> {
    rules
        .iter()
        .find_map(|(rule, result)| rule.matches(code).then_some(*result))
}

fn first_at_most<T: Copy>(bands: &[(f64, T)], value: f64) -> Option<T> {
    bands
        .iter()
        .find_map(|(upper, band)| (value <= *upper).then_some(*band))
}

impl AirQualityBand {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Unknown => "Unknown",
            Self::Good => "Good",
            Self::Fair => "Fair",
            Self::Moderate => "Moderate",
            Self::Poor => "Poor",
            Self::VeryPoor => "Very Poor",
        }
    }

    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Self::Unknown => "No data",
            Self::Good => "Air quality is excellent",
            Self::Fair => "Air quality is acceptable",
            Self::Moderate => "Sensitive groups may experience effects",
            Self::Poor => "Everyone may experience effects",
            Self::VeryPoor => "Health warning of emergency conditions",
        }
    }
}

impl UvBand {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Moderate => "Moderate",
            Self::High => "High",
            Self::VeryHigh => "Very High",
            Self::Extreme => "Extreme",
        }
    }

    /// Sun protection advice; anything above the moderate band needs sunscreen.
    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Self::Low | Self::Moderate => "Protection not required",
            Self::High | Self::VeryHigh | Self::Extreme => "Wear sunscreen",
        }
    }
}
