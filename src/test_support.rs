use chrono::{Duration, NaiveDate, NaiveDateTime, Utc};

use crate::{
    app::settings::{Endpoints, Settings},
    domain::weather::{
        AirQualitySnapshot, CurrentConditions, DAILY_POINTS, DailyPoint, DailySeries,
        HOURLY_POINTS, HourlyPoint, HourlySeries, IconCategory, Location, Snapshot, UnitSystem,
    },
};

fn parse_time(value: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M").expect("valid time fixture")
}

/// Settings pointing every endpoint at a port nothing listens on.
pub(crate) fn offline_settings() -> Settings {
    Settings {
        endpoints: Endpoints::rooted_at("http://127.0.0.1:9"),
        request_timeout: std::time::Duration::from_millis(200),
        ..Settings::default()
    }
}

pub(crate) fn sample_snapshot(location: Location) -> Snapshot {
    let start = parse_time("2026-02-12T00:00");
    let hourly = (0..HOURLY_POINTS)
        .map(|idx| HourlyPoint {
            time: start + Duration::hours(i64::try_from(idx).unwrap_or(0)),
            temperature: 7,
            feels_like: 5,
            precipitation_probability: 20.0,
            humidity: Some(80.0),
            dew_point: Some(4.0),
            precipitation: Some(0.0),
            rain: Some(0.0),
            wind_speed: 12,
            wind_direction: Some(220.0),
            weather_code: 3,
            icon: IconCategory::Overcast,
            uv_index: 1.0,
            cloud_cover: Some(90.0),
            visibility: Some(10_000.0),
        })
        .collect();
    let first_day = NaiveDate::from_ymd_opt(2026, 2, 12).expect("valid date fixture");
    let daily = (0..DAILY_POINTS)
        .map(|idx| DailyPoint {
            date: first_day + Duration::days(i64::try_from(idx).unwrap_or(0)),
            temperature_max: 9,
            temperature_min: 2,
            feels_like_max: Some(7),
            feels_like_min: Some(-1),
            weather_code: 61,
            icon: IconCategory::Rain,
            precipitation_probability: 70.0,
            precipitation_sum: Some(3.2),
            rain_sum: Some(3.2),
            sunrise: Some(parse_time("2026-02-12T07:21")),
            sunset: Some(parse_time("2026-02-12T17:09")),
            uv_index_max: Some(1.5),
            wind_speed_max: 24,
            wind_gusts_max: Some(41),
            wind_direction_dominant: Some(230.0),
        })
        .collect();

    Snapshot {
        location,
        units: UnitSystem::Metric,
        current: CurrentConditions {
            temperature: 7.4,
            feels_like: 4.9,
            humidity: 81.0,
            pressure: 1012.0,
            surface_pressure: Some(1004.0),
            cloud_cover: 92.0,
            wind_speed: 13.1,
            wind_direction: 225.0,
            wind_gusts: Some(28.0),
            weather_code: 3,
            is_daylight: true,
            precipitation: 0.0,
            rain: Some(0.0),
        },
        hourly: HourlySeries::new(hourly).expect("24 hourly fixtures"),
        daily: DailySeries::new(daily).expect("7 daily fixtures"),
        air_quality: AirQualitySnapshot {
            european_aqi: Some(32.0),
            pm2_5: Some(8.1),
            pm10: Some(14.0),
            ..AirQualitySnapshot::absent()
        },
        last_update: Utc::now(),
    }
}
