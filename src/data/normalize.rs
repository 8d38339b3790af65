use chrono::{DateTime, Duration, NaiveDateTime, Timelike, Utc};
use serde::{Deserialize, Serialize};

use super::{
    error::FetchError,
    forecast::{DailyBlock, HourlyBlock},
};
use crate::domain::weather::{
    DAILY_POINTS, DailyPoint, DailySeries, HOURLY_POINTS, HourlyPoint, HourlySeries, icon_category,
    parse_date, parse_datetime, round_to_int,
};

/// Where the 24-hour window starts inside the provider's hourly arrays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HourlyStart {
    /// The first entry, i.e. local midnight of today for `timezone=auto`.
    #[default]
    FirstEntry,
    /// The first entry at or after the location's current local hour.
    CurrentHour,
}

/// Resolve `policy` to an index into `block.time`.
pub fn hourly_start_index(
    block: &HourlyBlock,
    policy: HourlyStart,
    utc_offset_seconds: i32,
    now: DateTime<Utc>,
) -> Result<usize, FetchError> {
    match policy {
        HourlyStart::FirstEntry => Ok(0),
        HourlyStart::CurrentHour => {
            let local_hour = local_hour_start(now, utc_offset_seconds);
            block
                .time
                .iter()
                .position(|raw| parse_datetime(raw).is_some_and(|time| time >= local_hour))
                .ok_or_else(|| FetchError::MalformedPayload {
                    field: "hourly.time",
                    detail: format!("no entry at or after {local_hour}"),
                })
        }
    }
}

fn local_hour_start(now: DateTime<Utc>, utc_offset_seconds: i32) -> NaiveDateTime {
    let local = now.naive_utc() + Duration::seconds(i64::from(utc_offset_seconds));
    local
        .with_minute(0)
        .and_then(|t| t.with_second(0))
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(local)
}

/// Exactly [`HOURLY_POINTS`] points starting at `start`.
pub fn normalize_hourly(block: &HourlyBlock, start: usize) -> Result<HourlySeries, FetchError> {
    let end = start + HOURLY_POINTS;
    require_lengths(
        &[
            ("hourly.time", block.time.len()),
            ("hourly.temperature_2m", block.temperature_2m.len()),
            ("hourly.apparent_temperature", block.apparent_temperature.len()),
            ("hourly.relative_humidity_2m", block.relative_humidity_2m.len()),
            ("hourly.wind_speed_10m", block.wind_speed_10m.len()),
            ("hourly.wind_direction_10m", block.wind_direction_10m.len()),
            ("hourly.weather_code", block.weather_code.len()),
            ("hourly.cloud_cover", block.cloud_cover.len()),
            ("hourly.visibility", block.visibility.len()),
        ],
        end,
    )?;

    let points = (start..end)
        .map(|idx| hourly_point(block, idx))
        .collect::<Result<Vec<_>, _>>()?;
    HourlySeries::new(points).ok_or_else(|| FetchError::too_short("hourly", 0, HOURLY_POINTS))
}

/// Exactly [`DAILY_POINTS`] points from the start of the daily arrays.
pub fn normalize_daily(block: &DailyBlock) -> Result<DailySeries, FetchError> {
    require_lengths(
        &[
            ("daily.time", block.time.len()),
            ("daily.weather_code", block.weather_code.len()),
            ("daily.temperature_2m_max", block.temperature_2m_max.len()),
            ("daily.temperature_2m_min", block.temperature_2m_min.len()),
            ("daily.wind_speed_10m_max", block.wind_speed_10m_max.len()),
        ],
        DAILY_POINTS,
    )?;

    let points = (0..DAILY_POINTS)
        .map(|idx| daily_point(block, idx))
        .collect::<Result<Vec<_>, _>>()?;
    DailySeries::new(points).ok_or_else(|| FetchError::too_short("daily", 0, DAILY_POINTS))
}

fn hourly_point(block: &HourlyBlock, idx: usize) -> Result<HourlyPoint, FetchError> {
    let weather_code = required(&block.weather_code, "hourly.weather_code", idx)?;
    Ok(HourlyPoint {
        time: block
            .time
            .get(idx)
            .and_then(|raw| parse_datetime(raw))
            .ok_or_else(|| FetchError::missing_value("hourly.time", idx))?,
        temperature: round_to_int(required(&block.temperature_2m, "hourly.temperature_2m", idx)?),
        feels_like: round_to_int(required(
            &block.apparent_temperature,
            "hourly.apparent_temperature",
            idx,
        )?),
        precipitation_probability: or_zero(&block.precipitation_probability, idx),
        humidity: optional(&block.relative_humidity_2m, idx),
        dew_point: optional(&block.dew_point_2m, idx),
        precipitation: optional(&block.precipitation, idx),
        rain: optional(&block.rain, idx),
        wind_speed: round_to_int(required(&block.wind_speed_10m, "hourly.wind_speed_10m", idx)?),
        wind_direction: optional(&block.wind_direction_10m, idx),
        weather_code,
        icon: icon_category(weather_code),
        uv_index: or_zero(&block.uv_index, idx),
        cloud_cover: optional(&block.cloud_cover, idx),
        visibility: optional(&block.visibility, idx),
    })
}

fn daily_point(block: &DailyBlock, idx: usize) -> Result<DailyPoint, FetchError> {
    let weather_code = required(&block.weather_code, "daily.weather_code", idx)?;
    Ok(DailyPoint {
        date: block
            .time
            .get(idx)
            .and_then(|raw| parse_date(raw))
            .ok_or_else(|| FetchError::missing_value("daily.time", idx))?,
        temperature_max: round_to_int(required(
            &block.temperature_2m_max,
            "daily.temperature_2m_max",
            idx,
        )?),
        temperature_min: round_to_int(required(
            &block.temperature_2m_min,
            "daily.temperature_2m_min",
            idx,
        )?),
        feels_like_max: optional(&block.apparent_temperature_max, idx).map(round_to_int),
        feels_like_min: optional(&block.apparent_temperature_min, idx).map(round_to_int),
        weather_code,
        icon: icon_category(weather_code),
        precipitation_probability: or_zero(&block.precipitation_probability_max, idx),
        precipitation_sum: optional(&block.precipitation_sum, idx),
        rain_sum: optional(&block.rain_sum, idx),
        sunrise: timestamp(&block.sunrise, idx),
        sunset: timestamp(&block.sunset, idx),
        uv_index_max: optional(&block.uv_index_max, idx),
        wind_speed_max: round_to_int(required(
            &block.wind_speed_10m_max,
            "daily.wind_speed_10m_max",
            idx,
        )?),
        wind_gusts_max: optional(&block.wind_gusts_10m_max, idx).map(round_to_int),
        wind_direction_dominant: optional(&block.wind_direction_10m_dominant, idx),
    })
}

fn require_lengths(fields: &[(&'static str, usize)], required: usize) -> Result<(), FetchError> {
    match fields.iter().find(|(_, len)| *len < required) {
        Some((field, len)) => Err(FetchError::too_short(*field, *len, required)),
        None => Ok(()),
    }
}

fn required<T: Copy>(values: &[Option<T>], field: &'static str, idx: usize) -> Result<T, FetchError> {
    optional(values, idx).ok_or_else(|| FetchError::missing_value(field, idx))
}

fn optional<T: Copy>(values: &[Option<T>], idx: usize) -> Option<T> {
    values.get(idx).copied().flatten()
}

fn or_zero(values: &[Option<f64>], idx: usize) -> f64 {
    optional(values, idx).unwrap_or(0.0)
}

fn timestamp(values: &[Option<String>], idx: usize) -> Option<NaiveDateTime> {
    values
        .get(idx)
        .and_then(Option::as_deref)
        .and_then(parse_datetime)
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, TimeZone};

    use super::*;
    use crate::domain::weather::IconCategory;

    fn hourly_block(len: usize) -> HourlyBlock {
        let start = NaiveDate::from_ymd_opt(2026, 2, 12)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .expect("fixed start");
        let series = |f: fn(usize) -> f64| (0..len).map(|i| Some(f(i))).collect::<Vec<_>>();
        HourlyBlock {
            time: (0..len)
                .map(|i| {
                    (start + Duration::hours(i as i64))
                        .format("%Y-%m-%dT%H:%M")
                        .to_string()
                })
                .collect(),
            temperature_2m: series(|i| 4.6 + i as f64 * 0.1),
            relative_humidity_2m: series(|_| 71.5),
            dew_point_2m: series(|_| 1.2),
            apparent_temperature: series(|_| 2.4),
            precipitation_probability: series(|_| 35.0),
            precipitation: series(|_| 0.3),
            rain: series(|_| 0.25),
            weather_code: (0..len).map(|_| Some(63)).collect(),
            cloud_cover: series(|_| 88.0),
            visibility: series(|_| 9_800.0),
            wind_speed_10m: series(|_| 12.5),
            wind_direction_10m: series(|_| 220.0),
            uv_index: series(|_| 1.5),
        }
    }

    fn daily_block(len: usize) -> DailyBlock {
        let start = NaiveDate::from_ymd_opt(2026, 2, 12).expect("fixed date");
        let series = |value: f64| (0..len).map(|_| Some(value)).collect::<Vec<_>>();
        DailyBlock {
            time: (0..len)
                .map(|i| (start + Duration::days(i as i64)).format("%Y-%m-%d").to_string())
                .collect(),
            weather_code: (0..len).map(|_| Some(3)).collect(),
            temperature_2m_max: series(8.5),
            temperature_2m_min: series(1.4),
            apparent_temperature_max: series(6.6),
            apparent_temperature_min: series(-1.5),
            sunrise: (0..len).map(|_| Some("2026-02-12T07:31".to_string())).collect(),
            sunset: (0..len).map(|_| Some("2026-02-12T16:52".to_string())).collect(),
            uv_index_max: series(1.9),
            precipitation_sum: series(2.2),
            rain_sum: series(2.0),
            precipitation_probability_max: series(40.0),
            wind_speed_10m_max: series(21.7),
            wind_gusts_10m_max: series(38.2),
            wind_direction_10m_dominant: series(200.0),
        }
    }

    #[test]
    fn hourly_takes_exactly_24_points_from_longer_arrays() {
        let series = normalize_hourly(&hourly_block(168), 0).expect("series");
        assert_eq!(series.points().len(), HOURLY_POINTS);
        assert_eq!(
            series.first().time,
            parse_datetime("2026-02-12T00:00").expect("time")
        );
        assert_eq!(
            series.points()[23].time,
            parse_datetime("2026-02-12T23:00").expect("time")
        );
    }

    #[test]
    fn hourly_rounds_temperatures_and_wind_but_passes_percentages_through() {
        let series = normalize_hourly(&hourly_block(24), 0).expect("series");
        let first = series.first();
        assert_eq!(first.temperature, 5);
        assert_eq!(first.feels_like, 2);
        assert_eq!(first.wind_speed, 13);
        assert_eq!(first.humidity, Some(71.5));
        assert_eq!(first.cloud_cover, Some(88.0));
        assert_eq!(first.icon, IconCategory::Rain);
        assert_eq!(first.rain, Some(0.25));
    }

    #[test]
    fn hourly_defaults_missing_probability_and_uv_to_zero() {
        let mut block = hourly_block(24);
        block.precipitation_probability = Vec::new();
        block.uv_index[3] = None;

        let series = normalize_hourly(&block, 0).expect("series");
        assert!(series.points().iter().all(|p| p.precipitation_probability == 0.0));
        assert_eq!(series.points()[3].uv_index, 0.0);
        assert_eq!(series.points()[4].uv_index, 1.5);
    }

    #[test]
    fn hourly_rejects_short_arrays() {
        let err = normalize_hourly(&hourly_block(23), 0).expect_err("short");
        assert!(matches!(
            err,
            FetchError::MalformedPayload {
                field: "hourly.time",
                ..
            }
        ));

        let mut block = hourly_block(48);
        block.visibility.truncate(10);
        let err = normalize_hourly(&block, 0).expect_err("short visibility");
        assert!(matches!(
            err,
            FetchError::MalformedPayload {
                field: "hourly.visibility",
                ..
            }
        ));
    }

    #[test]
    fn hourly_window_must_fit_after_start_offset() {
        let block = hourly_block(30);
        assert!(normalize_hourly(&block, 6).is_ok());
        assert!(normalize_hourly(&block, 7).is_err());
    }

    #[test]
    fn hourly_null_temperature_is_malformed() {
        let mut block = hourly_block(24);
        block.temperature_2m[5] = None;
        let err = normalize_hourly(&block, 0).expect_err("null");
        assert!(err.to_string().contains("index 5"));
    }

    #[test]
    fn current_hour_policy_uses_location_offset() {
        let block = hourly_block(72);
        let now = Utc.with_ymd_and_hms(2026, 2, 12, 9, 41, 0).single().expect("now");

        assert_eq!(
            hourly_start_index(&block, HourlyStart::FirstEntry, 3600, now).expect("first"),
            0
        );
        assert_eq!(
            hourly_start_index(&block, HourlyStart::CurrentHour, 0, now).expect("utc"),
            9
        );
        assert_eq!(
            hourly_start_index(&block, HourlyStart::CurrentHour, 3600, now).expect("cet"),
            10
        );
        assert_eq!(
            hourly_start_index(&block, HourlyStart::CurrentHour, -5 * 3600, now).expect("est"),
            4
        );
    }

    #[test]
    fn current_hour_policy_fails_when_arrays_end_before_now() {
        let block = hourly_block(24);
        let now = Utc.with_ymd_and_hms(2026, 3, 1, 0, 0, 0).single().expect("now");
        assert!(hourly_start_index(&block, HourlyStart::CurrentHour, 0, now).is_err());
    }

    #[test]
    fn daily_takes_exactly_7_points() {
        let series = normalize_daily(&daily_block(16)).expect("series");
        assert_eq!(series.points().len(), DAILY_POINTS);
        let today = series.today();
        assert_eq!(today.temperature_max, 9);
        assert_eq!(today.temperature_min, 1);
        assert_eq!(today.feels_like_min, Some(-1));
        assert_eq!(today.wind_speed_max, 22);
        assert_eq!(today.icon, IconCategory::Overcast);
        assert_eq!(today.uv_index_max, Some(1.9));
        assert!(today.sunrise.is_some());
    }

    #[test]
    fn daily_defaults_probability_and_rejects_short_arrays() {
        let mut block = daily_block(7);
        block.precipitation_probability_max = vec![None; 7];
        let series = normalize_daily(&block).expect("series");
        assert!(series.points().iter().all(|d| d.precipitation_probability == 0.0));

        let err = normalize_daily(&daily_block(6)).expect_err("short");
        assert!(matches!(
            err,
            FetchError::MalformedPayload {
                field: "daily.time",
                ..
            }
        ));
    }
}
