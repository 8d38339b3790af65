use crate::domain::weather::{Snapshot, describe_weather_code, round_to_int, uv_band};

const COMPASS: [&str; 8] = ["N", "NE", "E", "SE", "S", "SW", "W", "NW"];

#[must_use]
pub fn compass(deg: f64) -> &'static str {
    let idx = (deg.rem_euclid(360.0) / 45.0).round() as usize % COMPASS.len();
    COMPASS[idx]
}

#[must_use]
pub fn format_visibility(meters: f64) -> String {
    if !meters.is_finite() || meters <= 0.0 {
        return "--".to_string();
    }
    let km = meters / 1000.0;
    if km >= 20.0 {
        format!("{km:.0}km")
    } else {
        format!("{km:.1}km")
    }
}

/// Plain-text rendering of a snapshot for terminal output.
#[must_use]
pub fn render_text(snapshot: &Snapshot) -> String {
    let units = snapshot.units.request_units();
    let temp = units.temperature.symbol();
    let wind = units.wind_speed.label();
    let current = &snapshot.current;
    let aqi = snapshot.air_quality.band();
    let today = snapshot.daily.today();

    let mut lines = vec![
        snapshot.location.name().to_string(),
        format!(
            "{}{temp}  {}",
            round_to_int(current.temperature),
            snapshot.description()
        ),
        format!(
            "Feels like {}{temp}  H {}{temp} L {}{temp}",
            round_to_int(current.feels_like),
            today.temperature_max,
            today.temperature_min
        ),
        format!(
            "Wind {} {wind} {}  Humidity {}%  Pressure {} hPa",
            round_to_int(current.wind_speed),
            compass(current.wind_direction),
            round_to_int(current.humidity),
            round_to_int(current.pressure)
        ),
    ];

    let aqi_value = snapshot
        .air_quality
        .european_aqi
        .map_or_else(|| "N/A".to_string(), |value| round_to_int(value).to_string());
    lines.push(format!("Air quality {aqi_value} ({})", aqi.band.label()));
    if let Some(uv) = today.uv_index_max {
        let band = uv_band(uv);
        lines.push(format!(
            "UV {uv:.1} ({}) {}",
            band.label(),
            band.description()
        ));
    }

    lines.push(String::new());
    lines.push("Next 24 hours".to_string());
    for point in snapshot.hourly.points() {
        let visibility = point
            .visibility
            .map_or_else(|| "--".to_string(), format_visibility);
        lines.push(format!(
            "  {}  {:>4}{temp}  {:>3.0}%  {:>3} {wind}  {visibility:>6}  {}",
            point.time.format("%a %H:%M"),
            point.temperature,
            point.precipitation_probability,
            point.wind_speed,
            describe_weather_code(point.weather_code)
        ));
    }

    lines.push(String::new());
    lines.push("Next 7 days".to_string());
    for day in snapshot.daily.points() {
        lines.push(format!(
            "  {}  {:>4}{temp} / {:>4}{temp}  {:>3.0}%  {}",
            day.date.format("%a %d %b"),
            day.temperature_max,
            day.temperature_min,
            day.precipitation_probability,
            describe_weather_code(day.weather_code)
        ));
    }

    lines.push(String::new());
    lines.push(format!(
        "Updated {}",
        snapshot.last_update.format("%Y-%m-%d %H:%M UTC")
    ));
    lines.join("\n")
}

pub fn render_json(snapshot: &Snapshot) -> serde_json::Result<String> {
    serde_json::to_string_pretty(snapshot)
}
