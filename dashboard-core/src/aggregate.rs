//! Reshapes raw OpenWeather responses into the flat records views render.

use chrono::{DateTime, Datelike, FixedOffset, Timelike, Weekday};

use crate::{
    model::{CurrentWeather, DailyForecastEntry, HourlyForecastEntry, WeatherSnapshot},
    provider::{ForecastResponse, OwCurrentResponse, openweather::OwWeather},
};

pub const MAX_ENTRIES: usize = 5;
/// Forecast steps are 3 hours apart, so every 8th entry is one day later.
pub const STEPS_PER_DAY: usize = 8;

pub fn build_snapshot(
    current: &OwCurrentResponse,
    forecast: &ForecastResponse,
    offset: FixedOffset,
) -> WeatherSnapshot {
    WeatherSnapshot {
        current: current_weather(current),
        hourly: hourly_slice(forecast, offset),
        weekly: daily_slice(forecast, offset),
    }
}

pub fn current_weather(res: &OwCurrentResponse) -> CurrentWeather {
    let (condition, icon) = first_condition(&res.weather);
    CurrentWeather {
        city: res.name.clone(),
        temperature_c: round_temp(res.main.temp),
        condition,
        icon,
    }
}

pub fn hourly_slice(forecast: &ForecastResponse, offset: FixedOffset) -> Vec<HourlyForecastEntry> {
    forecast
        .list
        .iter()
        .take(MAX_ENTRIES)
        .map(|item| {
            let (_, icon) = first_condition(&item.weather);
            HourlyForecastEntry {
                time_label: local_time(item.dt, offset).map(hour_label).unwrap_or_default(),
                icon,
                temperature_c: round_temp(item.main.temp),
                humidity_pct: item.main.humidity,
                wind_speed: item.wind.speed,
            }
        })
        .collect()
}

pub fn daily_slice(forecast: &ForecastResponse, offset: FixedOffset) -> Vec<DailyForecastEntry> {
    forecast
        .list
        .iter()
        .step_by(STEPS_PER_DAY)
        .take(MAX_ENTRIES)
        .map(|item| {
            let (condition, icon) = first_condition(&item.weather);
            DailyForecastEntry {
                day_label: local_time(item.dt, offset).map(weekday_label).unwrap_or_default(),
                icon,
                temperature_c: round_temp(item.main.temp),
                condition,
            }
        })
        .collect()
}

/// Nearest integer with ties towards positive infinity (-2.5 -> -2, 2.5 -> 3),
/// saturating at the `i32` range.
pub fn round_temp(temp: f64) -> i32 {
    let floor = temp.floor();
    let rounded = if temp - floor >= 0.5 { floor + 1.0 } else { floor };
    rounded as i32
}

/// `ko-KR` two-digit hour, e.g. "오전 09시" or "오후 03시".
pub fn hour_label(time: DateTime<FixedOffset>) -> String {
    let (is_pm, hour12) = time.hour12();
    let period = if is_pm { "오후" } else { "오전" };
    format!("{period} {hour12:02}시")
}

/// `ko-KR` short weekday, e.g. "월".
pub fn weekday_label(time: DateTime<FixedOffset>) -> String {
    let day = match time.weekday() {
        Weekday::Mon => "월",
        Weekday::Tue => "화",
        Weekday::Wed => "수",
        Weekday::Thu => "목",
        Weekday::Fri => "금",
        Weekday::Sat => "토",
        Weekday::Sun => "일",
    };
    day.to_string()
}

fn local_time(ts: i64, offset: FixedOffset) -> Option<DateTime<FixedOffset>> {
    DateTime::from_timestamp(ts, 0).map(|utc| utc.with_timezone(&offset))
}

fn first_condition(weather: &[OwWeather]) -> (String, String) {
    weather
        .first()
        .map(|w| (w.description.clone(), w.icon.clone()))
        .unwrap_or_default()
}
