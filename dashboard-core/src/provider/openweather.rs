use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, de::DeserializeOwned};

use crate::{config::DEFAULT_OPENWEATHER_BASE_URL, error::WeatherError, model::Coordinates};

use super::WeatherProvider;

const UNITS: &str = "metric";
const LANG: &str = "kr";

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, DEFAULT_OPENWEATHER_BASE_URL)
    }

    pub fn with_base_url(api_key: String, base_url: impl Into<String>) -> Self {
        Self {
            api_key,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        coords: Coordinates,
    ) -> Result<T, WeatherError> {
        let url = format!("{}/{}", self.base_url, endpoint);
        tracing::debug!(%url, lat = coords.latitude, lon = coords.longitude, "OpenWeather request");

        let res = self
            .http
            .get(&url)
            .query(&[
                ("lat", coords.latitude.to_string().as_str()),
                ("lon", coords.longitude.to_string().as_str()),
                ("appid", self.api_key.as_str()),
                ("units", UNITS),
                ("lang", LANG),
            ])
            .send()
            .await
            .map_err(|source| WeatherError::Transport { endpoint, source })?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|source| WeatherError::Transport { endpoint, source })?;

        if !status.is_success() {
            return Err(WeatherError::Status {
                endpoint,
                status,
                body: truncate_body(&body),
            });
        }

        serde_json::from_str(&body).map_err(|source| WeatherError::Parse { endpoint, source })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct OwMain {
    pub temp: f64,
    pub humidity: u8,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OwWeather {
    pub description: String,
    pub icon: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OwWind {
    pub speed: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OwCurrentResponse {
    pub name: String,
    pub main: OwMain,
    #[serde(default)]
    pub weather: Vec<OwWeather>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ForecastEntry {
    pub dt: i64,
    pub main: OwMain,
    #[serde(default)]
    pub weather: Vec<OwWeather>,
    pub wind: OwWind,
}

/// 5 day / 3 hour forecast, entries in chronological order.
#[derive(Debug, Clone, Deserialize)]
pub struct ForecastResponse {
    pub list: Vec<ForecastEntry>,
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn current(&self, coords: Coordinates) -> Result<OwCurrentResponse, WeatherError> {
        self.get_json("weather", coords).await
    }

    async fn forecast(&self, coords: Coordinates) -> Result<ForecastResponse, WeatherError> {
        self.get_json("forecast", coords).await
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_keeps_short_bodies() {
        assert_eq!(truncate_body("not found"), "not found");
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        let body = "날".repeat(300);
        let truncated = truncate_body(&body);
        assert!(truncated.ends_with("..."));
        assert_eq!(truncated.chars().count(), 203);
    }

    #[test]
    fn forecast_entry_tolerates_missing_weather() {
        let entry: ForecastEntry = serde_json::from_str(
            r#"{"dt": 0, "main": {"temp": 1.5, "humidity": 40}, "wind": {"speed": 2.0}}"#,
        )
        .expect("entry must parse");
        assert!(entry.weather.is_empty());
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let provider = OpenWeatherProvider::with_base_url("KEY".into(), "http://localhost:1/");
        assert_eq!(provider.base_url, "http://localhost:1");
    }
}
