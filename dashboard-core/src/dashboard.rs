//! Ties the resolver, the weather provider and the store together.

use chrono::FixedOffset;

use crate::{
    Config,
    aggregate::build_snapshot,
    error::{LocationError, WeatherError},
    geolocation::{Resolver, source_from_config},
    model::{Coordinates, WeatherSnapshot},
    provider::{OpenWeatherProvider, WeatherProvider},
    store::Store,
};

/// Queried when the user's position is unknown for a weather refresh (Seoul).
pub const WEATHER_FALLBACK: Coordinates = Coordinates::new(37.5665, 126.978);
/// Stored as the user's location when it cannot be determined (Seoul City Hall).
pub const USER_LOCATION_FALLBACK: Coordinates = Coordinates::new(37.566826, 126.9786567);

#[derive(Debug)]
pub struct Dashboard {
    store: Store,
    resolver: Resolver,
    /// `None` when no API key is configured.
    weather: Option<Box<dyn WeatherProvider>>,
    offset: FixedOffset,
}

impl Dashboard {
    pub fn new(
        store: Store,
        resolver: Resolver,
        weather: Option<Box<dyn WeatherProvider>>,
        offset: FixedOffset,
    ) -> Self {
        Self {
            store,
            resolver,
            weather,
            offset,
        }
    }

    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let resolver = Resolver::new(
            source_from_config(&config.location),
            config.location.timeout(),
        );
        let weather = config.openweather_api_key().map(|key| {
            Box::new(OpenWeatherProvider::with_base_url(
                key.to_owned(),
                config.openweather.base_url.clone(),
            )) as Box<dyn WeatherProvider>
        });

        Ok(Self::new(Store::default(), resolver, weather, config.display.offset()?))
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Resolve the user's position once. Failures are also reported through
    /// `location_error`.
    pub async fn resolve_location(&self) -> Result<Coordinates, LocationError> {
        self.resolver.resolve(&self.store).await
    }

    /// Store the user's position, or the fallback position when it cannot be resolved.
    pub async fn fetch_user_location(&self) {
        let coords = match self.resolve_location().await {
            Ok(coords) => coords,
            Err(err) => {
                tracing::error!(error = %err, "failed to resolve user location, using fallback");
                USER_LOCATION_FALLBACK
            }
        };
        self.store.set_user_location(coords);
    }

    /// Refresh current weather and forecasts for the user's position.
    ///
    /// Never fails: errors are logged and the previous weather stays in place.
    pub async fn refresh_weather(&self) {
        let ticket = self.store.begin_refresh();

        match self.load_weather().await {
            Ok(snapshot) => {
                let city = snapshot.current.city.clone();
                if self.store.apply_weather(ticket, snapshot) {
                    tracing::info!(%city, ticket = ticket.get(), "weather refreshed");
                } else {
                    tracing::debug!(
                        ticket = ticket.get(),
                        "discarding weather from superseded refresh"
                    );
                }
            }
            Err(WeatherError::MissingCredential) => {
                tracing::error!("OpenWeather API key is not configured");
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to fetch weather");
            }
        }
    }

    async fn load_weather(&self) -> Result<WeatherSnapshot, WeatherError> {
        let coords = match self.resolve_location().await {
            Ok(coords) => coords,
            Err(_) => {
                tracing::warn!(
                    lat = WEATHER_FALLBACK.latitude,
                    lon = WEATHER_FALLBACK.longitude,
                    "user location unavailable, querying default location (Seoul)"
                );
                WEATHER_FALLBACK
            }
        };

        let provider = self.weather.as_deref().ok_or(WeatherError::MissingCredential)?;

        let (current, forecast) =
            tokio::try_join!(provider.current(coords), provider.forecast(coords))?;

        Ok(build_snapshot(&current, &forecast, self.offset))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        geolocation::{FixedPosition, NoPosition},
        model::CurrentWeather,
        provider::{
            ForecastResponse, OwCurrentResponse,
            openweather::{OwMain, OwWeather},
        },
    };
    use async_trait::async_trait;
    use std::{
        sync::{Arc, Mutex},
        time::Duration,
    };

    /// Records queried coordinates and answers with canned data.
    #[derive(Debug, Default)]
    struct Canned {
        queried: Arc<Mutex<Vec<Coordinates>>>,
        fail_forecast: bool,
    }

    #[async_trait]
    impl WeatherProvider for Canned {
        async fn current(&self, coords: Coordinates) -> Result<OwCurrentResponse, WeatherError> {
            self.queried.lock().expect("lock").push(coords);
            Ok(OwCurrentResponse {
                name: "Seoul".into(),
                main: OwMain {
                    temp: 12.6,
                    humidity: 40,
                },
                weather: vec![OwWeather {
                    description: "맑음".into(),
                    icon: "01d".into(),
                }],
            })
        }

        async fn forecast(&self, _coords: Coordinates) -> Result<ForecastResponse, WeatherError> {
            if self.fail_forecast {
                return Err(WeatherError::Status {
                    endpoint: "forecast",
                    status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
                    body: String::new(),
                });
            }
            Ok(ForecastResponse { list: vec![] })
        }
    }

    fn kst() -> FixedOffset {
        FixedOffset::east_opt(9 * 3600).expect("valid offset")
    }

    fn dashboard(
        source: impl crate::geolocation::PositionSource + 'static,
        provider: Option<Canned>,
    ) -> Dashboard {
        Dashboard::new(
            Store::default(),
            Resolver::new(Box::new(source), Duration::from_secs(1)),
            provider.map(|p| Box::new(p) as Box<dyn WeatherProvider>),
            kst(),
        )
    }

    #[tokio::test]
    async fn denied_location_queries_fallback_and_populates_weather() {
        let canned = Canned::default();
        let queried = canned.queried.clone();
        let dash = dashboard(NoPosition, Some(canned));

        dash.refresh_weather().await;

        assert_eq!(*queried.lock().expect("lock"), vec![WEATHER_FALLBACK]);
        let state = dash.store().snapshot();
        assert_eq!(state.current_weather.city, "Seoul");
        assert_eq!(state.current_weather.temperature_c, 13);
        assert!(state.location_error.is_some());
    }

    #[tokio::test]
    async fn missing_credential_leaves_state_untouched() {
        let dash = dashboard(FixedPosition(Coordinates::new(1.0, 2.0)), None);

        dash.refresh_weather().await;

        let state = dash.store().snapshot();
        assert_eq!(state.current_weather, CurrentWeather::default());
        assert_eq!(state.weather_revision, 0);
    }

    #[tokio::test]
    async fn failed_forecast_discards_current_weather_too() {
        let canned = Canned {
            fail_forecast: true,
            ..Default::default()
        };
        let dash = dashboard(FixedPosition(Coordinates::new(1.0, 2.0)), Some(canned));

        dash.refresh_weather().await;

        assert_eq!(dash.store().snapshot().current_weather, CurrentWeather::default());
    }

    #[tokio::test]
    async fn fetch_user_location_substitutes_fallback() {
        let dash = dashboard(NoPosition, None);
        dash.fetch_user_location().await;
        assert_eq!(
            dash.store().snapshot().current_user_location,
            Some(USER_LOCATION_FALLBACK)
        );

        let dash = dashboard(FixedPosition(Coordinates::new(35.0, 129.0)), None);
        dash.fetch_user_location().await;
        assert_eq!(
            dash.store().snapshot().current_user_location,
            Some(Coordinates::new(35.0, 129.0))
        );
    }

    #[tokio::test]
    async fn resolve_location_surfaces_failure() {
        let dash = dashboard(NoPosition, None);
        assert!(matches!(dash.resolve_location().await, Err(LocationError::Unsupported)));
    }
}
