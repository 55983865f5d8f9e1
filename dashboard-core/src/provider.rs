use async_trait::async_trait;
use std::fmt::Debug;

use crate::{error::WeatherError, model::Coordinates};

pub mod openweather;

pub use openweather::{ForecastResponse, OpenWeatherProvider, OwCurrentResponse};

/// Raw weather data source. Both calls are keyed by coordinates only.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn current(&self, coords: Coordinates) -> Result<OwCurrentResponse, WeatherError>;

    async fn forecast(&self, coords: Coordinates) -> Result<ForecastResponse, WeatherError>;
}
