//! Core library for the dashboard.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The shared, observable dashboard state
//! - Geolocation lookup and OpenWeather aggregation
//! - The page routing table
//!
//! It is used by `dashboard-cli`, but can also be embedded by other front-ends.

pub mod aggregate;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod firestore;
pub mod geolocation;
pub mod model;
pub mod provider;
pub mod router;
pub mod store;

pub use config::Config;
pub use dashboard::{Dashboard, USER_LOCATION_FALLBACK, WEATHER_FALLBACK};
pub use error::{LocationError, RouteError, WeatherError};
pub use model::{
    Coordinates, CurrentWeather, DailyForecastEntry, DashboardState, Destination,
    HourlyForecastEntry, NavigationSession, RouteInfo, User, WeatherSnapshot,
};
pub use provider::{OpenWeatherProvider, WeatherProvider};
pub use router::{Route, Router};
pub use store::Store;
