use serde::{Deserialize, Serialize};

/// Geographic position as reported by a position source.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

impl std::fmt::Display for Coordinates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}, {}", self.latitude, self.longitude)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CurrentWeather {
    pub city: String,
    pub temperature_c: i32,
    pub condition: String,
    pub icon: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyForecastEntry {
    pub time_label: String,
    pub icon: String,
    pub temperature_c: i32,
    pub humidity_pct: u8,
    pub wind_speed: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyForecastEntry {
    pub day_label: String,
    pub icon: String,
    pub temperature_c: i32,
    pub condition: String,
}

/// Everything one successful refresh produces. Applied to the store as a unit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub current: CurrentWeather,
    pub hourly: Vec<HourlyForecastEntry>,
    pub weekly: Vec<DailyForecastEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Destination {
    pub name: String,
    pub coordinates: Coordinates,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteInfo {
    pub distance_m: f64,
    pub duration_s: u64,
    pub path: Vec<Coordinates>,
}

/// An in-progress navigation.
///
/// The three fields are only ever set together through [`NavigationSession::active`]
/// or cleared together through `Default`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NavigationSession {
    is_active: bool,
    destination: Option<Destination>,
    route_info: Option<RouteInfo>,
}

impl NavigationSession {
    pub fn active(destination: Destination, route_info: RouteInfo) -> Self {
        Self {
            is_active: true,
            destination: Some(destination),
            route_info: Some(route_info),
        }
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn destination(&self) -> Option<&Destination> {
        self.destination.as_ref()
    }

    pub fn route_info(&self) -> Option<&RouteInfo> {
        self.route_info.as_ref()
    }
}

/// Profile of whoever is using the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    pub email: String,
    pub is_admin: bool,
    pub profile_url: Option<String>,
    pub background_url: Option<String>,
}

impl User {
    /// The administrator profile shown when nobody is signed in.
    pub fn default_admin() -> Self {
        Self {
            username: "SSAFY".to_string(),
            email: "admin@ssafy.com".to_string(),
            is_admin: true,
            profile_url: None,
            background_url: None,
        }
    }
}

impl Default for User {
    fn default() -> Self {
        Self::default_admin()
    }
}

/// The shared dashboard state views render from.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DashboardState {
    pub current_user: User,
    /// Re-render key; bumped by `force_view_update`.
    pub view_key: u64,
    pub current_weather: CurrentWeather,
    pub hourly_forecast: Vec<HourlyForecastEntry>,
    pub weekly_forecast: Vec<DailyForecastEntry>,
    pub location_error: Option<String>,
    pub navigation: NavigationSession,
    pub current_user_location: Option<Coordinates>,
    /// Ticket of the refresh whose weather is currently shown, 0 if none.
    pub weather_revision: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_navigation_is_cleared() {
        let nav = NavigationSession::default();
        assert!(!nav.is_active());
        assert!(nav.destination().is_none());
        assert!(nav.route_info().is_none());
    }

    #[test]
    fn default_state_starts_with_admin_and_empty_weather() {
        let state = DashboardState::default();
        assert_eq!(state.current_user, User::default_admin());
        assert_eq!(state.current_weather, CurrentWeather::default());
        assert_eq!(state.view_key, 0);
        assert!(state.current_user_location.is_none());
    }
}
