//! Shared dashboard state.
//!
//! The state lives behind a `watch` channel: every action is one atomic
//! modification, and views subscribe to be told when to re-render.

use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

use tokio::sync::watch;

use crate::model::{
    Coordinates, DashboardState, Destination, NavigationSession, RouteInfo, User, WeatherSnapshot,
};

/// Identifies one weather refresh. Later tickets compare greater.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RefreshTicket(u64);

impl RefreshTicket {
    pub fn get(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone)]
pub struct Store {
    state: Arc<watch::Sender<DashboardState>>,
    next_ticket: Arc<AtomicU64>,
}

impl Default for Store {
    fn default() -> Self {
        Self::new(DashboardState::default())
    }
}

impl Store {
    pub fn new(initial: DashboardState) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self {
            state: Arc::new(tx),
            next_ticket: Arc::new(AtomicU64::new(1)),
        }
    }

    pub fn snapshot(&self) -> DashboardState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<DashboardState> {
        self.state.subscribe()
    }

    pub fn force_view_update(&self) {
        self.state.send_modify(|s| s.view_key += 1);
    }

    /// Replace the user wholesale; `None` restores the default administrator.
    pub fn set_current_user(&self, user: Option<User>) {
        let user = user.unwrap_or_else(User::default_admin);
        self.state.send_modify(|s| s.current_user = user);
    }

    pub fn start_navigation(&self, destination: Destination, route_info: RouteInfo) {
        let session = NavigationSession::active(destination, route_info);
        self.state.send_modify(|s| s.navigation = session);
    }

    pub fn clear_navigation(&self) {
        self.state.send_modify(|s| s.navigation = NavigationSession::default());
    }

    pub fn set_location_error(&self, message: Option<String>) {
        self.state.send_if_modified(|s| {
            if s.location_error == message {
                return false;
            }
            s.location_error = message;
            true
        });
    }

    pub fn set_user_location(&self, coordinates: Coordinates) {
        self.state.send_modify(|s| s.current_user_location = Some(coordinates));
    }

    /// Reserve a ticket for a refresh that is about to start.
    pub fn begin_refresh(&self) -> RefreshTicket {
        RefreshTicket(self.next_ticket.fetch_add(1, Ordering::Relaxed))
    }

    /// Publish a refresh result unless a newer refresh has already been applied.
    ///
    /// Returns whether the snapshot was applied.
    pub fn apply_weather(&self, ticket: RefreshTicket, weather: WeatherSnapshot) -> bool {
        self.state.send_if_modified(|s| {
            if ticket.0 <= s.weather_revision {
                return false;
            }
            s.current_weather = weather.current;
            s.hourly_forecast = weather.hourly;
            s.weekly_forecast = weather.weekly;
            s.weather_revision = ticket.0;
            true
        })
    }
}
