use crate::{error::RouteError, store::Store};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    Portfolio,
    Weather,
    Navigation,
    Log,
    Profile,
    Settings,
    Chatbot,
}

impl Route {
    pub const fn all() -> &'static [Route] {
        &[
            Route::Home,
            Route::Portfolio,
            Route::Weather,
            Route::Navigation,
            Route::Log,
            Route::Profile,
            Route::Settings,
            Route::Chatbot,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Route::Home => "home",
            Route::Portfolio => "portfolio",
            Route::Weather => "weather",
            Route::Navigation => "navigation",
            Route::Log => "log",
            Route::Profile => "profile",
            Route::Settings => "settings",
            Route::Chatbot => "chatbot",
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::Portfolio => "/portfolio",
            Route::Weather => "/weather",
            Route::Navigation => "/navigation",
            Route::Log => "/log",
            Route::Profile => "/profile",
            Route::Settings => "/settings",
            Route::Chatbot => "/chatbot",
        }
    }

    /// Match a URL path, ignoring any query string, fragment or trailing slash.
    pub fn from_path(path: &str) -> Option<Route> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let trimmed = path.trim_end_matches('/');
        let normalized = if trimmed.is_empty() { "/" } else { trimmed };

        Route::all().iter().copied().find(|r| r.path() == normalized)
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.name())
    }
}

/// Tracks the current page and runs the after-navigation hook.
#[derive(Debug, Clone)]
pub struct Router {
    store: Store,
    current: Route,
}

impl Router {
    pub fn new(store: Store) -> Self {
        Self {
            store,
            current: Route::Home,
        }
    }

    pub fn current(&self) -> Route {
        self.current
    }

    pub fn navigate(&mut self, path: &str) -> Result<Route, RouteError> {
        let to = Route::from_path(path).ok_or_else(|| RouteError::NotFound(path.to_string()))?;
        let from = std::mem::replace(&mut self.current, to);
        tracing::debug!(%from, %to, "navigated");
        self.after_each(to, from);
        Ok(to)
    }

    fn after_each(&self, _to: Route, from: Route) {
        // Leaving the profile page may have changed the user; re-render everything.
        if from == Route::Profile {
            self.store.force_view_update();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_resolve_to_routes() {
        for route in Route::all() {
            assert_eq!(Route::from_path(route.path()), Some(*route));
        }
        assert_eq!(Route::from_path("/weather/"), Some(Route::Weather));
        assert_eq!(Route::from_path("/log?page=2"), Some(Route::Log));
        assert_eq!(Route::from_path(""), Some(Route::Home));
        assert_eq!(Route::from_path("/missing"), None);
    }

    #[test]
    fn leaving_profile_forces_view_update() {
        let store = Store::default();
        let mut router = Router::new(store.clone());

        router.navigate("/profile").expect("known route");
        assert_eq!(store.snapshot().view_key, 0);

        router.navigate("/settings").expect("known route");
        assert_eq!(store.snapshot().view_key, 1);

        router.navigate("/").expect("known route");
        assert_eq!(store.snapshot().view_key, 1);
    }

    #[test]
    fn unknown_path_keeps_current_route() {
        let mut router = Router::new(Store::default());
        router.navigate("/weather").expect("known route");

        let err = router.navigate("/nope").unwrap_err();
        assert_eq!(err, RouteError::NotFound("/nope".into()));
        assert_eq!(router.current(), Route::Weather);
    }
}
