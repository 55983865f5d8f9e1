//! Single-shot position lookup.

use std::{fmt::Debug, time::Duration};

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::{config::LocationConfig, error::LocationError, model::Coordinates, store::Store};

/// What a position source reports when it cannot produce coordinates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PositionError {
    /// The platform has no location capability at all.
    Unavailable,
    /// The lookup ran and was refused or failed.
    Denied(String),
}

#[async_trait]
pub trait PositionSource: Send + Sync + Debug {
    async fn current_position(&self) -> Result<Coordinates, PositionError>;
}

/// A platform without any location capability.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPosition;

#[async_trait]
impl PositionSource for NoPosition {
    async fn current_position(&self) -> Result<Coordinates, PositionError> {
        Err(PositionError::Unavailable)
    }
}

/// Always reports the same coordinates.
#[derive(Debug, Clone, Copy)]
pub struct FixedPosition(pub Coordinates);

#[async_trait]
impl PositionSource for FixedPosition {
    async fn current_position(&self) -> Result<Coordinates, PositionError> {
        Ok(self.0)
    }
}

/// Approximate position from the caller's public IP, via an ip-api compatible endpoint.
#[derive(Debug, Clone)]
pub struct IpLookup {
    url: String,
    http: Client,
}

impl IpLookup {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            http: Client::new(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct IpApiResponse {
    status: String,
    message: Option<String>,
    lat: Option<f64>,
    lon: Option<f64>,
}

#[async_trait]
impl PositionSource for IpLookup {
    async fn current_position(&self) -> Result<Coordinates, PositionError> {
        let res = self
            .http
            .get(&self.url)
            .send()
            .await
            .map_err(|e| PositionError::Denied(format!("lookup request failed: {e}")))?;

        if !res.status().is_success() {
            return Err(PositionError::Denied(format!(
                "lookup returned {}",
                res.status()
            )));
        }

        let body: IpApiResponse = res
            .json()
            .await
            .map_err(|e| PositionError::Denied(format!("unreadable lookup response: {e}")))?;

        match (body.status.as_str(), body.lat, body.lon) {
            ("success", Some(lat), Some(lon)) => Ok(Coordinates::new(lat, lon)),
            _ => Err(PositionError::Denied(
                body.message.unwrap_or_else(|| format!("lookup status '{}'", body.status)),
            )),
        }
    }
}

/// Pick the position source described by `config`.
pub fn source_from_config(config: &LocationConfig) -> Box<dyn PositionSource> {
    if !config.enabled {
        Box::new(NoPosition)
    } else if let Some(coords) = config.fixed_position() {
        Box::new(FixedPosition(coords))
    } else {
        Box::new(IpLookup::new(config.lookup_url.clone()))
    }
}

/// Resolves the user's position once per call and reports failures into the store.
#[derive(Debug)]
pub struct Resolver {
    source: Box<dyn PositionSource>,
    timeout: Duration,
}

impl Resolver {
    pub fn new(source: Box<dyn PositionSource>, timeout: Duration) -> Self {
        Self { source, timeout }
    }

    /// One attempt, no retry. On failure the user-facing message is written to
    /// `location_error` before the error is returned.
    pub async fn resolve(&self, store: &Store) -> Result<Coordinates, LocationError> {
        store.set_location_error(None);

        let lookup = self.source.current_position();
        let outcome = match tokio::time::timeout(self.timeout, lookup).await {
            Ok(Ok(coords)) => return Ok(coords),
            Ok(Err(PositionError::Unavailable)) => LocationError::Unsupported,
            Ok(Err(PositionError::Denied(reason))) => LocationError::PermissionOrHardware(reason),
            Err(_) => LocationError::Timeout(self.timeout),
        };

        tracing::error!(error = %outcome, "geolocation failed");
        store.set_location_error(Some(outcome.user_message().to_string()));
        Err(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Denying;

    #[async_trait]
    impl PositionSource for Denying {
        async fn current_position(&self) -> Result<Coordinates, PositionError> {
            Err(PositionError::Denied("user denied".into()))
        }
    }

    #[derive(Debug)]
    struct Hanging;

    #[async_trait]
    impl PositionSource for Hanging {
        async fn current_position(&self) -> Result<Coordinates, PositionError> {
            std::future::pending().await
        }
    }

    fn resolver(source: impl PositionSource + 'static) -> Resolver {
        Resolver::new(Box::new(source), Duration::from_millis(50))
    }

    #[tokio::test]
    async fn success_clears_previous_error() {
        let store = Store::default();
        store.set_location_error(Some("old".into()));

        let coords = resolver(FixedPosition(Coordinates::new(35.1796, 129.0756)))
            .resolve(&store)
            .await
            .expect("fixed source succeeds");

        assert_eq!(coords, Coordinates::new(35.1796, 129.0756));
        assert!(store.snapshot().location_error.is_none());
    }

    #[tokio::test]
    async fn unsupported_platform_records_message() {
        let store = Store::default();
        let err = resolver(NoPosition).resolve(&store).await.unwrap_err();

        assert!(matches!(err, LocationError::Unsupported));
        assert_eq!(
            store.snapshot().location_error.as_deref(),
            Some(LocationError::Unsupported.user_message())
        );
    }

    #[tokio::test]
    async fn denial_records_message() {
        let store = Store::default();
        let err = resolver(Denying).resolve(&store).await.unwrap_err();

        assert!(matches!(err, LocationError::PermissionOrHardware(ref r) if r == "user denied"));
        assert_eq!(
            store.snapshot().location_error.as_deref(),
            Some("위치 정보를 가져올 수 없습니다. 권한을 확인해주세요.")
        );
    }

    #[tokio::test]
    async fn hanging_source_times_out() {
        let store = Store::default();
        let err = resolver(Hanging).resolve(&store).await.unwrap_err();

        assert!(matches!(err, LocationError::Timeout(_)));
        assert!(store.snapshot().location_error.is_some());
    }

    #[test]
    fn disabled_location_wins_over_fixed_position() {
        let config = LocationConfig {
            enabled: false,
            latitude: Some(1.0),
            longitude: Some(2.0),
            ..Default::default()
        };
        let source = source_from_config(&config);
        assert!(format!("{source:?}").contains("NoPosition"));
    }
}
