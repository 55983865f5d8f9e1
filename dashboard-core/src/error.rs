/// Failures of a single location lookup.
#[derive(Debug, thiserror::Error)]
pub enum LocationError {
    #[error("location is not supported on this platform")]
    Unsupported,
    #[error("location lookup was denied or failed: {0}")]
    PermissionOrHardware(String),
    #[error("location lookup timed out after {0:?}")]
    Timeout(std::time::Duration),
}

impl LocationError {
    /// Message shown to the user through `location_error`.
    pub fn user_message(&self) -> &'static str {
        match self {
            LocationError::Unsupported => "이 환경에서는 위치 정보가 지원되지 않습니다.",
            LocationError::PermissionOrHardware(_) | LocationError::Timeout(_) => {
                "위치 정보를 가져올 수 없습니다. 권한을 확인해주세요."
            }
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    #[error("no OpenWeather API key configured")]
    MissingCredential,
    #[error("request to OpenWeather ({endpoint}) failed: {source}")]
    Transport {
        endpoint: &'static str,
        #[source]
        source: reqwest::Error,
    },
    #[error("OpenWeather {endpoint} request failed with status {status}: {body}")]
    Status {
        endpoint: &'static str,
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("failed to parse OpenWeather {endpoint} JSON: {source}")]
    Parse {
        endpoint: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RouteError {
    #[error("no route matches path '{0}'")]
    NotFound(String),
}
