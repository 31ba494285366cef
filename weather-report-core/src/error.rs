use reqwest::StatusCode;

/// Why a call to the forecast service failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WeatherServiceFailureReason {
    AccessDenied,
    WeatherInfoUnavailable,
    Unknown,
}

impl WeatherServiceFailureReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            WeatherServiceFailureReason::AccessDenied => "access denied",
            WeatherServiceFailureReason::WeatherInfoUnavailable => "weather info unavailable",
            WeatherServiceFailureReason::Unknown => "unknown",
        }
    }

    /// Classify an HTTP status. `None` means no status was received at all.
    pub fn from_status(status: Option<StatusCode>) -> Self {
        status
            .and_then(|status| {
                STATUS_REASONS
                    .iter()
                    .find(|(code, _)| *code == status)
                    .map(|(_, reason)| *reason)
            })
            .unwrap_or(WeatherServiceFailureReason::Unknown)
    }
}

impl std::fmt::Display for WeatherServiceFailureReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Statuses with a dedicated reason; everything else is `Unknown`.
const STATUS_REASONS: &[(StatusCode, WeatherServiceFailureReason)] = &[
    (StatusCode::UNAUTHORIZED, WeatherServiceFailureReason::AccessDenied),
    (StatusCode::FORBIDDEN, WeatherServiceFailureReason::AccessDenied),
    (StatusCode::INTERNAL_SERVER_ERROR, WeatherServiceFailureReason::WeatherInfoUnavailable),
];

const YR_FAILURE_MESSAGE: &str = "Failed calling the YR API";

/// Transport-level failure talking to the forecast service.
///
/// Missing or sparse data never produces this error; see `WeatherReading::empty`.
#[derive(Debug, thiserror::Error)]
#[error("{message} ({reason})")]
pub struct WeatherServiceFailure {
    reason: WeatherServiceFailureReason,
    message: String,
    #[source]
    source: reqwest::Error,
}

impl WeatherServiceFailure {
    pub fn new(
        reason: WeatherServiceFailureReason,
        message: impl Into<String>,
        source: reqwest::Error,
    ) -> Self {
        Self { reason, message: message.into(), source }
    }

    /// Classify a reqwest error by its status code, if it carries one.
    pub fn from_transport(source: reqwest::Error) -> Self {
        let reason = WeatherServiceFailureReason::from_status(source.status());
        Self::new(reason, YR_FAILURE_MESSAGE, source)
    }

    pub fn reason(&self) -> WeatherServiceFailureReason {
        self.reason
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn status(&self) -> Option<StatusCode> {
        self.source.status()
    }
}
