use reqwest::StatusCode;
use thiserror::Error;

/// Why a single upstream exchange went wrong.
///
/// Never shown to clients; it travels as the `source` of a [`LookupError`]
/// so it can be logged.
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("request failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("unexpected status {0}")]
    Status(StatusCode),

    #[error("failed to read response body: {0}")]
    Body(#[source] reqwest::Error),

    #[error("invalid JSON: {0}")]
    Decode(#[source] serde_json::Error),
}

/// Every way a weather lookup can fail.
///
/// The `Display` text is the client-facing message and [`LookupError::status`]
/// the HTTP status that goes with it.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("Missing lat or lon query parameter")]
    MissingCoordinate,

    #[error("Invalid lat or lon value")]
    InvalidCoordinate,

    #[error("Failed to get gridpoint info")]
    GridpointFetchFailed(#[source] UpstreamError),

    #[error("Failed to parse gridpoint response")]
    GridpointParseFailed(#[source] UpstreamError),

    #[error("No forecast URL found for location")]
    NoForecastUrl,

    #[error("Failed to get forecast")]
    ForecastFetchFailed(#[source] UpstreamError),

    #[error("Failed to parse forecast response")]
    ForecastParseFailed(#[source] UpstreamError),

    #[error("No forecast data found")]
    NoForecastData,
}

impl LookupError {
    pub fn status(&self) -> StatusCode {
        match self {
            LookupError::MissingCoordinate | LookupError::InvalidCoordinate => {
                StatusCode::BAD_REQUEST
            }
            LookupError::NoForecastUrl | LookupError::NoForecastData => StatusCode::NOT_FOUND,
            LookupError::GridpointFetchFailed(_)
            | LookupError::GridpointParseFailed(_)
            | LookupError::ForecastFetchFailed(_)
            | LookupError::ForecastParseFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// True when the caller sent something unusable, as opposed to the upstream misbehaving.
    pub fn is_client_error(&self) -> bool {
        matches!(self, LookupError::MissingCoordinate | LookupError::InvalidCoordinate)
    }
}
