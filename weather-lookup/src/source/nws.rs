use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode, header};
use serde::{Deserialize, de::DeserializeOwned};

use crate::{
    config::UpstreamConfig,
    error::{LookupError, UpstreamError},
    model::{Coordinate, ForecastPeriod, GridpointReference, null_as_default},
};

use super::ForecastSource;

/// Client for the National Weather Service API (`api.weather.gov`).
///
/// Holds one pooled `reqwest::Client`; cloning is cheap.
#[derive(Debug, Clone)]
pub struct NwsClient {
    points_base_url: String,
    http: Client,
}

impl NwsClient {
    pub fn new(config: &UpstreamConfig) -> Result<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(header::ACCEPT, header::HeaderValue::from_static("application/geo+json"));

        let http = Client::builder()
            .user_agent(config.user_agent.as_str())
            .default_headers(headers)
            .timeout(config.timeout())
            .connect_timeout(config.connect_timeout())
            .build()
            .context("Failed to build HTTP client for the NWS API")?;

        Ok(Self {
            points_base_url: config.points_base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    pub fn points_url(&self, coordinate: &Coordinate) -> String {
        format!("{}/{}", self.points_base_url, coordinate.path_segment())
    }

    /// GET `url`, insisting on a 200, and decode the body as `T`.
    ///
    /// Transport errors and bad statuses are fetch failures; unreadable or
    /// malformed bodies are parse failures.
    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
    ) -> std::result::Result<T, FetchOrParse> {
        let res = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| FetchOrParse::Fetch(UpstreamError::Transport(e)))?;

        let status = res.status();
        if status != StatusCode::OK {
            return Err(FetchOrParse::Fetch(UpstreamError::Status(status)));
        }

        let body = res.bytes().await.map_err(|e| FetchOrParse::Parse(UpstreamError::Body(e)))?;

        decode_first(&body).map_err(|e| FetchOrParse::Parse(UpstreamError::Decode(e)))
    }
}

/// Decode the first JSON value in `body`, ignoring anything after it.
fn decode_first<T: DeserializeOwned>(body: &[u8]) -> serde_json::Result<T> {
    match serde_json::Deserializer::from_slice(body).into_iter::<T>().next() {
        Some(value) => value,
        // Blank body; let the strict decoder produce the EOF error.
        None => serde_json::from_slice(body),
    }
}

enum FetchOrParse {
    Fetch(UpstreamError),
    Parse(UpstreamError),
}

impl FetchOrParse {
    fn into_lookup_error(
        self,
        fetch: fn(UpstreamError) -> LookupError,
        parse: fn(UpstreamError) -> LookupError,
    ) -> LookupError {
        match self {
            FetchOrParse::Fetch(e) => fetch(e),
            FetchOrParse::Parse(e) => parse(e),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PointsProperties {
    #[serde(deserialize_with = "null_as_default")]
    forecast: String,
}

#[derive(Debug, Deserialize)]
struct PointsResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    properties: PointsProperties,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ForecastProperties {
    #[serde(deserialize_with = "null_periods_as_default")]
    periods: Vec<ForecastPeriod>,
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    properties: ForecastProperties,
}

/// A `null` list is empty and a `null` entry is a blank period.
fn null_periods_as_default<'de, D>(
    deserializer: D,
) -> std::result::Result<Vec<ForecastPeriod>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let periods: Option<Vec<Option<ForecastPeriod>>> = Deserialize::deserialize(deserializer)?;
    Ok(periods.unwrap_or_default().into_iter().map(Option::unwrap_or_default).collect())
}

#[async_trait]
impl ForecastSource for NwsClient {
    async fn resolve_gridpoint(
        &self,
        coordinate: &Coordinate,
    ) -> std::result::Result<GridpointReference, LookupError> {
        let url = self.points_url(coordinate);
        tracing::debug!(%url, "resolving gridpoint");

        let parsed: PointsResponse = self.get_json(&url).await.map_err(|e| {
            e.into_lookup_error(LookupError::GridpointFetchFailed, LookupError::GridpointParseFailed)
        })?;

        Ok(GridpointReference { forecast: parsed.properties.forecast })
    }

    async fn fetch_periods(
        &self,
        forecast_url: &str,
    ) -> std::result::Result<Vec<ForecastPeriod>, LookupError> {
        tracing::debug!(url = %forecast_url, "fetching forecast");

        let parsed: ForecastResponse = self.get_json(forecast_url).await.map_err(|e| {
            e.into_lookup_error(LookupError::ForecastFetchFailed, LookupError::ForecastParseFailed)
        })?;

        Ok(parsed.properties.periods)
    }
}
