use anyhow::Context;
use axum::{
    Json, Router,
    extract::{Query, State},
    response::{IntoResponse, Response},
    routing::get,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use weather_lookup::{
    Config, ErrorEnvelope, ForecastSource, LookupError, NwsClient, WeatherResult, lookup_weather,
    parse_coordinate,
};

#[derive(Debug, Clone)]
pub struct AppState {
    source: Arc<dyn ForecastSource>,
}

pub fn router(source: Arc<dyn ForecastSource>) -> Router {
    Router::new()
        .route("/GetWeather", get(get_weather))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(AppState { source })
}

/// Bind the configured address and serve until Ctrl-C / SIGTERM.
pub async fn serve(config: Config) -> anyhow::Result<()> {
    let source = NwsClient::new(&config.upstream)?;

    let addr = config.server.listen_addr();
    let listener =
        TcpListener::bind(&addr).await.with_context(|| format!("Failed to bind {addr}"))?;

    tracing::info!(
        addr = %listener.local_addr()?,
        upstream = %config.upstream.points_base_url,
        timeout_ms = config.upstream.timeout_ms,
        "weather server listening"
    );

    axum::serve(listener, router(Arc::new(source)))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server terminated unexpectedly")?;

    tracing::info!("weather server stopped");
    Ok(())
}

async fn health() -> &'static str {
    "OK"
}

/// `GET /GetWeather?lat=..&lon=..`
///
/// The lookup runs inside this handler's future, so a client that hangs up
/// cancels whichever upstream call is in flight.
async fn get_weather(
    State(state): State<AppState>,
    query: Option<Query<Vec<(String, String)>>>,
) -> Result<Json<WeatherResult>, ApiError> {
    let params = query.map(|Query(params)| params).unwrap_or_default();

    let coordinate = parse_coordinate(first_value(&params, "lat"), first_value(&params, "lon"))?;

    let result = lookup_weather(state.source.as_ref(), &coordinate).await?;
    Ok(Json(result))
}

/// First value for `key` when it repeats in the query string.
fn first_value<'a>(params: &'a [(String, String)], key: &str) -> Option<&'a str> {
    params.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
}

/// A [`LookupError`] on its way out as a JSON envelope.
#[derive(Debug)]
pub struct ApiError(LookupError);

impl From<LookupError> for ApiError {
    fn from(err: LookupError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = self.0;

        if err.is_client_error() {
            tracing::debug!(error = %err, "rejected weather request");
        } else {
            let cause = std::error::Error::source(&err).map(ToString::to_string).unwrap_or_default();
            tracing::warn!(error = %err, %cause, "weather lookup failed");
        }

        (err.status(), Json(ErrorEnvelope::from(&err))).into_response()
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(%err, "failed to listen for Ctrl-C");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(err) => {
                tracing::error!(%err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("shutdown signal received, draining connections");
}
