use crate::{
    error::LookupError,
    model::{Coordinate, ForecastPeriod, GridpointReference},
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod nws;

/// The two upstream steps of a lookup.
///
/// Implementations report failures with the matching [`LookupError`] kind,
/// so the pipeline only has to sequence the calls.
#[async_trait]
pub trait ForecastSource: Send + Sync + Debug {
    async fn resolve_gridpoint(
        &self,
        coordinate: &Coordinate,
    ) -> Result<GridpointReference, LookupError>;

    /// Periods in upstream order; may be empty.
    async fn fetch_periods(&self, forecast_url: &str) -> Result<Vec<ForecastPeriod>, LookupError>;
}
