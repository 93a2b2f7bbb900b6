use crate::{
    error::LookupError,
    model::{Coordinate, WeatherResult},
    source::ForecastSource,
};

/// Validate raw `lat`/`lon` query values.
///
/// Absent and empty values are both "missing". Anything that parses as an
/// `f64` is accepted, including out-of-range degrees.
pub fn parse_coordinate(lat: Option<&str>, lon: Option<&str>) -> Result<Coordinate, LookupError> {
    let (lat, lon) = match (lat, lon) {
        (Some(lat), Some(lon)) if !lat.is_empty() && !lon.is_empty() => (lat, lon),
        _ => return Err(LookupError::MissingCoordinate),
    };

    match (lat.parse::<f64>(), lon.parse::<f64>()) {
        (Ok(lat), Ok(lon)) => Ok(Coordinate::new(lat, lon)),
        _ => Err(LookupError::InvalidCoordinate),
    }
}

/// Resolve `coordinate` to its gridpoint, fetch the forecast, and summarize the first period.
pub async fn lookup_weather<S>(
    source: &S,
    coordinate: &Coordinate,
) -> Result<WeatherResult, LookupError>
where
    S: ForecastSource + ?Sized,
{
    let grid = source.resolve_gridpoint(coordinate).await?;
    if grid.forecast.is_empty() {
        return Err(LookupError::NoForecastUrl);
    }

    let periods = source.fetch_periods(&grid.forecast).await?;
    let first = periods.first().ok_or(LookupError::NoForecastData)?;

    tracing::debug!(
        period = %first.name,
        temperature = first.temperature,
        unit = %first.temperature_unit,
        "using first forecast period"
    );

    Ok(WeatherResult::from(first))
}
