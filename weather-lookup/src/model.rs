use serde::{Deserialize, Deserializer, Serialize};

use crate::{
    error::LookupError,
    temperature::{TemperatureClass, TemperatureScale},
};

/// A point in decimal degrees. Not range-checked.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// `"{lat},{lon}"` with six fractional digits, as the points endpoint expects.
    pub fn path_segment(&self) -> String {
        format!("{:.6},{:.6}", self.lat, self.lon)
    }
}

/// Where the forecast for a resolved gridpoint lives.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GridpointReference {
    pub forecast: String,
}

/// Reads JSON `null` the same as an absent field.
///
/// Pair with `#[serde(default)]` so missing fields are covered too.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct ForecastPeriod {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub detailed_forecast: String,
    #[serde(deserialize_with = "null_as_default")]
    pub temperature: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub temperature_unit: String,
}

impl ForecastPeriod {
    pub fn scale(&self) -> TemperatureScale {
        TemperatureScale::from_unit(&self.temperature_unit)
    }

    pub fn classification(&self) -> TemperatureClass {
        TemperatureClass::classify(self.temperature, self.scale())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WeatherResult {
    pub forecast: String,
    pub temperature: String,
}

impl From<&ForecastPeriod> for WeatherResult {
    fn from(period: &ForecastPeriod) -> Self {
        Self {
            forecast: period.detailed_forecast.clone(),
            temperature: format!(
                "{} ({} {})",
                period.classification(),
                period.temperature,
                period.scale()
            ),
        }
    }
}

/// JSON body sent alongside every failed lookup.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorEnvelope {
    pub code: u16,
    pub message: String,
}

impl From<&LookupError> for ErrorEnvelope {
    fn from(err: &LookupError) -> Self {
        Self { code: err.status().as_u16(), message: err.to_string() }
    }
}
