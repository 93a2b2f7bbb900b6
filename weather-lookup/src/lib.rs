//! Core library for the weather lookup service.
//!
//! This crate defines:
//! - Configuration loading (defaults, TOML file)
//! - The closed set of lookup failures and their HTTP mapping
//! - Shared domain models (coordinates, forecast periods, results)
//! - Abstraction over the upstream forecast source, with an NWS implementation
//! - The lookup pipeline itself
//!
//! It is used by `weather-server`, but can also be reused by other binaries or services.

pub mod config;
pub mod error;
pub mod lookup;
pub mod model;
pub mod source;
pub mod temperature;

pub use config::{Config, ServerConfig, UpstreamConfig};
pub use error::{LookupError, UpstreamError};
pub use lookup::{lookup_weather, parse_coordinate};
pub use model::{Coordinate, ErrorEnvelope, ForecastPeriod, GridpointReference, WeatherResult};
pub use source::{ForecastSource, nws::NwsClient};
pub use temperature::{TemperatureClass, TemperatureScale};
