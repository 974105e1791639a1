//! `bom-forecast` - Bureau of Meteorology forecast retrieval
//!
//! Downloads forecast product XML from the public file server, parses it and
//! extracts per-place forecast periods or the directory of known places.

pub mod api;
pub mod cleanup;
pub mod config;
pub mod document;
pub mod error;
pub mod extract;
pub mod models;
pub mod service;
pub mod telemetry;
pub mod transfer;
pub mod web;

// Re-export core types for public API
pub use config::{BomConfig, FtpConfig};
pub use document::{ProductDocument, parse_document};
pub use error::ForecastError;
pub use extract::{extract_forecast, extract_places};
pub use models::{Area, ForecastPeriod, ForecastResult, PlaceListResult, RequestStatus};
pub use service::{FetchOptions, ForecastService};
pub use transfer::{DocumentFetcher, FtpFetcher};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, ForecastError>;
