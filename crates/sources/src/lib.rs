//! Weather sources for the weather journal
//!
//! - Location resolution through the Open-Meteo geocoding API
//! - Date-driven selection between the forecast and archive APIs
//! - Extraction of a single normalized day from a daily series
//!
//! Every call is independent: no caching, no shared mutable state, and no
//! retries beyond the single geocoding fallback query.

mod client;
mod config;
mod domains;
mod error;
mod fetcher;
mod input;
mod types;

pub use client::WeatherSources;
pub use config::*;
pub use domains::*;
pub use error::{Error, Operation};
pub use fetcher::{JsonFetcher, QueryParams};
pub use input::{iso_date, parse_coordinates, parse_target_date};
pub use types::*;

pub type Result<T> = std::result::Result<T, Error>;
