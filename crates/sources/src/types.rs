use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Timezone used when upstream or the caller leaves it blank
pub const DEFAULT_TIMEZONE: &str = "UTC";

/// One resolved location candidate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoCandidate {
    pub name: String,
    /// First-level administrative area (state, province, region)
    pub region: Option<String>,
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
    pub timezone: String,
}

impl GeoCandidate {
    pub fn point(&self) -> GeoPoint {
        GeoPoint {
            latitude: self.latitude,
            longitude: self.longitude,
            timezone: self.timezone.clone(),
        }
    }
}

/// Coordinates plus the timezone daily values are aggregated in
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
    pub timezone: String,
}

impl GeoPoint {
    /// Blank timezones fall back to UTC
    pub fn new(latitude: f64, longitude: f64, timezone: Option<&str>) -> Self {
        let timezone = timezone
            .map(str::trim)
            .filter(|tz| !tz.is_empty())
            .unwrap_or(DEFAULT_TIMEZONE)
            .to_string();
        Self {
            latitude,
            longitude,
            timezone,
        }
    }
}

/// Upstream source a daily record was read from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    Forecast,
    Historical,
}

impl DataSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            DataSource::Forecast => "forecast",
            DataSource::Historical => "historical",
        }
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DataSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "forecast" => Ok(DataSource::Forecast),
            "historical" => Ok(DataSource::Historical),
            other => Err(format!("unknown data source: {}", other)),
        }
    }
}

/// Normalized weather for a single date
///
/// `None` means upstream had no value for that field; it is never zero-filled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyWeather {
    pub temp_max_c: Option<f64>,
    pub temp_min_c: Option<f64>,
    pub precip_mm: Option<f64>,
    pub wind_max_kmh: Option<f64>,
    pub source: DataSource,
    pub geo: GeoPoint,
}
