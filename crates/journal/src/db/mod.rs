mod sqlite;

pub use sqlite::*;

use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};
use utoipa::ToSchema;
use weather_sources::{DailyWeather, DataSource};

/// A saved day of weather
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct WeatherRecord {
    pub id: i64,
    /// The date the user asked about, as entered
    pub requested_date: Date,
    pub city: String,
    pub country: String,
    pub temp_max_c: Option<f64>,
    pub temp_min_c: Option<f64>,
    pub precip_mm: Option<f64>,
    pub wind_max_kmh: Option<f64>,
    /// "historical" or "forecast"
    #[schema(value_type = String, example = "historical")]
    pub source: DataSource,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewWeatherRecord {
    pub requested_date: Date,
    pub city: String,
    pub country: String,
    pub temp_max_c: Option<f64>,
    pub temp_min_c: Option<f64>,
    pub precip_mm: Option<f64>,
    pub wind_max_kmh: Option<f64>,
    pub source: DataSource,
}

impl NewWeatherRecord {
    pub fn from_daily(
        requested_date: Date,
        city: impl Into<String>,
        country: impl Into<String>,
        weather: &DailyWeather,
    ) -> Self {
        Self {
            requested_date,
            city: city.into(),
            country: country.into(),
            temp_max_c: weather.temp_max_c,
            temp_min_c: weather.temp_min_c,
            precip_mm: weather.precip_mm,
            wind_max_kmh: weather.wind_max_kmh,
            source: weather.source,
        }
    }
}

/// Columns the records table may be ordered by
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortColumn {
    Id,
    #[default]
    RequestedDate,
    City,
    Country,
    TempMaxC,
    TempMinC,
    PrecipMm,
    WindMaxKmh,
    Source,
    CreatedAt,
}

impl SortColumn {
    pub const ALL: [SortColumn; 10] = [
        SortColumn::Id,
        SortColumn::RequestedDate,
        SortColumn::City,
        SortColumn::Country,
        SortColumn::TempMaxC,
        SortColumn::TempMinC,
        SortColumn::PrecipMm,
        SortColumn::WindMaxKmh,
        SortColumn::Source,
        SortColumn::CreatedAt,
    ];

    /// Column name, used both in SQL and in `?sort=` links
    pub fn as_str(&self) -> &'static str {
        match self {
            SortColumn::Id => "id",
            SortColumn::RequestedDate => "requested_date",
            SortColumn::City => "city",
            SortColumn::Country => "country",
            SortColumn::TempMaxC => "temp_max_c",
            SortColumn::TempMinC => "temp_min_c",
            SortColumn::PrecipMm => "precip_mm",
            SortColumn::WindMaxKmh => "wind_max_kmh",
            SortColumn::Source => "source",
            SortColumn::CreatedAt => "created_at",
        }
    }

    /// Unknown names fall back to the default column
    pub fn parse(name: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|column| column.as_str() == name)
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    /// Only "asc" sorts ascending, anything else is descending
    pub fn parse(value: &str) -> Self {
        if value == "asc" {
            SortDirection::Asc
        } else {
            SortDirection::Desc
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RecordSort {
    pub column: SortColumn,
    pub direction: SortDirection,
}

impl RecordSort {
    pub fn from_params(sort: Option<&str>, dir: Option<&str>) -> Self {
        Self {
            column: sort.map(SortColumn::parse).unwrap_or_default(),
            direction: dir.map(SortDirection::parse).unwrap_or_default(),
        }
    }

    /// Direction a header link for `column` should request
    pub fn next_direction(&self, column: SortColumn) -> SortDirection {
        if self.column == column && self.direction == SortDirection::Asc {
            SortDirection::Desc
        } else {
            SortDirection::Asc
        }
    }

    /// `sort=..&dir=..` for links and form actions that keep this order
    pub fn query_string(&self) -> String {
        format!(
            "sort={}&dir={}",
            self.column.as_str(),
            self.direction.as_str()
        )
    }

    pub(crate) fn order_by(&self) -> String {
        let direction = self.direction.as_str().to_uppercase();
        match self.column {
            SortColumn::Id => format!("id {}", direction),
            column => format!("{} {}, id {}", column.as_str(), direction, direction),
        }
    }
}
