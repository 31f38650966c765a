use axum::http::StatusCode;
use log::{debug, info};
use serde::Deserialize;
use weather_sources::{
    parse_coordinates, parse_target_date, DailyRequest, GeoCandidate, GeoPoint, LocationQuery,
    DEFAULT_CANDIDATE_LIMIT,
};

use crate::{Database, NewWeatherRecord, WeatherLookup, WeatherRecord};

/// A request to look up and save one day of weather, as submitted by a user
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AddRequest {
    #[serde(default, alias = "date")]
    pub requested_date: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub country: String,
    pub region: Option<String>,
    #[serde(alias = "lat")]
    pub latitude: Option<String>,
    #[serde(alias = "lon")]
    pub longitude: Option<String>,
    pub timezone: Option<String>,
}

#[derive(Debug)]
pub enum AddOutcome {
    Created(WeatherRecord),
    /// More than one place matched, nothing was saved
    Ambiguous(Vec<GeoCandidate>),
}

#[derive(thiserror::Error, Debug)]
pub enum AddError {
    #[error("Please fill in date, country, and city.")]
    MissingFields,
    #[error("Date must be in YYYY-MM-DD format.")]
    InvalidDate,
    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(#[source] weather_sources::Error),
    #[error("Geocoding failed: {0}")]
    Geocoding(#[source] weather_sources::Error),
    #[error("No matching locations found for {place}.")]
    NoMatches { place: String },
    #[error("Weather fetch failed: {0}")]
    WeatherFetch(#[source] weather_sources::Error),
    #[error("Failed to save weather record: {0}")]
    Storage(#[source] anyhow::Error),
}

impl AddError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AddError::MissingFields | AddError::InvalidDate | AddError::InvalidCoordinates(_) => {
                StatusCode::BAD_REQUEST
            }
            AddError::NoMatches { .. } => StatusCode::NOT_FOUND,
            AddError::Geocoding(e) | AddError::WeatherFetch(e) => upstream_status(e),
            AddError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// HTTP status for a weather core failure
pub fn upstream_status(err: &weather_sources::Error) -> StatusCode {
    match err {
        weather_sources::Error::InvalidInput { .. } => StatusCode::BAD_REQUEST,
        weather_sources::Error::UpstreamTimeout { .. } => StatusCode::GATEWAY_TIMEOUT,
        weather_sources::Error::Client(_) => StatusCode::INTERNAL_SERVER_ERROR,
        weather_sources::Error::UpstreamUnavailable { .. }
        | weather_sources::Error::DataUnavailable { .. }
        | weather_sources::Error::NoData { .. } => StatusCode::BAD_GATEWAY,
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Validate, locate, fetch and save. Shared by the HTML form and the JSON API.
pub async fn add_weather_record(
    db: &Database,
    weather: &dyn WeatherLookup,
    request: AddRequest,
) -> Result<AddOutcome, AddError> {
    let requested_date = request.requested_date.trim();
    let city = request.city.trim();
    let country = request.country.trim();
    if requested_date.is_empty() || city.is_empty() || country.is_empty() {
        return Err(AddError::MissingFields);
    }

    let date = parse_target_date(requested_date).map_err(|_| AddError::InvalidDate)?;

    let coordinates = match (
        non_blank(request.latitude.as_deref()),
        non_blank(request.longitude.as_deref()),
    ) {
        (Some(lat), Some(lon)) => {
            Some(parse_coordinates(lat, lon).map_err(AddError::InvalidCoordinates)?)
        }
        _ => None,
    };

    let point = match coordinates {
        Some((latitude, longitude)) => {
            GeoPoint::new(latitude, longitude, request.timezone.as_deref())
        }
        None => {
            let region = non_blank(request.region.as_deref()).map(str::to_string);
            let query = LocationQuery::new(city, country)
                .with_region(region.clone())
                .with_limit(DEFAULT_CANDIDATE_LIMIT);
            let mut candidates = weather
                .resolve(&query)
                .await
                .map_err(AddError::Geocoding)?;

            match candidates.len() {
                0 => {
                    let place = match region {
                        Some(region) => format!("{}, {} ({})", city, country, region),
                        None => format!("{}, {}", city, country),
                    };
                    return Err(AddError::NoMatches { place });
                }
                1 => candidates.remove(0).point(),
                n => {
                    debug!("{} candidates for {}, {}", n, city, country);
                    return Ok(AddOutcome::Ambiguous(candidates));
                }
            }
        }
    };

    let daily = DailyRequest::new(date, city, country).at(point);
    let observed = weather
        .fetch_daily(&daily)
        .await
        .map_err(AddError::WeatherFetch)?;

    let record = db
        .add_record(NewWeatherRecord::from_daily(date, city, country, &observed))
        .await
        .map_err(AddError::Storage)?;
    info!(
        "saved record {} for {}, {} on {} ({})",
        record.id, record.city, record.country, requested_date, record.source
    );

    Ok(AddOutcome::Created(record))
}
