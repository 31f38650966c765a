use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use log::error;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::{IntoParams, ToSchema};
use weather_sources::{GeoCandidate, LocationQuery, DEFAULT_CANDIDATE_LIMIT};

use crate::{
    add_weather_record, upstream_status, AddOutcome, AddRequest, AppState, RecordSort,
    WeatherRecord,
};

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct ErrorBody {
    pub error: String,
}

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorBody {
            error: message.into(),
        }),
    )
        .into_response()
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct LocationCandidate {
    pub name: String,
    /// State, province or other first-level area
    pub region: Option<String>,
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
    pub timezone: String,
}

impl From<GeoCandidate> for LocationCandidate {
    fn from(value: GeoCandidate) -> Self {
        Self {
            name: value.name,
            region: value.region,
            country: value.country,
            latitude: value.latitude,
            longitude: value.longitude,
            timezone: value.timezone,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct Candidates {
    pub candidates: Vec<LocationCandidate>,
}

#[derive(Serialize, Deserialize, Debug, Default, ToSchema)]
pub struct NewRecord {
    /// YYYY-MM-DD
    #[serde(default)]
    #[schema(example = "2024-03-15")]
    pub requested_date: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub country: String,
    /// Narrows geocoding results when several places share a name
    pub region: Option<String>,
    /// Skips geocoding when given together with `longitude`
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// Defaults to UTC
    pub timezone: Option<String>,
}

impl From<NewRecord> for AddRequest {
    fn from(value: NewRecord) -> Self {
        Self {
            requested_date: value.requested_date,
            city: value.city,
            country: value.country,
            region: value.region,
            latitude: value.latitude.map(|v| v.to_string()),
            longitude: value.longitude.map(|v| v.to_string()),
            timezone: value.timezone,
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize, IntoParams)]
pub struct ListParams {
    /// Column to order by, defaults to requested_date
    pub sort: Option<String>,
    /// "asc", anything else means descending
    pub dir: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize, IntoParams)]
pub struct LocationParams {
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub country: String,
    pub region: Option<String>,
    pub limit: Option<usize>,
}

#[utoipa::path(
    get,
    path = "/api/records",
    params(ListParams),
    responses(
        (status = OK, description = "Saved records in the requested order", body = Vec<WeatherRecord>),
        (status = INTERNAL_SERVER_ERROR, description = "Failed to read records", body = ErrorBody)
    ))]
pub async fn list_records(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListParams>,
) -> Response {
    let sort = RecordSort::from_params(params.sort.as_deref(), params.dir.as_deref());
    match state.db.list_records(sort).await {
        Ok(records) => Json(records).into_response(),
        Err(e) => {
            error!("error listing records: {:#}", e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
    }
}

#[utoipa::path(
    post,
    path = "/api/records",
    request_body = NewRecord,
    responses(
        (status = CREATED, description = "Weather looked up and saved", body = WeatherRecord),
        (status = BAD_REQUEST, description = "Missing or malformed input", body = ErrorBody),
        (status = NOT_FOUND, description = "No place matched", body = ErrorBody),
        (status = CONFLICT, description = "Several places matched, retry with coordinates", body = Candidates),
        (status = BAD_GATEWAY, description = "Upstream weather service failed", body = ErrorBody),
        (status = GATEWAY_TIMEOUT, description = "Upstream weather service timed out", body = ErrorBody),
        (status = INTERNAL_SERVER_ERROR, description = "Failed to save record", body = ErrorBody)
    ))]
pub async fn create_record(
    State(state): State<Arc<AppState>>,
    Json(body): Json<NewRecord>,
) -> Response {
    match add_weather_record(&state.db, state.weather.as_ref(), body.into()).await {
        Ok(AddOutcome::Created(record)) => (StatusCode::CREATED, Json(record)).into_response(),
        Ok(AddOutcome::Ambiguous(candidates)) => (
            StatusCode::CONFLICT,
            Json(Candidates {
                candidates: candidates.into_iter().map(LocationCandidate::from).collect(),
            }),
        )
            .into_response(),
        Err(e) => error_response(e.status_code(), e.to_string()),
    }
}

#[utoipa::path(
    get,
    path = "/api/records/{id}",
    params(
         ("id" = i64, Path, description = "Record id"),
    ),
    responses(
        (status = OK, description = "The record", body = WeatherRecord),
        (status = NOT_FOUND, description = "No record with that id", body = ErrorBody),
        (status = INTERNAL_SERVER_ERROR, description = "Failed to read record", body = ErrorBody)
    ))]
pub async fn get_record(State(state): State<Arc<AppState>>, Path(id): Path<i64>) -> Response {
    match state.db.get_record(id).await {
        Ok(Some(record)) => Json(record).into_response(),
        Ok(None) => error_response(StatusCode::NOT_FOUND, format!("Record {} not found.", id)),
        Err(e) => {
            error!("error reading record {}: {:#}", id, e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
    }
}

#[utoipa::path(
    delete,
    path = "/api/records/{id}",
    params(
         ("id" = i64, Path, description = "Record id"),
    ),
    responses(
        (status = NO_CONTENT, description = "Record deleted"),
        (status = NOT_FOUND, description = "No record with that id", body = ErrorBody),
        (status = INTERNAL_SERVER_ERROR, description = "Failed to delete record", body = ErrorBody)
    ))]
pub async fn delete_record(State(state): State<Arc<AppState>>, Path(id): Path<i64>) -> Response {
    match state.db.delete_record(id).await {
        Ok(true) => StatusCode::NO_CONTENT.into_response(),
        Ok(false) => error_response(StatusCode::NOT_FOUND, format!("Record {} not found.", id)),
        Err(e) => {
            error!("error deleting record {}: {:#}", id, e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/locations",
    params(LocationParams),
    responses(
        (status = OK, description = "Matching places in upstream order", body = Vec<LocationCandidate>),
        (status = BAD_REQUEST, description = "Empty city or zero limit", body = ErrorBody),
        (status = BAD_GATEWAY, description = "Geocoding service failed", body = ErrorBody),
        (status = GATEWAY_TIMEOUT, description = "Geocoding service timed out", body = ErrorBody)
    ))]
pub async fn search_locations(
    State(state): State<Arc<AppState>>,
    Query(params): Query<LocationParams>,
) -> Response {
    let query = LocationQuery::new(params.city, params.country)
        .with_region(params.region)
        .with_limit(params.limit.unwrap_or(DEFAULT_CANDIDATE_LIMIT));

    match state.weather.resolve(&query).await {
        Ok(candidates) => Json(
            candidates
                .into_iter()
                .map(LocationCandidate::from)
                .collect::<Vec<_>>(),
        )
        .into_response(),
        Err(e) => error_response(upstream_status(&e), format!("Geocoding failed: {}", e)),
    }
}
