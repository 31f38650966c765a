use log::debug;
use std::{sync::Arc, time::Duration};
use time::{Date, OffsetDateTime};

use super::{
    extract_day, select_source, DailyPayload, DateMatch, ExtractError, SourceQuery, DAILY_FIELDS,
};
use crate::{
    fetcher::{describe_query, QueryParams},
    iso_date, DailyWeather, Error, GeoCandidate, GeoPoint, JsonFetcher, LocationQuery,
    LocationService, Operation, SourcesConfig,
};

/// One day of weather for a place
#[derive(Debug, Clone, PartialEq)]
pub struct DailyRequest {
    pub date: Date,
    pub city: String,
    pub country: String,
    /// Already resolved point; when absent `city`/`country` are geocoded
    pub point: Option<GeoPoint>,
}

impl DailyRequest {
    pub fn new(date: Date, city: impl Into<String>, country: impl Into<String>) -> Self {
        Self {
            date,
            city: city.into(),
            country: country.into(),
            point: None,
        }
    }

    pub fn at(mut self, point: GeoPoint) -> Self {
        self.point = Some(point);
        self
    }
}

pub struct DailyService {
    fetcher: Arc<JsonFetcher>,
    locations: Arc<LocationService>,
    forecast_url: String,
    archive_url: String,
    timeout: Duration,
    date_match: DateMatch,
}

impl DailyService {
    pub fn new(
        fetcher: Arc<JsonFetcher>,
        locations: Arc<LocationService>,
        config: &SourcesConfig,
    ) -> Self {
        Self {
            fetcher,
            locations,
            forecast_url: config.forecast_url.clone(),
            archive_url: config.archive_url.clone(),
            timeout: config.weather_timeout,
            date_match: config.date_match,
        }
    }

    /// Fetch with the current UTC date as "today"
    pub async fn fetch_daily(&self, request: &DailyRequest) -> Result<DailyWeather, Error> {
        self.fetch_daily_as_of(request, OffsetDateTime::now_utc().date())
            .await
    }

    pub async fn fetch_daily_as_of(
        &self,
        request: &DailyRequest,
        today: Date,
    ) -> Result<DailyWeather, Error> {
        let geo = match &request.point {
            Some(point) => GeoPoint::new(
                point.latitude,
                point.longitude,
                Some(point.timezone.as_str()),
            ),
            None => self.locate(request).await?,
        };

        let selected = select_source(request.date, today);
        let (operation, url) = match selected {
            SourceQuery::Forecast { .. } => (Operation::Forecast, &self.forecast_url),
            SourceQuery::Archive { .. } => (Operation::Archive, &self.archive_url),
        };
        debug!(
            "{} for ({}, {}) on {} (today {})",
            operation, geo.latitude, geo.longitude, request.date, today
        );

        let params = daily_query(selected, &geo);
        let payload: DailyPayload = self
            .fetcher
            .fetch_json(operation, url, &params, self.timeout)
            .await?;

        let series = payload.daily.unwrap_or_default();
        let day = extract_day(&series, request.date, self.date_match).map_err(|e| match e {
            ExtractError::EmptySeries => Error::NoData {
                operation,
                date: iso_date(request.date),
            },
            ExtractError::DateNotFound => Error::DataUnavailable {
                operation,
                query: describe_query(&params),
                reason: format!("{} is not in the returned series", iso_date(request.date)),
            },
        })?;

        Ok(DailyWeather {
            temp_max_c: day.temp_max_c,
            temp_min_c: day.temp_min_c,
            precip_mm: day.precip_mm,
            wind_max_kmh: day.wind_max_kmh,
            source: selected.source(),
            geo,
        })
    }

    async fn locate(&self, request: &DailyRequest) -> Result<GeoPoint, Error> {
        let query =
            LocationQuery::new(request.city.as_str(), request.country.as_str()).with_limit(1);
        let candidates = self.locations.resolve(&query).await?;
        candidates
            .first()
            .map(GeoCandidate::point)
            .ok_or_else(|| Error::DataUnavailable {
                operation: Operation::Geocoding,
                query: format!("{}, {}", request.city, request.country),
                reason: "no geocoding results".to_string(),
            })
    }
}

/// Query parameters for the selected daily source
pub fn daily_query(selected: SourceQuery, geo: &GeoPoint) -> QueryParams {
    let mut params: QueryParams = vec![
        ("latitude", geo.latitude.to_string()),
        ("longitude", geo.longitude.to_string()),
        ("daily", DAILY_FIELDS.join(",")),
        ("timezone", geo.timezone.clone()),
    ];
    match selected {
        SourceQuery::Forecast {
            past_days: Some(days),
        } => params.push(("past_days", days.to_string())),
        SourceQuery::Forecast { past_days: None } => {}
        SourceQuery::Archive { date } => {
            params.push(("start_date", iso_date(date)));
            params.push(("end_date", iso_date(date)));
        }
    }
    params
}
