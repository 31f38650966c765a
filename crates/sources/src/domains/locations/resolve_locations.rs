use log::debug;
use serde::Deserialize;
use std::{sync::Arc, time::Duration};

use crate::{
    fetcher::{describe_query, QueryParams},
    Error, GeoCandidate, JsonFetcher, Operation, SourcesConfig, DEFAULT_TIMEZONE,
};

/// Candidates requested when the caller does not say otherwise
pub const DEFAULT_CANDIDATE_LIMIT: usize = 6;

/// Open-Meteo refuses larger `count` values
const MAX_CANDIDATE_LIMIT: usize = 100;

/// Free-text location to resolve
#[derive(Debug, Clone, PartialEq)]
pub struct LocationQuery {
    pub city: String,
    pub country: String,
    /// Advisory state/province filter, see [`filter_by_region`]
    pub region: Option<String>,
    pub limit: usize,
}

impl LocationQuery {
    pub fn new(city: impl Into<String>, country: impl Into<String>) -> Self {
        Self {
            city: city.into(),
            country: country.into(),
            region: None,
            limit: DEFAULT_CANDIDATE_LIMIT,
        }
    }

    /// Blank regions are dropped
    pub fn with_region(mut self, region: Option<String>) -> Self {
        self.region = region
            .map(|r| r.trim().to_string())
            .filter(|r| !r.is_empty());
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }
}

#[derive(Debug, Deserialize)]
struct GeocodingResponse {
    results: Option<Vec<GeocodingResult>>,
}

#[derive(Debug, Deserialize)]
struct GeocodingResult {
    name: Option<String>,
    admin1: Option<String>,
    country: Option<String>,
    latitude: Option<f64>,
    longitude: Option<f64>,
    timezone: Option<String>,
}

impl GeocodingResult {
    fn into_candidate(self, operation: Operation, query: &str) -> Result<GeoCandidate, Error> {
        let missing = |field: &str| Error::DataUnavailable {
            operation,
            query: query.to_string(),
            reason: format!(
                "result '{}' is missing {}",
                self.name.as_deref().unwrap_or_default(),
                field
            ),
        };
        let latitude = self.latitude.ok_or_else(|| missing("latitude"))?;
        let longitude = self.longitude.ok_or_else(|| missing("longitude"))?;

        let timezone = self
            .timezone
            .as_deref()
            .map(str::trim)
            .filter(|tz| !tz.is_empty())
            .unwrap_or(DEFAULT_TIMEZONE)
            .to_string();

        Ok(GeoCandidate {
            name: self.name.unwrap_or_default(),
            region: self.admin1,
            country: self.country.unwrap_or_default(),
            latitude,
            longitude,
            timezone,
        })
    }
}

/// Resolves free-text places into coordinate candidates
pub struct LocationService {
    fetcher: Arc<JsonFetcher>,
    url: String,
    timeout: Duration,
}

impl LocationService {
    pub fn new(fetcher: Arc<JsonFetcher>, config: &SourcesConfig) -> Self {
        Self {
            fetcher,
            url: config.geocoding_url.clone(),
            timeout: config.geocoding_timeout,
        }
    }

    /// Candidates in upstream order.
    ///
    /// The country is not an upstream filter, so the primary query sends the
    /// city alone; only an empty answer triggers the single `"{city}, {country}"`
    /// fallback query.
    pub async fn resolve(&self, query: &LocationQuery) -> Result<Vec<GeoCandidate>, Error> {
        let city = query.city.trim();
        if city.is_empty() {
            return Err(Error::invalid_input("city", "must not be empty"));
        }
        if query.limit == 0 {
            return Err(Error::invalid_input("limit", "must be at least 1"));
        }
        let limit = query.limit.min(MAX_CANDIDATE_LIMIT);

        let (mut results, mut described) = self.search(Operation::Geocoding, city, limit).await?;
        let mut operation = Operation::Geocoding;

        if results.is_empty() {
            let combined = format!("{}, {}", city, query.country.trim());
            let combined = combined.trim_end_matches([',', ' ']);
            debug!(
                "no geocoding results for '{}', retrying with '{}'",
                city, combined
            );
            operation = Operation::GeocodingFallback;
            (results, described) = self.search(operation, combined, limit).await?;
        }

        filter_by_region(results, query.region.as_deref(), |r| r.admin1.as_deref())
            .into_iter()
            .map(|result| result.into_candidate(operation, &described))
            .collect()
    }

    async fn search(
        &self,
        operation: Operation,
        name: &str,
        limit: usize,
    ) -> Result<(Vec<GeocodingResult>, String), Error> {
        let params: QueryParams = vec![
            ("name", name.to_string()),
            ("count", limit.to_string()),
            ("language", "en".to_string()),
            ("format", "json".to_string()),
        ];
        let response: GeocodingResponse = self
            .fetcher
            .fetch_json(operation, &self.url, &params, self.timeout)
            .await?;
        Ok((response.results.unwrap_or_default(), describe_query(&params)))
    }
}

/// Keep items whose region contains the wanted region, ignoring case.
///
/// The filter is advisory: when nothing matches, the input comes back
/// unchanged rather than empty.
pub fn filter_by_region<T, F>(items: Vec<T>, region: Option<&str>, region_of: F) -> Vec<T>
where
    F: Fn(&T) -> Option<&str>,
{
    let Some(wanted) = region.map(normalize).filter(|w| !w.is_empty()) else {
        return items;
    };

    // Equality is the degenerate case of containment
    let matches = |item: &T| normalize(region_of(item).unwrap_or_default()).contains(&wanted);

    if items.iter().any(|item| matches(item)) {
        items.into_iter().filter(|item| matches(item)).collect()
    } else {
        debug!("region '{}' matched no candidates, keeping all", wanted);
        items
    }
}

fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}
