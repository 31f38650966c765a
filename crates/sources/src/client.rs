use std::sync::Arc;
use time::Date;

use crate::{
    DailyRequest, DailyService, DailyWeather, Error, GeoCandidate, JsonFetcher, LocationQuery,
    LocationService, SourcesConfig,
};

/// Entry point for hosts: location resolution plus daily weather lookup
///
/// Holds no mutable state, so one instance can serve concurrent callers.
pub struct WeatherSources {
    locations: Arc<LocationService>,
    daily: DailyService,
}

impl WeatherSources {
    pub fn new(config: SourcesConfig) -> Result<Self, Error> {
        let fetcher = Arc::new(JsonFetcher::new(&config.user_agent)?);
        let locations = Arc::new(LocationService::new(fetcher.clone(), &config));
        let daily = DailyService::new(fetcher, locations.clone(), &config);
        Ok(Self { locations, daily })
    }

    pub async fn resolve(&self, query: &LocationQuery) -> Result<Vec<GeoCandidate>, Error> {
        self.locations.resolve(query).await
    }

    pub async fn fetch_daily(&self, request: &DailyRequest) -> Result<DailyWeather, Error> {
        self.daily.fetch_daily(request).await
    }

    pub async fn fetch_daily_as_of(
        &self,
        request: &DailyRequest,
        today: Date,
    ) -> Result<DailyWeather, Error> {
        self.daily.fetch_daily_as_of(request, today).await
    }
}
