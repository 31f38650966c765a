use async_trait::async_trait;
use weather_sources::{
    DailyRequest, DailyWeather, Error, GeoCandidate, LocationQuery, WeatherSources,
};

/// The part of the weather core the server depends on
#[async_trait]
pub trait WeatherLookup: Send + Sync {
    async fn resolve(&self, query: &LocationQuery) -> Result<Vec<GeoCandidate>, Error>;
    async fn fetch_daily(&self, request: &DailyRequest) -> Result<DailyWeather, Error>;
}

#[async_trait]
impl WeatherLookup for WeatherSources {
    async fn resolve(&self, query: &LocationQuery) -> Result<Vec<GeoCandidate>, Error> {
        WeatherSources::resolve(self, query).await
    }

    async fn fetch_daily(&self, request: &DailyRequest) -> Result<DailyWeather, Error> {
        WeatherSources::fetch_daily(self, request).await
    }
}
