use std::time::Duration;

use crate::DateMatch;

pub const DEFAULT_GEOCODING_URL: &str = "https://geocoding-api.open-meteo.com/v1/search";
pub const DEFAULT_FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";
pub const DEFAULT_ARCHIVE_URL: &str = "https://archive-api.open-meteo.com/v1/archive";
pub const DEFAULT_USER_AGENT: &str = concat!("weather-journal/", env!("CARGO_PKG_VERSION"));
pub const DEFAULT_GEOCODING_TIMEOUT: Duration = Duration::from_secs(20);
pub const DEFAULT_WEATHER_TIMEOUT: Duration = Duration::from_secs(30);

/// Upstream endpoints and per-call limits, fixed at construction
#[derive(Debug, Clone, PartialEq)]
pub struct SourcesConfig {
    pub geocoding_url: String,
    pub forecast_url: String,
    pub archive_url: String,
    pub user_agent: String,
    pub geocoding_timeout: Duration,
    pub weather_timeout: Duration,
    pub date_match: DateMatch,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            geocoding_url: DEFAULT_GEOCODING_URL.to_string(),
            forecast_url: DEFAULT_FORECAST_URL.to_string(),
            archive_url: DEFAULT_ARCHIVE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            geocoding_timeout: DEFAULT_GEOCODING_TIMEOUT,
            weather_timeout: DEFAULT_WEATHER_TIMEOUT,
            date_match: DateMatch::default(),
        }
    }
}

impl SourcesConfig {
    /// Point all three endpoints at one host, keeping the Open-Meteo paths
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        let base = base_url.trim_end_matches('/');
        self.geocoding_url = format!("{}/v1/search", base);
        self.forecast_url = format!("{}/v1/forecast", base);
        self.archive_url = format!("{}/v1/archive", base);
        self
    }

    pub fn with_date_match(mut self, date_match: DateMatch) -> Self {
        self.date_match = date_match;
        self
    }

    pub fn with_timeouts(mut self, geocoding: Duration, weather: Duration) -> Self {
        self.geocoding_timeout = geocoding;
        self.weather_timeout = weather;
        self
    }
}
