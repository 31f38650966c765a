use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{Request, Response},
    Router,
};
use hyper::{header, Method};
use journal::{app, AppState, Database, NewWeatherRecord, WeatherLookup, WeatherRecord};
use mockall::mock;
use std::sync::Arc;
use tempfile::TempDir;
use time::macros::date;
use tower::ServiceExt;
use weather_sources::{
    DailyRequest, DailyWeather, DataSource, Error, GeoCandidate, GeoPoint, LocationQuery,
};

mock! {
    pub WeatherSources {}
    #[async_trait]
    impl WeatherLookup for WeatherSources {
        async fn resolve(&self, query: &LocationQuery) -> Result<Vec<GeoCandidate>, Error>;
        async fn fetch_daily(&self, request: &DailyRequest) -> Result<DailyWeather, Error>;
    }
}

pub struct TestApp {
    pub app: Router,
    pub db: Arc<Database>,
    _data_dir: TempDir,
}

impl TestApp {
    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.app
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to execute request.")
    }

    pub async fn add(&self, city: &str, temp_max_c: Option<f64>) -> WeatherRecord {
        self.db
            .add_record(NewWeatherRecord {
                requested_date: date!(2024 - 03 - 15),
                city: city.to_string(),
                country: "United States".to_string(),
                temp_max_c,
                temp_min_c: Some(9.0),
                precip_mm: Some(0.0),
                wind_max_kmh: Some(10.0),
                source: DataSource::Forecast,
            })
            .await
            .expect("Failed to insert record")
    }
}

pub async fn spawn_app(weather: Arc<dyn WeatherLookup>) -> TestApp {
    let data_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let db = Arc::new(
        Database::new(data_dir.path().to_str().unwrap())
            .await
            .expect("Failed to open test database"),
    );

    let state = AppState {
        static_dir: data_dir.path().to_string_lossy().into_owned(),
        db: db.clone(),
        weather,
    };

    TestApp {
        app: app(state),
        db,
        _data_dir: data_dir,
    }
}

pub fn springfields() -> Vec<GeoCandidate> {
    vec![
        GeoCandidate {
            name: "Springfield".to_string(),
            region: Some("Illinois".to_string()),
            country: "United States".to_string(),
            latitude: 39.78,
            longitude: -89.64,
            timezone: "America/Chicago".to_string(),
        },
        GeoCandidate {
            name: "Springfield".to_string(),
            region: Some("Missouri".to_string()),
            country: "United States".to_string(),
            latitude: 37.2,
            longitude: -93.29,
            timezone: "America/Chicago".to_string(),
        },
    ]
}

pub fn daily(geo: GeoPoint, temp_max_c: Option<f64>) -> DailyWeather {
    DailyWeather {
        temp_max_c,
        temp_min_c: Some(10.0),
        precip_mm: Some(1.0),
        wind_max_kmh: Some(15.0),
        source: DataSource::Forecast,
        geo,
    }
}

pub fn form_post(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method(Method::GET)
        .uri(uri)
        .header(header::ACCEPT, "text/html")
        .body(Body::empty())
        .unwrap()
}

pub async fn body_text(response: Response<Body>) -> String {
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(body.to_vec()).unwrap()
}
