use crate::helpers::{body_text, daily, spawn_app, springfields, MockWeatherSources};
use axum::{body::Body, http::Request};
use hyper::{header, Method, StatusCode};
use journal::{routes::Candidates, routes::LocationCandidate, WeatherRecord};
use serde_json::{from_str, json, Value};
use std::sync::Arc;
use time::macros::date;
use weather_sources::{DataSource, Error, Operation};

fn json_request(method: Method, uri: &str, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::ACCEPT, "application/json");
    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

#[tokio::test]
async fn can_create_read_and_delete_a_record() {
    let mut weather = MockWeatherSources::new();
    weather.expect_resolve().times(0);
    weather
        .expect_fetch_daily()
        .withf(|request| {
            request.date == date!(2000 - 01 - 01)
                && request
                    .point
                    .as_ref()
                    .is_some_and(|p| p.latitude == 41.8781 && p.timezone == "UTC")
        })
        .times(1)
        .returning(|request| {
            let mut weather = daily(request.point.clone().unwrap(), Some(10.0));
            weather.precip_mm = None;
            weather.source = DataSource::Historical;
            Ok(weather)
        });

    let test_app = spawn_app(Arc::new(weather)).await;

    let response = test_app
        .send(json_request(
            Method::POST,
            "/api/records",
            Some(json!({
                "requested_date": "2000-01-01",
                "city": "Chicago",
                "country": "US",
                "latitude": 41.8781,
                "longitude": -87.6298
            })),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created: WeatherRecord = from_str(&body_text(response).await).unwrap();
    assert_eq!(created.requested_date, date!(2000 - 01 - 01));
    assert_eq!(created.source, DataSource::Historical);
    assert_eq!(created.temp_max_c, Some(10.0));
    assert_eq!(created.precip_mm, None);

    let response = test_app
        .send(json_request(
            Method::GET,
            &format!("/api/records/{}", created.id),
            None,
        ))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = from_str(&body_text(response).await).unwrap();
    assert_eq!(body["requested_date"], "2000-01-01");
    assert_eq!(body["source"], "historical");
    assert_eq!(body["precip_mm"], Value::Null);
    let fetched: WeatherRecord = serde_json::from_value(body).unwrap();
    assert_eq!(fetched, created);

    let response = test_app
        .send(json_request(Method::GET, "/api/records", None))
        .await;
    let listed: Vec<WeatherRecord> = from_str(&body_text(response).await).unwrap();
    assert_eq!(listed, vec![created.clone()]);

    let uri = format!("/api/records/{}", created.id);
    let response = test_app
        .send(json_request(Method::DELETE, &uri, None))
        .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = test_app.send(json_request(Method::GET, &uri, None)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let response = test_app
        .send(json_request(Method::DELETE, &uri, None))
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn ambiguous_create_returns_candidates() {
    let mut weather = MockWeatherSources::new();
    weather
        .expect_resolve()
        .times(1)
        .returning(|_| Ok(springfields()));
    weather.expect_fetch_daily().times(0);

    let test_app = spawn_app(Arc::new(weather)).await;

    let response = test_app
        .send(json_request(
            Method::POST,
            "/api/records",
            Some(json!({
                "requested_date": "2024-03-15",
                "city": "Springfield",
                "country": "United States"
            })),
        ))
        .await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body: Candidates = from_str(&body_text(response).await).unwrap();
    assert_eq!(body.candidates.len(), 2);
    assert_eq!(body.candidates[1].region.as_deref(), Some("Missouri"));
    assert_eq!(test_app.db.count_records().await.unwrap(), 0);
}

#[tokio::test]
async fn create_errors_carry_a_message() {
    let test_app = spawn_app(Arc::new(MockWeatherSources::new())).await;

    let response = test_app
        .send(json_request(
            Method::POST,
            "/api/records",
            Some(json!({
                "requested_date": "yesterday",
                "city": "Chicago",
                "country": "US"
            })),
        ))
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = from_str(&body_text(response).await).unwrap();
    assert_eq!(body["error"], "Date must be in YYYY-MM-DD format.");
}

#[tokio::test]
async fn create_without_country_is_a_bad_request() {
    let mut weather = MockWeatherSources::new();
    weather.expect_resolve().times(0);
    weather.expect_fetch_daily().times(0);
    let test_app = spawn_app(Arc::new(weather)).await;

    let response = test_app
        .send(json_request(
            Method::POST,
            "/api/records",
            Some(json!({
                "requested_date": "2024-03-15",
                "city": "Chicago"
            })),
        ))
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = from_str(&body_text(response).await).unwrap();
    assert_eq!(body["error"], "Please fill in date, country, and city.");
    assert_eq!(test_app.db.count_records().await.unwrap(), 0);
}

#[tokio::test]
async fn upstream_failures_map_to_bad_gateway() {
    let mut weather = MockWeatherSources::new();
    weather.expect_fetch_daily().times(1).returning(|_| {
        Err(Error::NoData {
            operation: Operation::Forecast,
            date: "2024-03-15".to_string(),
        })
    });

    let test_app = spawn_app(Arc::new(weather)).await;

    let response = test_app
        .send(json_request(
            Method::POST,
            "/api/records",
            Some(json!({
                "requested_date": "2024-03-15",
                "city": "Chicago",
                "country": "US",
                "latitude": 41.8781,
                "longitude": -87.6298,
                "timezone": "America/Chicago"
            })),
        ))
        .await;

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body: Value = from_str(&body_text(response).await).unwrap();
    assert!(body["error"]
        .as_str()
        .unwrap()
        .starts_with("Weather fetch failed: "));
}

#[tokio::test]
async fn list_honours_sort_parameters() {
    let test_app = spawn_app(Arc::new(MockWeatherSources::new())).await;
    test_app.add("Zulu", Some(30.0)).await;
    test_app.add("Alpha", Some(5.0)).await;
    test_app.add("Mike", None).await;

    let response = test_app
        .send(json_request(
            Method::GET,
            "/api/records?sort=temp_max_c&dir=asc",
            None,
        ))
        .await;
    let cities: Vec<String> = from_str::<Vec<WeatherRecord>>(&body_text(response).await)
        .unwrap()
        .into_iter()
        .map(|r| r.city)
        .collect();
    // SQLite orders NULL first when ascending
    assert_eq!(cities, vec!["Mike", "Alpha", "Zulu"]);

    let response = test_app
        .send(json_request(
            Method::GET,
            "/api/records?sort=bogus",
            None,
        ))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn locations_search_passes_region_and_limit() {
    let mut weather = MockWeatherSources::new();
    weather
        .expect_resolve()
        .withf(|query| {
            query.city == "Springfield"
                && query.country == "US"
                && query.region.as_deref() == Some("Illinois")
                && query.limit == 3
        })
        .times(1)
        .returning(|_| Ok(springfields().into_iter().take(1).collect()));

    let test_app = spawn_app(Arc::new(weather)).await;

    let response = test_app
        .send(json_request(
            Method::GET,
            "/api/locations?city=Springfield&country=US&region=Illinois&limit=3",
            None,
        ))
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let candidates: Vec<LocationCandidate> = from_str(&body_text(response).await).unwrap();
    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0].latitude, 39.78);
    assert_eq!(candidates[0].timezone, "America/Chicago");
}

#[tokio::test]
async fn locations_search_maps_invalid_input() {
    let mut weather = MockWeatherSources::new();
    weather
        .expect_resolve()
        .times(1)
        .returning(|_| Err(Error::invalid_input("city", "must not be empty")));

    let test_app = spawn_app(Arc::new(weather)).await;

    let response = test_app
        .send(json_request(Method::GET, "/api/locations?city=", None))
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn locations_search_without_city_returns_error_body() {
    let mut weather = MockWeatherSources::new();
    weather
        .expect_resolve()
        .withf(|query| query.city.is_empty())
        .times(1)
        .returning(|_| Err(Error::invalid_input("city", "must not be empty")));

    let test_app = spawn_app(Arc::new(weather)).await;

    let response = test_app
        .send(json_request(Method::GET, "/api/locations?country=US", None))
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = from_str(&body_text(response).await).unwrap();
    assert!(body["error"]
        .as_str()
        .unwrap()
        .starts_with("Geocoding failed: "));
}

#[tokio::test]
async fn docs_and_health_are_served() {
    let test_app = spawn_app(Arc::new(MockWeatherSources::new())).await;

    let response = test_app
        .send(json_request(Method::GET, "/docs", None))
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = test_app
        .send(json_request(Method::GET, "/health", None))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "ok");
}
