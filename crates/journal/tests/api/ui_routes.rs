use crate::helpers::{body_text, daily, form_post, get, spawn_app, springfields, MockWeatherSources};
use hyper::{header, StatusCode};
use std::{sync::Arc, time::Duration};
use weather_sources::{Error, GeoPoint, Operation};

#[tokio::test]
async fn index_loads() {
    let test_app = spawn_app(Arc::new(MockWeatherSources::new())).await;

    let response = test_app.send(get("/")).await;

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("Weather Database"));
    assert!(html.contains("No records yet"));
    assert!(html.contains(r#"action="/add?sort=requested_date&amp;dir=desc""#));
}

#[tokio::test]
async fn add_ambiguous_shows_selection() {
    let mut weather = MockWeatherSources::new();
    weather
        .expect_resolve()
        .withf(|query| {
            query.city == "Springfield"
                && query.country == "United States"
                && query.region.is_none()
                && query.limit == 6
        })
        .times(1)
        .returning(|_| Ok(springfields()));
    weather.expect_fetch_daily().times(0);

    let test_app = spawn_app(Arc::new(weather)).await;

    let response = test_app
        .send(form_post(
            "/add",
            "requested_date=2024-03-15&country=United+States&city=Springfield",
        ))
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("Choose a location"));
    assert!(html.contains("Illinois"));
    assert!(html.contains("Missouri"));
    assert!(html.contains(r#"name="lat" value="39.78""#));
    assert_eq!(test_app.db.count_records().await.unwrap(), 0);
}

#[tokio::test]
async fn add_single_match_is_saved_without_asking() {
    let mut weather = MockWeatherSources::new();
    weather
        .expect_resolve()
        .withf(|query| query.region.as_deref() == Some("Illinois"))
        .times(1)
        .returning(|_| Ok(springfields().into_iter().take(1).collect()));
    weather
        .expect_fetch_daily()
        .withf(|request| {
            request
                .point
                .as_ref()
                .is_some_and(|p| p.latitude == 39.78 && p.timezone == "America/Chicago")
        })
        .times(1)
        .returning(|request| Ok(daily(request.point.clone().unwrap(), Some(18.5))));

    let test_app = spawn_app(Arc::new(weather)).await;

    let response = test_app
        .send(form_post(
            "/add",
            "requested_date=2024-03-15&country=United+States&city=Springfield&region=Illinois",
        ))
        .await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let records = test_app.db.list_records(Default::default()).await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].temp_max_c, Some(18.5));
}

#[tokio::test]
async fn add_with_selected_coordinates_creates_record() {
    let mut weather = MockWeatherSources::new();
    weather.expect_resolve().times(0);
    weather
        .expect_fetch_daily()
        .withf(|request| {
            request.city == "Chicago"
                && request.point
                    == Some(GeoPoint::new(41.8781, -87.6298, Some("America/Chicago")))
        })
        .times(1)
        .returning(|request| Ok(daily(request.point.clone().unwrap(), Some(20.0))));

    let test_app = spawn_app(Arc::new(weather)).await;

    let response = test_app
        .send(form_post(
            "/add",
            "requested_date=2024-03-15&country=United+States&city=Chicago\
             &lat=41.8781&lon=-87.6298&timezone=America%2FChicago",
        ))
        .await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response.headers().get(header::LOCATION).unwrap(),
        "/?notice=added"
    );

    let records = test_app.db.list_records(Default::default()).await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].city, "Chicago");
    assert_eq!(records[0].temp_max_c, Some(20.0));

    let html = body_text(test_app.send(get("/?notice=added")).await).await;
    assert!(html.contains("Weather record added."));
    assert!(html.contains("Chicago"));
}

#[tokio::test]
async fn add_requires_date_country_and_city() {
    let test_app = spawn_app(Arc::new(MockWeatherSources::new())).await;

    let response = test_app
        .send(form_post("/add", "requested_date=2024-03-15&country=&city=Paris"))
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let html = body_text(response).await;
    assert!(html.contains("Please fill in date, country, and city."));
    assert!(html.contains(r#"value="Paris""#));
}

#[tokio::test]
async fn add_rejects_malformed_dates() {
    let test_app = spawn_app(Arc::new(MockWeatherSources::new())).await;

    let response = test_app
        .send(form_post(
            "/add",
            "requested_date=03%2F15%2F2024&country=France&city=Paris",
        ))
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_text(response)
        .await
        .contains("Date must be in YYYY-MM-DD format."));
}

#[tokio::test]
async fn add_reports_places_that_do_not_exist() {
    let mut weather = MockWeatherSources::new();
    weather
        .expect_resolve()
        .times(1)
        .returning(|_| Ok(Vec::new()));

    let test_app = spawn_app(Arc::new(weather)).await;

    let response = test_app
        .send(form_post(
            "/add",
            "requested_date=2024-03-15&country=Nowhere&city=Xyzzy&region=Atlantis",
        ))
        .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(body_text(response)
        .await
        .contains("No matching locations found for Xyzzy, Nowhere (Atlantis)."));
}

#[tokio::test]
async fn add_reports_upstream_timeouts() {
    let mut weather = MockWeatherSources::new();
    weather.expect_fetch_daily().times(1).returning(|_| {
        Err(Error::UpstreamTimeout {
            operation: Operation::Archive,
            query: "start_date=2000-01-01".to_string(),
            timeout: Duration::from_secs(30),
        })
    });

    let test_app = spawn_app(Arc::new(weather)).await;

    let response = test_app
        .send(form_post(
            "/add",
            "requested_date=2000-01-01&country=US&city=Chicago&lat=41.88&lon=-87.63",
        ))
        .await;

    assert_eq!(response.status(), StatusCode::GATEWAY_TIMEOUT);
    assert!(body_text(response).await.contains("Weather fetch failed: "));
    assert_eq!(test_app.db.count_records().await.unwrap(), 0);
}

#[tokio::test]
async fn delete_record() {
    let test_app = spawn_app(Arc::new(MockWeatherSources::new())).await;
    let record = test_app.add("Austin", Some(21.0)).await;

    let response = test_app
        .send(form_post(&format!("/delete/{}", record.id), ""))
        .await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response.headers().get(header::LOCATION).unwrap(),
        "/?notice=deleted"
    );
    assert_eq!(test_app.db.count_records().await.unwrap(), 0);

    let response = test_app
        .send(form_post(&format!("/delete/{}", record.id), ""))
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_redirects_back_to_referer() {
    let test_app = spawn_app(Arc::new(MockWeatherSources::new())).await;
    let record = test_app.add("Austin", Some(21.0)).await;

    let mut request = form_post(&format!("/delete/{}", record.id), "");
    request.headers_mut().insert(
        header::REFERER,
        "/?sort=city&dir=asc".parse().unwrap(),
    );
    let response = test_app.send(request).await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response.headers().get(header::LOCATION).unwrap(),
        "/?sort=city&dir=asc"
    );
}

#[tokio::test]
async fn sorting_by_city() {
    let test_app = spawn_app(Arc::new(MockWeatherSources::new())).await;
    test_app.add("Alpha", Some(21.0)).await;
    test_app.add("Zulu", None).await;

    let html = body_text(test_app.send(get("/?sort=city&dir=asc")).await).await;
    assert!(html.find("Alpha").unwrap() < html.find("Zulu").unwrap());
    // Active ascending column links to descending, the others to ascending
    assert!(html.contains(r#"href="?sort=city&amp;dir=desc""#));
    assert!(html.contains(r#"href="?sort=country&amp;dir=asc""#));

    let html = body_text(test_app.send(get("/?sort=city&dir=desc")).await).await;
    assert!(html.find("Zulu").unwrap() < html.find("Alpha").unwrap());
}

#[tokio::test]
async fn forms_keep_the_current_sort() {
    let test_app = spawn_app(Arc::new(MockWeatherSources::new())).await;
    let record = test_app.add("Alpha", Some(21.0)).await;
    test_app.add("Zulu", None).await;

    let html = body_text(test_app.send(get("/?sort=city&dir=asc")).await).await;
    assert!(html.contains(r#"action="/add?sort=city&amp;dir=asc""#));
    assert!(html.contains(&format!(
        r#"action="/delete/{}?sort=city&amp;dir=asc""#,
        record.id
    )));

    // A failed add re-renders in the order the user was looking at
    let response = test_app
        .send(form_post(
            "/add?sort=city&dir=desc",
            "requested_date=2024-03-15&country=&city=Paris",
        ))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let html = body_text(response).await;
    assert!(html.find("Zulu").unwrap() < html.find("Alpha").unwrap());
    assert!(html.contains(r#"href="?sort=city&amp;dir=asc""#));

    let response = test_app
        .send(form_post("/delete/9999?sort=city&dir=asc", ""))
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let html = body_text(response).await;
    assert!(html.find("Alpha").unwrap() < html.find("Zulu").unwrap());
    assert!(html.contains(r#"href="?sort=city&amp;dir=desc""#));
}

#[tokio::test]
async fn missing_values_render_as_dash() {
    let test_app = spawn_app(Arc::new(MockWeatherSources::new())).await;
    test_app.add("Zulu", None).await;

    let html = body_text(test_app.send(get("/")).await).await;
    assert!(html.contains("\u{2014}"));
    assert!(html.contains("forecast"));
}
