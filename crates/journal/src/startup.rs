use crate::{
    add_handler, db, delete_handler, health, index_handler, routes, Database, WeatherLookup,
};
use anyhow::anyhow;
use axum::{
    body::Body,
    extract::Request,
    middleware::{self, Next},
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use hyper::{
    header::{ACCEPT, CONTENT_TYPE},
    Method,
};
use log::info;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};
use weather_sources::{SourcesConfig, WeatherSources};

#[derive(Clone)]
pub struct AppState {
    pub static_dir: String,
    pub db: Arc<Database>,
    pub weather: Arc<dyn WeatherLookup>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        routes::records::record_routes::list_records,
        routes::records::record_routes::create_record,
        routes::records::record_routes::get_record,
        routes::records::record_routes::delete_record,
        routes::records::record_routes::search_locations,
        routes::health::health,
    ),
    components(
        schemas(
                db::WeatherRecord,
                routes::records::record_routes::NewRecord,
                routes::records::record_routes::LocationCandidate,
                routes::records::record_routes::Candidates,
                routes::records::record_routes::ErrorBody
            )
    ),
    tags(
        (name = "weather journal api", description = "look up daily weather for a date and place, and keep a journal of it")
    )
)]
struct ApiDoc;

pub async fn build_app_state(
    static_dir: String,
    database_dir: String,
    sources: SourcesConfig,
) -> Result<AppState, anyhow::Error> {
    let weather = Arc::new(
        WeatherSources::new(sources)
            .map_err(|e| anyhow!("error setting up weather sources: {}", e))?,
    );

    let db = Arc::new(
        Database::new(&database_dir)
            .await
            .map_err(|e| anyhow!("error setting up SQLite database: {}", e))?,
    );

    Ok(AppState {
        static_dir,
        db,
        weather,
    })
}

pub fn app(app_state: AppState) -> Router {
    let api_docs = ApiDoc::openapi();
    let serve_static = ServeDir::new(&app_state.static_dir);
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([ACCEPT, CONTENT_TYPE])
        .allow_origin(Any);

    Router::new()
        // UI routes
        .route("/", get(index_handler))
        .route("/add", post(add_handler))
        .route("/delete/{id}", post(delete_handler))
        // API routes
        .route(
            "/api/records",
            get(routes::list_records).post(routes::create_record),
        )
        .route(
            "/api/records/{id}",
            get(routes::get_record).delete(routes::delete_record),
        )
        .route("/api/locations", get(routes::search_locations))
        .route("/health", get(health))
        .with_state(Arc::new(app_state))
        .layer(middleware::from_fn(log_request))
        .merge(Scalar::with_url("/docs", api_docs))
        .nest_service("/static", serve_static)
        .layer(cors)
}

async fn log_request(request: Request<Body>, next: Next) -> impl IntoResponse {
    let now = time::OffsetDateTime::now_utc();
    let path = request
        .uri()
        .path_and_query()
        .map(|p| p.as_str().to_string())
        .unwrap_or_default();
    info!(target: "http_request", "new request, {} {}", request.method().as_str(), path);

    let response = next.run(request).await;
    let response_time = time::OffsetDateTime::now_utc() - now;
    info!(target: "http_response", "response, code: {}, time: {}", response.status().as_str(), response_time);

    response
}
