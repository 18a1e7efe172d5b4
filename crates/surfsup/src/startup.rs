use crate::{
    db::{ClimateAccess, ClimateData, TemperatureStats},
    index_handler, method_not_allowed_handler, not_found_handler, parse_date, precipitation,
    precipitation_readings, routes, stations, temperature_between, temperature_since, tobs,
    ErrorResponse, ReportingPeriod,
};
use anyhow::anyhow;
use axum::{
    body::Body,
    extract::Request,
    middleware::{self, Next},
    response::IntoResponse,
    routing::get,
    Router,
};
use hyper::{header::ACCEPT, Method};
use log::{error, info, warn};
use std::sync::Arc;
use surfsup_core::is_file;
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

#[derive(Clone)]
pub struct AppState {
    pub climate_db: Arc<dyn ClimateData>,
    pub period: ReportingPeriod,
    /// Station reported by the temperature observations route
    pub station_id: String,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        routes::home::index::index_handler,
        routes::climate::precipitation::precipitation,
        routes::climate::precipitation::precipitation_readings,
        routes::climate::stations::stations,
        routes::climate::tobs::tobs,
        routes::climate::temperature::temperature_since,
        routes::climate::temperature::temperature_between,
    ),
    components(
        schemas(
                routes::home::index::RouteListing,
                routes::climate::precipitation::PrecipitationReading,
                TemperatureStats,
                ErrorResponse,
            )
    ),
    tags(
        (name = "surfsup climate api", description = "a read-only api over Hawaii precipitation and temperature observations")
    )
)]
struct ApiDoc;

pub struct AppSettings {
    pub database: String,
    pub max_connections: u32,
    pub reference_date: String,
    pub lookback_days: u32,
    pub station_id: String,
}

/// Builds the shared state once at startup.
///
/// An unreadable dataset is logged but does not stop the service; requests report
/// the underlying error until the file becomes readable.
pub async fn build_app_state(settings: AppSettings) -> Result<AppState, anyhow::Error> {
    let reference_date = parse_date(&settings.reference_date)
        .map_err(|e| anyhow!("invalid reference date in configuration: {}", e))?;
    let period = ReportingPeriod::new(reference_date, settings.lookback_days)?;
    info!(
        "reporting period: {} days before {} (cutoff {})",
        period.lookback_days(),
        period.reference_date(),
        period.cutoff()
    );

    if !is_file(&settings.database) {
        warn!("climate dataset not found at: {}", settings.database);
    }

    let climate_db = ClimateAccess::new(&settings.database, settings.max_connections);
    match climate_db.health_check().await {
        Ok(()) => info!("connected to climate dataset: {}", settings.database),
        Err(e) => error!(
            "error connecting to climate dataset {}: {}",
            settings.database, e
        ),
    }

    Ok(AppState {
        climate_db: Arc::new(climate_db),
        period,
        station_id: settings.station_id,
    })
}

pub fn app(app_state: AppState) -> Router {
    let api_docs = ApiDoc::openapi();
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([ACCEPT])
        .allow_origin(Any);

    Router::new()
        .route("/", get(index_handler))
        .route("/api/v1.0/precipitation", get(precipitation))
        .route("/api/v1.0/precipitation/readings", get(precipitation_readings))
        .route("/api/v1.0/stations", get(stations))
        .route("/api/v1.0/tobs", get(tobs))
        .route("/api/v1.0/start_date/{start}", get(temperature_since))
        .route(
            "/api/v1.0/start_end_date/{start}/{end}",
            get(temperature_between),
        )
        .fallback(not_found_handler)
        .method_not_allowed_fallback(method_not_allowed_handler)
        .with_state(Arc::new(app_state))
        .layer(middleware::from_fn(log_request))
        .merge(Scalar::with_url("/docs", api_docs))
        .layer(cors)
}

async fn log_request(request: Request<Body>, next: Next) -> impl IntoResponse {
    let now = time::OffsetDateTime::now_utc();
    let path = request
        .uri()
        .path_and_query()
        .map(|p| p.as_str().to_owned())
        .unwrap_or_default();
    info!(target: "http_request", "new request, {} {}", request.method().as_str(), path);

    let response = next.run(request).await;
    let response_time = time::OffsetDateTime::now_utc() - now;
    info!(target: "http_response", "response, code: {}, time: {}", response.status().as_str(), response_time);

    response
}
