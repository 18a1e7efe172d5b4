use std::sync::Arc;

use axum::{extract::State, Json};
use log::debug;

use crate::{
    db::TemperatureStats, extract::Path, parse_date, AppState, DateRange, Error, ErrorResponse,
};

#[utoipa::path(
    get,
    path = "/api/v1.0/start_date/{start}",
    params(
         ("start" = String, Path, description = "First date included, YYYY-MM-DD"),
    ),
    responses(
        (status = OK, description = "Min, average and max temperature from start onwards", body = TemperatureStats),
        (status = BAD_REQUEST, description = "Malformed date", body = ErrorResponse),
        (status = INTERNAL_SERVER_ERROR, description = "Failed to read climate data", body = ErrorResponse)
    ))]
pub async fn temperature_since(
    State(state): State<Arc<AppState>>,
    Path(start): Path<String>,
) -> Result<Json<TemperatureStats>, Error> {
    debug!("temperature stats requested with start={}", start);
    let range = DateRange::starting(parse_date(&start)?);

    let stats = state.climate_db.temperature_stats(range).await?;
    Ok(Json(stats))
}

#[utoipa::path(
    get,
    path = "/api/v1.0/start_end_date/{start}/{end}",
    params(
         ("start" = String, Path, description = "First date included, YYYY-MM-DD"),
         ("end" = String, Path, description = "Last date included, YYYY-MM-DD"),
    ),
    responses(
        (status = OK, description = "Min, average and max temperature between start and end", body = TemperatureStats),
        (status = BAD_REQUEST, description = "Malformed date", body = ErrorResponse),
        (status = INTERNAL_SERVER_ERROR, description = "Failed to read climate data", body = ErrorResponse)
    ))]
pub async fn temperature_between(
    State(state): State<Arc<AppState>>,
    Path((start, end)): Path<(String, String)>,
) -> Result<Json<TemperatureStats>, Error> {
    debug!(
        "temperature stats requested with start={} and end={}",
        start, end
    );
    let range = DateRange::between(parse_date(&start)?, parse_date(&end)?);

    let stats = state.climate_db.temperature_stats(range).await?;
    Ok(Json(stats))
}
