use std::sync::Arc;

use axum::{extract::State, Json};
use log::debug;

use crate::{AppState, Error, ErrorResponse};

#[utoipa::path(
    get,
    path = "/api/v1.0/stations",
    responses(
        (status = OK, description = "Identifiers of every station in storage order", body = Vec<String>),
        (status = INTERNAL_SERVER_ERROR, description = "Failed to read climate data", body = ErrorResponse)
    ))]
pub async fn stations(State(state): State<Arc<AppState>>) -> Result<Json<Vec<String>>, Error> {
    debug!("stations requested");
    let stations = state.climate_db.stations().await?;

    Ok(Json(
        stations
            .into_iter()
            .map(|station| station.station_id)
            .collect(),
    ))
}
