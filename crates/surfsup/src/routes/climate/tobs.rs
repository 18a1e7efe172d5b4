use std::sync::Arc;

use axum::{extract::State, Json};
use log::debug;

use crate::{AppState, Error, ErrorResponse};

/// Observed temperatures for the configured station over the reporting period, dates dropped.
/// A missing observation is reported as `null` in its storage position.
#[utoipa::path(
    get,
    path = "/api/v1.0/tobs",
    responses(
        (status = OK, description = "Temperature observations in storage order", body = Vec<Option<f64>>),
        (status = INTERNAL_SERVER_ERROR, description = "Failed to read climate data", body = ErrorResponse)
    ))]
pub async fn tobs(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Option<f64>>>, Error> {
    let cutoff = state.period.cutoff();
    debug!(
        "temperature observations requested for {} since {}",
        state.station_id, cutoff
    );

    let measurements = state
        .climate_db
        .measurements_since(cutoff, Some(state.station_id.clone()))
        .await?;
    debug!("retrieved {} temperature observations", measurements.len());

    Ok(Json(
        measurements
            .into_iter()
            .map(|m| m.observed_temperature)
            .collect(),
    ))
}
