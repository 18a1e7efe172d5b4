use std::{collections::BTreeMap, sync::Arc};

use axum::{extract::State, Json};
use log::debug;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{db::Measurement, AppState, Error, ErrorResponse};

/// Date to precipitation over the reporting period.
///
/// Several stations report on the same date, so later rows replace earlier ones for
/// that key. Rows arrive in storage order, which makes the last stored row the winner.
#[utoipa::path(
    get,
    path = "/api/v1.0/precipitation",
    responses(
        (status = OK, description = "Precipitation keyed by date for the last year", body = BTreeMap<String, Option<f64>>),
        (status = INTERNAL_SERVER_ERROR, description = "Failed to read climate data", body = ErrorResponse)
    ))]
pub async fn precipitation(
    State(state): State<Arc<AppState>>,
) -> Result<Json<BTreeMap<String, Option<f64>>>, Error> {
    let cutoff = state.period.cutoff();
    debug!("precipitation requested since {}", cutoff);

    let measurements = state.climate_db.measurements_since(cutoff, None).await?;
    debug!("retrieved {} precipitation rows", measurements.len());

    Ok(Json(precipitation_by_date(measurements)))
}

/// Every precipitation reading over the reporting period, duplicates included.
#[utoipa::path(
    get,
    path = "/api/v1.0/precipitation/readings",
    responses(
        (status = OK, description = "Precipitation readings for the last year in storage order", body = Vec<PrecipitationReading>),
        (status = INTERNAL_SERVER_ERROR, description = "Failed to read climate data", body = ErrorResponse)
    ))]
pub async fn precipitation_readings(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<PrecipitationReading>>, Error> {
    let cutoff = state.period.cutoff();
    debug!("precipitation readings requested since {}", cutoff);

    let measurements = state.climate_db.measurements_since(cutoff, None).await?;

    Ok(Json(
        measurements
            .into_iter()
            .map(PrecipitationReading::from)
            .collect(),
    ))
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct PrecipitationReading {
    pub station: String,
    pub date: String,
    pub precipitation: Option<f64>,
}

impl From<Measurement> for PrecipitationReading {
    fn from(measurement: Measurement) -> Self {
        Self {
            station: measurement.station_id,
            date: measurement.date,
            precipitation: measurement.precipitation,
        }
    }
}

fn precipitation_by_date(measurements: Vec<Measurement>) -> BTreeMap<String, Option<f64>> {
    measurements
        .into_iter()
        .map(|m| (m.date, m.precipitation))
        .collect()
}
