use axum::{
    http::{Method, Uri},
    Json,
};
use log::debug;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::Error;

pub const AVAILABLE_ROUTES: [&str; 6] = [
    "/api/v1.0/precipitation",
    "/api/v1.0/precipitation/readings",
    "/api/v1.0/stations",
    "/api/v1.0/tobs",
    "/api/v1.0/start_date/{start}",
    "/api/v1.0/start_end_date/{start}/{end}",
];

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct RouteListing {
    pub available_routes: Vec<String>,
}

#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = OK, description = "Routes served by this API", body = RouteListing)
    ))]
pub async fn index_handler() -> Json<RouteListing> {
    debug!("route listing requested");
    Json(RouteListing {
        available_routes: AVAILABLE_ROUTES.iter().map(|r| r.to_string()).collect(),
    })
}

pub async fn not_found_handler(uri: Uri) -> Error {
    Error::NotFound(uri.path().to_owned())
}

pub async fn method_not_allowed_handler(method: Method, uri: Uri) -> Error {
    Error::MethodNotAllowed {
        method,
        path: uri.path().to_owned(),
    }
}
