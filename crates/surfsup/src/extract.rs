use axum::extract::FromRequestParts;

use crate::Error;

/// `axum::extract::Path` whose rejection renders as the JSON error body
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(Error))]
pub struct Path<T>(pub T);
