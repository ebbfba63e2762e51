use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::models::ApiError;

pub mod contact;

pub fn internal_server_error(err: impl Into<anyhow::Error>) -> Response {
    let err = err.into();
    tracing::error!("internal server error: {err}");
    error(StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
}

fn error(code: StatusCode, detail: impl Serialize) -> Response {
    (code, Json(ApiError { error: detail })).into_response()
}
