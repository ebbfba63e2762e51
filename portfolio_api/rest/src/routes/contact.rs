use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing, Json, Router,
};
use portfolio_core_contact_contracts::{ContactSendMessageError, ContactService};
use portfolio_email_contracts::DeliveryError;
use portfolio_models::contact::ContactSubmission;

use super::{error, internal_server_error};
use crate::models::contact::ApiResendError;

pub fn router(service: Arc<impl ContactService>) -> Router<()> {
    Router::new()
        .route("/contact", routing::post(submit))
        .with_state(service)
}

/// Contact form endpoint.
///
/// The body is taken as raw bytes instead of a `Json` extractor so the
/// credential preflight runs before anything is parsed and a parse failure
/// maps to a server error rather than an extractor rejection.
async fn submit(service: State<Arc<impl ContactService>>, body: Bytes) -> Response {
    if !service.delivery_configured() {
        return error(
            StatusCode::INTERNAL_SERVER_ERROR,
            ContactSendMessageError::NotConfigured.to_string(),
        );
    }

    let value = match serde_json::from_slice::<serde_json::Value>(&body) {
        Ok(value) => value,
        Err(err) => return error(StatusCode::INTERNAL_SERVER_ERROR, err.to_string()),
    };

    let submission = match ContactSubmission::from_value(&value) {
        Ok(submission) => submission,
        Err(rejection) => return error(StatusCode::BAD_REQUEST, rejection.to_string()),
    };

    match service.send_message(submission).await {
        Ok(receipt) => Json(receipt).into_response(),
        Err(err @ ContactSendMessageError::NotConfigured) => {
            error(StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
        }
        Err(ContactSendMessageError::Delivery(err)) => resend_error(err),
        Err(ContactSendMessageError::Other(err)) => internal_server_error(err),
    }
}

fn resend_error(err: DeliveryError) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ApiResendError { resend_error: err }),
    )
        .into_response()
}
