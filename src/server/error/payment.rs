use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::server::error::InternalServerError;

/// Errors from the payment gateway client.
///
/// Gateway failures are never detailed to API clients; they surface as a
/// generic 500 while the full exchange is logged server-side.
#[derive(Error, Debug)]
pub enum PaymentError {
    #[error("gateway request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("gateway returned HTTP {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },
    #[error("gateway response missing transaction status: {0}")]
    MalformedResponse(String),
}

impl IntoResponse for PaymentError {
    fn into_response(self) -> Response {
        InternalServerError(self).into_response()
    }
}
