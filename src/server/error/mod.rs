//! Error types for the tixgate server.
//!
//! Each domain (registration engine, payment gateway, configuration, mail
//! dispatch, ticket rendering) defines its own `thiserror` enum; this module
//! aggregates them into a single `Error` so services can bubble failures with
//! `?`. Every error that can reach a handler implements `IntoResponse`:
//! client faults answer 400/404 with a stable message, deadline expiry
//! answers 504, and everything else collapses into a generic 500 whose
//! detail is only ever logged.

pub mod config;
pub mod notify;
pub mod payment;
pub mod registration;
pub mod render;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::{
    model::api::ErrorDto,
    server::error::{
        config::ConfigError, notify::NotifyError, payment::PaymentError,
        registration::RegistrationError,
    },
};

/// Main error type for the tixgate server.
///
/// Aggregates the domain-specific error types and external library errors
/// into a single unified error type, with `#[from]` conversions so the `?`
/// operator works across layer boundaries. The `IntoResponse` implementation
/// maps each variant onto the HTTP envelope described in the module docs.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error (missing or invalid environment variables).
    #[error(transparent)]
    ConfigError(#[from] ConfigError),
    /// Registration engine error (validation, capacity, payment state,
    /// check-in rules). The only variant family with client-visible detail.
    #[error(transparent)]
    RegistrationError(#[from] RegistrationError),
    /// Payment gateway error (charge or status-poll failures).
    #[error(transparent)]
    PaymentError(#[from] PaymentError),
    /// Mail error. Dispatch failures are retried and logged where they
    /// happen; only transport construction at startup surfaces here.
    #[error(transparent)]
    NotifyError(#[from] NotifyError),
    /// The per-request deadline expired while the unit of work was still
    /// running. The work itself is detached and may still complete.
    #[error("request deadline exceeded")]
    Timeout,
    /// Internal error indicating a bug in tixgate's code.
    #[error("Internal error, this indicates a bug in tixgate: {0:?}")]
    InternalError(String),
    /// Database error (query failures, connection issues, constraint violations).
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),
    /// Cron scheduler error (job registration, scheduler startup).
    #[error(transparent)]
    SchedulerError(#[from] tokio_cron_scheduler::JobSchedulerError),
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Self::RegistrationError(err) => err.into_response(),
            Self::ConfigError(err) => err.into_response(),
            Self::PaymentError(err) => err.into_response(),
            Self::Timeout => {
                tracing::warn!("request deadline exceeded, work continues detached");

                error_response(StatusCode::GATEWAY_TIMEOUT, "request timeout")
            }
            err => InternalServerError(err).into_response(),
        }
    }
}

/// Builds the standard error envelope for a client-visible failure.
pub(crate) fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorDto {
            errors: vec![message.into()],
            status: status
                .canonical_reason()
                .unwrap_or("Unknown Status")
                .to_string(),
        }),
    )
        .into_response()
}

/// Wrapper type for converting any displayable error into a 500 response.
///
/// Logs the full error for debugging but returns a generic message to the
/// client so implementation details and gateway internals never leak.
pub struct InternalServerError<E>(pub E);

impl<E: std::fmt::Display> IntoResponse for InternalServerError<E> {
    fn into_response(self) -> Response {
        tracing::error!("{}", self.0);

        error_response(StatusCode::INTERNAL_SERVER_ERROR, "internal server error")
    }
}
