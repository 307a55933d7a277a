use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::server::error::error_response;

/// Errors produced by the registration engine.
///
/// Display strings double as the stable error codes clients see in the
/// response envelope, so they must stay wire-compatible once published.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum RegistrationError {
    #[error("invalid registration name")]
    InvalidName,
    #[error("invalid identity number, must be at least 15 characters")]
    InvalidIdentityNumber,
    #[error("invalid institution name")]
    InvalidInstitution,
    #[error("invalid domicile")]
    InvalidDomicile,
    #[error("invalid email address")]
    InvalidEmail,
    #[error("invalid phone number, must be 10 to 13 digits")]
    InvalidPhone,
    #[error("invalid messaging handle, must not start with @")]
    InvalidMessagingHandle,
    #[error("invalid social media handle, must not start with @")]
    InvalidSocialHandle,
    #[error("ticket count must be greater than zero")]
    InvalidTicketCount,
    #[error("invalid tier")]
    InvalidTier,
    #[error("invalid status")]
    InvalidStatus,
    #[error("invalid registration id")]
    InvalidId,
    #[error("invalid ticket number")]
    InvalidTicketNumber,
    #[error("tier is sold out")]
    SoldOut,
    #[error("registration not found")]
    NotFound,
    #[error("ticket number not found")]
    TicketNotFound,
    #[error("payment has not settled")]
    PaymentNotSettled,
    #[error("unsupported payment status transition")]
    InvalidStatusTransition,
    #[error("ticket has not been paid")]
    TicketNotYetPaid,
    #[error("ticket already checked in")]
    TicketAlreadyCheckedIn,
    #[error("all tickets already checked in")]
    AllTicketsCheckedIn,
}

impl RegistrationError {
    /// Client faults answer 400 except for the two lookup misses.
    fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound | Self::TicketNotFound => StatusCode::NOT_FOUND,
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for RegistrationError {
    fn into_response(self) -> Response {
        tracing::debug!("{}", self);

        error_response(self.status_code(), self.to_string())
    }
}
