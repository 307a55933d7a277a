//! HTTP controller endpoints for the tixgate API.
//!
//! Axum handlers for registration, payment reconciliation, check-in and the
//! public seat counter. Controllers decode and pre-validate the request,
//! hand the unit of work to the service layer under a per-route deadline,
//! and wrap results in the shared response envelope. OpenAPI documentation
//! comes from utoipa annotations on each handler.

pub mod checkin;
pub mod counter;
pub mod registration;
