use std::time::Duration;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};

use crate::{
    model::{
        api::{Envelope, ErrorDto},
        registration::TicketQueryDto,
    },
    server::{
        error::{registration::RegistrationError, Error},
        model::app::AppState,
        service::registration::RegistrationService,
        util::task::run_detached,
    },
};

pub static CHECKIN_TAG: &str = "checkin";

const CHECKIN_DEADLINE: Duration = Duration::from_secs(2);

/// Check one ticket of a registration in at the gate
#[utoipa::path(
    patch,
    path = "/api/checkin/registrations/{id}",
    tag = CHECKIN_TAG,
    params(
        ("id" = i64, Path, description = "Registration id"),
        TicketQueryDto,
    ),
    responses(
        (status = 200, description = "Ticket checked in, data carries its number", body = String),
        (status = 400, description = "Ticket unpaid, already used or the order is complete", body = ErrorDto),
        (status = 404, description = "Registration or ticket number not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto),
        (status = 504, description = "Deadline exceeded, work continues detached", body = ErrorDto)
    ),
)]
pub async fn check_in_ticket(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(query): Query<TicketQueryDto>,
) -> Result<impl IntoResponse, Error> {
    let ticket_number = query
        .ticket_number
        .filter(|number| !number.is_empty())
        .ok_or(RegistrationError::InvalidTicketNumber)?;

    let checked_in = run_detached(CHECKIN_DEADLINE, async move {
        let service = RegistrationService::new(
            state.db,
            state.gateway,
            state.notifier,
            state.renderer,
        );

        service.check_in(id, &ticket_number).await
    })
    .await?;

    Ok((StatusCode::OK, axum::Json(Envelope::success(checked_in))).into_response())
}
