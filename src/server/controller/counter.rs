use std::time::Duration;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
};

use crate::{
    model::{
        api::{Envelope, ErrorDto},
        registration::{CounterDto, RegistrationFilterDto},
    },
    server::{
        controller::registration::parse_filter,
        error::Error,
        model::app::AppState,
        service::registration::RegistrationService,
        util::task::run_detached,
    },
};

pub static COUNTER_TAG: &str = "counter";

const COUNTER_DEADLINE: Duration = Duration::from_secs(3);

/// Sum the booked seats, optionally filtered by tier and payment status
///
/// Backs the public "tickets left" widget, so it stays a single SQL
/// aggregate instead of loading rows.
#[utoipa::path(
    get,
    path = "/api/counter",
    tag = COUNTER_TAG,
    params(RegistrationFilterDto),
    responses(
        (status = 200, description = "Success when counting seats", body = CounterDto),
        (status = 400, description = "Unknown tier or status filter", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto),
        (status = 504, description = "Deadline exceeded", body = ErrorDto)
    ),
)]
pub async fn count_seats(
    State(state): State<AppState>,
    Query(filter): Query<RegistrationFilterDto>,
) -> Result<impl IntoResponse, Error> {
    let (tier, status) = parse_filter(&filter)?;

    let total_seats = run_detached(COUNTER_DEADLINE, async move {
        let service = RegistrationService::new(
            state.db,
            state.gateway,
            state.notifier,
            state.renderer,
        );

        service.count_seats(tier, status).await
    })
    .await?;

    Ok((
        StatusCode::OK,
        axum::Json(Envelope::data(CounterDto { total_seats })),
    )
        .into_response())
}
