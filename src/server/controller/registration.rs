use std::time::Duration;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};

use entity::registration::{PaymentStatus, Tier};

use crate::{
    model::{
        api::{Envelope, ErrorDto},
        registration::{
            NewRegistrationDto, PaymentPatchDto, RegistrationDto, RegistrationFilterDto,
            TicketQueryDto,
        },
    },
    server::{
        error::{registration::RegistrationError, Error},
        model::app::AppState,
        service::registration::RegistrationService,
        util::task::run_detached,
    },
};

pub static REGISTRATION_TAG: &str = "registration";

/// Registration must finish inside this window even when it includes a
/// round trip to the payment gateway.
const CREATE_DEADLINE: Duration = Duration::from_secs(5);
const LIST_DEADLINE: Duration = Duration::from_secs(3);
const FETCH_DEADLINE: Duration = Duration::from_secs(2);
/// Payment patches poll the gateway, which is slow at settlement spikes.
const PAYMENT_DEADLINE: Duration = Duration::from_secs(10);

fn registration_service(state: AppState) -> RegistrationService {
    RegistrationService::new(state.db, state.gateway, state.notifier, state.renderer)
}

/// Resolves the string filters of the query into typed ones, rejecting
/// unknown names before any work is spawned.
pub(crate) fn parse_filter(
    filter: &RegistrationFilterDto,
) -> Result<(Option<Tier>, Option<PaymentStatus>), Error> {
    let tier = match filter.tier.as_deref() {
        Some(value) => Some(Tier::parse(value).ok_or(RegistrationError::InvalidTier)?),
        None => None,
    };
    let status = match filter.status.as_deref() {
        Some(value) => Some(PaymentStatus::parse(value).ok_or(RegistrationError::InvalidStatus)?),
        None => None,
    };

    Ok((tier, status))
}

/// Register an attendee, replacing any unsettled registration the email
/// already holds in the tier
#[utoipa::path(
    post,
    path = "/api/registrations",
    tag = REGISTRATION_TAG,
    request_body = NewRegistrationDto,
    responses(
        (status = 201, description = "Registration created, data carries its id", body = i64),
        (status = 400, description = "Validation failed or tier sold out", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto),
        (status = 504, description = "Deadline exceeded, work continues detached", body = ErrorDto)
    ),
)]
pub async fn create_registration(
    State(state): State<AppState>,
    axum::Json(request): axum::Json<NewRegistrationDto>,
) -> Result<impl IntoResponse, Error> {
    let created = run_detached(CREATE_DEADLINE, async move {
        registration_service(state).replace_by_email(request).await
    })
    .await?;

    Ok((StatusCode::CREATED, axum::Json(Envelope::success(created.id))).into_response())
}

/// List registrations, optionally filtered by tier and payment status
#[utoipa::path(
    get,
    path = "/api/registrations",
    tag = REGISTRATION_TAG,
    params(RegistrationFilterDto),
    responses(
        (status = 200, description = "Success when listing registrations", body = Vec<RegistrationDto>),
        (status = 400, description = "Unknown tier or status filter", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto),
        (status = 504, description = "Deadline exceeded", body = ErrorDto)
    ),
)]
pub async fn list_registrations(
    State(state): State<AppState>,
    Query(filter): Query<RegistrationFilterDto>,
) -> Result<impl IntoResponse, Error> {
    let (tier, status) = parse_filter(&filter)?;

    let registrations = run_detached(LIST_DEADLINE, async move {
        registration_service(state).list(tier, status).await
    })
    .await?;

    let dtos: Vec<RegistrationDto> = registrations
        .into_iter()
        .map(RegistrationDto::from)
        .collect();

    Ok((StatusCode::OK, axum::Json(Envelope::data(dtos))).into_response())
}

/// Fetch one registration, optionally scoped to a ticket number it must own
#[utoipa::path(
    get,
    path = "/api/registrations/{id}",
    tag = REGISTRATION_TAG,
    params(
        ("id" = i64, Path, description = "Registration id"),
        TicketQueryDto,
    ),
    responses(
        (status = 200, description = "Success when fetching the registration", body = RegistrationDto),
        (status = 400, description = "Invalid id", body = ErrorDto),
        (status = 404, description = "Registration or ticket number not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto),
        (status = 504, description = "Deadline exceeded", body = ErrorDto)
    ),
)]
pub async fn get_registration(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(query): Query<TicketQueryDto>,
) -> Result<impl IntoResponse, Error> {
    let registration = run_detached(FETCH_DEADLINE, async move {
        registration_service(state)
            .get_by_id(id, query.ticket_number.as_deref())
            .await
    })
    .await?;

    Ok((
        StatusCode::OK,
        axum::Json(Envelope::data(RegistrationDto::from(registration))),
    )
        .into_response())
}

/// Patch the payment state of a registration
///
/// Gateway tiers settle by polling the gateway; transfer tiers settle by an
/// explicit status patch and may attach a transfer-proof image while pending.
#[utoipa::path(
    patch,
    path = "/api/registrations/{id}",
    tag = REGISTRATION_TAG,
    params(("id" = i64, Path, description = "Registration id")),
    request_body = PaymentPatchDto,
    responses(
        (status = 200, description = "Success when updating the payment state", body = RegistrationDto),
        (status = 400, description = "Payment not settled or illegal transition", body = ErrorDto),
        (status = 404, description = "Registration not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto),
        (status = 504, description = "Deadline exceeded, work continues detached", body = ErrorDto)
    ),
)]
pub async fn update_payment_status(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    axum::Json(patch): axum::Json<PaymentPatchDto>,
) -> Result<impl IntoResponse, Error> {
    let updated = run_detached(PAYMENT_DEADLINE, async move {
        registration_service(state)
            .update_payment_status(id, patch)
            .await
    })
    .await?;

    Ok((
        StatusCode::OK,
        axum::Json(Envelope::data(RegistrationDto::from(updated))),
    )
        .into_response())
}
