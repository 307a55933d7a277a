//! HTTP routing and OpenAPI documentation configuration.
//!
//! All API endpoints are registered here with their utoipa specifications,
//! and Swagger UI serves the interactive documentation at `/api/docs`.

use axum::Router;
use utoipa::OpenApi;
use utoipa_axum::{router::OpenApiRouter, routes};
use utoipa_swagger_ui::SwaggerUi;

use crate::server::{controller, model::app::AppState};

/// Builds the application's HTTP router with all API endpoints and Swagger
/// UI documentation.
///
/// # Registered Endpoints
/// - `POST /api/registrations` - Register an attendee (replace-by-email)
/// - `GET /api/registrations` - List registrations with tier/status filters
/// - `GET /api/registrations/{id}` - Fetch one registration
/// - `PATCH /api/registrations/{id}` - Patch the payment state
/// - `PATCH /api/checkin/registrations/{id}` - Check one ticket in
/// - `GET /api/counter` - Sum booked seats
///
/// The OpenAPI specification is available at `/api/docs/openapi.json`;
/// handlers sharing a path are registered through one `routes!` call so the
/// spec folds them into a single path item.
pub fn routes() -> Router<AppState> {
    #[derive(OpenApi)]
    #[openapi(info(title = "tixgate", description = "Conference ticketing API"), tags(
        (name = controller::registration::REGISTRATION_TAG, description = "Registration and payment API routes"),
        (name = controller::checkin::CHECKIN_TAG, description = "Gate check-in API routes"),
        (name = controller::counter::COUNTER_TAG, description = "Seat counter API routes"),
    ))]
    struct ApiDoc;

    let (routes, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .routes(routes!(
            controller::registration::create_registration,
            controller::registration::list_registrations
        ))
        .routes(routes!(
            controller::registration::get_registration,
            controller::registration::update_payment_status
        ))
        .routes(routes!(controller::checkin::check_in_ticket))
        .routes(routes!(controller::counter::count_seats))
        .split_for_parts();

    let routes = routes.merge(SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", api));

    routes
}
