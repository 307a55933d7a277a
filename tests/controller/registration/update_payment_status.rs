use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use entity::registration::{PaymentStatus, Tier};
use tixgate::model::registration::PaymentPatchDto;
use tixgate::server::{controller::registration::update_payment_status, error::Error};

use crate::util::gateway::mock_status_endpoint;
use crate::util::setup::{insert_registration, test_setup_with_tables};

#[tokio::test]
/// Expect 200 success once the gateway reports settlement
async fn returns_success_when_gateway_settles() -> Result<(), Error> {
    let mut test = test_setup_with_tables().await?;
    let registration = insert_registration(
        &test,
        Tier::Presale,
        "buyer@example.com",
        1,
        PaymentStatus::Unpaid,
    )
    .await?;
    let endpoint = mock_status_endpoint(&mut test.server, &registration.order_id, "settlement", 1);

    let result = update_payment_status(
        State(test.state),
        Path(registration.id),
        Json(PaymentPatchDto::default()),
    )
    .await;

    assert!(result.is_ok());
    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::OK);

    endpoint.assert();

    Ok(())
}

#[tokio::test]
/// Expect 400 bad request while the gateway still reports pending
async fn returns_bad_request_while_gateway_pending() -> Result<(), Error> {
    let mut test = test_setup_with_tables().await?;
    let registration = insert_registration(
        &test,
        Tier::Presale,
        "buyer@example.com",
        1,
        PaymentStatus::Unpaid,
    )
    .await?;
    let endpoint = mock_status_endpoint(&mut test.server, &registration.order_id, "pending", 1);

    let result = update_payment_status(
        State(test.state),
        Path(registration.id),
        Json(PaymentPatchDto::default()),
    )
    .await;

    assert!(result.is_err());
    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    endpoint.assert();

    Ok(())
}

#[tokio::test]
/// Expect 404 not found for a registration that does not exist
async fn returns_not_found_for_unknown_registration() -> Result<(), Error> {
    let test = test_setup_with_tables().await?;

    let result = update_payment_status(
        State(test.state),
        Path(999),
        Json(PaymentPatchDto::default()),
    )
    .await;

    assert!(result.is_err());
    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    Ok(())
}
