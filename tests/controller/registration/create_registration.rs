use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use entity::registration::{PaymentStatus, Tier};
use tixgate::server::{controller::registration::create_registration, error::Error};

use crate::util::gateway::mock_charge_endpoint;
use crate::util::setup::{
    insert_registration, new_registration_dto, test_setup, test_setup_with_tables,
};

#[tokio::test]
/// Expect 201 created for a transfer-proof tier registration
async fn returns_created_for_transfer_tier() -> Result<(), Error> {
    let test = test_setup_with_tables().await?;

    let result = create_registration(
        State(test.state),
        Json(new_registration_dto("early-bird", "buyer@example.com", 2)),
    )
    .await;

    assert!(result.is_ok());
    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::CREATED);

    Ok(())
}

#[tokio::test]
/// Expect 201 created for a gateway tier once the charge is issued
async fn returns_created_after_gateway_charge() -> Result<(), Error> {
    let mut test = test_setup_with_tables().await?;
    let endpoint = mock_charge_endpoint(&mut test.server, "pending", 1);

    let result = create_registration(
        State(test.state),
        Json(new_registration_dto("presale", "buyer@example.com", 1)),
    )
    .await;

    assert!(result.is_ok());
    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::CREATED);

    endpoint.assert();

    Ok(())
}

#[tokio::test]
/// Expect 400 bad request for an unknown tier name
async fn returns_bad_request_for_unknown_tier() -> Result<(), Error> {
    let test = test_setup_with_tables().await?;

    let result = create_registration(
        State(test.state),
        Json(new_registration_dto("vip", "buyer@example.com", 1)),
    )
    .await;

    assert!(result.is_err());
    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    Ok(())
}

#[tokio::test]
/// Expect 400 bad request once the tier's capacity is exhausted
async fn returns_bad_request_when_tier_sold_out() -> Result<(), Error> {
    let test = test_setup_with_tables().await?;
    insert_registration(
        &test,
        Tier::EarlyBird,
        "whale@example.com",
        35,
        PaymentStatus::Settlement,
    )
    .await?;

    let result = create_registration(
        State(test.state),
        Json(new_registration_dto("early-bird", "late@example.com", 1)),
    )
    .await;

    assert!(result.is_err());
    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    Ok(())
}

#[tokio::test]
/// Expect 500 internal server error when required database tables dont exist
async fn error_when_required_tables_dont_exist() -> Result<(), Error> {
    let test = test_setup().await;

    let result = create_registration(
        State(test.state),
        Json(new_registration_dto("early-bird", "buyer@example.com", 1)),
    )
    .await;

    assert!(result.is_err());
    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

    Ok(())
}
