use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use entity::registration::{PaymentStatus, Tier};
use tixgate::model::registration::RegistrationFilterDto;
use tixgate::server::{controller::counter::count_seats, error::Error};

use crate::util::setup::{insert_registration, test_setup_with_tables};

#[tokio::test]
/// Expect 200 success when summing seats across every tier and status
async fn returns_success_with_seat_total() -> Result<(), Error> {
    let test = test_setup_with_tables().await?;
    insert_registration(
        &test,
        Tier::Presale,
        "ana@example.com",
        3,
        PaymentStatus::Unpaid,
    )
    .await?;
    insert_registration(
        &test,
        Tier::Normal,
        "bob@example.com",
        2,
        PaymentStatus::Settlement,
    )
    .await?;

    let result = count_seats(State(test.state), Query(RegistrationFilterDto::default())).await;

    assert!(result.is_ok());
    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::OK);

    Ok(())
}

#[tokio::test]
/// Expect 200 success when the filter narrows to one tier
async fn returns_success_with_tier_filter() -> Result<(), Error> {
    let test = test_setup_with_tables().await?;
    insert_registration(
        &test,
        Tier::EarlyBird,
        "ana@example.com",
        1,
        PaymentStatus::Pending,
    )
    .await?;

    let filter = RegistrationFilterDto {
        tier: Some("early-bird".to_string()),
        status: None,
    };
    let result = count_seats(State(test.state), Query(filter)).await;

    assert!(result.is_ok());
    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::OK);

    Ok(())
}

#[tokio::test]
/// Expect 400 bad request for a tier name outside the sale
async fn returns_bad_request_for_unknown_tier_filter() -> Result<(), Error> {
    let test = test_setup_with_tables().await?;

    let filter = RegistrationFilterDto {
        tier: Some("vip".to_string()),
        status: None,
    };
    let result = count_seats(State(test.state), Query(filter)).await;

    assert!(result.is_err());
    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    Ok(())
}
