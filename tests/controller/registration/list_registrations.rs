use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use entity::registration::{PaymentStatus, Tier};
use tixgate::model::registration::RegistrationFilterDto;
use tixgate::server::{controller::registration::list_registrations, error::Error};

use crate::util::setup::{insert_registration, test_setup_with_tables};

#[tokio::test]
/// Expect 200 success when listing with a tier filter
async fn returns_success_with_tier_filter() -> Result<(), Error> {
    let test = test_setup_with_tables().await?;
    insert_registration(
        &test,
        Tier::Presale,
        "ana@example.com",
        1,
        PaymentStatus::Unpaid,
    )
    .await?;
    insert_registration(
        &test,
        Tier::EarlyBird,
        "bob@example.com",
        1,
        PaymentStatus::Pending,
    )
    .await?;

    let filter = RegistrationFilterDto {
        tier: Some("presale".to_string()),
        status: None,
    };
    let result = list_registrations(State(test.state), Query(filter)).await;

    assert!(result.is_ok());
    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::OK);

    Ok(())
}

#[tokio::test]
/// Expect 400 bad request for an unknown status filter
async fn returns_bad_request_for_unknown_status_filter() -> Result<(), Error> {
    let test = test_setup_with_tables().await?;

    let filter = RegistrationFilterDto {
        tier: None,
        status: Some("paid".to_string()),
    };
    let result = list_registrations(State(test.state), Query(filter)).await;

    assert!(result.is_err());
    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    Ok(())
}
