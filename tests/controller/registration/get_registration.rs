use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use entity::registration::{PaymentStatus, Tier};
use tixgate::model::registration::TicketQueryDto;
use tixgate::server::{controller::registration::get_registration, error::Error};

use crate::util::setup::{insert_registration, settle_registration, test_setup_with_tables};

#[tokio::test]
/// Expect 200 success for an existing registration
async fn returns_success_for_existing_registration() -> Result<(), Error> {
    let test = test_setup_with_tables().await?;
    let registration = insert_registration(
        &test,
        Tier::EarlyBird,
        "buyer@example.com",
        1,
        PaymentStatus::Pending,
    )
    .await?;

    let result = get_registration(
        State(test.state),
        Path(registration.id),
        Query(TicketQueryDto::default()),
    )
    .await;

    assert!(result.is_ok());
    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::OK);

    Ok(())
}

#[tokio::test]
/// Expect 404 not found for a registration that does not exist
async fn returns_not_found_for_unknown_id() -> Result<(), Error> {
    let test = test_setup_with_tables().await?;

    let result = get_registration(
        State(test.state),
        Path(999),
        Query(TicketQueryDto::default()),
    )
    .await;

    assert!(result.is_err());
    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    Ok(())
}

#[tokio::test]
/// Expect 404 not found when the ticket number belongs to another order
async fn returns_not_found_for_foreign_ticket_number() -> Result<(), Error> {
    let test = test_setup_with_tables().await?;
    let registration = insert_registration(
        &test,
        Tier::EarlyBird,
        "buyer@example.com",
        1,
        PaymentStatus::Pending,
    )
    .await?;
    let ticket = format!("EARLYBIRD-1/A{}", registration.id);
    let settled = settle_registration(&test, registration, vec![ticket]).await?;

    let query = TicketQueryDto {
        ticket_number: Some("EARLYBIRD-1/Z999".to_string()),
    };
    let result = get_registration(State(test.state), Path(settled.id), Query(query)).await;

    assert!(result.is_err());
    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    Ok(())
}
