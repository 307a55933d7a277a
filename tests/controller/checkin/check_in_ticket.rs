use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use entity::registration::{PaymentStatus, Tier};
use tixgate::model::registration::TicketQueryDto;
use tixgate::server::{controller::checkin::check_in_ticket, error::Error};

use crate::util::setup::{insert_registration, settle_registration, test_setup_with_tables};

#[tokio::test]
/// Expect 200 success when scanning a settled ticket for the first time
async fn returns_success_for_owned_ticket() -> Result<(), Error> {
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
    let settled = settle_registration(&test, registration, vec![ticket.clone()]).await?;

    let query = TicketQueryDto {
        ticket_number: Some(ticket),
    };
    let result = check_in_ticket(State(test.state), Path(settled.id), Query(query)).await;

    assert!(result.is_ok());
    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::OK);

    Ok(())
}

#[tokio::test]
/// Expect 400 bad request when the ticket_number query is missing
async fn returns_bad_request_without_ticket_number() -> Result<(), Error> {
    let test = test_setup_with_tables().await?;

    let result = check_in_ticket(
        State(test.state),
        Path(1),
        Query(TicketQueryDto::default()),
    )
    .await;

    assert!(result.is_err());
    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    Ok(())
}

#[tokio::test]
/// Expect 400 bad request for a registration that has not settled
async fn returns_bad_request_for_unpaid_registration() -> Result<(), Error> {
    let test = test_setup_with_tables().await?;
    let registration = insert_registration(
        &test,
        Tier::Presale,
        "buyer@example.com",
        1,
        PaymentStatus::Unpaid,
    )
    .await?;

    let query = TicketQueryDto {
        ticket_number: Some("PRESALE-1/A1".to_string()),
    };
    let result = check_in_ticket(State(test.state), Path(registration.id), Query(query)).await;

    assert!(result.is_err());
    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    Ok(())
}

#[tokio::test]
/// Expect 404 not found for a registration that does not exist
async fn returns_not_found_for_unknown_registration() -> Result<(), Error> {
    let test = test_setup_with_tables().await?;

    let query = TicketQueryDto {
        ticket_number: Some("EARLYBIRD-1/A999".to_string()),
    };
    let result = check_in_ticket(State(test.state), Path(999), Query(query)).await;

    assert!(result.is_err());
    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    Ok(())
}
