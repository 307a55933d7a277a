
use sea_orm::DbErr;

use entity::registration::{PaymentStatus, Tier};

use crate::server::{
    data::registration::RegistrationRepository,
    util::test::{
        gateway::{mock_charge_endpoint, mock_status_endpoint},
        setup::{
            insert_registration, settle_registration, test_setup_with_tables, TestSetup,
        },
    },
};

use super::*;

fn registration_service(test: &TestSetup) -> RegistrationService {
    RegistrationService::new(
        test.state.db.clone(),
        test.state.gateway.clone(),
        test.state.notifier.clone(),
        test.state.renderer.clone(),
    )
}

fn new_registration_request(tier: &str, email: &str, ticket_count: i32) -> NewRegistrationDto {
    NewRegistrationDto {
        tier: tier.to_string(),
        name: "Test Attendee".to_string(),
        identity_number: "1234567890123456".to_string(),
        institution: "Example University".to_string(),
        domicile: Some("Springfield".to_string()),
        email: email.to_string(),
        phone: "081234567890".to_string(),
        messaging_handle: Some("test.handle".to_string()),
        social_handle: Some("test.social".to_string()),
        ticket_count,
    }
}
