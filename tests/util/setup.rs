use chrono::Utc;
use mockito::{Server, ServerGuard};
use sea_orm::{
    ActiveValue, ConnectionTrait, Database, DbBackend, DbErr, IntoActiveModel, Schema,
};

use entity::registration::{PaymentStatus, TicketNumbers, Tier};
use tixgate::model::registration::NewRegistrationDto;
use tixgate::server::{
    config::SmtpConfig,
    data::registration::{NewRegistrationRow, RegistrationRepository},
    model::app::AppState,
    service::{
        mailer::Mailer, notify::Notifier, payment::PaymentGateway, render::TicketRenderer,
    },
    tier::tier_config,
};

static TEST_GATEWAY_SERVER_KEY: &str = "SB-Mid-server-test";
static TEST_MAIL_SENDER: &str = "tickets@example.com";
static TEST_ADMIN_EMAIL: &str = "admin@example.com";
static TEST_QR_URL_TEMPLATE: &str =
    "https://tickets.example.com/checkin?id={id}&ticket={ticket_number}";
static TEST_EVENT_NAME: &str = "Aurora Conference";
static TEST_EVENT_DATE: &str = "12 September 2026";

pub struct TestSetup {
    pub server: ServerGuard,
    pub state: AppState,
}

/// Returns a [`TestSetup`] with the payment gateway pointed at a mockito
/// server and an empty in-memory database.
pub async fn test_setup() -> TestSetup {
    let mock_server = Server::new_async().await;

    let gateway = PaymentGateway::new(mock_server.url(), TEST_GATEWAY_SERVER_KEY.to_string())
        .expect("Failed to build payment gateway client");

    let mailer = Mailer::new(&SmtpConfig {
        host: "localhost".to_string(),
        port: 2525,
        username: "mailer".to_string(),
        password: "secret".to_string(),
        sender: TEST_MAIL_SENDER.to_string(),
    })
    .expect("Failed to build smtp mailer");

    let notifier = Notifier::new(
        mailer,
        TEST_ADMIN_EMAIL.to_string(),
        TEST_EVENT_NAME.to_string(),
        TEST_EVENT_DATE.to_string(),
    );

    let storage_dir =
        std::env::temp_dir().join(format!("tixgate-itest-{}", rand::random::<u32>()));
    let renderer = TicketRenderer::new(
        storage_dir,
        TEST_QR_URL_TEMPLATE.to_string(),
        TEST_EVENT_NAME.to_string(),
        TEST_EVENT_DATE.to_string(),
    );

    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to open in-memory database");

    let state = AppState {
        db,
        gateway,
        notifier,
        renderer,
    };

    TestSetup {
        server: mock_server,
        state,
    }
}

/// Returns a [`TestSetup`] with the registration table created.
pub async fn test_setup_with_tables() -> Result<TestSetup, DbErr> {
    let test = test_setup().await;

    let schema = Schema::new(DbBackend::Sqlite);
    let stmt = schema.create_table_from_entity(entity::prelude::Registration);

    test.state.db.execute(&stmt).await?;

    Ok(test)
}

/// Returns a filled-in registration payload for the tier
pub fn new_registration_dto(tier: &str, email: &str, ticket_count: i32) -> NewRegistrationDto {
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

/// Inserts a registration with the given payment status
pub async fn insert_registration(
    test: &TestSetup,
    tier: Tier,
    email: &str,
    ticket_count: i32,
    status: PaymentStatus,
) -> Result<entity::registration::Model, DbErr> {
    let config = tier_config(tier);

    let row = NewRegistrationRow {
        tier,
        name: "Test Attendee".to_string(),
        identity_number: "1234567890123456".to_string(),
        institution: "Example University".to_string(),
        domicile: Some("Springfield".to_string()),
        email: email.to_string(),
        phone: "081234567890".to_string(),
        messaging_handle: Some("test.handle".to_string()),
        social_handle: Some("test.social".to_string()),
        ticket_count,
        total_price: config.unit_price * i64::from(ticket_count),
        order_id: format!("{:010}", rand::random_range(0..10_000_000_000_i64)),
        status,
        gateway_response: None,
        create_time: Utc::now(),
    };

    RegistrationRepository::new(&test.state.db).create(row).await
}

/// Marks a registration settled with the given ticket numbers
pub async fn settle_registration(
    test: &TestSetup,
    registration: entity::registration::Model,
    ticket_numbers: Vec<String>,
) -> Result<entity::registration::Model, DbErr> {
    let mut active = registration.into_active_model();
    active.status = ActiveValue::Set(PaymentStatus::Settlement);
    active.ticket_numbers = ActiveValue::Set(TicketNumbers::from(ticket_numbers));

    RegistrationRepository::new(&test.state.db).update(active).await
}
