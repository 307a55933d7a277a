use sea_orm::DatabaseConnection;

use crate::server::service::{
    notify::Notifier, payment::PaymentGateway, render::TicketRenderer,
};

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub gateway: PaymentGateway,
    pub notifier: Notifier,
    pub renderer: TicketRenderer,
}
