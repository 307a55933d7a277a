use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Payload for registering an attendee within a sale tier.
///
/// Every field is defaulted so that decoding never fails on missing keys;
/// the validation pass reports precise errors instead.
#[derive(Clone, Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct NewRegistrationDto {
    /// Sale tier: `early-bird`, `presale` or `normal`
    #[serde(default)]
    pub tier: String,
    #[serde(default)]
    pub name: String,
    /// Government or student identity number, at least 15 characters
    #[serde(default)]
    pub identity_number: String,
    #[serde(default)]
    pub institution: String,
    #[serde(default)]
    pub domicile: Option<String>,
    #[serde(default)]
    pub email: String,
    /// Phone number, 10 to 13 digits
    #[serde(default)]
    pub phone: String,
    /// Messaging app handle, without a leading `@`
    #[serde(default)]
    pub messaging_handle: Option<String>,
    /// Social media handle, without a leading `@`
    #[serde(default)]
    pub social_handle: Option<String>,
    #[serde(default)]
    pub ticket_count: i32,
}

/// A registration as returned by the API.
///
/// The raw gateway response is persisted but never exposed here.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct RegistrationDto {
    pub id: i64,
    pub tier: String,
    pub name: String,
    pub identity_number: String,
    pub institution: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domicile: Option<String>,
    pub email: String,
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub messaging_handle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub social_handle: Option<String>,
    pub ticket_count: i32,
    pub total_price: i64,
    pub order_id: String,
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_proof_uri: Option<String>,
    pub ticket_numbers: Vec<String>,
    pub checkin_status: bool,
    pub checked_in_numbers: Vec<String>,
    pub create_time: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_time: Option<DateTime<Utc>>,
}

impl From<entity::registration::Model> for RegistrationDto {
    fn from(model: entity::registration::Model) -> Self {
        RegistrationDto {
            id: model.id,
            tier: model.tier.as_str().to_string(),
            name: model.name,
            identity_number: model.identity_number,
            institution: model.institution,
            domicile: model.domicile,
            email: model.email,
            phone: model.phone,
            messaging_handle: model.messaging_handle,
            social_handle: model.social_handle,
            ticket_count: model.ticket_count,
            total_price: model.total_price,
            order_id: model.order_id,
            status: model.status.as_str().to_string(),
            image_proof_uri: model.image_proof_uri,
            ticket_numbers: model.ticket_numbers.0,
            checkin_status: model.checkin_status,
            checked_in_numbers: model.checked_in_numbers.0,
            create_time: model.create_time,
            update_time: model.update_time,
        }
    }
}

/// Patch for the payment state of a registration.
///
/// Only the payment status and the transfer-proof image may be supplied;
/// ticket numbers and prices are owned by the engine.
#[derive(Clone, Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct PaymentPatchDto {
    /// Requested status, honored for transfer-proof tiers only
    #[serde(default)]
    pub status: Option<String>,
    /// URI of an uploaded transfer-proof image
    #[serde(default)]
    pub image_proof_uri: Option<String>,
}

/// Query-string filters accepted by the list and counter endpoints.
#[derive(Clone, Debug, Default, Deserialize, utoipa::IntoParams)]
pub struct RegistrationFilterDto {
    /// Sale tier: `early-bird`, `presale` or `normal`
    #[serde(default)]
    pub tier: Option<String>,
    /// Payment status: `pending`, `unpaid` or `settlement`
    #[serde(default)]
    pub status: Option<String>,
}

/// Query-string ticket scope for the fetch and check-in endpoints.
#[derive(Clone, Debug, Default, Deserialize, utoipa::IntoParams)]
pub struct TicketQueryDto {
    #[serde(default)]
    pub ticket_number: Option<String>,
}

/// Seat total for the counter endpoint.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct CounterDto {
    pub total_seats: i64,
}
