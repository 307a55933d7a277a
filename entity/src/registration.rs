use std::ops::{Deref, DerefMut};

use sea_orm::entity::prelude::*;
use sea_orm::FromJsonQueryResult;
use serde::{Deserialize, Serialize};

/// One registration row: a single attendee email holding one or more seats
/// within a sale tier.
///
/// `ticket_numbers` stays empty until the registration settles and is
/// generated exactly once; `checked_in_numbers` only ever grows and is
/// always a subset of `ticket_numbers`.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "registration")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub tier: Tier,
    pub name: String,
    pub identity_number: String,
    pub institution: String,
    pub domicile: Option<String>,
    pub email: String,
    pub phone: String,
    pub messaging_handle: Option<String>,
    pub social_handle: Option<String>,
    pub ticket_count: i32,
    pub total_price: i64,
    #[sea_orm(unique)]
    pub order_id: String,
    pub status: PaymentStatus,
    pub image_proof_uri: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub gateway_response: Option<String>,
    pub ticket_numbers: TicketNumbers,
    pub checkin_status: bool,
    pub checked_in_numbers: TicketNumbers,
    pub create_time: DateTimeUtc,
    pub update_time: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Sale tier a registration belongs to. Pricing, capacity and payment mode
/// are resolved from the server-side tier policy table, never stored.
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
#[serde(rename_all = "kebab-case")]
pub enum Tier {
    #[sea_orm(string_value = "early-bird")]
    EarlyBird,
    #[sea_orm(string_value = "presale")]
    Presale,
    #[sea_orm(string_value = "normal")]
    Normal,
}

impl Tier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::EarlyBird => "early-bird",
            Tier::Presale => "presale",
            Tier::Normal => "normal",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "early-bird" => Some(Tier::EarlyBird),
            "presale" => Some(Tier::Presale),
            "normal" => Some(Tier::Normal),
            _ => None,
        }
    }
}

/// Payment lifecycle of a registration.
///
/// Transfer-proof tiers are created `Pending`; gateway tiers are created
/// `Unpaid` once the charge is issued. `Settlement` is terminal.
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "unpaid")]
    Unpaid,
    #[sea_orm(string_value = "settlement")]
    Settlement,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Unpaid => "unpaid",
            PaymentStatus::Settlement => "settlement",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(PaymentStatus::Pending),
            "unpaid" => Some(PaymentStatus::Unpaid),
            "settlement" => Some(PaymentStatus::Settlement),
            _ => None,
        }
    }
}

/// Ticket numbers stored as a JSON array column so the same entity runs on
/// Postgres in production and sqlite in tests.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct TicketNumbers(pub Vec<String>);

impl TicketNumbers {
    pub fn contains(&self, number: &str) -> bool {
        self.0.iter().any(|n| n == number)
    }
}

impl Deref for TicketNumbers {
    type Target = Vec<String>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for TicketNumbers {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl From<Vec<String>> for TicketNumbers {
    fn from(numbers: Vec<String>) -> Self {
        TicketNumbers(numbers)
    }
}
