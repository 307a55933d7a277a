use chrono::Duration;

use entity::registration::Tier;

/// How a tier's registrations get paid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PaymentMode {
    /// A QRIS charge is issued at registration; settlement is confirmed by
    /// polling the gateway and unpaid rows expire on a timer.
    GatewayCharge,
    /// The registrant uploads a bank-transfer proof and an admin settles
    /// the registration manually. No expiry.
    TransferProof,
}

/// Per-tier sale policy. Everything the engine does is keyed off this
/// table; the registrations themselves only store the tier name.
pub struct TierConfig {
    pub label: &'static str,
    pub unit_price: i64,
    pub capacity: i64,
    pub payment_mode: PaymentMode,
    pub requires_domicile: bool,
    pub requires_handles: bool,
    pub ticket_code: &'static str,
    pub ticket_series: &'static str,
    pub unpaid_timeout: Option<Duration>,
}

static EARLY_BIRD: TierConfig = TierConfig {
    label: "Early Bird",
    unit_price: 49_000,
    capacity: 35,
    payment_mode: PaymentMode::TransferProof,
    requires_domicile: false,
    requires_handles: false,
    ticket_code: "EARLYBIRD",
    ticket_series: "1",
    unpaid_timeout: None,
};

static PRESALE: TierConfig = TierConfig {
    label: "Presale",
    unit_price: 30_000,
    capacity: 100,
    payment_mode: PaymentMode::GatewayCharge,
    requires_domicile: true,
    requires_handles: true,
    ticket_code: "PRESALE",
    ticket_series: "1",
    unpaid_timeout: Some(Duration::minutes(6)),
};

static NORMAL: TierConfig = TierConfig {
    label: "Normal Sale",
    unit_price: 65_000,
    capacity: 250,
    payment_mode: PaymentMode::GatewayCharge,
    requires_domicile: true,
    requires_handles: true,
    ticket_code: "NORMAL",
    ticket_series: "1",
    unpaid_timeout: Some(Duration::minutes(6)),
};

pub fn tier_config(tier: Tier) -> &'static TierConfig {
    match tier {
        Tier::EarlyBird => &EARLY_BIRD,
        Tier::Presale => &PRESALE,
        Tier::Normal => &NORMAL,
    }
}
