//! Payment gateway client.
//!
//! Wraps the gateway's core HTTP API: opening a QRIS charge for a new order
//! and polling the status of an existing one. Responses are kept verbatim so
//! the raw gateway payload can be persisted next to the parsed status.

use std::time::Duration;

use serde::Serialize;
use serde_json::Value;

use crate::server::error::payment::PaymentError;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Order status reported by the gateway once payment completes.
pub static TRANSACTION_STATUS_SETTLEMENT: &str = "settlement";

#[derive(Serialize)]
pub struct TransactionDetails {
    pub order_id: String,
    pub gross_amount: i64,
}

#[derive(Serialize)]
pub struct ItemDetail {
    pub id: String,
    pub price: i64,
    pub quantity: i32,
    pub name: String,
}

#[derive(Serialize)]
pub struct CustomerDetails {
    pub first_name: String,
    pub email: String,
    pub phone: String,
}

/// Charge payload for the gateway's QRIS flow.
#[derive(Serialize)]
pub struct ChargeRequest {
    pub payment_type: &'static str,
    pub transaction_details: TransactionDetails,
    pub item_details: Vec<ItemDetail>,
    pub customer_details: CustomerDetails,
}

impl ChargeRequest {
    /// Builds a QRIS charge for one order of `quantity` seats.
    pub fn qris(
        order_id: String,
        unit_price: i64,
        quantity: i32,
        item_name: String,
        customer: CustomerDetails,
    ) -> Self {
        Self {
            payment_type: "qris",
            transaction_details: TransactionDetails {
                order_id: order_id.clone(),
                gross_amount: unit_price * i64::from(quantity),
            },
            item_details: vec![ItemDetail {
                id: order_id,
                price: unit_price,
                quantity,
                name: item_name,
            }],
            customer_details: customer,
        }
    }
}

/// Parsed gateway answer plus the untouched response body.
pub struct GatewayReply {
    pub transaction_status: String,
    pub raw: String,
}

impl GatewayReply {
    pub fn is_settled(&self) -> bool {
        self.transaction_status == TRANSACTION_STATUS_SETTLEMENT
    }
}

#[derive(Clone)]
pub struct PaymentGateway {
    http: reqwest::Client,
    base_url: String,
    server_key: String,
}

impl PaymentGateway {
    /// Creates a gateway client against `base_url` authenticated with the
    /// merchant server key.
    pub fn new(base_url: String, server_key: String) -> Result<Self, PaymentError> {
        let http = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;

        Ok(Self {
            http,
            base_url,
            server_key,
        })
    }

    /// Opens a QRIS charge for a new order.
    pub async fn charge(&self, request: &ChargeRequest) -> Result<GatewayReply, PaymentError> {
        let response = self
            .http
            .post(format!("{}/v2/charge", self.base_url))
            .basic_auth(&self.server_key, Some(""))
            .json(request)
            .send()
            .await?;

        read_reply(response).await
    }

    /// Polls the gateway for the current status of an order.
    pub async fn transaction_status(&self, order_id: &str) -> Result<GatewayReply, PaymentError> {
        let response = self
            .http
            .get(format!("{}/v2/{}/status", self.base_url, order_id))
            .basic_auth(&self.server_key, Some(""))
            .send()
            .await?;

        read_reply(response).await
    }
}

async fn read_reply(response: reqwest::Response) -> Result<GatewayReply, PaymentError> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        return Err(PaymentError::UnexpectedStatus {
            status: status.as_u16(),
            body,
        });
    }

    let value: Value = serde_json::from_str(&body)
        .map_err(|err| PaymentError::MalformedResponse(err.to_string()))?;

    let transaction_status = value
        .get("transaction_status")
        .and_then(Value::as_str)
        .ok_or_else(|| PaymentError::MalformedResponse("missing transaction_status".to_string()))?
        .to_string();

    Ok(GatewayReply {
        transaction_status,
        raw: body,
    })
}
