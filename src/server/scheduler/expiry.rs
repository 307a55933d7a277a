//! Expiry sweep for unpaid gateway-tier registrations.
//!
//! A registration charged through the gateway holds its seats only for the
//! tier's payment window. This sweep deletes rows still `unpaid` past that
//! window and mails the buyer that their order lapsed, so the seats return
//! to the pool.

use chrono::Utc;
use sea_orm::DatabaseConnection;

use entity::registration::{PaymentStatus, Tier};

use crate::server::{
    data::registration::RegistrationRepository, error::Error, service::notify::Notifier,
    tier::tier_config,
};

/// Runs at the top of every minute.
pub const CRON_EXPRESSION: &str = "0 * * * * *";

/// Deletes unpaid registrations older than their tier's payment window.
///
/// Returns the number of registrations reaped. The delete is guarded on the
/// row still being `unpaid`, so an order that settles or gets replaced
/// between the scan and the delete is left alone.
pub async fn sweep_expired_registrations(
    db: DatabaseConnection,
    notifier: Notifier,
) -> Result<usize, Error> {
    let repository = RegistrationRepository::new(&db);
    let now = Utc::now();
    let mut reaped = 0;

    for tier in [Tier::EarlyBird, Tier::Presale, Tier::Normal] {
        let timeout = match tier_config(tier).unpaid_timeout {
            Some(timeout) => timeout,
            None => continue,
        };
        let cutoff = now - timeout;

        let expired = repository
            .list(Some(tier), Some(PaymentStatus::Unpaid))
            .await?
            .into_iter()
            .filter(|row| row.create_time < cutoff);

        for row in expired {
            let result = repository
                .delete_by_id(row.id, &[PaymentStatus::Unpaid])
                .await?;

            if result.rows_affected == 1 {
                tracing::info!(
                    "expired unpaid registration {} (order {})",
                    row.id,
                    row.order_id
                );
                notifier.registration_expired(&row);
                reaped += 1;
            }
        }
    }

    Ok(reaped)
}
