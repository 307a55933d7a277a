//! Outbound notification dispatch.
//!
//! Builds the attendee and admin mails for registration lifecycle events and
//! queues each for delivery on the runtime. Delivery is best effort: a mail
//! gets a bounded retry budget and is dropped with an error log once the
//! budget is spent, it never fails the request that triggered it.

use std::time::Duration;

use chrono::Utc;
use entity::registration::Model;

use crate::server::service::mailer::{MailAttachment, Mailer, OutboundMail};
use crate::server::tier::tier_config;

const MAX_ATTEMPTS: u32 = 3;
const INITIAL_BACKOFF_SECS: u64 = 1;

#[derive(Clone)]
pub struct Notifier {
    mailer: Mailer,
    admin_email: String,
    event_name: String,
    event_date: String,
}

impl Notifier {
    pub fn new(mailer: Mailer, admin_email: String, event_name: String, event_date: String) -> Self {
        Self {
            mailer,
            admin_email,
            event_name,
            event_date,
        }
    }

    /// Confirms a new registration to the attendee.
    pub fn registration_received(&self, registration: &Model) {
        let config = tier_config(registration.tier);

        self.dispatch(
            "registration received",
            OutboundMail {
                to: registration.email.clone(),
                subject: format!("{} registration received", self.event_name),
                html: templates::registration_received(&self.event_name, config.label, registration),
                attachment: None,
            },
        );
    }

    /// Sends the settled-payment mail, with the rendered tickets attached
    /// when rendering succeeded.
    pub fn payment_settled(&self, registration: &Model, attachment: Option<MailAttachment>) {
        let config = tier_config(registration.tier);

        self.dispatch(
            "payment settled",
            OutboundMail {
                to: registration.email.clone(),
                subject: format!("Your {} tickets", self.event_name),
                html: templates::payment_settled(
                    &self.event_name,
                    &self.event_date,
                    config.label,
                    registration,
                ),
                attachment,
            },
        );
    }

    /// Tells the admin a transfer proof is waiting for review.
    pub fn proof_submitted(&self, registration: &Model) {
        let submitted_at = Utc::now().format("%Y-%m-%d %H:%M:%S").to_string();

        self.dispatch(
            "proof submitted",
            OutboundMail {
                to: self.admin_email.clone(),
                subject: "Payment proof submitted".to_string(),
                html: templates::proof_submitted(registration, &submitted_at),
                attachment: None,
            },
        );
    }

    /// Tells the attendee their unpaid registration was released.
    pub fn registration_expired(&self, registration: &Model) {
        let config = tier_config(registration.tier);

        self.dispatch(
            "registration expired",
            OutboundMail {
                to: registration.email.clone(),
                subject: format!("{} registration expired", self.event_name),
                html: templates::registration_expired(&self.event_name, config.label, registration),
                attachment: None,
            },
        );
    }

    /// Queues one mail for delivery with bounded retry.
    fn dispatch(&self, description: &'static str, mail: OutboundMail) {
        let mailer = self.mailer.clone();

        tokio::spawn(async move {
            let mut attempt_count = 0;

            loop {
                match mailer.send(&mail).await {
                    Ok(()) => {
                        tracing::debug!("delivered {} mail to {}", description, mail.to);
                        return;
                    }
                    Err(err) => {
                        attempt_count += 1;
                        if attempt_count >= MAX_ATTEMPTS {
                            tracing::error!(
                                "giving up on {} mail to {} after {} attempts: {}",
                                description,
                                mail.to,
                                MAX_ATTEMPTS,
                                err
                            );
                            return;
                        }

                        let backoff_secs = INITIAL_BACKOFF_SECS * 2_u64.pow(attempt_count - 1);
                        let backoff = Duration::from_secs(backoff_secs);

                        tracing::warn!(
                            "retrying {} mail to {} (attempt {}/{}) after {:?}: {}",
                            description,
                            mail.to,
                            attempt_count,
                            MAX_ATTEMPTS,
                            backoff,
                            err
                        );

                        tokio::time::sleep(backoff).await;
                    }
                }
            }
        });
    }
}

mod templates {
    use entity::registration::Model;

    /// Formats a rupiah amount with dot thousand separators, "Rp49.000".
    pub(super) fn format_price(amount: i64) -> String {
        let digits = amount.to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

        for (i, c) in digits.chars().rev().enumerate() {
            if i != 0 && i % 3 == 0 {
                grouped.push('.');
            }
            grouped.push(c);
        }

        format!("Rp{}", grouped.chars().rev().collect::<String>())
    }

    pub(super) fn registration_received(
        event_name: &str,
        tier_label: &str,
        registration: &Model,
    ) -> String {
        format!(
            r#"<html>
<body style="font-family: Arial, sans-serif; line-height: 1.6; color: #333;">
  <div style="max-width: 600px; margin: 0 auto; padding: 20px;">
    <h2>Registration received</h2>
    <p>Hi {name},</p>
    <p>We received your {event_name} registration.</p>
    <ul>
      <li>Ticket type: {tier_label}</li>
      <li>Tickets: {count}</li>
      <li>Total: {total}</li>
      <li>Order id: {order_id}</li>
    </ul>
    <p>Your tickets are issued once the payment settles.</p>
  </div>
</body>
</html>"#,
            name = registration.name,
            count = registration.ticket_count,
            total = format_price(registration.total_price),
            order_id = registration.order_id,
        )
    }

    pub(super) fn payment_settled(
        event_name: &str,
        event_date: &str,
        tier_label: &str,
        registration: &Model,
    ) -> String {
        let ticket_list = registration
            .ticket_numbers
            .iter()
            .map(|number| format!("<li>{number}</li>"))
            .collect::<String>();

        format!(
            r#"<html>
<body style="font-family: Arial, sans-serif; line-height: 1.6; color: #333;">
  <div style="max-width: 600px; margin: 0 auto; padding: 20px;">
    <h2>Payment settled</h2>
    <p>Hi {name},</p>
    <p>Your payment for {event_name} on {event_date} has settled.</p>
    <ul>
      <li>Ticket type: {tier_label}</li>
      <li>Tickets: {count}</li>
      <li>Total: {total}</li>
    </ul>
    <p>Your ticket numbers:</p>
    <ul>{ticket_list}</ul>
    <p>Show the attached PDF at the entrance gate.</p>
  </div>
</body>
</html>"#,
            name = registration.name,
            count = registration.ticket_count,
            total = format_price(registration.total_price),
        )
    }

    pub(super) fn proof_submitted(registration: &Model, submitted_at: &str) -> String {
        format!(
            r#"<html>
<body style="font-family: Arial, sans-serif; line-height: 1.6; color: #333;">
  <div style="max-width: 600px; margin: 0 auto; padding: 20px;">
    <h2>Payment proof submitted</h2>
    <p>A transfer proof is waiting for review.</p>
    <ul>
      <li>Name: {name}</li>
      <li>Email: {email}</li>
      <li>Order id: {order_id}</li>
      <li>Submitted at: {submitted_at}</li>
    </ul>
  </div>
</body>
</html>"#,
            name = registration.name,
            email = registration.email,
            order_id = registration.order_id,
        )
    }

    pub(super) fn registration_expired(
        event_name: &str,
        tier_label: &str,
        registration: &Model,
    ) -> String {
        format!(
            r#"<html>
<body style="font-family: Arial, sans-serif; line-height: 1.6; color: #333;">
  <div style="max-width: 600px; margin: 0 auto; padding: 20px;">
    <h2>Registration expired</h2>
    <p>Hi {name},</p>
    <p>Your {tier_label} registration for {event_name} was not paid in time
    and its seats were released. You are welcome to register again.</p>
  </div>
</body>
</html>"#,
            name = registration.name,
        )
    }
}
