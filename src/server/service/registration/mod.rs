//! Registration and ticket allocation engine.
//!
//! Owns the three mutations of a registration's lifecycle (replace-by-email
//! creation, payment-status transition, check-in) plus the read paths. Each
//! mutation runs inside one database transaction with the touched rows locked
//! on Postgres, so capacity decisions and state transitions stay serialized;
//! mails and ticket rendering happen strictly after commit and never fail the
//! request that triggered them.

#[cfg(test)]
mod tests;

mod numbering;
mod validate;

use chrono::Utc;
use sea_orm::{ActiveValue, DatabaseConnection, IntoActiveModel, TransactionTrait};

use entity::registration::{Model, PaymentStatus, TicketNumbers, Tier};

use crate::{
    model::registration::{NewRegistrationDto, PaymentPatchDto},
    server::{
        data::registration::{NewRegistrationRow, RegistrationRepository},
        error::{registration::RegistrationError, Error},
        service::{
            mailer::MailAttachment,
            notify::Notifier,
            payment::{ChargeRequest, CustomerDetails, PaymentGateway},
            render::TicketRenderer,
        },
        tier::{tier_config, PaymentMode},
    },
};

pub struct RegistrationService {
    db: DatabaseConnection,
    gateway: PaymentGateway,
    notifier: Notifier,
    renderer: TicketRenderer,
}

impl RegistrationService {
    /// Creates a new instance of [`RegistrationService`]
    pub fn new(
        db: DatabaseConnection,
        gateway: PaymentGateway,
        notifier: Notifier,
        renderer: TicketRenderer,
    ) -> Self {
        Self {
            db,
            gateway,
            notifier,
            renderer,
        }
    }

    /// Registers an attendee, replacing any unsettled registration the same
    /// email already holds within the tier.
    ///
    /// The capacity check, the delete of the superseded row and the insert
    /// form one transaction: either the whole replacement commits or the
    /// prior state survives untouched. Gateway tiers are charged inside the
    /// same window and start out `unpaid`; transfer tiers start `pending`.
    pub async fn replace_by_email(&self, request: NewRegistrationDto) -> Result<Model, Error> {
        let tier = Tier::parse(&request.tier).ok_or(RegistrationError::InvalidTier)?;
        let config = tier_config(tier);

        validate::validate_new_registration(&request, config)?;

        let txn = self.db.begin().await?;
        let repository = RegistrationRepository::new(&txn);

        // The capacity decision is made on locked rows so two concurrent
        // registrations cannot both pass the check.
        let rows = repository.list_by_tier_for_update(tier).await?;
        let occupied: i64 = rows.iter().map(|row| i64::from(row.ticket_count)).sum();

        if occupied + i64::from(request.ticket_count) > config.capacity {
            return Err(RegistrationError::SoldOut.into());
        }

        repository
            .delete_by_email(
                tier,
                &request.email,
                &[PaymentStatus::Pending, PaymentStatus::Unpaid],
            )
            .await?;

        let order_id = generate_order_id();
        let total_price = config.unit_price * i64::from(request.ticket_count);

        let (status, gateway_response) = match config.payment_mode {
            PaymentMode::GatewayCharge => {
                let charge = ChargeRequest::qris(
                    order_id.clone(),
                    config.unit_price,
                    request.ticket_count,
                    format!("{} Ticket", config.label),
                    CustomerDetails {
                        first_name: request.name.clone(),
                        email: request.email.clone(),
                        phone: request.phone.clone(),
                    },
                );
                let reply = self.gateway.charge(&charge).await?;

                let status = if reply.is_settled() {
                    PaymentStatus::Settlement
                } else {
                    PaymentStatus::Unpaid
                };

                (status, Some(reply.raw))
            }
            PaymentMode::TransferProof => (PaymentStatus::Pending, None),
        };

        let created = repository
            .create(NewRegistrationRow {
                tier,
                name: request.name,
                identity_number: request.identity_number,
                institution: request.institution,
                domicile: request.domicile,
                email: request.email,
                phone: request.phone,
                messaging_handle: request.messaging_handle,
                social_handle: request.social_handle,
                ticket_count: request.ticket_count,
                total_price,
                order_id,
                status,
                gateway_response,
                create_time: Utc::now(),
            })
            .await?;

        txn.commit().await?;

        self.notifier.registration_received(&created);

        Ok(created)
    }

    /// Moves a registration's payment state forward.
    ///
    /// Gateway tiers are settled by polling the gateway, the patch status is
    /// ignored; transfer tiers are settled by an explicit admin patch. The
    /// first transition to settlement assigns ticket numbers exactly once and
    /// fires the ticket mail; re-entry keeps the numbers and stays silent.
    pub async fn update_payment_status(
        &self,
        id: i64,
        patch: PaymentPatchDto,
    ) -> Result<Model, Error> {
        if id <= 0 {
            return Err(RegistrationError::InvalidId.into());
        }

        let requested_status = match patch.status.as_deref() {
            Some(value) => {
                Some(PaymentStatus::parse(value).ok_or(RegistrationError::InvalidStatus)?)
            }
            None => None,
        };

        let txn = self.db.begin().await?;
        let repository = RegistrationRepository::new(&txn);

        let current = repository
            .get_by_id_for_update(id)
            .await?
            .ok_or(RegistrationError::NotFound)?;

        let config = tier_config(current.tier);

        let (next_status, gateway_response) = match config.payment_mode {
            PaymentMode::GatewayCharge => {
                // The gateway is authoritative for these tiers; callers
                // cannot assert settlement themselves.
                let reply = self.gateway.transaction_status(&current.order_id).await?;

                if !reply.is_settled() {
                    return Err(RegistrationError::PaymentNotSettled.into());
                }

                (PaymentStatus::Settlement, Some(reply.raw))
            }
            PaymentMode::TransferProof => {
                let next = match requested_status {
                    None => current.status,
                    Some(PaymentStatus::Settlement) => PaymentStatus::Settlement,
                    Some(PaymentStatus::Pending)
                        if current.status == PaymentStatus::Pending =>
                    {
                        PaymentStatus::Pending
                    }
                    Some(_) => {
                        return Err(RegistrationError::InvalidStatusTransition.into());
                    }
                };

                (next, None)
            }
        };

        let first_settle = current.status != PaymentStatus::Settlement
            && next_status == PaymentStatus::Settlement;
        let proof_attached = patch.image_proof_uri.is_some();

        // Numbers are assigned exactly once; renumbering tickets that were
        // already mailed out would invalidate them at the gate.
        let ticket_numbers: TicketNumbers =
            if next_status == PaymentStatus::Settlement && current.ticket_numbers.is_empty() {
                numbering::generate_ticket_numbers(config, current.id, current.ticket_count)
                    .into()
            } else {
                current.ticket_numbers.clone()
            };

        let mut active = current.into_active_model();
        active.status = ActiveValue::Set(next_status);
        active.ticket_numbers = ActiveValue::Set(ticket_numbers);
        if let Some(raw) = gateway_response {
            active.gateway_response = ActiveValue::Set(Some(raw));
        }
        if let Some(uri) = patch.image_proof_uri {
            active.image_proof_uri = ActiveValue::Set(Some(uri));
        }
        active.update_time = ActiveValue::Set(Some(Utc::now()));

        let updated = repository.update(active).await?;
        txn.commit().await?;

        if first_settle {
            let attachment = self.render_ticket_attachment(&updated).await;
            self.notifier.payment_settled(&updated, attachment);
        } else if updated.status == PaymentStatus::Pending && proof_attached {
            self.notifier.proof_submitted(&updated);
        }

        Ok(updated)
    }

    /// Checks one ticket in, flipping the registration's check-in flag once
    /// every ticket of the order has been scanned.
    pub async fn check_in(&self, id: i64, ticket_number: &str) -> Result<String, Error> {
        if id <= 0 {
            return Err(RegistrationError::InvalidId.into());
        }

        let txn = self.db.begin().await?;
        let repository = RegistrationRepository::new(&txn);

        let registration = repository
            .get_by_id_for_update(id)
            .await?
            .ok_or(RegistrationError::NotFound)?;

        if registration.checkin_status {
            return Err(RegistrationError::AllTicketsCheckedIn.into());
        }
        if registration.status != PaymentStatus::Settlement {
            return Err(RegistrationError::TicketNotYetPaid.into());
        }
        if !registration.ticket_numbers.contains(ticket_number) {
            return Err(RegistrationError::TicketNotFound.into());
        }
        if registration.checked_in_numbers.contains(ticket_number) {
            return Err(RegistrationError::TicketAlreadyCheckedIn.into());
        }

        let mut checked_in = registration.checked_in_numbers.clone();
        checked_in.push(ticket_number.to_string());

        let complete = checked_in.len() == registration.ticket_numbers.len();

        let mut active = registration.into_active_model();
        active.checked_in_numbers = ActiveValue::Set(checked_in);
        active.checkin_status = ActiveValue::Set(complete);
        active.update_time = ActiveValue::Set(Some(Utc::now()));

        repository.update(active).await?;
        txn.commit().await?;

        Ok(ticket_number.to_string())
    }

    /// Fetches one registration, optionally scoped to a ticket number it
    /// must own.
    pub async fn get_by_id(
        &self,
        id: i64,
        ticket_number: Option<&str>,
    ) -> Result<Model, Error> {
        if id <= 0 {
            return Err(RegistrationError::InvalidId.into());
        }

        let repository = RegistrationRepository::new(&self.db);

        let registration = repository
            .get_by_id(id)
            .await?
            .ok_or(RegistrationError::NotFound)?;

        if let Some(number) = ticket_number {
            if !registration.ticket_numbers.contains(number) {
                return Err(RegistrationError::TicketNotFound.into());
            }
        }

        Ok(registration)
    }

    pub async fn list(
        &self,
        tier: Option<Tier>,
        status: Option<PaymentStatus>,
    ) -> Result<Vec<Model>, Error> {
        let repository = RegistrationRepository::new(&self.db);

        Ok(repository.list(tier, status).await?)
    }

    /// Sums booked seats across the filtered registrations.
    pub async fn count_seats(
        &self,
        tier: Option<Tier>,
        status: Option<PaymentStatus>,
    ) -> Result<i64, Error> {
        let repository = RegistrationRepository::new(&self.db);

        Ok(repository.sum_seats(tier, status).await?)
    }

    /// Renders the ticket PDF off the async runtime. Rendering is best
    /// effort: on failure the settled mail simply goes out without the
    /// attachment.
    async fn render_ticket_attachment(&self, registration: &Model) -> Option<MailAttachment> {
        let renderer = self.renderer.clone();
        let snapshot = registration.clone();

        let rendered =
            tokio::task::spawn_blocking(move || renderer.render(&snapshot)).await;

        match rendered {
            Ok(Ok(ticket)) => Some(MailAttachment {
                filename: ticket
                    .path
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_else(|| "tickets.pdf".to_string()),
                bytes: ticket.bytes,
            }),
            Ok(Err(err)) => {
                tracing::error!(
                    "failed to render tickets for registration {}: {}",
                    registration.id,
                    err
                );
                None
            }
            Err(err) => {
                tracing::error!(
                    "ticket render task aborted for registration {}: {}",
                    registration.id,
                    err
                );
                None
            }
        }
    }
}

/// 10-digit zero-padded random order id.
fn generate_order_id() -> String {
    format!("{:010}", rand::random_range(0..10_000_000_000_i64))
}
