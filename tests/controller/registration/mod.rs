//! Tests for the registration controller endpoints.

mod create_registration;
mod get_registration;
mod list_registrations;
mod update_payment_status;
