//! Field validation for incoming registrations.
//!
//! Checks run in a fixed order and the first failure wins, so clients see a
//! deterministic error for a given bad payload.

use crate::{
    model::registration::NewRegistrationDto,
    server::{error::registration::RegistrationError, tier::TierConfig},
};

const MIN_IDENTITY_NUMBER_LEN: usize = 15;

pub fn validate_new_registration(
    request: &NewRegistrationDto,
    config: &TierConfig,
) -> Result<(), RegistrationError> {
    if request.name.trim().is_empty() {
        return Err(RegistrationError::InvalidName);
    }
    if request.identity_number.len() < MIN_IDENTITY_NUMBER_LEN {
        return Err(RegistrationError::InvalidIdentityNumber);
    }
    if request.institution.trim().is_empty() {
        return Err(RegistrationError::InvalidInstitution);
    }
    if config.requires_domicile
        && request
            .domicile
            .as_deref()
            .map_or(true, |value| value.trim().is_empty())
    {
        return Err(RegistrationError::InvalidDomicile);
    }
    if request.email.parse::<lettre::Address>().is_err() {
        return Err(RegistrationError::InvalidEmail);
    }
    if !is_valid_phone(&request.phone) {
        return Err(RegistrationError::InvalidPhone);
    }
    if config.requires_handles {
        if !is_valid_handle(request.messaging_handle.as_deref()) {
            return Err(RegistrationError::InvalidMessagingHandle);
        }
        if !is_valid_handle(request.social_handle.as_deref()) {
            return Err(RegistrationError::InvalidSocialHandle);
        }
    }
    if request.ticket_count <= 0 {
        return Err(RegistrationError::InvalidTicketCount);
    }

    Ok(())
}

fn is_valid_phone(phone: &str) -> bool {
    (10..=13).contains(&phone.len()) && phone.chars().all(|c| c.is_ascii_digit())
}

/// Handles are stored bare; a leading @ would double up when rendered.
fn is_valid_handle(handle: Option<&str>) -> bool {
    match handle {
        Some(value) => !value.is_empty() && !value.starts_with('@'),
        None => false,
    }
}
