use thiserror::Error;

/// Errors from assembling or sending outbound mail.
///
/// Notifications are best-effort, so these never cross the HTTP boundary;
/// the dispatcher logs them and gives up after its retry budget.
#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("invalid mail address {address}: {reason}")]
    Address { address: String, reason: String },
    #[error("failed to assemble mail message: {0}")]
    Message(String),
    #[error("smtp transport error: {0}")]
    Transport(String),
    #[error("mail send task aborted: {0}")]
    Join(String),
}

impl NotifyError {
    pub fn address(address: &str, source: impl std::fmt::Display) -> Self {
        NotifyError::Address {
            address: address.to_string(),
            reason: source.to_string(),
        }
    }
}
