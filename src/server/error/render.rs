use thiserror::Error;

/// Errors from rendering a ticket document.
///
/// Rendering happens after the payment transition has committed, so these
/// are logged rather than surfaced; the settlement itself never rolls back.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("failed to encode check-in QR: {0}")]
    Qr(String),
    #[error("failed to assemble ticket document: {0}")]
    Pdf(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
