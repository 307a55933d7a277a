//! Ticketing backend for a one-day conference: tiered registration with
//! replace-by-email semantics, payment reconciliation against a QRIS
//! gateway or manual transfer proofs, ticket issuance and on-site check-in.

pub mod model;
pub mod server;
