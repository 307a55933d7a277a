//! Data access layer repositories.
//!
//! This module contains the database repository implementations for the
//! application. Repositories provide an abstraction layer over database
//! operations; all of them are generic over the connection so the same code
//! runs against the pooled connection or inside a transaction.

pub mod registration;
