//! Service layer for business logic and orchestration.
//!
//! This module contains the service layer that implements business logic,
//! coordinates between repositories and external systems, and handles
//! multi-step operations. Services cover registration and ticket allocation,
//! payment gateway calls, outbound mail, and ticket PDF rendering.

pub mod mailer;
pub mod notify;
pub mod payment;
pub mod registration;
pub mod render;
