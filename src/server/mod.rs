//! Server application core modules.
//!
//! This module contains all server-side functionality for the tixgate
//! backend: HTTP routing and controllers, the registration and payment
//! reconciliation engine, database repositories, the payment gateway
//! client, mail dispatch, ticket rendering and the cron scheduler that
//! expires unpaid orders.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod config;
pub mod controller;
pub mod data;
pub mod error;
pub mod model;
pub mod router;
pub mod scheduler;
pub mod service;
pub mod startup;
pub mod tier;
pub mod util;
