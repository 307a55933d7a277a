//! Shared harness for the integration tests.

pub mod gateway;
pub mod setup;
