//! Tests for HTTP controller endpoints.
//!
//! Each endpoint is exercised as a plain async function with constructed
//! extractors, checking the status code of the success path and of every
//! error class the handler maps.

mod checkin;
mod counter;
mod registration;
