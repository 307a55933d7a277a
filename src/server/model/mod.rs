//! Server application models and type definitions.
//!
//! This module contains data models for the server application, currently the
//! shared application state handed to every HTTP handler.

pub mod app;
