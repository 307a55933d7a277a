//! Utility functions and helpers for server operations.
//!
//! This module provides the detached-deadline wrapper every controller runs
//! its unit of work through, plus the shared test harness.

pub mod task;
