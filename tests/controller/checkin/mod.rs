//! Tests for the gate check-in endpoint.

mod check_in_ticket;
