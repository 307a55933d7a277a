//! Tests for the public seat counter endpoint.

mod count_seats;
