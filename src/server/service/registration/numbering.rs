//! Ticket number generation.
//!
//! Numbers follow `CODE-SERIES/SEATID`, where the seat letter runs A..Z,
//! AA.. for each ticket within the order and the trailing id ties the number
//! back to its registration row.

use crate::server::tier::TierConfig;

pub fn generate_ticket_numbers(config: &TierConfig, id: i64, ticket_count: i32) -> Vec<String> {
    (0..ticket_count.max(0) as usize)
        .map(|seat| {
            format!(
                "{}-{}/{}{}",
                config.ticket_code,
                config.ticket_series,
                seat_letter(seat),
                id
            )
        })
        .collect()
}

/// Bijective base-26 seat label: 0 -> A, 25 -> Z, 26 -> AA.
fn seat_letter(mut index: usize) -> String {
    let mut letters = Vec::new();

    loop {
        letters.push(b'A' + (index % 26) as u8);
        index /= 26;
        if index == 0 {
            break;
        }
        index -= 1;
    }

    letters.reverse();
    letters.into_iter().map(char::from).collect()
}
