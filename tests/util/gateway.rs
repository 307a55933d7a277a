use mockito::{Mock, ServerGuard};

/// Mounts a charge endpoint answering with the given transaction status
pub fn mock_charge_endpoint(
    server: &mut ServerGuard,
    transaction_status: &str,
    expected_requests: usize,
) -> Mock {
    let body = format!(
        r#"{{"transaction_status":"{transaction_status}","payment_type":"qris","status_code":"201"}}"#
    );

    server
        .mock("POST", "/v2/charge")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body)
        .expect(expected_requests)
        .create()
}

/// Mounts a transaction status endpoint for the given order id
pub fn mock_status_endpoint(
    server: &mut ServerGuard,
    order_id: &str,
    transaction_status: &str,
    expected_requests: usize,
) -> Mock {
    let body = format!(
        r#"{{"transaction_status":"{transaction_status}","order_id":"{order_id}","status_code":"200"}}"#
    );

    server
        .mock("GET", format!("/v2/{order_id}/status").as_str())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body)
        .expect(expected_requests)
        .create()
}
