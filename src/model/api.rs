use serde::{Deserialize, Serialize};

/// Response envelope shared by every API endpoint.
///
/// Success bodies carry `data`, error bodies carry `errors` and `status`;
/// empty fields are omitted from the serialized JSON.
#[derive(Debug, Serialize, Deserialize)]
pub struct Envelope<T> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl<T> Envelope<T> {
    pub fn data(data: T) -> Self {
        Envelope {
            data: Some(data),
            errors: Vec::new(),
            status: None,
        }
    }

    /// Envelope for mutations that acknowledge with an explicit `Success`
    /// marker next to the payload.
    pub fn success(data: T) -> Self {
        Envelope {
            data: Some(data),
            errors: Vec::new(),
            status: Some("Success".to_string()),
        }
    }
}

/// The error body returned when an API request fails.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ErrorDto {
    /// Stable error messages suitable for client display
    pub errors: Vec<String>,
    /// Canonical text of the HTTP status
    pub status: String,
}
