//! API request/response types.

use serde::Serialize;

/// `GET /health` response body.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self { status: "ok" }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_response_serializes_status_ok() {
        let json = serde_json::to_string(&HealthResponse::default()).unwrap();
        assert_eq!(json, r#"{"status":"ok"}"#);
    }
}
