//! Response envelope and builder utilities
//!
//! Every compute response, success or failure, carries the same two
//! identifying fields plus either `data` or `error`, so callers can branch
//! on the success flag alone.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};
use serde::Serialize;
use serde_json::Value;

use crate::error::ApiError;
use crate::logger;

/// Uniform response envelope
#[derive(Debug, Serialize)]
pub struct Envelope {
    pub is_success: bool,
    pub official_email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Envelope {
    /// Success envelope wrapping an operation result
    pub fn success(official_email: &str, data: Value) -> Self {
        Self {
            is_success: true,
            official_email: official_email.to_string(),
            data: Some(data),
            error: None,
        }
    }

    /// Failure envelope carrying the error's public message
    pub fn failure(official_email: &str, error: &ApiError) -> Self {
        Self {
            is_success: false,
            official_email: official_email.to_string(),
            data: None,
            error: Some(error.public_message()),
        }
    }

    /// Failure envelope with an explicit message (used for routing errors)
    pub fn failure_message(official_email: &str, message: &str) -> Self {
        Self {
            is_success: false,
            official_email: official_email.to_string(),
            data: None,
            error: Some(message.to_string()),
        }
    }
}

/// Build a JSON response
pub fn json_response<T: Serialize>(status: StatusCode, body: &T) -> Response<Full<Bytes>> {
    let json = match serde_json::to_string(body) {
        Ok(j) => j,
        Err(e) => {
            logger::log_error(&format!("Failed to serialize response: {e}"));
            return Response::builder()
                .status(StatusCode::INTERNAL_SERVER_ERROR)
                .header("Content-Type", "application/json")
                .body(Full::new(Bytes::from(
                    r#"{"error":"Internal server error"}"#,
                )))
                .unwrap_or_else(|_| Response::new(Full::new(Bytes::from("Error"))));
        }
    };

    Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .body(Full::new(Bytes::from(json)))
        .unwrap_or_else(|e| {
            logger::log_error(&format!("Failed to build response: {e}"));
            Response::new(Full::new(Bytes::from("Error")))
        })
}

/// 404 Not Found in the standard envelope shape
pub fn not_found(official_email: &str) -> Response<Full<Bytes>> {
    let body = Envelope::failure_message(official_email, "Route not found");
    json_response(StatusCode::NOT_FOUND, &body)
}

/// 413 Payload Too Large in the standard envelope shape
pub fn payload_too_large(official_email: &str) -> Response<Full<Bytes>> {
    let body = Envelope::failure_message(official_email, "Request body too large");
    json_response(StatusCode::PAYLOAD_TOO_LARGE, &body)
}

/// Liveness probe response (outside the envelope contract)
pub fn health_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(StatusCode::OK)
        .header("Content-Type", "application/json")
        .body(Full::new(Bytes::from(r#"{"status":"ok"}"#)))
        .unwrap_or_else(|_| Response::new(Full::new(Bytes::from("ok"))))
}

/// CORS preflight response
pub fn options_response(enable_cors: bool) -> Response<Full<Bytes>> {
    let mut builder = Response::builder().status(StatusCode::NO_CONTENT);
    if enable_cors {
        builder = builder
            .header("Access-Control-Allow-Origin", "*")
            .header("Access-Control-Allow-Methods", "POST, OPTIONS")
            .header("Access-Control-Allow-Headers", "Content-Type");
    }
    builder
        .body(Full::new(Bytes::new()))
        .unwrap_or_else(|_| Response::new(Full::new(Bytes::new())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_envelope_shape() {
        let env = Envelope::success("me@example.com", serde_json::json!([0, 1, 1, 2, 3]));
        let value = serde_json::to_value(&env).expect("serialize");
        assert_eq!(value["is_success"], true);
        assert_eq!(value["official_email"], "me@example.com");
        assert_eq!(value["data"], serde_json::json!([0, 1, 1, 2, 3]));
        assert!(value.get("error").is_none());
    }

    #[test]
    fn test_failure_envelope_shape() {
        let env = Envelope::failure("me@example.com", &ApiError::InvalidBody);
        let value = serde_json::to_value(&env).expect("serialize");
        assert_eq!(value["is_success"], false);
        assert_eq!(value["official_email"], "me@example.com");
        assert_eq!(value["error"], "Request body must be a JSON object");
        assert!(value.get("data").is_none());
    }

    #[test]
    fn test_not_found_uses_envelope() {
        let resp = not_found("me@example.com");
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            resp.headers().get("Content-Type").map(|v| v.to_str().ok()),
            Some(Some("application/json"))
        );
    }
}
