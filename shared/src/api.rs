use serde_json::Value;

use crate::error::PredictionError;
use crate::hazard::Coordinate;

pub const DEFAULT_API_BASE: &str = "http://127.0.0.1:5000";
pub const PREDICT_PATH: &str = "/predict";
pub const HEALTH_PATH: &str = "/health";

/// Join an API base (with or without trailing slash) and an absolute path.
pub fn endpoint(base: &str, path: &str) -> String {
    format!("{}{}", base.trim_end_matches('/'), path)
}

/// JSON body for `POST /predict`.
pub fn predict_body(coord: &Coordinate) -> String {
    serde_json::json!({
        "latitude": coord.latitude(),
        "longitude": coord.longitude(),
    })
    .to_string()
}

/// A response as seen by whichever HTTP stack made the call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    pub status: u16,
    pub status_text: String,
    pub body: String,
}

impl HttpReply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Check the status and decode the body; the payload shape is not inspected here.
pub fn parse_reply(reply: &HttpReply) -> Result<Value, PredictionError> {
    if !reply.is_success() {
        return Err(PredictionError::Http {
            status: reply.status,
            message: server_error_message(reply),
        });
    }

    serde_json::from_str(&reply.body)
        .map_err(|e| PredictionError::MalformedResponse(format!("invalid JSON: {e}")))
}

/// Prefer the server's own `error` string; fall back to the status line.
fn server_error_message(reply: &HttpReply) -> String {
    match serde_json::from_str::<Value>(&reply.body) {
        Ok(body) => body
            .get("error")
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| format!("Server error: {}", reply.status)),
        Err(_) => format!("HTTP {}: {}", reply.status, reply.status_text),
    }
}
