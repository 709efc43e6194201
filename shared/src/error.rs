use thiserror::Error;

use crate::hazard::Hazard;

/// Every way a prediction can fail between the map click and the dashboard.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PredictionError {
    #[error("invalid coordinates ({latitude}, {longitude})")]
    InvalidCoordinate { latitude: f64, longitude: f64 },

    /// The request never produced a response.
    #[error("network error: {0}")]
    Network(String),

    #[error("server error {status}: {message}")]
    Http { status: u16, message: String },

    #[error("malformed response: {0}")]
    MalformedResponse(String),

    #[error("invalid probability values for {}", join_hazards(.hazards))]
    InvalidProbability { hazards: Vec<Hazard> },
}

impl PredictionError {
    /// True when the failure happened before any response arrived.
    pub fn is_unreachable(&self) -> bool {
        matches!(self, Self::Network(_))
    }

    /// Text shown to the user. `endpoint` is the configured API base.
    pub fn user_message(&self, endpoint: &str) -> String {
        match self {
            Self::InvalidCoordinate { .. } => {
                "Invalid coordinates. Please click on a valid location on the map.".to_string()
            }
            Self::Network(_) => format!(
                "Cannot connect to the prediction server. Make sure it is running and reachable at {endpoint}, and that no firewall is blocking the connection."
            ),
            Self::Http { message, .. } => message.clone(),
            Self::MalformedResponse(detail) => {
                format!("Server returned an unreadable response: {detail}")
            }
            Self::InvalidProbability { .. } => {
                "Failed to parse prediction response: missing or invalid probability values"
                    .to_string()
            }
        }
    }
}

fn join_hazards(hazards: &[Hazard]) -> String {
    hazards
        .iter()
        .map(|h| h.wire_key())
        .collect::<Vec<_>>()
        .join(", ")
}
