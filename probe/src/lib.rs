//! Headless client for the prediction server: the same request, normalization
//! and projection path as the map client, driven from the command line.

pub mod config;

use std::time::Duration;

use disasterscope_shared::api::{HEALTH_PATH, HttpReply, PREDICT_PATH, endpoint, predict_body};
use disasterscope_shared::status::probe_is_up;
use disasterscope_shared::validate::validate_coordinate;
use disasterscope_shared::{PredictionError, settle};
use tracing::{debug, warn};

/// A completed prediction: what the dashboard would show, and the data behind it.
pub use disasterscope_shared::Settled as Prediction;

pub struct Probe {
    http: reqwest::Client,
    base: String,
}

impl Probe {
    pub fn new(
        base: impl Into<String>,
        request_timeout: Duration,
        connect_timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("disasterscope-probe/", env!("CARGO_PKG_VERSION")))
            .timeout(request_timeout)
            .connect_timeout(connect_timeout)
            .build()?;
        Ok(Self {
            http,
            base: base.into(),
        })
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    /// `GET /health`. `None` when no response arrived.
    pub async fn health_status(&self) -> Option<u16> {
        let url = endpoint(&self.base, HEALTH_PATH);
        match self.http.get(&url).send().await {
            Ok(resp) => Some(resp.status().as_u16()),
            Err(e) => {
                debug!(url = %url, error = %e, "health request failed");
                None
            }
        }
    }

    pub async fn is_up(&self) -> bool {
        probe_is_up(self.health_status().await)
    }

    /// `POST /predict` with a prepared JSON body.
    pub async fn send_prediction(&self, body: String) -> Result<HttpReply, PredictionError> {
        let url = endpoint(&self.base, PREDICT_PATH);
        let resp = self
            .http
            .post(&url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .header(reqwest::header::ACCEPT, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| PredictionError::Network(e.to_string()))?;

        let status = resp.status();
        let status_text = status.canonical_reason().unwrap_or_default().to_string();
        let body = resp.text().await.unwrap_or_else(|e| {
            warn!(url = %url, error = %e, "failed to read response body");
            String::new()
        });

        Ok(HttpReply {
            status: status.as_u16(),
            status_text,
            body,
        })
    }

    /// Validate, request, normalize and project one point.
    ///
    /// One request, awaited to completion, so there is nothing to supersede it.
    pub async fn predict(&self, latitude: f64, longitude: f64) -> Result<Prediction, PredictionError> {
        let coordinate = validate_coordinate(latitude, longitude)?;
        debug!(at = %coordinate.display(), "prediction requested");

        let outcome = self.send_prediction(predict_body(&coordinate)).await;
        settle(&coordinate, outcome)
    }
}
