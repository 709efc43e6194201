use crate::api::{HttpReply, parse_reply, predict_body};
use crate::error::PredictionError;
use crate::hazard::{Coordinate, PredictionResult};
use crate::normalize::normalize_payload;
use crate::projection::{DashboardView, project};
use crate::validate::validate_coordinate;

/// The map side of a prediction: where the marker goes.
pub trait MarkerSurface {
    fn set_marker(&mut self, coord: Coordinate);
    fn clear_marker(&mut self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestPhase {
    Idle,
    Loading,
    Success,
    Failed,
}

/// Monotonic id of a prediction request. Only the latest one may touch the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

impl RequestToken {
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// What the caller must send for an accepted click.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingPrediction {
    pub token: RequestToken,
    pub coordinate: Coordinate,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// A newer click or a reset superseded this request; nothing changed.
    Stale,
    Success,
    Failed(PredictionError),
}

/// A successful prediction: the dashboard to show and the data behind it.
#[derive(Debug, Clone, PartialEq)]
pub struct Settled {
    pub view: DashboardView,
    pub result: PredictionResult,
}

/// Turn the outcome of a request for `coordinate` into a dashboard.
///
/// `Err` in `outcome` means no response was received. If the payload carries
/// no usable location, the requested coordinate fills the location line.
pub fn settle(
    coordinate: &Coordinate,
    outcome: Result<HttpReply, PredictionError>,
) -> Result<Settled, PredictionError> {
    let result = outcome
        .and_then(|reply| parse_reply(&reply))
        .and_then(normalize_payload)?;
    let mut view = project(&result);
    if view.location.is_none() {
        view.location = Some(coordinate.display());
    }
    Ok(Settled { view, result })
}

/// Owns the single current prediction and the dashboard it drives.
#[derive(Debug, Clone)]
pub struct RequestCoordinator {
    last_token: u64,
    in_flight: Option<(RequestToken, Coordinate)>,
    phase: RequestPhase,
    view: DashboardView,
    result: Option<PredictionResult>,
    last_error: Option<PredictionError>,
}

impl Default for RequestCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

impl RequestCoordinator {
    pub fn new() -> Self {
        Self {
            last_token: 0,
            in_flight: None,
            phase: RequestPhase::Idle,
            view: DashboardView::reset(),
            result: None,
            last_error: None,
        }
    }

    pub fn phase(&self) -> RequestPhase {
        self.phase
    }

    pub fn view(&self) -> &DashboardView {
        &self.view
    }

    pub fn result(&self) -> Option<&PredictionResult> {
        self.result.as_ref()
    }

    pub fn last_error(&self) -> Option<&PredictionError> {
        self.last_error.as_ref()
    }

    pub fn in_flight(&self) -> Option<RequestToken> {
        self.in_flight.map(|(token, _)| token)
    }

    /// Start a prediction for a map click, superseding anything in flight.
    ///
    /// Invalid coordinates fail immediately and no request is issued.
    pub fn click(
        &mut self,
        latitude: f64,
        longitude: f64,
        map: &mut impl MarkerSurface,
    ) -> Result<PendingPrediction, PredictionError> {
        map.clear_marker();
        self.in_flight = None;
        self.result = None;

        let coordinate = match validate_coordinate(latitude, longitude) {
            Ok(coord) => coord,
            Err(err) => {
                self.fail(err.clone());
                return Err(err);
            }
        };

        map.set_marker(coordinate);
        self.last_token += 1;
        let token = RequestToken(self.last_token);
        self.in_flight = Some((token, coordinate));
        self.phase = RequestPhase::Loading;
        self.view = DashboardView::loading(&coordinate);
        self.last_error = None;

        Ok(PendingPrediction {
            token,
            coordinate,
            body: predict_body(&coordinate),
        })
    }

    /// Apply the outcome of a request. `Err` means no response was received.
    pub fn resolve(
        &mut self,
        token: RequestToken,
        outcome: Result<HttpReply, PredictionError>,
    ) -> Resolution {
        let Some((current, coordinate)) = self.in_flight else {
            return Resolution::Stale;
        };
        if current != token {
            return Resolution::Stale;
        }
        self.in_flight = None;

        match settle(&coordinate, outcome) {
            Ok(Settled { view, result }) => {
                self.view = view;
                self.result = Some(result);
                self.phase = RequestPhase::Success;
                Resolution::Success
            }
            Err(err) => {
                self.fail(err.clone());
                Resolution::Failed(err)
            }
        }
    }

    /// Explicit user reset: drop the marker, orphan any in-flight request, zero the dashboard.
    pub fn reset(&mut self, map: &mut impl MarkerSurface) {
        map.clear_marker();
        self.in_flight = None;
        self.result = None;
        self.last_error = None;
        self.phase = RequestPhase::Idle;
        self.view = DashboardView::reset();
    }

    fn fail(&mut self, err: PredictionError) {
        self.view = DashboardView::reset();
        self.result = None;
        self.last_error = Some(err);
        self.phase = RequestPhase::Failed;
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::hazard::Hazard;
    use crate::projection::BarColor;

    #[derive(Default)]
    struct RecordingMap {
        marker: Option<Coordinate>,
        clears: usize,
    }

    impl MarkerSurface for RecordingMap {
        fn set_marker(&mut self, coord: Coordinate) {
            self.marker = Some(coord);
        }

        fn clear_marker(&mut self) {
            self.marker = None;
            self.clears += 1;
        }
    }

    fn ok(body: serde_json::Value) -> Result<HttpReply, PredictionError> {
        Ok(HttpReply {
            status: 200,
            status_text: "OK".into(),
            body: body.to_string(),
        })
    }

    #[test]
    fn click_to_high_risk_summary() {
        let mut map = RecordingMap::default();
        let mut coordinator = RequestCoordinator::new();

        let pending = coordinator.click(12.34, 56.78, &mut map).unwrap();
        assert_eq!(coordinator.phase(), RequestPhase::Loading);
        assert_eq!(map.marker, Some(pending.coordinate));
        for bar in &coordinator.view().bars {
            assert_eq!(bar.fill_css(), "#666");
            assert_eq!(bar.state.display_height_percent, 5.0);
        }

        let resolution = coordinator.resolve(
            pending.token,
            ok(json!({
                "earthquake": {"probability": 82, "level": "High"},
                "flood": {"probability": 30, "level": "Low"},
                "wildfire": {"probability": 12, "level": "Low"},
                "overall": {"risk_level": "High Risk", "max_probability": 82},
            })),
        );
        assert_eq!(resolution, Resolution::Success);
        assert_eq!(coordinator.phase(), RequestPhase::Success);

        let headline = coordinator
            .view()
            .summary
            .as_ref()
            .and_then(|s| s.headline.clone())
            .unwrap();
        assert_eq!(headline.text, "Overall Risk: High Risk (82%)");
        assert_eq!(headline.class_name, "risk-high-risk");
        assert_eq!(
            coordinator.view().bar(Hazard::Earthquake).state.color,
            BarColor::Red
        );
        // No location in the payload: the click position stays on screen.
        assert_eq!(
            coordinator.view().location.as_deref(),
            Some("12.3400, 56.7800")
        );
    }

    #[test]
    fn invalid_click_fails_without_request() {
        let mut map = RecordingMap::default();
        let mut coordinator = RequestCoordinator::new();

        let err = coordinator.click(91.0, 0.0, &mut map).unwrap_err();
        assert!(matches!(err, PredictionError::InvalidCoordinate { .. }));
        assert_eq!(coordinator.phase(), RequestPhase::Failed);
        assert_eq!(coordinator.in_flight(), None);
        assert_eq!(map.marker, None);
        assert!(coordinator.view().is_reset());
    }

    #[test]
    fn stale_response_is_ignored() {
        let mut map = RecordingMap::default();
        let mut coordinator = RequestCoordinator::new();

        let first = coordinator.click(1.0, 1.0, &mut map).unwrap();
        let second = coordinator.click(2.0, 2.0, &mut map).unwrap();
        assert!(second.token > first.token);

        let late = coordinator.resolve(
            first.token,
            ok(json!({"earthquake": 99, "flood": 99, "wildfire": 99})),
        );
        assert_eq!(late, Resolution::Stale);
        assert_eq!(coordinator.phase(), RequestPhase::Loading);

        let current = coordinator.resolve(
            second.token,
            ok(json!({"earthquake": 10, "flood": 20, "wildfire": 30})),
        );
        assert_eq!(current, Resolution::Success);
        assert_eq!(
            coordinator.view().bar(Hazard::Earthquake).label.as_deref(),
            Some("10.0%")
        );
        assert_eq!(map.marker.map(|c| c.latitude()), Some(2.0));
    }

    #[test]
    fn resolving_twice_is_stale() {
        let mut map = RecordingMap::default();
        let mut coordinator = RequestCoordinator::new();
        let pending = coordinator.click(1.0, 1.0, &mut map).unwrap();
        let body = json!({"earthquake": 1, "flood": 1, "wildfire": 1});
        assert_eq!(
            coordinator.resolve(pending.token, ok(body.clone())),
            Resolution::Success
        );
        assert_eq!(coordinator.resolve(pending.token, ok(body)), Resolution::Stale);
    }

    #[test]
    fn reset_orphans_in_flight_request() {
        let mut map = RecordingMap::default();
        let mut coordinator = RequestCoordinator::new();

        let pending = coordinator.click(5.0, 5.0, &mut map).unwrap();
        coordinator.reset(&mut map);
        assert_eq!(coordinator.phase(), RequestPhase::Idle);
        assert_eq!(map.marker, None);

        let late = coordinator.resolve(
            pending.token,
            ok(json!({"earthquake": 50, "flood": 50, "wildfire": 50})),
        );
        assert_eq!(late, Resolution::Stale);
        assert!(coordinator.view().is_reset());
    }

    #[test]
    fn garbled_payload_resets_dashboard() {
        let mut map = RecordingMap::default();
        let mut coordinator = RequestCoordinator::new();

        let pending = coordinator.click(3.0, 4.0, &mut map).unwrap();
        let resolution = coordinator.resolve(
            pending.token,
            ok(json!({"earthquake": "n/a", "flood": 10, "wildfire": 5})),
        );
        assert!(matches!(
            resolution,
            Resolution::Failed(PredictionError::InvalidProbability { .. })
        ));
        assert_eq!(coordinator.phase(), RequestPhase::Failed);
        assert!(coordinator.view().is_reset());
        assert!(coordinator.result().is_none());
    }

    #[test]
    fn network_failure_is_reported_as_unreachable() {
        let mut map = RecordingMap::default();
        let mut coordinator = RequestCoordinator::new();

        let pending = coordinator.click(3.0, 4.0, &mut map).unwrap();
        coordinator.resolve(
            pending.token,
            Err(PredictionError::Network("connection refused".into())),
        );
        assert!(coordinator.last_error().unwrap().is_unreachable());
        assert!(coordinator.view().is_reset());
    }

    #[test]
    fn http_error_after_success_clears_previous_result() {
        let mut map = RecordingMap::default();
        let mut coordinator = RequestCoordinator::new();

        let first = coordinator.click(3.0, 4.0, &mut map).unwrap();
        coordinator.resolve(first.token, ok(json!({"earthquake": 90, "flood": 1, "wildfire": 1})));
        assert!(!coordinator.view().is_reset());

        let second = coordinator.click(3.0, 4.0, &mut map).unwrap();
        let resolution = coordinator.resolve(
            second.token,
            Ok(HttpReply {
                status: 500,
                status_text: "INTERNAL SERVER ERROR".into(),
                body: r#"{"error":"Earthquake model error: boom"}"#.into(),
            }),
        );
        assert_eq!(
            resolution,
            Resolution::Failed(PredictionError::Http {
                status: 500,
                message: "Earthquake model error: boom".into()
            })
        );
        assert!(coordinator.view().is_reset());
    }

    #[test]
    fn new_click_clears_previous_marker_first() {
        let mut map = RecordingMap::default();
        let mut coordinator = RequestCoordinator::new();
        coordinator.click(1.0, 1.0, &mut map).unwrap();
        coordinator.click(2.0, 2.0, &mut map).unwrap();
        assert_eq!(map.clears, 2);
        assert_eq!(map.marker.map(|c| c.longitude()), Some(2.0));
    }

    #[test]
    fn second_reset_changes_nothing() {
        let mut map = RecordingMap::default();
        let mut coordinator = RequestCoordinator::new();

        let pending = coordinator.click(20.5937, 78.9629, &mut map).unwrap();
        coordinator.resolve(
            pending.token,
            ok(json!({"earthquake": 91, "flood": 45, "wildfire": 3})),
        );
        assert_eq!(coordinator.phase(), RequestPhase::Success);
        assert!(map.marker.is_some());

        coordinator.reset(&mut map);
        let view_after_first = coordinator.view().clone();
        let clears_after_first = map.clears;
        assert!(view_after_first.is_reset());
        assert_eq!(coordinator.phase(), RequestPhase::Idle);
        assert_eq!(map.marker, None);

        coordinator.reset(&mut map);
        assert_eq!(coordinator.view(), &view_after_first);
        assert_eq!(coordinator.phase(), RequestPhase::Idle);
        assert_eq!(map.marker, None);
        assert_eq!(coordinator.result(), None);
        assert_eq!(coordinator.last_error(), None);
        assert_eq!(coordinator.in_flight(), None);
        // Reset always clears the marker, present or not.
        assert_eq!(map.clears, clears_after_first + 1);
    }

    #[test]
    fn settle_fills_location_from_request() {
        let coord = crate::validate::validate_coordinate(-33.5, 151.25).unwrap();
        let settled = settle(&coord, ok(json!({"earthquake": 55, "flood": 20, "wildfire": 5}))).unwrap();
        assert_eq!(settled.view.location.as_deref(), Some("-33.5000, 151.2500"));
        assert_eq!(settled.result.earthquake.probability, 55.0);

        let err = settle(&coord, Err(PredictionError::Network("refused".into()))).unwrap_err();
        assert!(err.is_unreachable());
    }
}
