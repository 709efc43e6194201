use std::time::Duration;

use axum::Router;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use disasterscope_probe::Probe;
use disasterscope_shared::{BarColor, DashboardTint, Hazard, PredictionError};
use serde_json::json;

async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("mock server");
    });
    format!("http://{addr}")
}

fn probe(base: &str) -> Probe {
    Probe::new(base, Duration::from_secs(5), Duration::from_secs(2)).expect("client")
}

fn canned(status: StatusCode, body: &'static str) -> Router {
    Router::new()
        .route("/health", get(|| async { axum::Json(json!({"status": "ok"})) }))
        .route(
            "/predict",
            post(move || async move {
                (
                    status,
                    [(axum::http::header::CONTENT_TYPE, "application/json")],
                    body,
                )
                    .into_response()
            }),
        )
}

#[tokio::test]
async fn rich_payload_projects_to_dashboard() {
    let body = r#"{
        "earthquake": {"probability": 82, "level": "High", "message": "Active fault nearby"},
        "flood": {"probability": 30.5, "level": "Low"},
        "wildfire": {"probability": 0, "level": "Very Low"},
        "overall": {"risk_level": "High Risk", "max_probability": 82, "message": "Stay alert"},
        "counts": {"earthquake": 4, "flood": 1, "wildfire": 0},
        "location": {"coordinates": "12.3400, 56.7800", "lat": 12.34, "lng": 56.78},
        "timestamp": "2026-01-01T00:00:00"
    }"#;
    let base = serve(canned(StatusCode::OK, body)).await;

    let prediction = probe(&base).predict(12.34, 56.78).await.expect("prediction");
    let view = &prediction.view;

    let eq = view.bar(Hazard::Earthquake);
    assert_eq!(eq.label.as_deref(), Some("82.0%"));
    assert_eq!(eq.state.color, BarColor::Red);
    assert!(eq.state.glow);
    assert_eq!(eq.badge.as_ref().map(|b| b.class_name.as_str()), Some("risk-high"));
    assert_eq!(eq.count_text, "4 nearby");
    assert_eq!(eq.message.as_deref(), Some("Active fault nearby"));

    let fire = view.bar(Hazard::Wildfire);
    assert_eq!(fire.state.display_height_percent, 0.0);
    assert_eq!(fire.state.opacity, 0.3);

    let headline = view
        .summary
        .as_ref()
        .and_then(|s| s.headline.as_ref())
        .expect("headline");
    assert_eq!(headline.text, "Overall Risk: High Risk (82%)");
    assert_eq!(view.location.as_deref(), Some("12.3400, 56.7800"));
    assert_eq!(view.tint, DashboardTint::Warning);
    assert_eq!(prediction.result.timestamp.as_deref(), Some("2026-01-01T00:00:00"));
}

#[tokio::test]
async fn legacy_payload_keeps_click_location() {
    let base = serve(canned(
        StatusCode::OK,
        r#"{"earthquake": 55, "flood": 20, "wildfire": 5}"#,
    ))
    .await;

    let prediction = probe(&base).predict(-33.5, 151.25).await.expect("prediction");
    let view = &prediction.view;
    assert_eq!(view.bar(Hazard::Earthquake).state.color, BarColor::Orange);
    assert_eq!(view.bar(Hazard::Flood).state.color, BarColor::Green);
    assert!(view.summary.is_none());
    assert_eq!(view.location.as_deref(), Some("-33.5000, 151.2500"));
}

#[tokio::test]
async fn server_error_message_is_surfaced() {
    let base = serve(canned(
        StatusCode::INTERNAL_SERVER_ERROR,
        r#"{"error": "Flood model error: out of range"}"#,
    ))
    .await;

    let err = probe(&base).predict(1.0, 2.0).await.unwrap_err();
    assert_eq!(
        err,
        PredictionError::Http {
            status: 500,
            message: "Flood model error: out of range".into()
        }
    );
    assert_eq!(err.user_message(&base), "Flood model error: out of range");
}

#[tokio::test]
async fn non_numeric_probability_is_rejected() {
    let base = serve(canned(
        StatusCode::OK,
        r#"{"earthquake": "n/a", "flood": 10, "wildfire": 5}"#,
    ))
    .await;

    let err = probe(&base).predict(1.0, 2.0).await.unwrap_err();
    assert!(matches!(err, PredictionError::InvalidProbability { .. }));
}

#[tokio::test]
async fn invalid_coordinate_never_reaches_server() {
    // No server at all: validation must fail first.
    let err = probe("http://127.0.0.1:9").predict(91.0, 0.0).await.unwrap_err();
    assert!(matches!(err, PredictionError::InvalidCoordinate { .. }));
}

#[tokio::test]
async fn health_reflects_status_code() {
    let up = serve(canned(StatusCode::OK, "{}")).await;
    assert!(probe(&up).is_up().await);

    let failing = Router::new().route(
        "/health",
        get(|| async { StatusCode::SERVICE_UNAVAILABLE }),
    );
    let down = serve(failing).await;
    let p = probe(&down);
    assert_eq!(p.health_status().await, Some(503));
    assert!(!p.is_up().await);
}

#[tokio::test]
async fn unreachable_server_is_a_network_error() {
    // Grab a free port, then release it so nothing is listening.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);
    let base = format!("http://{addr}");

    let p = probe(&base);
    assert_eq!(p.health_status().await, None);

    let err = p.predict(10.0, 10.0).await.unwrap_err();
    assert!(err.is_unreachable());
    assert!(err.user_message(&base).contains(&base));
}

#[tokio::test]
async fn two_decimal_probabilities_round_half_up() {
    let base = serve(canned(
        StatusCode::OK,
        r#"{
            "earthquake": {"probability": 12.25, "level": "Low"},
            "flood": {"probability": 0.25, "level": "Very Low"},
            "wildfire": {"probability": 82.25, "level": "High"}
        }"#,
    ))
    .await;

    let prediction = probe(&base).predict(20.5937, 78.9629).await.expect("prediction");
    let labels: Vec<_> = Hazard::ALL
        .into_iter()
        .map(|h| prediction.view.bar(h).label.clone())
        .collect();
    assert_eq!(
        labels,
        vec![
            Some("12.3%".to_string()),
            Some("0.3%".to_string()),
            Some("82.3%".to_string())
        ]
    );
}
