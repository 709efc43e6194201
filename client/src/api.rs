use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use disasterscope_shared::api::{HEALTH_PATH, HttpReply, PREDICT_PATH, endpoint};
use disasterscope_shared::{PredictionError, RequestCoordinator, Resolution};

use crate::app::{ApiBase, Coordinator, ErrorBanner};
use crate::dashboard::show_error;
use crate::map::MapController;

/// `POST {base}/predict`. `Err` only when no response was received.
pub async fn send_prediction(base: &str, body: String) -> Result<HttpReply, PredictionError> {
    let url = endpoint(base, PREDICT_PATH);
    let resp = gloo_net::http::Request::post(&url)
        .header("Content-Type", "application/json")
        .header("Accept", "application/json")
        .body(body)
        .map_err(|e| PredictionError::Network(format!("request build error: {e}")))?
        .send()
        .await
        .map_err(|e| PredictionError::Network(format!("fetch error: {e}")))?;

    let status = resp.status();
    let status_text = resp.status_text();
    // An unreadable body still gets classified by status below.
    let body = resp.text().await.unwrap_or_default();

    Ok(HttpReply {
        status,
        status_text,
        body,
    })
}

/// `GET {base}/health`. `None` when the request itself failed.
pub async fn check_health(base: &str) -> Option<u16> {
    let url = endpoint(base, HEALTH_PATH);
    match gloo_net::http::Request::get(&url).send().await {
        Ok(resp) => Some(resp.status()),
        Err(_) => None,
    }
}

/// Everything a click needs, captured once at component setup.
#[derive(Clone, Copy)]
pub(crate) struct PredictHandles {
    coordinator: RwSignal<RequestCoordinator>,
    banner: RwSignal<Option<String>>,
    api_base: StoredValue<String>,
    map: MapController,
}

impl PredictHandles {
    pub(crate) fn from_context() -> Self {
        let Coordinator(coordinator) = expect_context();
        let ErrorBanner(banner) = expect_context();
        let ApiBase(api_base) = expect_context();
        Self {
            coordinator,
            banner,
            api_base,
            map: expect_context(),
        }
    }
}

/// Handle a map click: start a prediction and apply whatever comes back,
/// unless a newer click or a reset got there first.
pub(crate) fn predict_at(handles: PredictHandles, latitude: f64, longitude: f64) {
    let PredictHandles {
        coordinator,
        banner,
        api_base,
        mut map,
    } = handles;

    let Some(started) = coordinator.try_update(|c| c.click(latitude, longitude, &mut map)) else {
        return;
    };
    let base = api_base.get_value();

    let pending = match started {
        Ok(pending) => pending,
        Err(err) => {
            web_sys::console::warn_1(
                &format!("predict rejected lat={latitude} lng={longitude}: {err}").into(),
            );
            show_error(banner, err.user_message(&base));
            return;
        }
    };

    banner.set(None);
    web_sys::console::info_1(
        &format!(
            "predict request token={} at={}",
            pending.token.get(),
            pending.coordinate.display()
        )
        .into(),
    );

    spawn_local(async move {
        let outcome = send_prediction(&base, pending.body).await;
        let resolution = coordinator
            .try_update(|c: &mut RequestCoordinator| c.resolve(pending.token, outcome))
            .unwrap_or(Resolution::Stale);

        match resolution {
            Resolution::Stale => {
                web_sys::console::info_1(
                    &format!("predict stale token={} dropped", pending.token.get()).into(),
                );
            }
            Resolution::Success => {
                web_sys::console::info_1(
                    &format!("predict applied token={}", pending.token.get()).into(),
                );
            }
            Resolution::Failed(err) => {
                web_sys::console::warn_1(
                    &format!("predict failed token={}: {err}", pending.token.get()).into(),
                );
                show_error(banner, err.user_message(&base));
            }
        }
    });
}
