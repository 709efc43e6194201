use std::cell::RefCell;

use leptos::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use wasm_bindgen_futures::spawn_local;

use disasterscope_shared::status::HEALTH_POLL_INTERVAL_MS;
use disasterscope_shared::{ServerStatus, StatusMonitor};

use crate::api::check_health;

struct PollIntervalBinding {
    window: web_sys::Window,
    interval_id: i32,
    _callback: Closure<dyn Fn()>,
}

thread_local! {
    static POLL_INTERVAL_BINDING: RefCell<Option<PollIntervalBinding>> = const { RefCell::new(None) };
    static MONITOR: RefCell<StatusMonitor> = RefCell::new(StatusMonitor::new());
}

/// Probe `/health` now and then every `HEALTH_POLL_INTERVAL_MS`.
///
/// Replaces any previous poll loop.
pub fn start(api_base: String, health: RwSignal<ServerStatus>) {
    stop();
    let Some(window) = web_sys::window() else {
        return;
    };

    probe(api_base.clone(), health);

    let cb = Closure::<dyn Fn()>::new(move || probe(api_base.clone(), health));
    let Ok(interval_id) = window.set_interval_with_callback_and_timeout_and_arguments_0(
        cb.as_ref().unchecked_ref(),
        HEALTH_POLL_INTERVAL_MS as i32,
    ) else {
        web_sys::console::warn_1(&"health poll interval could not be registered".into());
        return;
    };
    POLL_INTERVAL_BINDING.with(|slot| {
        *slot.borrow_mut() = Some(PollIntervalBinding {
            window: window.clone(),
            interval_id,
            _callback: cb,
        });
    });
}

pub fn stop() {
    POLL_INTERVAL_BINDING.with(|slot| {
        if let Some(old) = slot.borrow_mut().take() {
            old.window.clear_interval_with_handle(old.interval_id);
        }
    });
}

fn probe(api_base: String, health: RwSignal<ServerStatus>) {
    spawn_local(async move {
        let response_status = check_health(&api_base).await;
        let (transition, failures) = MONITOR.with(|monitor| {
            let mut monitor = monitor.borrow_mut();
            (monitor.record(response_status), monitor.consecutive_failures())
        });
        let Some(status) = transition else {
            return;
        };
        match status {
            ServerStatus::Down => web_sys::console::warn_1(
                &format!(
                    "health down base={api_base} status={response_status:?} failures={failures}"
                )
                .into(),
            ),
            _ => web_sys::console::info_1(&format!("health up base={api_base}").into()),
        }
        health.set(status);
    });
}
