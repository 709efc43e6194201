use leptos::prelude::*;

use disasterscope_shared::{RequestCoordinator, ServerStatus};

use crate::config;
use crate::dashboard::{Dashboard, ErrorToast, ServerDownBanner};
use crate::map::{MapCanvas, MapController};
use crate::status_monitor;
use crate::viewport::GeoViewport;

/// Newtype wrappers so each signal gets a distinct type for Leptos context.
#[derive(Clone, Copy)]
pub(crate) struct Coordinator(pub RwSignal<RequestCoordinator>);
#[derive(Clone, Copy)]
pub(crate) struct MapView(pub RwSignal<GeoViewport>);
#[derive(Clone, Copy)]
pub(crate) struct ServerHealth(pub RwSignal<ServerStatus>);
#[derive(Clone, Copy)]
pub(crate) struct ErrorBanner(pub RwSignal<Option<String>>);
#[derive(Clone, Copy)]
pub(crate) struct ApiBase(pub StoredValue<String>);

fn remove_loading_shell() {
    let Some(window) = web_sys::window() else {
        return;
    };
    let Some(document) = window.document() else {
        return;
    };
    if let Some(shell) = document.get_element_by_id("app-loading-shell") {
        shell.remove();
    }
}

#[component]
pub fn App() -> impl IntoView {
    let api_base = config::api_base();
    web_sys::console::info_1(&format!("disasterscope api_base={api_base}").into());

    let coordinator = RwSignal::new(RequestCoordinator::new());
    let viewport = RwSignal::new(GeoViewport::default());
    let health = RwSignal::new(ServerStatus::Unknown);
    let banner = RwSignal::new(None::<String>);
    let marker = RwSignal::new(None);

    provide_context(Coordinator(coordinator));
    provide_context(MapView(viewport));
    provide_context(ServerHealth(health));
    provide_context(ErrorBanner(banner));
    provide_context(ApiBase(StoredValue::new(api_base.clone())));
    provide_context(MapController(marker));

    // Health polling runs for the lifetime of the page.
    Effect::new(move || {
        status_monitor::start(api_base.clone(), health);
        remove_loading_shell();
        on_cleanup(status_monitor::stop);
    });

    view! {
        <div class="layout">
            <ServerDownBanner />
            <main class="map-pane">
                <MapCanvas />
            </main>
            <Dashboard />
            <ErrorToast />
        </div>
    }
}
