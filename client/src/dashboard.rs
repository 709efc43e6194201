use std::cell::RefCell;

use gloo_timers::callback::Timeout;
use leptos::prelude::*;

use disasterscope_shared::projection::BarView;
use disasterscope_shared::{DashboardView, Hazard, ServerStatus};

use crate::app::{Coordinator, ErrorBanner, ServerHealth};
use crate::config::ERROR_BANNER_MS;
use crate::map::MapController;

thread_local! {
    static ERROR_BANNER_TIMEOUT: RefCell<Option<Timeout>> = const { RefCell::new(None) };
}

/// Show an error in the banner; it hides itself after `ERROR_BANNER_MS`.
pub(crate) fn show_error(banner: RwSignal<Option<String>>, message: String) {
    banner.set(Some(message));
    let timeout = Timeout::new(ERROR_BANNER_MS, move || {
        banner.set(None);
    });
    // Replacing the slot drops (and cancels) any earlier timer.
    ERROR_BANNER_TIMEOUT.with(|slot| {
        *slot.borrow_mut() = Some(timeout);
    });
}

fn dismiss_error(banner: RwSignal<Option<String>>) {
    ERROR_BANNER_TIMEOUT.with(|slot| {
        if let Some(timeout) = slot.borrow_mut().take() {
            timeout.cancel();
        }
    });
    banner.set(None);
}

/// Inline style for a bar fill.
fn fill_style(bar: &BarView) -> String {
    format!(
        "height: {}%; min-height: {}px; opacity: {}; background-color: {};",
        bar.state.display_height_percent,
        bar.state.min_height_px,
        bar.state.opacity,
        bar.fill_css()
    )
}

#[component]
pub fn Dashboard() -> impl IntoView {
    let Coordinator(coordinator) = expect_context();
    let map: MapController = expect_context();

    let view = Memo::new(move |_| coordinator.with(|c| c.view().clone()));
    let tint_style = move || format!("background-color: {};", view.with(|v| v.tint.css()));

    let on_reset = move |_| {
        let mut map = map;
        coordinator.update(|c| c.reset(&mut map));
        web_sys::console::info_1(&"dashboard reset".into());
    };

    view! {
        <aside class="dashboard" style=tint_style>
            <h2 class="dashboard-title">"Disaster Risk"</h2>
            <LocationLine view=view />
            <div class="bars">
                {Hazard::ALL
                    .into_iter()
                    .map(|hazard| view! { <HazardBar hazard=hazard view=view /> })
                    .collect_view()}
            </div>
            <SummaryPanel view=view />
            <button class="reset-button" on:click=on_reset>
                "Reset"
            </button>
        </aside>
    }
}

#[component]
fn HazardBar(hazard: Hazard, view: Memo<DashboardView>) -> impl IntoView {
    let bar = Memo::new(move |_| view.with(|v| v.bar(hazard).clone()));
    let id = hazard.dom_id();

    view! {
        <div class="hazard" id=format!("hazard-{id}")>
            <div class="bar-track">
                <div
                    class="bar-fill"
                    class:glow=move || bar.with(|b| b.state.glow)
                    class:loading=move || bar.with(|b| b.loading)
                    id=format!("fill-{id}")
                    style=move || bar.with(fill_style)
                >
                    <Show when=move || bar.with(|b| b.label.is_some())>
                        <span class="bar-label">
                            {move || bar.with(|b| b.label.clone().unwrap_or_default())}
                        </span>
                    </Show>
                </div>
            </div>
            <div class="hazard-name">{hazard.label()}</div>
            <div class="hazard-count" id=format!("count-{id}")>
                {move || bar.with(|b| b.count_text.clone())}
            </div>
            <div
                class=move || {
                    bar.with(|b| match &b.badge {
                        Some(badge) => format!("risk-badge {}", badge.class_name),
                        None => "risk-badge".to_string(),
                    })
                }
                id=format!("risk-{id}")
            >
                {move || bar.with(|b| b.badge.as_ref().map(|badge| badge.text.clone()))}
            </div>
            <Show when=move || bar.with(|b| b.message.is_some())>
                <div class="hazard-message">
                    {move || bar.with(|b| b.message.clone().unwrap_or_default())}
                </div>
            </Show>
        </div>
    }
}

#[component]
fn SummaryPanel(view: Memo<DashboardView>) -> impl IntoView {
    let summary = Memo::new(move |_| view.with(|v| v.summary.clone()));

    view! {
        <Show when=move || summary.with(Option::is_some)>
            <div class="risk-summary" id="risk-summary">
                {move || {
                    summary
                        .with(|s| s.as_ref().and_then(|s| s.headline.clone()))
                        .map(|headline| {
                            view! {
                                <div class=format!("summary-headline {}", headline.class_name)>
                                    {headline.text}
                                </div>
                            }
                        })
                }}
                {move || {
                    summary
                        .with(|s| s.as_ref().and_then(|s| s.message.clone()))
                        .map(|message| view! { <div class="summary-message">{message}</div> })
                }}
            </div>
        </Show>
    }
}

#[component]
fn LocationLine(view: Memo<DashboardView>) -> impl IntoView {
    let location = Memo::new(move |_| view.with(|v| v.location.clone()));

    view! {
        <Show when=move || location.with(Option::is_some)>
            <div class="location-display" id="location-display">
                {move || format!("📍 {}", location.get().unwrap_or_default())}
            </div>
        </Show>
    }
}

/// Dismissible error banner, fed by `show_error`.
#[component]
pub fn ErrorToast() -> impl IntoView {
    let ErrorBanner(banner) = expect_context();

    view! {
        <Show when=move || banner.with(Option::is_some)>
            <div class="error-banner" role="alert">
                <span>{move || banner.get().unwrap_or_default()}</span>
                <button class="error-dismiss" on:click=move |_| dismiss_error(banner)>
                    "×"
                </button>
            </div>
        </Show>
    }
}

/// Shown while the last health probe failed.
#[component]
pub fn ServerDownBanner() -> impl IntoView {
    let ServerHealth(health) = expect_context();

    view! {
        <Show when=move || health.get() == ServerStatus::Down>
            <div class="server-status" id="server-status">
                "⚠️ Prediction server is offline. Predictions will fail until it is back."
            </div>
        </Show>
    }
}

#[cfg(test)]
mod tests {
    use super::fill_style;
    use disasterscope_shared::Hazard;
    use disasterscope_shared::projection::BarView;

    #[test]
    fn reset_bar_is_empty_and_faded() {
        let style = fill_style(&BarView::reset(Hazard::Flood));
        assert!(style.contains("height: 0%"));
        assert!(style.contains("min-height: 0px"));
        assert!(style.contains("opacity: 0.3"));
    }

    #[test]
    fn loading_bar_is_grey() {
        let style = fill_style(&BarView::loading(Hazard::Wildfire));
        assert!(style.contains("height: 5%"));
        assert!(style.contains("background-color: #666"));
    }
}
