use std::cell::{Cell, RefCell};
use std::rc::Rc;

use leptos::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, PointerEvent, WheelEvent};

use disasterscope_shared::{Coordinate, MarkerSurface};

use crate::api::{PredictHandles, predict_at};
use crate::app::MapView;
use crate::coastline::{LANDMASSES, landmass_at};
use crate::colors::{COAST, GLOBE, GRATICULE, LAND, MARKER, OCEAN, graticule_alpha, rgba_css};
use crate::config::{INITIAL_CENTER, INITIAL_ZOOM};
use crate::render_loop::RedrawScheduler;
use crate::viewport::GeoViewport;

/// Pointer travel (px) under which a press counts as a click, not a drag.
const CLICK_SLOP_PX: f64 = 5.0;
const MARKER_RADIUS_PX: f64 = 7.0;
/// Landmass names are hidden below this scale (px per degree).
const LABEL_MIN_SCALE: f64 = 2.5;

struct ResizeBinding {
    window: web_sys::Window,
    handler: Closure<dyn Fn()>,
}

thread_local! {
    static RESIZE_BINDING: RefCell<Option<ResizeBinding>> = const { RefCell::new(None) };
}

/// Marker state for the map. Shared through context; the coordinator drives it.
#[derive(Clone, Copy)]
pub(crate) struct MapController(pub RwSignal<Option<Coordinate>>);

impl MarkerSurface for MapController {
    fn set_marker(&mut self, coord: Coordinate) {
        self.0.set(Some(coord));
    }

    fn clear_marker(&mut self) {
        self.0.set(None);
    }
}

#[component]
pub fn MapCanvas() -> impl IntoView {
    let MapView(viewport) = expect_context();
    let MapController(marker) = expect_context();
    let handles = PredictHandles::from_context();

    let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
    let centered = Rc::new(Cell::new(false));

    let is_dragging = Rc::new(Cell::new(false));
    let drag_start_x = Rc::new(Cell::new(0.0f64));
    let drag_start_y = Rc::new(Cell::new(0.0f64));
    let last_x = Rc::new(Cell::new(0.0f64));
    let last_y = Rc::new(Cell::new(0.0f64));

    let scheduler = RedrawScheduler::new(move || {
        let Some(canvas) = canvas_ref.get_untracked() else {
            return;
        };
        let canvas: &HtmlCanvasElement = &canvas;
        let Some(parent) = canvas.parent_element() else {
            return;
        };
        let w = parent.client_width() as f64;
        let h = parent.client_height() as f64;
        if w <= 0.0 || h <= 0.0 {
            return;
        }
        let dpr = web_sys::window()
            .map(|win| win.device_pixel_ratio())
            .unwrap_or(1.0)
            .max(1.0);
        let pw = (w * dpr).round() as u32;
        let ph = (h * dpr).round() as u32;
        if canvas.width() != pw || canvas.height() != ph {
            canvas.set_width(pw);
            canvas.set_height(ph);
        }

        if !centered.get() {
            centered.set(true);
            viewport.update_untracked(|vp| {
                vp.center_on(INITIAL_CENTER.0, INITIAL_CENTER.1, INITIAL_ZOOM, w, h);
            });
        }

        let Some(ctx) = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok())
        else {
            return;
        };
        // All drawing below is in CSS pixels.
        ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0).ok();

        let vp = viewport.get_untracked();
        draw_world(&ctx, &vp, w, h);
        if let Some(coord) = marker.get_untracked() {
            draw_marker(&ctx, &vp, coord);
        }
    });
    let scheduler = Rc::new(scheduler);

    let sched_vp = scheduler.clone();
    Effect::new(move || {
        viewport.track();
        marker.track();
        sched_vp.mark_dirty();
    });

    // Window resizes change the canvas box without touching any signal.
    bind_resize(scheduler.clone());

    // --- Input handlers ---

    let on_wheel = move |e: WheelEvent| {
        e.prevent_default();
        let delta = e.delta_y();
        let x = e.offset_x() as f64;
        let y = e.offset_y() as f64;
        viewport.update(|vp| vp.zoom_at(delta, x, y));
    };

    let on_pointer_down = {
        let is_dragging = is_dragging.clone();
        let drag_start_x = drag_start_x.clone();
        let drag_start_y = drag_start_y.clone();
        let last_x = last_x.clone();
        let last_y = last_y.clone();
        move |e: PointerEvent| {
            is_dragging.set(true);
            drag_start_x.set(e.client_x() as f64);
            drag_start_y.set(e.client_y() as f64);
            last_x.set(e.client_x() as f64);
            last_y.set(e.client_y() as f64);

            if let Some(target) = e.target()
                && let Ok(el) = target.dyn_into::<web_sys::HtmlElement>()
            {
                el.set_pointer_capture(e.pointer_id()).ok();
                el.style().set_property("cursor", "grabbing").ok();
            }
        }
    };

    let on_pointer_move = {
        let is_dragging = is_dragging.clone();
        let last_x = last_x.clone();
        let last_y = last_y.clone();
        move |e: PointerEvent| {
            if !is_dragging.get() {
                return;
            }
            let dx = e.client_x() as f64 - last_x.get();
            let dy = e.client_y() as f64 - last_y.get();
            last_x.set(e.client_x() as f64);
            last_y.set(e.client_y() as f64);
            viewport.update(|vp| vp.pan(dx, dy));
        }
    };

    let on_pointer_up = {
        let is_dragging = is_dragging.clone();
        move |e: PointerEvent| {
            is_dragging.set(false);
            if let Some(target) = e.target()
                && let Ok(el) = target.dyn_into::<web_sys::HtmlElement>()
            {
                el.style().set_property("cursor", "crosshair").ok();
            }
        }
    };

    let on_click = move |e: MouseEvent| {
        let dx = (e.client_x() as f64 - drag_start_x.get()).abs();
        let dy = (e.client_y() as f64 - drag_start_y.get()).abs();
        if dx >= CLICK_SLOP_PX || dy >= CLICK_SLOP_PX {
            return;
        }
        let local = canvas_ref
            .get_untracked()
            .map(|el| {
                let rect = el.get_bounding_client_rect();
                (
                    e.client_x() as f64 - rect.left(),
                    e.client_y() as f64 - rect.top(),
                )
            })
            .unwrap_or((e.offset_x() as f64, e.offset_y() as f64));
        let (latitude, longitude) = viewport.get_untracked().screen_to_geo(local.0, local.1);
        if let Some(name) = landmass_at(latitude, longitude) {
            web_sys::console::info_1(&format!("map click landmass={name}").into());
        }
        predict_at(handles, latitude, longitude);
    };

    view! {
        <div
            class="map-container"
            on:wheel=on_wheel
            on:pointerdown=on_pointer_down
            on:pointermove=on_pointer_move
            on:pointerup=on_pointer_up
            on:click=on_click
        >
            <canvas
                node_ref=canvas_ref
                style="position: absolute; inset: 0; width: 100%; height: 100%; touch-action: none; cursor: crosshair;"
            />
        </div>
    }
}

fn bind_resize(scheduler: Rc<RedrawScheduler>) {
    let Some(window) = web_sys::window() else {
        return;
    };
    RESIZE_BINDING.with(|slot| {
        if let Some(old) = slot.borrow_mut().take() {
            let _ = old
                .window
                .remove_event_listener_with_callback("resize", old.handler.as_ref().unchecked_ref());
        }
    });

    let handler = Closure::<dyn Fn()>::new(move || scheduler.mark_dirty());
    if window
        .add_event_listener_with_callback("resize", handler.as_ref().unchecked_ref())
        .is_err()
    {
        return;
    }
    RESIZE_BINDING.with(|slot| {
        *slot.borrow_mut() = Some(ResizeBinding {
            window: window.clone(),
            handler,
        });
    });
}

fn draw_world(ctx: &CanvasRenderingContext2d, vp: &GeoViewport, w: f64, h: f64) {
    ctx.set_fill_style_str(&rgba_css(OCEAN.0, OCEAN.1, OCEAN.2, 1.0));
    ctx.fill_rect(0.0, 0.0, w, h);

    let (x0, y0) = vp.geo_to_screen(90.0, -180.0);
    let (x1, y1) = vp.geo_to_screen(-90.0, 180.0);
    ctx.set_fill_style_str(&rgba_css(GLOBE.0, GLOBE.1, GLOBE.2, 1.0));
    ctx.fill_rect(x0, y0, x1 - x0, y1 - y0);

    draw_landmasses(ctx, vp);

    let step = graticule_step(vp.scale);
    ctx.set_line_width(1.0);

    let mut lng = -180;
    while lng <= 180 {
        let (x, _) = vp.geo_to_screen(0.0, lng as f64);
        if x >= 0.0 && x <= w {
            stroke_line(ctx, lng, (x, y0.max(0.0)), (x, y1.min(h)));
        }
        lng += step;
    }

    let mut lat = -90;
    while lat <= 90 {
        let (_, y) = vp.geo_to_screen(lat as f64, 0.0);
        if y >= 0.0 && y <= h {
            stroke_line(ctx, lat, (x0.max(0.0), y), (x1.min(w), y));
        }
        lat += step;
    }
}

fn draw_landmasses(ctx: &CanvasRenderingContext2d, vp: &GeoViewport) {
    ctx.set_fill_style_str(&rgba_css(LAND.0, LAND.1, LAND.2, 1.0));
    ctx.set_stroke_style_str(&rgba_css(COAST.0, COAST.1, COAST.2, 0.7));
    ctx.set_line_width(1.0);
    for land in LANDMASSES {
        let mut points = land.outline.iter();
        let Some(&(lat, lng)) = points.next() else {
            continue;
        };
        ctx.begin_path();
        let (x, y) = vp.geo_to_screen(lat, lng);
        ctx.move_to(x, y);
        for &(lat, lng) in points {
            let (x, y) = vp.geo_to_screen(lat, lng);
            ctx.line_to(x, y);
        }
        ctx.close_path();
        ctx.fill();
        ctx.stroke();
    }

    if vp.scale < LABEL_MIN_SCALE {
        return;
    }
    ctx.set_font("11px sans-serif");
    ctx.set_text_align("center");
    ctx.set_fill_style_str(&rgba_css(COAST.0, COAST.1, COAST.2, 0.85));
    for land in LANDMASSES {
        let (x, y) = vp.geo_to_screen(land.label.0, land.label.1);
        ctx.fill_text(land.name, x, y).ok();
    }
}

fn stroke_line(ctx: &CanvasRenderingContext2d, degrees: i32, from: (f64, f64), to: (f64, f64)) {
    let alpha = graticule_alpha(degrees);
    ctx.set_stroke_style_str(&rgba_css(GRATICULE.0, GRATICULE.1, GRATICULE.2, alpha));
    ctx.begin_path();
    ctx.move_to(from.0, from.1);
    ctx.line_to(to.0, to.1);
    ctx.stroke();
}

fn draw_marker(ctx: &CanvasRenderingContext2d, vp: &GeoViewport, coord: Coordinate) {
    let (x, y) = vp.geo_to_screen(coord.latitude(), coord.longitude());
    ctx.begin_path();
    if ctx
        .arc(x, y, MARKER_RADIUS_PX, 0.0, std::f64::consts::TAU)
        .is_err()
    {
        return;
    }
    ctx.set_fill_style_str(&rgba_css(MARKER.0, MARKER.1, MARKER.2, 0.9));
    ctx.fill();
    ctx.set_line_width(2.0);
    ctx.set_stroke_style_str("#ffffff");
    ctx.stroke();
}

/// Degrees between graticule lines so they stay roughly 40px or more apart.
fn graticule_step(scale: f64) -> i32 {
    const STEPS: [i32; 6] = [1, 2, 5, 10, 15, 30];
    STEPS
        .into_iter()
        .find(|&step| step as f64 * scale >= 40.0)
        .unwrap_or(30)
}
