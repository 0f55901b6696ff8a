pub mod canvas;
pub mod loader;
pub mod overlay;
pub mod runner;

use std::cell::RefCell;
use std::rc::Rc;
use hex_hero::{Catalog, HeroConfig};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Event, HtmlCanvasElement, HtmlElement, MouseEvent, Window};

pub use runner::HeroRunner;
use runner::{FrameCallback, Listener};

thread_local! {
    static RUNNER: RefCell<Option<HeroRunner>> = const { RefCell::new(None) };
}

/// Run `f` against the mounted runner. `None` when nothing is mounted, which
/// is how late DOM and image callbacks find out the field is gone.
pub(crate) fn with_runner<R>(f: impl FnOnce(&mut HeroRunner) -> R) -> Option<R> {
    RUNNER.with(|cell| cell.borrow_mut().as_mut().map(f))
}

fn window() -> Result<Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("no window"))
}

fn parse_error(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Mount the hexagon field on the canvas `canvas_id`, with the overlay in
/// `tooltip_id` (may be empty for no overlay).
///
/// `catalog_json`: `{ "image_urls": [...], "products": { url: { "health_score": n } }, "info": { url: text } }`.
/// `config_json`: any subset of the config fields, or `{}`.
/// Mounting again replaces the previous field.
#[wasm_bindgen]
pub fn hero_mount(
    canvas_id: &str,
    tooltip_id: &str,
    catalog_json: &str,
    config_json: &str,
) -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    hero_unmount();

    let window = window()?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let canvas: HtmlCanvasElement = document
        .get_element_by_id(canvas_id)
        .ok_or_else(|| JsValue::from_str(&format!("no element #{canvas_id}")))?
        .dyn_into()?;
    let tooltip = document
        .get_element_by_id(tooltip_id)
        .and_then(|el| el.dyn_into::<HtmlElement>().ok());

    let config = HeroConfig::from_json(config_json).map_err(parse_error)?;
    let catalog = Catalog::from_json(catalog_json).map_err(parse_error)?;
    let runner = HeroRunner::new(&window, canvas.clone(), tooltip, config, catalog)?;
    RUNNER.with(|cell| *cell.borrow_mut() = Some(runner));

    let listeners = attach_listeners(&window, &canvas)?;
    with_runner(|r| r.set_listeners(listeners));
    start_loop(&window)?;

    log::info!("hex-hero: mounted on #{canvas_id}");
    Ok(())
}

/// Replace the catalog. The pool is rebuilt.
#[wasm_bindgen]
pub fn hero_set_catalog(catalog_json: &str) -> Result<(), JsValue> {
    let catalog = Catalog::from_json(catalog_json).map_err(parse_error)?;
    with_runner(|r| r.set_catalog(catalog));
    Ok(())
}

/// Tear the field down: cancel the frame loop, remove listeners, detach
/// pending image loads. Safe to call when nothing is mounted.
#[wasm_bindgen]
pub fn hero_unmount() {
    let Some(mut runner) = RUNNER.with(|cell| cell.borrow_mut().take()) else {
        return;
    };
    if let Ok(window) = window() {
        runner.teardown(&window);
    }
    log::info!("hex-hero: unmounted");
}

// ---- Input forwarding, for hosts that drive events themselves ----

#[wasm_bindgen]
pub fn hero_pointer_move(client_x: f32, client_y: f32) {
    with_runner(|r| r.pointer_move(client_x, client_y));
}

#[wasm_bindgen]
pub fn hero_pointer_leave() {
    with_runner(|r| r.pointer_leave());
}

#[wasm_bindgen]
pub fn hero_resize(width: f32, height: f32) {
    with_runner(|r| r.resize(width, height));
}

fn attach_listeners(window: &Window, canvas: &HtmlCanvasElement) -> Result<Vec<Listener>, JsValue> {
    let mouse_move = Listener::attach(canvas, "mousemove", |event: Event| {
        if let Some(event) = event.dyn_ref::<MouseEvent>() {
            hero_pointer_move(event.client_x() as f32, event.client_y() as f32);
        }
    })?;

    let mouse_leave = Listener::attach(canvas, "mouseleave", |_event: Event| {
        hero_pointer_leave();
    })?;

    let resize = Listener::attach(window, "resize", |_event: Event| {
        let Some(window) = web_sys::window() else {
            return;
        };
        match runner::window_size(&window) {
            Ok(size) => hero_resize(size.x, size.y),
            Err(err) => log::warn!("could not read window size: {err:?}"),
        }
    })?;

    Ok(vec![mouse_move, mouse_leave, resize])
}

fn start_loop(window: &Window) -> Result<(), JsValue> {
    let f: FrameCallback = Rc::new(RefCell::new(None));
    let g = f.clone();

    *g.borrow_mut() = Some(Closure::wrap(Box::new(move |_ts: f64| {
        if !with_runner(|r| r.frame()).unwrap_or(false) {
            return;
        }
        let request = web_sys::window().and_then(|w| {
            f.borrow()
                .as_ref()
                .and_then(|cb| w.request_animation_frame(cb.as_ref().unchecked_ref()).ok())
        });
        with_runner(|r| r.set_frame_request(request));
    }) as Box<dyn FnMut(f64)>));

    let request = match g.borrow().as_ref() {
        Some(cb) => Some(window.request_animation_frame(cb.as_ref().unchecked_ref())?),
        None => None,
    };
    with_runner(|r| {
        r.set_frame_loop(g.clone());
        r.set_frame_request(request);
    });
    Ok(())
}
