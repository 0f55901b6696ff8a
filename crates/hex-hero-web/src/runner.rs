use std::cell::RefCell;
use std::rc::Rc;
use glam::Vec2;
use hex_hero::{
    Catalog, HeroConfig, HexHero, ImageHandle, InputEvent, LoadError, LoadTicket, SurfaceRect,
};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, Document, Event, EventTarget, HtmlCanvasElement, HtmlElement, Window};
use crate::canvas::CanvasSurface;
use crate::loader::DomImageLoader;
use crate::overlay;

/// The animation-frame callback, shared with itself so it can reschedule.
pub type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// A DOM listener kept alive until unmount, then removed.
pub struct Listener {
    target: EventTarget,
    kind: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl Listener {
    pub fn attach(
        target: &EventTarget,
        kind: &'static str,
        handler: impl FnMut(Event) + 'static,
    ) -> Result<Self, JsValue> {
        let callback = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
        target.add_event_listener_with_callback(kind, callback.as_ref().unchecked_ref())?;
        Ok(Self {
            target: target.clone(),
            kind,
            callback,
        })
    }

    fn detach(&self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.kind, self.callback.as_ref().unchecked_ref());
    }
}

/// Wires a [`HexHero`] to a canvas, the overlay element, and the frame loop.
///
/// Lives in a `thread_local!` (see `lib.rs`) because wasm-bindgen callbacks
/// cannot borrow from Rust stack frames.
pub struct HeroRunner {
    hero: HexHero<DomImageLoader>,
    surface: CanvasSurface,
    canvas: HtmlCanvasElement,
    document: Document,
    tooltip: Option<HtmlElement>,
    rendered_revision: u32,
    listeners: Vec<Listener>,
    frame_loop: Option<FrameCallback>,
    frame_request: Option<i32>,
}

impl HeroRunner {
    pub fn new(
        window: &Window,
        canvas: HtmlCanvasElement,
        tooltip: Option<HtmlElement>,
        config: HeroConfig,
        catalog: Catalog,
    ) -> Result<Self, JsValue> {
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("no 2d context"))?
            .dyn_into()?;

        let viewport = window_size(window)?;
        canvas.set_width(viewport.x as u32);
        canvas.set_height(viewport.y as u32);

        let loader = DomImageLoader::new();
        let surface = CanvasSurface::new(ctx, loader.images());
        let seed = (js_sys::Math::random() * u32::MAX as f64) as u64;
        let mut hero = HexHero::new(config, catalog, loader, viewport, seed);
        hero.set_client_viewport(viewport);

        Ok(Self {
            hero,
            surface,
            canvas,
            document,
            tooltip,
            rendered_revision: 0,
            listeners: Vec::new(),
            frame_loop: None,
            frame_request: None,
        })
    }

    /// Advance and draw one frame, then bring the overlay up to date.
    /// Returns whether another frame should be requested.
    pub fn frame(&mut self) -> bool {
        let running = self.hero.frame(&mut self.surface);
        if let Err(err) = self.sync_tooltip() {
            log::warn!("tooltip update failed: {err:?}");
        }
        running
    }

    pub fn pointer_move(&mut self, client_x: f32, client_y: f32) {
        let rect = self.canvas.get_bounding_client_rect();
        self.hero.set_surface_rect(SurfaceRect::new(
            rect.left() as f32,
            rect.top() as f32,
            rect.width() as f32,
            rect.height() as f32,
        ));
        self.hero.push_input(InputEvent::PointerMove { client_x, client_y });
    }

    pub fn pointer_leave(&mut self) {
        self.hero.push_input(InputEvent::PointerLeave);
    }

    /// Match the backing store to the new window size; the pool is rebuilt
    /// on the next frame.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.canvas.set_width(width as u32);
        self.canvas.set_height(height as u32);
        self.hero.set_client_viewport(Vec2::new(width, height));
        self.hero.push_input(InputEvent::Resize { width, height });
    }

    pub fn set_catalog(&mut self, catalog: Catalog) {
        self.hero.set_catalog(catalog);
    }

    pub fn complete_load(&mut self, ticket: LoadTicket, result: Result<ImageHandle, LoadError>) -> bool {
        self.hero.complete_load(ticket, result)
    }

    pub fn set_listeners(&mut self, listeners: Vec<Listener>) {
        self.listeners = listeners;
    }

    pub fn set_frame_loop(&mut self, frame_loop: FrameCallback) {
        self.frame_loop = Some(frame_loop);
    }

    pub fn set_frame_request(&mut self, id: Option<i32>) {
        self.frame_request = id;
    }

    /// Cancel the pending frame, remove listeners, and stop the field.
    pub fn teardown(&mut self, window: &Window) {
        if let Some(id) = self.frame_request.take() {
            let _ = window.cancel_animation_frame(id);
        }
        for listener in self.listeners.drain(..) {
            listener.detach();
        }
        // Breaks the callback's reference to itself.
        if let Some(frame_loop) = self.frame_loop.take() {
            frame_loop.borrow_mut().take();
        }
        self.hero.teardown();
        if let Some(el) = &self.tooltip {
            let _ = el.style().set_property("display", "none");
        }
    }

    fn sync_tooltip(&mut self) -> Result<(), JsValue> {
        let Some(el) = &self.tooltip else {
            return Ok(());
        };
        if self.hero.tooltip().revision == self.rendered_revision {
            return Ok(());
        }

        overlay::render_content(&self.document, el, self.hero.tooltip(), &self.hero.config().tooltip)?;
        if self.hero.tooltip().visible {
            self.hero.remeasure_tooltip(el.offset_height() as f32);
            overlay::place(el, self.hero.tooltip())?;
        }
        self.rendered_revision = self.hero.tooltip().revision;
        Ok(())
    }
}

/// Inner size of the browser window in CSS pixels.
pub fn window_size(window: &Window) -> Result<Vec2, JsValue> {
    let width = window.inner_width()?.as_f64().unwrap_or(0.0);
    let height = window.inner_height()?.as_f64().unwrap_or(0.0);
    Ok(Vec2::new(width as f32, height as f32))
}
