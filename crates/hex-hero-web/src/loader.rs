use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use hex_hero::{ImageHandle, ImageLoader, LoadError, LoadTicket};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::HtmlImageElement;

/// Decoded images by handle id, shared between the loader and the canvas surface.
pub type ImageStore = Rc<RefCell<HashMap<u32, HtmlImageElement>>>;

/// An image still owned by the loader, with the callbacks attached to it.
/// Dropping this frees both callbacks.
struct PendingImage {
    img: HtmlImageElement,
    _onload: Closure<dyn FnMut()>,
    _onerror: Closure<dyn FnMut()>,
}

impl PendingImage {
    fn detach(&self) {
        self.img.set_onload(None);
        self.img.set_onerror(None);
    }
}

/// [`ImageLoader`] on top of `HtmlImageElement`.
///
/// The loader owns every request's `onload`/`onerror` closures. A callback
/// that fired only marks its request finished; the entry is dropped on the
/// next `request` or `reset`, never while its own closure is running.
/// `reset` detaches and frees every request still in flight, so a discarded
/// pool leaves nothing behind.
pub struct DomImageLoader {
    images: ImageStore,
    pending: HashMap<u32, PendingImage>,
    finished: Rc<RefCell<Vec<u32>>>,
    next_id: u32,
}

impl DomImageLoader {
    pub fn new() -> Self {
        Self {
            images: Rc::new(RefCell::new(HashMap::new())),
            pending: HashMap::new(),
            finished: Rc::new(RefCell::new(Vec::new())),
            next_id: 1,
        }
    }

    /// Store handed to the canvas surface.
    pub fn images(&self) -> ImageStore {
        self.images.clone()
    }

    fn on_load(&self, id: u32, ticket: LoadTicket, img: HtmlImageElement) -> Closure<dyn FnMut()> {
        let images = self.images.clone();
        let finished = self.finished.clone();
        Closure::wrap(Box::new(move || {
            finished.borrow_mut().push(id);
            let handle = ImageHandle::new(id, img.natural_width() as f32, img.natural_height() as f32);
            images.borrow_mut().insert(id, img.clone());
            let applied = crate::with_runner(|r| r.complete_load(ticket, Ok(handle))).unwrap_or(false);
            if !applied {
                images.borrow_mut().remove(&id);
            }
        }) as Box<dyn FnMut()>)
    }

    fn on_error(&self, id: u32, ticket: LoadTicket, url: String) -> Closure<dyn FnMut()> {
        let finished = self.finished.clone();
        Closure::wrap(Box::new(move || {
            finished.borrow_mut().push(id);
            let err = LoadError::new(url.clone(), "image element reported an error");
            crate::with_runner(|r| r.complete_load(ticket, Err(err)));
        }) as Box<dyn FnMut()>)
    }

    /// Free the callbacks of requests that already completed.
    fn sweep(&mut self) {
        for id in self.finished.borrow_mut().drain(..) {
            if let Some(entry) = self.pending.remove(&id) {
                entry.detach();
            }
        }
    }
}

impl Default for DomImageLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageLoader for DomImageLoader {
    fn request(&mut self, ticket: LoadTicket, url: &str) {
        self.sweep();
        let img = match HtmlImageElement::new() {
            Ok(img) => img,
            Err(err) => {
                log::warn!("could not create image element for {url}: {err:?}");
                return;
            }
        };
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);

        let onload = self.on_load(id, ticket, img.clone());
        let onerror = self.on_error(id, ticket, url.to_string());
        img.set_onload(Some(onload.as_ref().unchecked_ref()));
        img.set_onerror(Some(onerror.as_ref().unchecked_ref()));
        img.set_src(url);
        self.pending.insert(id, PendingImage { img, _onload: onload, _onerror: onerror });
    }

    fn reset(&mut self) {
        self.finished.borrow_mut().clear();
        for (_, entry) in self.pending.drain() {
            entry.detach();
            // Stop the download as well.
            entry.img.set_src("");
        }
        self.images.borrow_mut().clear();
    }
}
