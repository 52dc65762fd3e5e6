use crate::dom;
use crate::events::{self, Listener};
use crate::frame::{AnimationFrame, Timeout};
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use tilt_core::{Throttle, TiltEffect, TiltOptions, TransformBatch, ViewportBounds};
use wasm_bindgen::prelude::*;
use web_sys as web;

/// State shared between the handle and its event callbacks. Callbacks hold
/// `Weak` references, so dropping the handle frees everything.
pub(crate) struct Inner {
    pub effect: RefCell<TiltEffect>,
    pub wrapper: web::HtmlElement,
    pub layers: Vec<web::HtmlElement>,
    pub pointer_source: web::Element,
    pub bounds_region: web::Element,
    pub frame: AnimationFrame,
    pub reset: Timeout,
    pub resize: RefCell<Throttle>,
}

impl Inner {
    fn apply(&self, batch: &TransformBatch) {
        for (slot, t) in batch {
            if let Some(el) = self.layers.get(*slot) {
                dom::set_transform(el, &t.to_css());
            }
        }
    }

    pub fn pointer_moved(&self, ev: &web::PointerEvent) {
        let sample = dom::pointer_offset(ev, &self.wrapper);
        if self.effect.borrow_mut().pointer_moved(sample) {
            self.frame.request();
        }
    }

    pub fn pointer_left(&self) {
        let delay = self.effect.borrow().pointer_left();
        if let Some(delay) = delay {
            self.reset.schedule(delay);
        }
    }

    pub fn window_resized(&self) {
        if self.resize.borrow_mut().allow(Instant::now()) {
            let bounds = dom::measure(&self.bounds_region);
            self.effect.borrow_mut().set_bounds(bounds);
        }
    }

    fn on_frame(&self) {
        self.frame.fired();
        let batch = self.effect.borrow_mut().frame();
        if let Some(batch) = batch {
            self.apply(&batch);
        }
    }

    fn on_reset(&self) {
        self.reset.fired();
        let batch = self.effect.borrow_mut().reset();
        self.apply(&batch);
    }

    fn shutdown(&self) {
        self.frame.clear();
        self.reset.clear();
        self.effect.borrow_mut().cancel_pending();
    }
}

/// A tilt effect bound to one image.
///
/// Construction replaces the image with the layered structure and starts
/// listening for pointer and resize events. `destroy` (or dropping the
/// handle, e.g. `free()` from JavaScript) detaches the listeners and cancels
/// any pending frame or reset; the layered structure stays in the document.
#[wasm_bindgen]
pub struct TiltFx {
    inner: Rc<Inner>,
    listeners: Vec<Listener>,
    destroyed: bool,
}

impl TiltFx {
    pub fn from_image(img: &web::HtmlImageElement, options: TiltOptions) -> anyhow::Result<Self> {
        let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;

        let mut effect = TiltEffect::new(options, ViewportBounds::default());
        let structure = dom::build_structure(&document, img, effect.stack())?;

        let selectors = effect.options().selectors.clone();
        let bounds_region =
            dom::resolve_region(&document, selectors.bounds(), &structure.wrapper);
        let pointer_source =
            dom::resolve_region(&document, selectors.pointer_source(), &structure.wrapper);
        effect.set_bounds(dom::measure(&bounds_region));

        let throttle = Throttle::from_millis(effect.options().timing.resize_throttle_ms);
        let inner = Rc::new(Inner {
            effect: RefCell::new(effect),
            wrapper: structure.wrapper,
            layers: structure.layers,
            pointer_source,
            bounds_region,
            frame: AnimationFrame::default(),
            reset: Timeout::default(),
            resize: RefCell::new(throttle),
        });

        let weak = Rc::downgrade(&inner);
        inner.frame.set_callback(move || {
            if let Some(inner) = weak.upgrade() {
                inner.on_frame();
            }
        });
        let weak = Rc::downgrade(&inner);
        inner.reset.set_callback(move || {
            if let Some(inner) = weak.upgrade() {
                inner.on_reset();
            }
        });

        let mut listeners = events::pointer::wire_pointer(&inner);
        listeners.extend(events::resize::wire_resize(&inner));

        {
            let e = inner.effect.borrow();
            let b = e.bounds();
            log::info!(
                "[tilt] created: layers={} moving={} bounds={}x{}",
                e.layers().len(),
                e.stack().moving_count(),
                b.width,
                b.height
            );
        }

        Ok(Self {
            inner,
            listeners,
            destroyed: false,
        })
    }

    fn teardown(&mut self) {
        if self.destroyed {
            return;
        }
        self.destroyed = true;
        self.listeners.clear();
        self.inner.shutdown();
        log::info!("[tilt] destroyed");
    }
}

#[wasm_bindgen]
impl TiltFx {
    /// `new TiltFx(img, options?)`; `options` is an object or a JSON string.
    #[wasm_bindgen(constructor)]
    pub fn new(img: web::HtmlImageElement, options: JsValue) -> Result<TiltFx, JsValue> {
        let options = options_from_js(&options).map_err(to_js_error)?;
        Self::from_image(&img, options).map_err(to_js_error)
    }

    /// Number of layers that follow the pointer.
    #[wasm_bindgen(js_name = layerCount)]
    pub fn layer_count(&self) -> u32 {
        self.inner.effect.borrow().stack().moving_count() as u32
    }

    /// The synthesized container element.
    #[wasm_bindgen(getter)]
    pub fn element(&self) -> web::HtmlElement {
        self.inner.wrapper.clone()
    }

    pub fn destroy(&mut self) {
        self.teardown();
    }
}

impl Drop for TiltFx {
    fn drop(&mut self) {
        self.teardown();
    }
}

pub(crate) fn options_from_js(value: &JsValue) -> anyhow::Result<TiltOptions> {
    if value.is_undefined() || value.is_null() {
        return Ok(TiltOptions::default());
    }
    let json = match value.as_string() {
        Some(s) => s,
        None => js_sys::JSON::stringify(value)
            .map_err(|e| anyhow::anyhow!("{:?}", e))?
            .into(),
    };
    Ok(TiltOptions::from_json(&json)?)
}

#[inline]
pub(crate) fn to_js_error(e: anyhow::Error) -> JsValue {
    js_sys::Error::new(&format!("{:#}", e)).into()
}
