use std::cell::{Cell, RefCell};
use std::time::Duration;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// One `requestAnimationFrame` slot with a reusable callback.
///
/// At most one frame is outstanding; `request` while one is pending is a
/// no-op. The callback must call [`AnimationFrame::fired`] before doing its
/// work so the next request can go through.
#[derive(Default)]
pub struct AnimationFrame {
    id: Cell<Option<i32>>,
    callback: RefCell<Option<Closure<dyn FnMut()>>>,
}

impl AnimationFrame {
    pub fn set_callback(&self, f: impl FnMut() + 'static) {
        *self.callback.borrow_mut() = Some(Closure::wrap(Box::new(f) as Box<dyn FnMut()>));
    }

    pub fn request(&self) {
        if self.id.get().is_some() {
            return;
        }
        let Some(w) = web::window() else { return };
        if let Some(cb) = self.callback.borrow().as_ref() {
            match w.request_animation_frame(cb.as_ref().unchecked_ref()) {
                Ok(id) => self.id.set(Some(id)),
                Err(e) => log::error!("requestAnimationFrame failed: {:?}", e),
            }
        }
    }

    #[inline]
    pub fn fired(&self) {
        self.id.set(None);
    }

    pub fn cancel(&self) {
        if let Some(id) = self.id.take() {
            if let Some(w) = web::window() {
                _ = w.cancel_animation_frame(id);
            }
        }
    }

    /// Cancel and release the JS callback.
    pub fn clear(&self) {
        self.cancel();
        self.callback.borrow_mut().take();
    }
}

/// One `setTimeout` slot. Scheduling again restarts the delay.
#[derive(Default)]
pub struct Timeout {
    id: Cell<Option<i32>>,
    callback: RefCell<Option<Closure<dyn FnMut()>>>,
}

impl Timeout {
    pub fn set_callback(&self, f: impl FnMut() + 'static) {
        *self.callback.borrow_mut() = Some(Closure::wrap(Box::new(f) as Box<dyn FnMut()>));
    }

    pub fn schedule(&self, delay: Duration) {
        self.cancel();
        let Some(w) = web::window() else { return };
        let ms = delay.as_millis().min(i32::MAX as u128) as i32;
        if let Some(cb) = self.callback.borrow().as_ref() {
            match w.set_timeout_with_callback_and_timeout_and_arguments_0(
                cb.as_ref().unchecked_ref(),
                ms,
            ) {
                Ok(id) => self.id.set(Some(id)),
                Err(e) => log::error!("setTimeout failed: {:?}", e),
            }
        }
    }

    #[inline]
    pub fn fired(&self) {
        self.id.set(None);
    }

    pub fn cancel(&self) {
        if let Some(id) = self.id.take() {
            if let Some(w) = web::window() {
                w.clear_timeout_with_handle(id);
            }
        }
    }

    pub fn clear(&self) {
        self.cancel();
        self.callback.borrow_mut().take();
    }
}
