use super::Listener;
use crate::constants::EV_RESIZE;
use crate::widget::Inner;
use std::rc::Rc;
use web_sys as web;

/// Re-measure the bounds region on window resize (throttled by the widget).
pub(crate) fn wire_resize(inner: &Rc<Inner>) -> Option<Listener> {
    let window = web::window()?;
    let weak = Rc::downgrade(inner);
    Listener::attach(window.as_ref(), EV_RESIZE, move |_: web::Event| {
        if let Some(inner) = weak.upgrade() {
            inner.window_resized();
        }
    })
}
