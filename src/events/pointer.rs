use super::Listener;
use crate::constants::{EV_POINTER_LEAVE, EV_POINTER_MOVE};
use crate::widget::Inner;
use std::rc::Rc;
use web_sys as web;

/// Wire move (and, when resetting on leave, leave) on the pointer-source
/// region.
pub(crate) fn wire_pointer(inner: &Rc<Inner>) -> Vec<Listener> {
    let target: &web::EventTarget = inner.pointer_source.as_ref();
    let mut out = Vec::with_capacity(2);

    let weak = Rc::downgrade(inner);
    out.extend(Listener::attach(target, EV_POINTER_MOVE, move |ev: web::PointerEvent| {
        if let Some(inner) = weak.upgrade() {
            inner.pointer_moved(&ev);
        }
    }));

    if inner.effect.borrow().options().reset_on_leave {
        let weak = Rc::downgrade(inner);
        out.extend(Listener::attach(target, EV_POINTER_LEAVE, move |_: web::PointerEvent| {
            if let Some(inner) = weak.upgrade() {
                inner.pointer_left();
            }
        }));
    }

    out
}
