#![cfg(target_arch = "wasm32")]
use crate::constants::{EFFECT_SELECTOR, EV_DOM_READY, OPTIONS_ATTRIBUTE};
use std::cell::RefCell;
use tilt_core::TiltOptions;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys as web;

mod constants;
mod dom;
mod events;
mod frame;
mod widget;

pub use widget::TiltFx;

thread_local! {
    // Widgets created by the batch scan live for the page lifetime.
    static ACTIVE: RefCell<Vec<TiltFx>> = const { RefCell::new(Vec::new()) };
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("tiltfx starting");

    let document = dom::window_document().ok_or_else(|| JsValue::from_str("no document"))?;
    if document.ready_state() == "loading" {
        let ready = Closure::wrap(Box::new(move || {
            if let Err(e) = activate_marked() {
                log::error!("init error: {:?}", e);
            }
        }) as Box<dyn FnMut()>);
        _ = document.add_event_listener_with_callback(EV_DOM_READY, ready.as_ref().unchecked_ref());
        ready.forget();
    } else if let Err(e) = activate_marked() {
        log::error!("init error: {:?}", e);
    }
    Ok(())
}

/// Scan the document for `img.tilt-effect` and attach a widget to each.
/// Returns how many widgets were created. Already converted images are gone
/// from the document, so calling this again only picks up new ones.
#[wasm_bindgen(js_name = initAll)]
pub fn init_all() -> Result<u32, JsValue> {
    activate_marked().map_err(widget::to_js_error)
}

fn activate_marked() -> anyhow::Result<u32> {
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
    let found = document
        .query_selector_all(EFFECT_SELECTOR)
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;

    let mut created = 0;
    for i in 0..found.length() {
        let Some(img) = found
            .item(i)
            .and_then(|n| n.dyn_into::<web::HtmlImageElement>().ok())
        else {
            continue;
        };

        let options = match img.get_attribute(OPTIONS_ATTRIBUTE) {
            None => TiltOptions::default(),
            Some(json) => match TiltOptions::from_json(&json) {
                Ok(o) => o,
                Err(e) => {
                    log::warn!("[tilt] skipping {}: {}", img.src(), e);
                    continue;
                }
            },
        };

        match TiltFx::from_image(&img, options) {
            Ok(fx) => {
                ACTIVE.with(|a| a.borrow_mut().push(fx));
                created += 1;
            }
            Err(e) => log::error!("[tilt] {}: {:?}", img.src(), e),
        }
    }

    log::info!("[tilt] activated {} of {} marked images", created, found.length());
    Ok(created)
}
