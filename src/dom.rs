use crate::constants::*;
use tilt_core::{LayerRole, LayerStack, PointerSample, ViewportBounds};
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

/// Container plus one element per layer, in stack order.
pub struct Structure {
    pub wrapper: web::HtmlElement,
    pub layers: Vec<web::HtmlElement>,
}

fn create_div(document: &web::Document, class: &str) -> anyhow::Result<web::HtmlElement> {
    let el = document
        .create_element("div")
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    el.set_class_name(class);
    el.dyn_into::<web::HtmlElement>()
        .map_err(|e| anyhow::anyhow!("{:?}", e))
}

#[inline]
fn css_url(src: &str) -> String {
    format!("url(\"{}\")", src.replace('\\', "\\\\").replace('"', "\\\""))
}

/// Build the tilt structure for `img` and swap it into the image's place.
pub fn build_structure(
    document: &web::Document,
    img: &web::HtmlImageElement,
    stack: &LayerStack,
) -> anyhow::Result<Structure> {
    let parent = img
        .parent_node()
        .ok_or_else(|| anyhow::anyhow!("source image is not attached to the document"))?;

    let wrapper = create_div(document, WRAPPER_CLASS)?;
    let background = css_url(&img.src());

    let mut layers = Vec::with_capacity(stack.layers().len());
    for layer in stack.layers() {
        let class = match layer.role {
            LayerRole::Back => BACK_LAYER_CLASS,
            LayerRole::Front => FRONT_LAYER_CLASS,
        };
        let el = create_div(document, class)?;
        _ = el
            .style()
            .set_property(STYLE_BACKGROUND_IMAGE, &background);
        if let Some(opacity) = layer.opacity {
            set_opacity(&el, opacity);
        }
        wrapper
            .append_child(&el)
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;
        layers.push(el);
    }

    let img_node: &web::Node = img;
    parent
        .insert_before(&wrapper, Some(img_node))
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    parent
        .remove_child(img_node)
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;

    Ok(Structure { wrapper, layers })
}

/// Resolve an optional selector, falling back to `fallback` when the
/// selector is absent, invalid, or matches nothing.
pub fn resolve_region(
    document: &web::Document,
    selector: Option<&str>,
    fallback: &web::HtmlElement,
) -> web::Element {
    let Some(selector) = selector else {
        return fallback.clone().into();
    };
    match document.query_selector(selector) {
        Ok(Some(el)) => el,
        Ok(None) => {
            log::warn!("[tilt] no element matches {:?}; using the tilt container", selector);
            fallback.clone().into()
        }
        Err(e) => {
            log::warn!("[tilt] invalid selector {:?}: {:?}", selector, e);
            fallback.clone().into()
        }
    }
}

/// Layout size of `el` (offset size for HTML elements, box size otherwise).
pub fn measure(el: &web::Element) -> ViewportBounds {
    match el.dyn_ref::<web::HtmlElement>() {
        Some(h) => ViewportBounds::new(h.offset_width() as f32, h.offset_height() as f32),
        None => {
            let rect = el.get_bounding_client_rect();
            ViewportBounds::new(rect.width() as f32, rect.height() as f32)
        }
    }
}

/// Pointer position relative to the top-left corner of `el`.
#[inline]
pub fn pointer_offset(ev: &web::PointerEvent, el: &web::Element) -> PointerSample {
    let rect = el.get_bounding_client_rect();
    PointerSample::new(
        (ev.client_x() as f64 - rect.left()) as f32,
        (ev.client_y() as f64 - rect.top()) as f32,
    )
}

#[inline]
pub fn set_transform(el: &web::HtmlElement, css: &str) {
    let style = el.style();
    _ = style.set_property(STYLE_TRANSFORM_WEBKIT, css);
    _ = style.set_property(STYLE_TRANSFORM, css);
}

#[inline]
pub fn set_opacity(el: &web::HtmlElement, opacity: f32) {
    _ = el
        .style()
        .set_property(STYLE_OPACITY, &opacity.to_string());
}
