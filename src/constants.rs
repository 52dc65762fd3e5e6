/// DOM naming for the tilt structure and the batch entry point.
///
/// The stylesheet targets these class names; the scan selector and option
/// attribute are the markup contract for automatic activation.
// Structure classes
pub const WRAPPER_CLASS: &str = "tilt";
pub const BACK_LAYER_CLASS: &str = "tilt__back";
pub const FRONT_LAYER_CLASS: &str = "tilt__front";

// Batch activation
pub const EFFECT_SELECTOR: &str = "img.tilt-effect";
pub const OPTIONS_ATTRIBUTE: &str = "data-tilt-options";

// Events
pub const EV_POINTER_MOVE: &str = "pointermove";
pub const EV_POINTER_LEAVE: &str = "pointerleave";
pub const EV_RESIZE: &str = "resize";
pub const EV_DOM_READY: &str = "DOMContentLoaded";

// Inline style properties written per layer
pub const STYLE_TRANSFORM: &str = "transform";
pub const STYLE_TRANSFORM_WEBKIT: &str = "-webkit-transform";
pub const STYLE_OPACITY: &str = "opacity";
pub const STYLE_BACKGROUND_IMAGE: &str = "background-image";
