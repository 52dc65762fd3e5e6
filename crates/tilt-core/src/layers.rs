//! The stacked image layers and their fixed per-layer attributes.
//!
//! Layers are kept in DOM order: the back layer first, then the front layers
//! bottom to top. Opacity and scale are decided once here; only transforms
//! change afterwards.

use crate::config::TiltOptions;
use crate::transform::{depth_scale, LayerTransform};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayerRole {
    Back,
    Front,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Layer {
    pub role: LayerRole,
    /// Index among moving layers; `None` for a fixed back layer.
    pub depth: Option<usize>,
    /// `None` leaves the element's own opacity (fully opaque) untouched.
    pub opacity: Option<f32>,
    pub scale: f32,
    /// Last transform written to the layer, if any.
    pub transform: Option<LayerTransform>,
}

impl Layer {
    #[inline]
    pub fn moves(&self) -> bool {
        self.depth.is_some()
    }
}

#[derive(Clone, Debug)]
pub struct LayerStack {
    layers: Vec<Layer>,
    moving: usize,
}

impl LayerStack {
    pub fn new(opts: &TiltOptions) -> Self {
        let fronts = opts.front_layers();
        let back_moves = !opts.back_fixed;
        let moving = fronts + usize::from(back_moves);

        let mut layers = Vec::with_capacity(fronts + 1);
        layers.push(Layer {
            role: LayerRole::Back,
            depth: back_moves.then_some(0),
            opacity: None,
            scale: 1.0,
            transform: None,
        });
        let first_front_depth = usize::from(back_moves);
        layers.extend((0..fronts).map(|k| Layer {
            role: LayerRole::Front,
            depth: Some(first_front_depth + k),
            opacity: None,
            scale: 1.0,
            transform: None,
        }));

        for layer in layers.iter_mut() {
            if let Some(d) = layer.depth {
                layer.scale = depth_scale(opts.scale_step, d, moving);
            }
            layer.opacity = initial_opacity(opts, layer);
        }

        Self { layers, moving }
    }

    #[inline]
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Layers that follow the pointer.
    #[inline]
    pub fn moving_count(&self) -> usize {
        self.moving
    }

    #[inline]
    pub fn front_count(&self) -> usize {
        self.layers.len() - 1
    }

    /// `(slot, depth)` for each moving layer, slot being the DOM-order index.
    pub fn moving_slots(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.layers
            .iter()
            .enumerate()
            .filter_map(|(slot, l)| l.depth.map(|d| (slot, d)))
    }

    pub(crate) fn set_transform(&mut self, slot: usize, t: LayerTransform) {
        if let Some(layer) = self.layers.get_mut(slot) {
            layer.transform = Some(t);
        }
    }
}

// A per-layer list indexes the moving layers and may override the back
// layer when it moves; without a list the back layer is never touched.
fn initial_opacity(opts: &TiltOptions, layer: &Layer) -> Option<f32> {
    let depth = layer.depth?;
    match &opts.layer_opacity {
        Some(list) => Some(
            list.get(depth)
                .copied()
                .flatten()
                .unwrap_or(opts.base_opacity),
        ),
        None if layer.role == LayerRole::Back => None,
        None => Some(opts.base_opacity),
    }
}
