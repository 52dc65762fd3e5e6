//! Widget options and their JSON wire format.
//!
//! Options arrive from markup (`data-tilt-options`) or from a JavaScript
//! object, using the widget's historical camelCase names (`extraImgs`,
//! `bgfixed`, ...). Every field has a default, so partial option objects
//! merge over [`TiltOptions::default`] the same way the widget's defaults
//! always did: a section that is omitted keeps its defaults, a section that
//! is supplied replaces them wholesale.

use crate::constants::*;
use serde::{Deserialize, Deserializer};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid tilt options: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Signed motion ranges for each axis.
///
/// A magnitude `m` means the outermost layer travels from `-m` to `m` across
/// the bounds region. Zero disables the axis. `Default` is the motionless
/// configuration; the widget's stock motion is [`Movement::parallax`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Movement {
    pub perspective: f32,
    pub translate_x: f32,
    pub translate_y: f32,
    pub translate_z: f32,
    pub rotate_x: f32,
    pub rotate_y: f32,
    pub rotate_z: f32,
}

impl Movement {
    pub const fn parallax() -> Self {
        Self {
            perspective: DEFAULT_PERSPECTIVE,
            translate_x: DEFAULT_TRANSLATE_X,
            translate_y: DEFAULT_TRANSLATE_Y,
            translate_z: DEFAULT_TRANSLATE_Z,
            rotate_x: DEFAULT_ROTATE_X,
            rotate_y: DEFAULT_ROTATE_Y,
            rotate_z: DEFAULT_ROTATE_Z,
        }
    }

    /// Perspective in px; missing, zero or non-finite values mean flat.
    #[inline]
    pub fn perspective_px(&self) -> f32 {
        if self.perspective.is_finite() {
            self.perspective
        } else {
            0.0
        }
    }
}

/// Optional selectors for the regions that drive and bound the effect.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WatcherSelectors {
    /// Element whose pointer events drive the effect.
    pub mouse_move_watcher: Option<String>,
    /// Element whose size defines the pointer coordinate space.
    pub view_watcher: Option<String>,
}

impl WatcherSelectors {
    #[inline]
    pub fn pointer_source(&self) -> Option<&str> {
        non_blank(self.mouse_move_watcher.as_deref())
    }

    #[inline]
    pub fn bounds(&self) -> Option<&str> {
        non_blank(self.view_watcher.as_deref())
    }
}

#[inline]
fn non_blank(s: Option<&str>) -> Option<&str> {
    s.map(str::trim).filter(|s| !s.is_empty())
}

#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Timing {
    pub reset_delay_ms: u32,
    pub resize_throttle_ms: u32,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            reset_delay_ms: DEFAULT_RESET_DELAY_MS,
            resize_throttle_ms: DEFAULT_RESIZE_THROTTLE_MS,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TiltOptions {
    /// Requested number of front layers; clamped by [`TiltOptions::front_layers`].
    #[serde(rename = "extraImgs", deserialize_with = "layer_count")]
    pub layer_count: i32,
    /// Extra scale per step of depth; 0 disables scaling.
    #[serde(rename = "extraImgsScaleGrade")]
    pub scale_step: f32,
    #[serde(rename = "opacity")]
    pub base_opacity: f32,
    /// Per-layer opacity, bottom to top over the moving layers. `None`
    /// entries fall back to `base_opacity`.
    #[serde(rename = "customImgsOpacity", deserialize_with = "opacity_list")]
    pub layer_opacity: Option<Vec<Option<f32>>>,
    /// Whether the back layer ignores pointer movement.
    #[serde(rename = "bgfixed")]
    pub back_fixed: bool,
    pub reset_on_leave: bool,
    #[serde(deserialize_with = "movement_or_still")]
    pub movement: Movement,
    #[serde(rename = "element", deserialize_with = "selectors_or_none")]
    pub selectors: WatcherSelectors,
    pub timing: Timing,
}

impl Default for TiltOptions {
    fn default() -> Self {
        Self {
            layer_count: DEFAULT_FRONT_LAYERS,
            scale_step: 0.0,
            base_opacity: DEFAULT_OPACITY,
            layer_opacity: None,
            back_fixed: true,
            reset_on_leave: true,
            movement: Movement::parallax(),
            selectors: WatcherSelectors::default(),
            timing: Timing::default(),
        }
    }
}

impl TiltOptions {
    /// Decode options from JSON. `null` yields the defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let opts: Option<Self> = serde_json::from_str(json)?;
        Ok(opts.unwrap_or_default())
    }

    /// Number of front layers after clamping to `0..=MAX_FRONT_LAYERS`.
    #[inline]
    pub fn front_layers(&self) -> usize {
        self.layer_count.clamp(0, MAX_FRONT_LAYERS as i32) as usize
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OpacityWire {
    Flag(bool),
    List(Vec<Option<f32>>),
}

// `false`/`null` disable the list; `true` enables it with no entries, which
// sends every moving layer (the back layer included) to the base opacity.
fn opacity_list<'de, D>(de: D) -> Result<Option<Vec<Option<f32>>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<OpacityWire>::deserialize(de)? {
        None | Some(OpacityWire::Flag(false)) => None,
        Some(OpacityWire::Flag(true)) => Some(Vec::new()),
        Some(OpacityWire::List(v)) => Some(v),
    })
}

// Any JSON number (or null) is accepted: below 1 means none, fractions round
// up as a counting loop would, and large values saturate at the layer limit.
fn layer_count<'de, D>(de: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    let n = match Option::<f64>::deserialize(de)? {
        Some(n) if n >= 1.0 => n.ceil().min(MAX_FRONT_LAYERS as f64),
        _ => 0.0,
    };
    Ok(n as i32)
}

fn movement_or_still<'de, D>(de: D) -> Result<Movement, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Movement>::deserialize(de)?.unwrap_or_default())
}

fn selectors_or_none<'de, D>(de: D) -> Result<WatcherSelectors, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<WatcherSelectors>::deserialize(de)?.unwrap_or_default())
}
