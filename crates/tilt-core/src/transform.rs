//! Pointer-to-transform mapping.
//!
//! Every moving layer maps the same pointer sample through
//!
//! ```text
//! weight = (i + 1) * magnitude / count
//! value  = 2 * weight / extent * sample - weight
//! ```
//!
//! which is 0 at the middle of the bounds region and reaches `±weight` at its
//! edges. The front-most layer (`i + 1 == count`) therefore spans the full
//! configured magnitude while deeper layers move proportionally less.

use crate::config::Movement;
use glam::Vec3;
use std::fmt;

/// Size of the region that defines the pointer coordinate space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ViewportBounds {
    pub width: f32,
    pub height: f32,
}

impl ViewportBounds {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn center(&self) -> PointerSample {
        PointerSample::new(self.width * 0.5, self.height * 0.5)
    }
}

/// Pointer position relative to the widget's top-left corner, in CSS px.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerSample {
    pub x: f32,
    pub y: f32,
}

impl PointerSample {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Offset for one axis of one layer.
///
/// `depth` is the 0-based index among moving layers and `count` their total.
/// A zero magnitude, zero layer count or degenerate extent yields 0.
#[inline]
pub fn axis_offset(magnitude: f32, depth: usize, count: usize, extent: f32, sample: f32) -> f32 {
    if magnitude == 0.0 || count == 0 || extent.is_nan() || extent <= 0.0 {
        return 0.0;
    }
    let weight = (depth + 1) as f32 * magnitude / count as f32;
    2.0 * weight / extent * sample - weight
}

/// `1 + step * (count - (depth + 1))`: deeper layers scale up more.
#[inline]
pub fn depth_scale(step: f32, depth: usize, count: usize) -> f32 {
    let behind = count.saturating_sub(depth + 1);
    1.0 + step * behind as f32
}

/// A fully specified tilt pose for one layer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TiltPose {
    pub perspective: f32,
    /// px
    pub translate: Vec3,
    /// deg, applied X then Y then Z
    pub rotate: Vec3,
    /// Uniform scale; `None` when it would be exactly 1.
    pub scale: Option<f32>,
}

impl TiltPose {
    /// `scale` is the layer's fixed depth scale (see [`depth_scale`]).
    pub fn compute(
        movement: &Movement,
        scale: f32,
        depth: usize,
        count: usize,
        bounds: ViewportBounds,
        sample: PointerSample,
    ) -> Self {
        let (w, h) = (bounds.width, bounds.height);
        let along_x = |m: f32| axis_offset(m, depth, count, w, sample.x);
        let along_y = |m: f32| axis_offset(m, depth, count, h, sample.y);

        Self {
            perspective: movement.perspective_px(),
            translate: Vec3::new(
                along_x(movement.translate_x),
                along_y(movement.translate_y),
                along_y(movement.translate_z),
            ),
            rotate: Vec3::new(
                along_y(movement.rotate_x),
                along_x(movement.rotate_y),
                along_x(movement.rotate_z),
            ),
            scale: (scale != 1.0).then_some(scale),
        }
    }
}

/// What gets written to a layer's `transform` style.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LayerTransform {
    /// Zero translation, zero rotation, perspective kept.
    Neutral { perspective: f32 },
    Tilt(TiltPose),
}

impl LayerTransform {
    #[inline]
    pub fn neutral(movement: &Movement) -> Self {
        Self::Neutral {
            perspective: movement.perspective_px(),
        }
    }

    #[inline]
    pub fn is_neutral(&self) -> bool {
        match self {
            Self::Neutral { .. } => true,
            Self::Tilt(p) => p.translate == Vec3::ZERO && p.rotate == Vec3::ZERO,
        }
    }

    pub fn to_css(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for LayerTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Neutral { perspective } => write!(
                f,
                "perspective({}px) translate3d(0,0,0) rotate3d(1,1,1,0deg)",
                perspective
            ),
            Self::Tilt(p) => {
                write!(
                    f,
                    "perspective({}px) translate3d({}px,{}px,{}px) rotate3d(1,0,0,{}deg) rotate3d(0,1,0,{}deg) rotate3d(0,0,1,{}deg)",
                    p.perspective,
                    p.translate.x,
                    p.translate.y,
                    p.translate.z,
                    p.rotate.x,
                    p.rotate.y,
                    p.rotate.z
                )?;
                if let Some(s) = p.scale {
                    write!(f, " scale({}, {})", s, s)?;
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_extent_is_neutral() {
        assert_eq!(axis_offset(10.0, 0, 1, 0.0, 5.0), 0.0);
        assert_eq!(axis_offset(10.0, 0, 1, f32::NAN, 5.0), 0.0);
    }

    #[test]
    fn neutral_css() {
        let t = LayerTransform::Neutral { perspective: 1000.0 };
        assert_eq!(
            t.to_css(),
            "perspective(1000px) translate3d(0,0,0) rotate3d(1,1,1,0deg)"
        );
    }

    #[test]
    fn tilt_css_with_scale() {
        let t = LayerTransform::Tilt(TiltPose {
            perspective: 500.0,
            translate: Vec3::new(1.5, -2.0, 0.0),
            rotate: Vec3::new(0.25, 0.0, 0.0),
            scale: Some(1.5),
        });
        assert_eq!(
            t.to_css(),
            "perspective(500px) translate3d(1.5px,-2px,0px) rotate3d(1,0,0,0.25deg) rotate3d(0,1,0,0deg) rotate3d(0,0,1,0deg) scale(1.5, 1.5)"
        );
    }
}
