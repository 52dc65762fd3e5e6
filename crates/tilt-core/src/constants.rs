// Shared tuning constants for the tilt widget.

// Layer limits
pub const MAX_FRONT_LAYERS: usize = 64; // beyond this, drop the CSS transitions on .tilt__front
pub const DEFAULT_FRONT_LAYERS: i32 = 2;

// Opacity applied to moving layers when no per-layer list is given
pub const DEFAULT_OPACITY: f32 = 0.7;

// Default motion ranges (px for translations, deg for rotations)
pub const DEFAULT_PERSPECTIVE: f32 = 1000.0;
pub const DEFAULT_TRANSLATE_X: f32 = -10.0; // negative reverses direction
pub const DEFAULT_TRANSLATE_Y: f32 = -10.0;
pub const DEFAULT_TRANSLATE_Z: f32 = 20.0; // driven by vertical pointer motion
pub const DEFAULT_ROTATE_X: f32 = 2.0;
pub const DEFAULT_ROTATE_Y: f32 = 2.0;
pub const DEFAULT_ROTATE_Z: f32 = 0.0;

// Scheduling
pub const DEFAULT_RESET_DELAY_MS: u32 = 60; // lets an in-flight frame land before the reset
pub const DEFAULT_RESIZE_THROTTLE_MS: u32 = 50;
