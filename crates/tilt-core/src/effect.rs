//! Widget state: options, layers, bounds and the pending pointer sample.
//!
//! `TiltEffect` does no I/O. The web front end feeds it events and writes the
//! returned transforms to the DOM; tests drive it directly.

use crate::config::TiltOptions;
use crate::layers::{Layer, LayerStack};
use crate::schedule::FrameSlot;
use crate::transform::{LayerTransform, PointerSample, TiltPose, ViewportBounds};
use smallvec::SmallVec;
use std::time::Duration;

/// `(slot, transform)` pairs, slot being the layer's DOM-order index.
pub type TransformBatch = SmallVec<[(usize, LayerTransform); 4]>;

pub struct TiltEffect {
    options: TiltOptions,
    stack: LayerStack,
    bounds: ViewportBounds,
    pending: FrameSlot<PointerSample>,
    frames: u64,
}

impl TiltEffect {
    pub fn new(options: TiltOptions, bounds: ViewportBounds) -> Self {
        let stack = LayerStack::new(&options);
        log::debug!(
            "[tilt] layers={} moving={} bounds={}x{}",
            stack.layers().len(),
            stack.moving_count(),
            bounds.width,
            bounds.height
        );
        Self {
            options,
            stack,
            bounds,
            pending: FrameSlot::default(),
            frames: 0,
        }
    }

    #[inline]
    pub fn options(&self) -> &TiltOptions {
        &self.options
    }

    #[inline]
    pub fn layers(&self) -> &[Layer] {
        self.stack.layers()
    }

    #[inline]
    pub fn stack(&self) -> &LayerStack {
        &self.stack
    }

    #[inline]
    pub fn bounds(&self) -> ViewportBounds {
        self.bounds
    }

    /// Replace the bounds used by the next frame. Does not recompute.
    #[inline]
    pub fn set_bounds(&mut self, bounds: ViewportBounds) {
        self.bounds = bounds;
    }

    /// Number of frames that produced transforms.
    #[inline]
    pub fn frames_computed(&self) -> u64 {
        self.frames
    }

    /// Record the latest pointer sample. Returns `true` when the caller must
    /// request an animation frame; later samples in the same frame only
    /// replace the pending one.
    #[inline]
    pub fn pointer_moved(&mut self, sample: PointerSample) -> bool {
        self.pending.offer(sample)
    }

    #[inline]
    pub fn has_pending_frame(&self) -> bool {
        self.pending.is_pending()
    }

    /// Drop a pending sample without computing it (teardown).
    #[inline]
    pub fn cancel_pending(&mut self) {
        self.pending.clear();
    }

    /// Animation-frame callback: consume the pending sample and return the
    /// transform for every moving layer. `None` if nothing was pending.
    pub fn frame(&mut self) -> Option<TransformBatch> {
        let sample = self.pending.take()?;
        let batch = self.transforms_for(sample);
        self.record(&batch);
        self.frames += 1;
        Some(batch)
    }

    /// Transforms for `sample` under the current bounds, without side effects.
    pub fn transforms_for(&self, sample: PointerSample) -> TransformBatch {
        let count = self.stack.moving_count();
        let movement = &self.options.movement;
        self.stack
            .layers()
            .iter()
            .enumerate()
            .filter_map(|(slot, layer)| layer.depth.map(|depth| (slot, layer.scale, depth)))
            .map(|(slot, scale, depth)| {
                let pose = TiltPose::compute(
                    movement,
                    scale,
                    depth,
                    count,
                    self.bounds,
                    sample,
                );
                (slot, LayerTransform::Tilt(pose))
            })
            .collect()
    }

    /// Delay before the reset should run, or `None` if leaving does nothing.
    #[inline]
    pub fn pointer_left(&self) -> Option<Duration> {
        self.options
            .reset_on_leave
            .then(|| Duration::from_millis(u64::from(self.options.timing.reset_delay_ms)))
    }

    /// Neutral transform for every moving layer.
    pub fn reset(&mut self) -> TransformBatch {
        let neutral = LayerTransform::neutral(&self.options.movement);
        let batch: TransformBatch = self
            .stack
            .moving_slots()
            .map(|(slot, _)| (slot, neutral))
            .collect();
        self.record(&batch);
        batch
    }

    fn record(&mut self, batch: &TransformBatch) {
        for (slot, t) in batch {
            self.stack.set_transform(*slot, *t);
        }
    }
}
