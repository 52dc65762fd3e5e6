//! Platform-free halves of the widget's scheduling.
//!
//! The browser supplies the clocks and callbacks; these types only decide
//! whether a callback needs to be requested and what it should consume.

use instant::Instant;
use std::time::Duration;

/// Single pending-value slot for animation-frame batching.
///
/// Offering a value while one is pending replaces it; only the first offer
/// after a [`take`](Self::take) asks the caller to schedule a frame.
#[derive(Debug)]
pub struct FrameSlot<T> {
    pending: Option<T>,
}

impl<T> Default for FrameSlot<T> {
    fn default() -> Self {
        Self { pending: None }
    }
}

impl<T> FrameSlot<T> {
    /// Store `value`; returns `true` if a frame must be requested.
    #[inline]
    pub fn offer(&mut self, value: T) -> bool {
        self.pending.replace(value).is_none()
    }

    #[inline]
    pub fn take(&mut self) -> Option<T> {
        self.pending.take()
    }

    #[inline]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    #[inline]
    pub fn clear(&mut self) {
        self.pending = None;
    }
}

/// Leading-edge throttle: the first event fires, later ones are dropped
/// until `interval` has elapsed since the last one that fired.
#[derive(Debug, Clone)]
pub struct Throttle {
    interval: Duration,
    last: Option<Instant>,
}

impl Throttle {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last: None,
        }
    }

    pub fn from_millis(ms: u32) -> Self {
        Self::new(Duration::from_millis(u64::from(ms)))
    }

    #[inline]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Returns `true` if an event arriving at `now` should run.
    pub fn allow(&mut self, now: Instant) -> bool {
        let open = match self.last {
            None => true,
            Some(last) => now >= last && now - last >= self.interval,
        };
        if open {
            self.last = Some(now);
        }
        open
    }
}
