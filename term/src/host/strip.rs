//! Horizontal scroll position of the field strip.

use cardform::{field::NodeHandle, host::ScrollContainer};
use std::cell::Cell;

use super::registry::STRIP_NODE;

/// Scroll state of the field strip, in columns
///
/// Animated scrolls ease toward their target one [`StripScroll::tick`] per
/// frame; the offset is always kept within the strip's extent.
#[derive(Debug, Default)]
pub struct StripScroll {
    offset: Cell<f64>,
    target: Cell<f64>,
    max_offset: Cell<f64>,
}

impl StripScroll {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current offset rounded to whole columns
    pub fn offset(&self) -> u16 {
        self.offset.get().round().clamp(0.0, f64::from(u16::MAX)) as u16
    }

    /// Offset the strip is moving toward
    pub fn target(&self) -> f64 {
        self.target.get()
    }

    /// Updates how far the strip can scroll given its content and viewport
    /// widths
    pub fn set_extent(&self, content_width: u16, viewport_width: u16) {
        let max = f64::from(content_width.saturating_sub(viewport_width));
        self.max_offset.set(max);
        self.offset.set(self.offset.get().min(max));
        self.target.set(self.target.get().min(max));
    }

    /// Scrolls by `delta` columns immediately
    pub fn scroll_by(&self, delta: f64) {
        let x = self.clamp(self.offset.get() + delta);
        self.offset.set(x);
        self.target.set(x);
    }

    /// Advances an animated scroll by one frame. Returns whether the strip
    /// is still moving.
    pub fn tick(&self) -> bool {
        let offset = self.offset.get();
        let distance = self.target.get() - offset;

        if distance.abs() < 1.0 {
            self.offset.set(self.target.get());
            return false;
        }

        let step = (distance / 3.0).abs().max(1.0).copysign(distance);
        self.offset.set(offset + step);
        true
    }

    fn clamp(&self, x: f64) -> f64 {
        x.clamp(0.0, self.max_offset.get())
    }
}

impl ScrollContainer for StripScroll {
    fn node(&self) -> Option<NodeHandle> {
        Some(STRIP_NODE)
    }

    fn scroll_to(&self, x: f64, animated: bool) {
        let x = self.clamp(x);
        log::debug!("scrolling field strip to {x} (animated: {animated})");
        self.target.set(x);
        if !animated {
            self.offset.set(x);
        }
    }
}

#[cfg(test)]
#[path = "./strip_tests.rs"]
mod tests;
