// SPDX-License-Identifier: LGPL-3.0-only
use nalgebra::Vector2;
use npager_core::diagnostics;
use npager_core::error::PagerError;
use npager_core::vg::kurbo::{Rect, Size};
use std::sync::atomic::{AtomicU64, Ordering};

/// Identity of a scroll observer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

impl ObserverId {
    /// Allocates a fresh, process-unique id.
    pub fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// Snapshot of the scroll view handed to observers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollState {
    /// Current content offset.
    pub offset: Vector2<f64>,
    /// Size of the scrollable content.
    pub content_size: Size,
    /// Size of the visible viewport.
    pub viewport_size: Size,
    /// Whether the user is dragging.
    pub dragging: bool,
    /// Whether the content is decelerating after a drag.
    pub decelerating: bool,
}

impl ScrollState {
    /// Horizontal offset as a fraction of the content width, or 0 without content.
    pub fn content_ratio(&self) -> f64 {
        if self.content_size.width > 0.0 {
            self.offset.x / self.content_size.width
        } else {
            0.0
        }
    }
}

/// The horizontally scrolling surface hosting the pages.
///
/// Exactly one observer receives its offset changes. The pager claims that
/// role when it is created; any later claim by someone else is fatal.
pub struct ScrollView {
    frame: Rect,
    offset: Vector2<f64>,
    content_size: Size,
    dragging: bool,
    decelerating: bool,
    observer: Option<ObserverId>,
}

impl Default for ScrollView {
    fn default() -> Self {
        Self::new()
    }
}

impl ScrollView {
    /// Create an empty scroll view.
    pub fn new() -> Self {
        Self {
            frame: Rect::ZERO,
            offset: Vector2::zeros(),
            content_size: Size::ZERO,
            dragging: false,
            decelerating: false,
            observer: None,
        }
    }

    /// Registers `observer` as the sole receiver of offset changes.
    ///
    /// Re-registering the current observer is allowed. Replacing it aborts through
    /// [diagnostics::fatal].
    pub fn observe(&mut self, observer: ObserverId) {
        match self.observer {
            Some(owner) if owner != observer => diagnostics::fatal(PagerError::ForeignScrollObserver {
                owner: owner.0,
                intruder: observer.0,
            }),
            _ => self.observer = Some(observer),
        }
    }

    /// Releases the observer slot if `observer` holds it.
    pub fn release(&mut self, observer: ObserverId) {
        if self.observer == Some(observer) {
            self.observer = None;
        }
    }

    /// The current observer.
    pub fn observer(&self) -> Option<ObserverId> {
        self.observer
    }

    /// Frame of the scroll view in pager coordinates.
    pub fn frame(&self) -> Rect {
        self.frame
    }

    pub(crate) fn set_frame(&mut self, frame: Rect) {
        self.frame = frame;
    }

    /// Current content offset.
    pub fn offset(&self) -> Vector2<f64> {
        self.offset
    }

    /// Size of the scrollable content.
    pub fn content_size(&self) -> Size {
        self.content_size
    }

    pub(crate) fn set_content_size(&mut self, size: Size) {
        self.content_size = size;
    }

    /// Largest horizontal offset the content allows.
    pub fn max_offset_x(&self) -> f64 {
        (self.content_size.width - self.frame.width()).max(0.0)
    }

    /// Moves the horizontal offset, clamped to the content. Returns the applied offset.
    pub(crate) fn set_offset_x(&mut self, x: f64) -> f64 {
        let x = if x.is_finite() { x.clamp(0.0, self.max_offset_x()) } else { 0.0 };
        self.offset.x = x;
        x
    }

    /// Whether the user is dragging.
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Whether the content is decelerating.
    pub fn is_decelerating(&self) -> bool {
        self.decelerating
    }

    pub(crate) fn set_dragging(&mut self, dragging: bool) {
        self.dragging = dragging;
    }

    pub(crate) fn set_decelerating(&mut self, decelerating: bool) {
        self.decelerating = decelerating;
    }

    /// A snapshot of the current scroll state.
    pub fn state(&self) -> ScrollState {
        ScrollState {
            offset: self.offset,
            content_size: self.content_size,
            viewport_size: self.frame.size(),
            dragging: self.dragging,
            decelerating: self.decelerating,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_is_clamped_to_content() {
        let mut scroll = ScrollView::new();
        scroll.set_frame(Rect::new(0.0, 44.0, 300.0, 600.0));
        scroll.set_content_size(Size::new(900.0, 556.0));

        assert_eq!(scroll.set_offset_x(1000.0), 600.0);
        assert_eq!(scroll.set_offset_x(-5.0), 0.0);
        assert_eq!(scroll.set_offset_x(f64::NAN), 0.0);
        assert_eq!(scroll.state().viewport_size, Size::new(300.0, 556.0));
    }

    #[test]
    fn test_same_observer_may_register_twice() {
        let mut scroll = ScrollView::new();
        let owner = ObserverId::next();
        scroll.observe(owner);
        scroll.observe(owner);
        assert_eq!(scroll.observer(), Some(owner));

        scroll.release(owner);
        assert_eq!(scroll.observer(), None);
    }

    #[test]
    #[should_panic(expected = "may not replace it")]
    fn test_foreign_observer_is_fatal() {
        let mut scroll = ScrollView::new();
        scroll.observe(ObserverId::next());
        scroll.observe(ObserverId::next());
    }

    #[test]
    fn test_content_ratio_without_content() {
        let scroll = ScrollView::new();
        assert_eq!(scroll.state().content_ratio(), 0.0);
    }
}
