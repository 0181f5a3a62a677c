// SPDX-License-Identifier: LGPL-3.0-only
use super::indicator::indicator_frame;
use npager_core::vg::kurbo::{Rect, Size};

/// Style metrics the geometry depends on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutMetrics {
    /// Preferred tab strip height.
    pub tab_strip_height: f64,
    /// Preferred indicator height.
    pub indicator_height: f64,
    /// Inset above the tab strip (status bar, title bar, ...).
    pub safe_area_top: f64,
}

/// Geometry of the pager, derived from viewport size, page count and metrics.
///
/// All rectangles are in pager coordinates except page frames, which are in
/// scroll content coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PagerGeometry {
    /// The pager's own size.
    pub size: Size,
    /// Number of pages the geometry was computed for.
    pub page_count: usize,
    /// Effective tab strip height (0 with at most one page).
    pub tab_strip_height: f64,
    /// Effective indicator height (0 with at most one page).
    pub indicator_height: f64,
    /// Frame of the tab strip.
    pub tab_strip: Rect,
    /// Frame of the scroll view, filling the space below the strip.
    pub scroll_frame: Rect,
    /// Size of the scroll content: one viewport per page.
    pub content_size: Size,
    /// Frame of the indicator bar.
    pub indicator: Rect,
}

impl Default for PagerGeometry {
    fn default() -> Self {
        Self {
            size: Size::ZERO,
            page_count: 0,
            tab_strip_height: 0.0,
            indicator_height: 0.0,
            tab_strip: Rect::ZERO,
            scroll_frame: Rect::ZERO,
            content_size: Size::ZERO,
            indicator: Rect::ZERO,
        }
    }
}

impl PagerGeometry {
    /// Computes the geometry. The indicator follows `offset_x`.
    pub fn compute(size: Size, page_count: usize, metrics: LayoutMetrics, offset_x: f64) -> Self {
        let width = size.width.max(0.0);
        let height = size.height.max(0.0);
        let top = metrics.safe_area_top.clamp(0.0, height);

        let (tab_strip_height, indicator_height) = if page_count <= 1 {
            (0.0, 0.0)
        } else {
            let strip = metrics.tab_strip_height.clamp(0.0, height - top);
            (strip, metrics.indicator_height.clamp(0.0, strip))
        };

        let tab_strip = Rect::new(0.0, top, width, top + tab_strip_height);
        let scroll_frame = Rect::new(0.0, tab_strip.y1, width, height.max(tab_strip.y1));
        let content_size = Size::new(width * page_count as f64, scroll_frame.height());

        let mut geometry = Self {
            size: Size::new(width, height),
            page_count,
            tab_strip_height,
            indicator_height,
            tab_strip,
            scroll_frame,
            content_size,
            indicator: Rect::ZERO,
        };
        geometry.update_indicator(offset_x);
        geometry
    }

    /// Recomputes only the indicator for a new offset.
    pub fn update_indicator(&mut self, offset_x: f64) {
        self.indicator = indicator_frame(
            offset_x,
            self.content_size.width,
            self.viewport_width(),
            self.page_count,
            self.tab_strip.y0,
            self.tab_strip_height,
            self.indicator_height,
        );
    }

    /// Width of one page.
    pub fn viewport_width(&self) -> f64 {
        self.scroll_frame.width()
    }

    /// Frame of the page at `index` in scroll content coordinates.
    pub fn page_frame(&self, index: usize) -> Rect {
        let width = self.viewport_width();
        let x0 = index as f64 * width;
        Rect::new(x0, 0.0, x0 + width, self.scroll_frame.height())
    }

    /// Offset at which the page at `index` fills the viewport.
    pub fn offset_for_index(&self, index: usize) -> f64 {
        index as f64 * self.viewport_width()
    }

    /// Nearest page for `offset_x`, clamped to the page range.
    pub fn nearest_index(&self, offset_x: f64) -> usize {
        let width = self.viewport_width();
        if self.page_count == 0 || width <= 0.0 || !offset_x.is_finite() {
            return 0;
        }
        let nearest = (offset_x / width).round().max(0.0) as usize;
        nearest.min(self.page_count - 1)
    }
}
