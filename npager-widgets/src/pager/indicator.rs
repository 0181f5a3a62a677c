// SPDX-License-Identifier: LGPL-3.0-only
use npager_core::vg::kurbo::Rect;

/// Rectangle of the indicator bar for the current scroll position.
///
/// The bar is `viewport_width / page_count` wide and centered under the
/// fractional page position, so it glides with a drag instead of jumping from
/// tab to tab. `strip_top` is the y coordinate of the tab strip.
///
/// Degenerate inputs (no pages, zero width or zero content) yield [Rect::ZERO].
pub fn indicator_frame(
    offset_x: f64,
    content_width: f64,
    viewport_width: f64,
    page_count: usize,
    strip_top: f64,
    strip_height: f64,
    indicator_height: f64,
) -> Rect {
    if page_count == 0 || content_width <= 0.0 || viewport_width <= 0.0 || !offset_x.is_finite() {
        return Rect::ZERO;
    }

    let n = page_count as f64;
    let ratio = offset_x / content_width;
    let center = (ratio + 1.0 / (2.0 * n)) * viewport_width;
    let width = viewport_width / n;

    Rect::new(
        center - width / 2.0,
        strip_top + strip_height - indicator_height,
        center + width / 2.0,
        strip_top + strip_height,
    )
}
