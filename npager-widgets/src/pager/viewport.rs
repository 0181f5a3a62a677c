// SPDX-License-Identifier: LGPL-3.0-only
//! Which pages have to be materialized for a given scroll offset.

/// The pages straddled by the viewport: none, one, or the two pages a drag sits between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VisiblePages {
    /// Nothing to show (no pages, or no width).
    #[default]
    None,
    /// The viewport rests on one page.
    Single(usize),
    /// The viewport straddles two adjacent pages, lower index first.
    Straddling(usize, usize),
}

impl VisiblePages {
    /// Computes the pages covering `offset_x` for pages `viewport_width` wide.
    pub fn at(offset_x: f64, viewport_width: f64, page_count: usize) -> Self {
        if page_count == 0 || viewport_width <= 0.0 || !viewport_width.is_finite() {
            return Self::None;
        }
        if !offset_x.is_finite() {
            log::warn!("Pager: ignoring non-finite scroll offset {}", offset_x);
            return Self::None;
        }

        let last = page_count - 1;
        let ratio = offset_x / viewport_width;
        if ratio <= 0.0 {
            return Self::Single(0);
        }
        if ratio >= last as f64 {
            return Self::Single(last);
        }

        let lo = ratio.floor() as usize;
        let hi = ratio.ceil() as usize;
        if lo == hi {
            Self::Single(lo)
        } else {
            Self::Straddling(lo, hi)
        }
    }

    /// Number of pages.
    pub fn len(&self) -> usize {
        match self {
            Self::None => 0,
            Self::Single(_) => 1,
            Self::Straddling(..) => 2,
        }
    }

    /// Whether there are no pages.
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Whether `index` is one of the pages.
    pub fn contains(&self, index: usize) -> bool {
        match *self {
            Self::None => false,
            Self::Single(page) => page == index,
            Self::Straddling(lo, hi) => lo == index || hi == index,
        }
    }

    /// The pages in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = usize> {
        let (first, second) = match *self {
            Self::None => (None, None),
            Self::Single(page) => (Some(page), None),
            Self::Straddling(lo, hi) => (Some(lo), Some(hi)),
        };
        first.into_iter().chain(second)
    }
}
