// SPDX-License-Identifier: LGPL-3.0-only
use npager_core::signal::{Listener, ListenerId, StateSignal};
use npager_core::vg::kurbo::Rect;
use npager_theme::style::{SegmentState, TabStyle, TextStyle};

/// An icon shown in a tab strip segment, referenced by name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Icon {
    /// Icon name, resolved by the host's icon theme.
    pub name: String,
}

impl Icon {
    /// Create an icon reference.
    pub fn named(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// The tab strip the [Pager](crate::pager::Pager) drives.
///
/// Indexes passed in are validated by the pager. Programmatic selection never
/// fires value-changed listeners; only user input does.
pub trait SegmentedControl {
    /// Rebuilds the strip with `count` empty segments and no selection.
    fn reset_segments(&mut self, count: usize);

    /// Number of segments.
    fn segment_count(&self) -> usize;

    /// The visually selected segment.
    fn selected_index(&self) -> Option<usize>;

    /// Selects a segment without notifying value-changed listeners.
    fn set_selected_index(&mut self, index: Option<usize>);

    /// Sets the title of the segment at `index`.
    fn set_title(&mut self, index: usize, title: &str);

    /// Sets or clears the icon of the segment at `index`.
    fn set_icon(&mut self, index: usize, icon: Option<Icon>);

    /// Sets the text style for segments in `state`.
    fn set_text_style(&mut self, state: SegmentState, style: TextStyle);

    /// Assigns the on-screen rectangle of the strip.
    fn set_frame(&mut self, frame: Rect);

    /// Registers a value-changed listener. Registering again with the same id replaces it.
    fn add_value_changed_listener(&mut self, id: ListenerId, listener: Listener<usize>);

    /// Removes a value-changed listener.
    fn remove_value_changed_listener(&mut self, id: ListenerId);
}

/// A single segment of [SegmentedTabs].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Segment {
    /// Title text.
    pub title: Option<String>,
    /// Icon.
    pub icon: Option<Icon>,
}

/// Default [SegmentedControl]: equally sized segments laid out left to right.
pub struct SegmentedTabs {
    segments: Vec<Segment>,
    selected: Option<usize>,
    value_changed: StateSignal<usize>,
    style: TabStyle,
    frame: Rect,
}

impl Default for SegmentedTabs {
    fn default() -> Self {
        Self::new()
    }
}

impl SegmentedTabs {
    /// Create an empty tab strip.
    pub fn new() -> Self {
        Self {
            segments: Vec::new(),
            selected: None,
            value_changed: StateSignal::new(0),
            style: TabStyle::default(),
            frame: Rect::ZERO,
        }
    }

    /// Handles a tap on the segment at `index`.
    ///
    /// Selects it and notifies value-changed listeners when the selection changed.
    pub fn tap(&mut self, index: usize) {
        if index >= self.segments.len() {
            log::warn!("SegmentedTabs: tap on segment {} of {}", index, self.segments.len());
            return;
        }
        if self.selected == Some(index) {
            return;
        }
        self.selected = Some(index);
        self.value_changed.set(index);
    }

    /// Handles a tap at `x` in strip coordinates.
    pub fn tap_at(&mut self, x: f64) {
        if let Some(index) = self.segment_at(x) {
            self.tap(index);
        }
    }

    /// The segment under `x`, if any.
    pub fn segment_at(&self, x: f64) -> Option<usize> {
        let count = self.segments.len();
        if count == 0 || x < self.frame.x0 || x >= self.frame.x1 {
            return None;
        }
        (0..count).find(|&index| {
            let bounds = self.segment_bounds(index);
            x >= bounds.x0 && x < bounds.x1
        })
    }

    /// Bounds of the segment at `index`.
    pub fn segment_bounds(&self, index: usize) -> Rect {
        let count = self.segments.len();
        if count == 0 || index >= count {
            return Rect::ZERO;
        }
        let width = self.frame.width() / count as f64;
        let x0 = self.frame.x0 + index as f64 * width;
        Rect::new(x0, self.frame.y0, x0 + width, self.frame.y1)
    }

    /// The segments.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// The text style a segment is currently drawn with.
    pub fn text_style_for(&self, index: usize) -> &TextStyle {
        if self.selected == Some(index) {
            self.style.text(SegmentState::Selected)
        } else {
            self.style.text(SegmentState::Normal)
        }
    }

    /// The strip's frame.
    pub fn frame(&self) -> Rect {
        self.frame
    }
}

impl SegmentedControl for SegmentedTabs {
    fn reset_segments(&mut self, count: usize) {
        self.segments = vec![Segment::default(); count];
        self.selected = None;
    }

    fn segment_count(&self) -> usize {
        self.segments.len()
    }

    fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    fn set_selected_index(&mut self, index: Option<usize>) {
        self.selected = index.filter(|&index| index < self.segments.len());
    }

    fn set_title(&mut self, index: usize, title: &str) {
        if let Some(segment) = self.segments.get_mut(index) {
            segment.title = Some(title.to_string());
        }
    }

    fn set_icon(&mut self, index: usize, icon: Option<Icon>) {
        if let Some(segment) = self.segments.get_mut(index) {
            segment.icon = icon;
        }
    }

    fn set_text_style(&mut self, state: SegmentState, style: TextStyle) {
        *self.style.text_mut(state) = style;
    }

    fn set_frame(&mut self, frame: Rect) {
        self.frame = frame;
    }

    fn add_value_changed_listener(&mut self, id: ListenerId, listener: Listener<usize>) {
        self.value_changed.listen(id, listener);
    }

    fn remove_value_changed_listener(&mut self, id: ListenerId) {
        self.value_changed.unlisten(id);
    }
}
