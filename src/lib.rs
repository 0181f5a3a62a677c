#![warn(missing_docs)]

//! A paginated tab container for Rust UIs.
//!
//! A [Pager](widgets::pager::Pager) hosts one page per tab and keeps the tab
//! strip, the horizontal scroll offset and the indicator bar in sync, for
//! swipes as well as for taps and programmatic selection.

pub use nalgebra as math;
pub use vello::peniko as color;

pub use npager_core as core;
pub use npager_theme as theme;
pub use npager_widgets as widgets;

/// A "prelude" for users of npager.
///
/// ```rust
/// use npager::prelude::*;
/// ```
pub mod prelude {
    pub use crate::core::animation::{Easing, FrameAnimator, OffsetAnimation, OffsetAnimator};
    pub use crate::core::config::PagerConfig;
    pub use crate::core::error::{PagerError, PagerResult};
    pub use crate::core::update::Update;

    // Theme
    pub use crate::theme::style::{FontWeight, SegmentState, TabStyle, TextStyle};

    // Math
    pub use nalgebra::Vector2;

    // Geometry and color
    pub use crate::core::vg::kurbo::{Rect, Size};
    pub use crate::core::vg::peniko::Color;

    // Widgets
    pub use crate::widgets::page::{BoxedPage, Page, PageLifecycle};
    pub use crate::widgets::pager::{Pager, PagerGeometry, PagerObserver};
    pub use crate::widgets::scroll::{ScrollState, ScrollView};
    pub use crate::widgets::segmented::{Icon, SegmentedControl, SegmentedTabs};
}
