#![warn(missing_docs)]

//! Widget library for npager => See `npager` crate.
//!
//! Contains the [pager::Pager] widget and the collaborators it drives.

/// Contains the [page::Page] trait and the page lifecycle protocol.
pub mod page;

/// Contains the [segmented::SegmentedControl] trait and the default [segmented::SegmentedTabs].
pub mod segmented;

/// Contains the [scroll::ScrollView] hosting the pages.
pub mod scroll;

/// Contains the [pager::Pager] widget.
pub mod pager;
