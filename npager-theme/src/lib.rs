#![warn(missing_docs)]

//! # npager Tab Styling
//!
//! Text and indicator styling for the pager's tab strip.
//!
//! - **[TabStyle](style::TabStyle)**: per-state text styles plus the indicator color
//! - **[TextStyle](style::TextStyle)**: color, weight and size of a segment title
//! - **[SegmentState](style::SegmentState)**: normal or selected
//!
//! Styles can be built in code or loaded from TOML:
//!
//! ```toml
//! [tabs.normal]
//! color = "#6b6b6b"
//! weight = 400
//!
//! [tabs.selected]
//! color = "#1a1a1a"
//! weight = 600
//!
//! [tabs]
//! indicator_color = "#3d7eff"
//! ```

/// Contains error types for loading styles.
pub mod error;

/// Serde helpers for [Color](vello::peniko::Color).
pub mod serde_color;

/// Contains the tab styling types.
pub mod style;
