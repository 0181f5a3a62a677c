use crate::error::{StyleError, StyleResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use vello::peniko::Color;

/// Visual state of a tab strip segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentState {
    /// Not selected.
    Normal,
    /// The selected segment.
    Selected,
}

/// Font weight on the usual 100–900 scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FontWeight(pub u16);

impl FontWeight {
    /// 300
    pub const LIGHT: Self = Self(300);
    /// 400
    pub const NORMAL: Self = Self(400);
    /// 500
    pub const MEDIUM: Self = Self(500);
    /// 600
    pub const SEMIBOLD: Self = Self(600);
    /// 700
    pub const BOLD: Self = Self(700);
}

impl Default for FontWeight {
    fn default() -> Self {
        Self::NORMAL
    }
}

/// Style of a segment title.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TextStyle {
    /// Text color.
    #[serde(with = "crate::serde_color")]
    pub color: Color,
    /// Font weight.
    #[serde(default)]
    pub weight: FontWeight,
    /// Font size in logical pixels.
    #[serde(default = "default_font_size")]
    pub size: f32,
}

fn default_font_size() -> f32 {
    14.0
}

impl TextStyle {
    /// Create a new text style with the default size.
    pub fn new(color: Color, weight: FontWeight) -> Self {
        Self {
            color,
            weight,
            size: default_font_size(),
        }
    }
}

/// Styling of the tab strip: one [TextStyle] per [SegmentState] plus the indicator color.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TabStyle {
    /// Style of unselected segments.
    pub normal: TextStyle,
    /// Style of the selected segment.
    pub selected: TextStyle,
    /// Color of the indicator bar.
    #[serde(with = "crate::serde_color")]
    pub indicator_color: Color,
}

impl Default for TabStyle {
    fn default() -> Self {
        Self {
            normal: TextStyle::new(Color::from_rgb8(107, 107, 107), FontWeight::NORMAL),
            selected: TextStyle::new(Color::from_rgb8(26, 26, 26), FontWeight::SEMIBOLD),
            indicator_color: Color::from_rgb8(61, 126, 255),
        }
    }
}

#[derive(Deserialize)]
struct StyleFile {
    tabs: TabStyle,
}

impl TabStyle {
    /// The text style used for `state`.
    pub fn text(&self, state: SegmentState) -> &TextStyle {
        match state {
            SegmentState::Normal => &self.normal,
            SegmentState::Selected => &self.selected,
        }
    }

    /// Mutable access to the text style used for `state`.
    pub fn text_mut(&mut self, state: SegmentState) -> &mut TextStyle {
        match state {
            SegmentState::Normal => &mut self.normal,
            SegmentState::Selected => &mut self.selected,
        }
    }

    /// Load a style from TOML content with a `[tabs]` table.
    pub fn from_toml(content: &str) -> StyleResult<Self> {
        toml::from_str::<StyleFile>(content)
            .map(|file| file.tabs)
            .map_err(|e| StyleError::parse_error(e.to_string()))
    }

    /// Load a style from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> StyleResult<Self> {
        let path = path.as_ref();
        log::info!("Loading tab style from: {:?}", path);
        let content = fs::read_to_string(path).map_err(|source| StyleError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }
}
