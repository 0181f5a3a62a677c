use bitflags::bitflags;

bitflags! {
    /// What changed since the last layout pass.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct DirtyFlags: u8 {
        /// Viewport size or safe-area inset changed.
        const GEOMETRY = 0b0001;
        /// Style metrics changed (tab strip height, indicator height, text styles).
        const STYLE = 0b0010;
        /// The page sequence was replaced.
        const PAGES = 0b0100;
        /// Everything changed (full rebuild needed)
        const ALL = Self::GEOMETRY.bits() | Self::STYLE.bits() | Self::PAGES.bits();
    }
}

/// Tracks whether a widget needs a layout pass.
#[derive(Debug, Clone)]
pub struct InvalidationTracker {
    dirty: DirtyFlags,
    passes: u64,
}

impl Default for InvalidationTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl InvalidationTracker {
    /// Create a tracker that starts fully dirty, so the first pass always runs.
    pub fn new() -> Self {
        Self {
            dirty: DirtyFlags::ALL,
            passes: 0,
        }
    }

    /// Mark parts of the layout as dirty.
    pub fn mark_dirty(&mut self, flags: DirtyFlags) {
        self.dirty |= flags;
    }

    /// Whether any of `flags` is dirty.
    pub fn is_dirty(&self, flags: DirtyFlags) -> bool {
        self.dirty.intersects(flags)
    }

    /// Whether anything at all is dirty.
    pub fn needs_layout(&self) -> bool {
        !self.dirty.is_empty()
    }

    /// Returns the dirty flags and marks everything clean, counting the pass.
    pub fn take(&mut self) -> DirtyFlags {
        self.passes += 1;
        std::mem::replace(&mut self.dirty, DirtyFlags::empty())
    }

    /// Number of layout passes that ran.
    pub fn passes(&self) -> u64 {
        self.passes
    }
}
