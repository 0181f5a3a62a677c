use bitflags::bitflags;

bitflags! {
    /// Work the host has to schedule after an event was handled.
    ///
    /// Event handlers return an [Update] and callers merge them with `|=`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Update: u8 {
        /// Redraw the widget.
        const DRAW = 0b001;
        /// Run a layout pass before the next draw.
        const LAYOUT = 0b010;
        /// Keep ticking: an animation is still in flight.
        const ANIMATE = 0b100;
    }
}
