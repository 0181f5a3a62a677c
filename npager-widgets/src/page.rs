// SPDX-License-Identifier: LGPL-3.0-only
use npager_core::vg::kurbo::Rect;

/// A boxed page.
pub type BoxedPage = Box<dyn Page>;

/// A page hosted by the [Pager](crate::pager::Pager).
///
/// Pages are materialized lazily: only the pages near the visible viewport are
/// mounted. Mounting and unmounting always come in `will`/`did` pairs.
pub trait Page {
    /// Assigns the on-screen rectangle of the page, in scroll content coordinates.
    fn set_frame(&mut self, frame: Rect);

    /// Called before the page is inserted into the display hierarchy.
    fn will_mount(&mut self) {}

    /// Called after the page was inserted into the display hierarchy.
    fn did_mount(&mut self) {}

    /// Called before the page is removed from the display hierarchy.
    fn will_unmount(&mut self) {}

    /// Called after the page was removed from the display hierarchy.
    fn did_unmount(&mut self) {}

    /// The page's lifecycle capability, if it wants appearance and containment callbacks.
    fn lifecycle(&mut self) -> Option<&mut dyn PageLifecycle> {
        None
    }
}

/// Two-phase lifecycle protocol driven by page changes.
///
/// Every `on_will_*` is eventually followed by the matching `on_did_*`. When a
/// transition is reversed before it ends, the pending phase is closed first: a
/// page that is appearing and asked to hide again sees `on_will_show`,
/// `on_did_show`, `on_will_hide`, `on_did_hide`.
#[allow(unused_variables)]
pub trait PageLifecycle {
    /// The page is about to become visible.
    fn on_will_show(&mut self, animated: bool) {}
    /// The page became visible.
    fn on_did_show(&mut self, animated: bool) {}
    /// The page is about to become hidden.
    fn on_will_hide(&mut self, animated: bool) {}
    /// The page became hidden.
    fn on_did_hide(&mut self, animated: bool) {}
    /// The page is about to be attached to the pager as its logical parent.
    fn on_will_attach(&mut self) {}
    /// The page was attached to the pager.
    fn on_did_attach(&mut self) {}
    /// The page is about to be detached from the pager.
    fn on_will_detach(&mut self) {}
    /// The page was detached from the pager.
    fn on_did_detach(&mut self) {}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Appearance {
    Hidden,
    Appearing,
    Visible,
    Disappearing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Containment {
    Detached,
    Attaching,
    Attached,
    Detaching,
}

/// A page together with the lifecycle state the pager tracks for it.
pub(crate) struct PageSlot {
    page: BoxedPage,
    appearance: Appearance,
    containment: Containment,
    animated: bool,
}

impl PageSlot {
    pub(crate) fn new(page: BoxedPage) -> Self {
        Self {
            page,
            appearance: Appearance::Hidden,
            containment: Containment::Detached,
            animated: false,
        }
    }

    pub(crate) fn page(&self) -> &dyn Page {
        self.page.as_ref()
    }

    pub(crate) fn page_mut(&mut self) -> &mut dyn Page {
        self.page.as_mut()
    }

    #[cfg(test)]
    pub(crate) fn appearance(&self) -> Appearance {
        self.appearance
    }

    /// Pre-phase of an appearance change: `will_show` or `will_hide`.
    ///
    /// Does nothing if the page is already heading towards `visible`. A pending
    /// change the other way gets its post-phase first.
    pub(crate) fn begin_appearance(&mut self, visible: bool, animated: bool) {
        let pending = std::mem::replace(&mut self.animated, animated);
        let Some(lifecycle) = self.page.lifecycle() else {
            return;
        };

        match (visible, self.appearance) {
            (true, Appearance::Hidden) => lifecycle.on_will_show(animated),
            (true, Appearance::Disappearing) => {
                lifecycle.on_did_hide(pending);
                lifecycle.on_will_show(animated);
            },
            (false, Appearance::Visible) => lifecycle.on_will_hide(animated),
            (false, Appearance::Appearing) => {
                lifecycle.on_did_show(pending);
                lifecycle.on_will_hide(animated);
            },
            _ => return,
        }
        self.appearance = if visible {
            Appearance::Appearing
        } else {
            Appearance::Disappearing
        };
    }

    /// Pre-phase of a containment change: `will_attach` or `will_detach`.
    pub(crate) fn begin_containment(&mut self, attached: bool) {
        let Some(lifecycle) = self.page.lifecycle() else {
            return;
        };

        match (attached, self.containment) {
            (true, Containment::Detached) => lifecycle.on_will_attach(),
            (true, Containment::Detaching) => {
                lifecycle.on_did_detach();
                lifecycle.on_will_attach();
            },
            (false, Containment::Attached) => lifecycle.on_will_detach(),
            (false, Containment::Attaching) => {
                lifecycle.on_did_attach();
                lifecycle.on_will_detach();
            },
            _ => return,
        }
        self.containment = if attached {
            Containment::Attaching
        } else {
            Containment::Detaching
        };
    }

    /// Post-phase of a containment change.
    pub(crate) fn end_containment(&mut self) {
        let Some(lifecycle) = self.page.lifecycle() else {
            return;
        };

        match self.containment {
            Containment::Attaching => {
                lifecycle.on_did_attach();
                self.containment = Containment::Attached;
            },
            Containment::Detaching => {
                lifecycle.on_did_detach();
                self.containment = Containment::Detached;
            },
            Containment::Attached | Containment::Detached => {},
        }
    }

    /// Post-phase of an appearance change.
    pub(crate) fn end_appearance(&mut self) {
        let animated = self.animated;
        let Some(lifecycle) = self.page.lifecycle() else {
            return;
        };

        match self.appearance {
            Appearance::Appearing => {
                lifecycle.on_did_show(animated);
                self.appearance = Appearance::Visible;
            },
            Appearance::Disappearing => {
                lifecycle.on_did_hide(animated);
                self.appearance = Appearance::Hidden;
            },
            Appearance::Visible | Appearance::Hidden => {},
        }
    }

    /// Runs both post-phases, containment first.
    pub(crate) fn end_transition(&mut self) {
        self.end_containment();
        self.end_appearance();
    }

    /// Shows and attaches the page in one go.
    pub(crate) fn present(&mut self) {
        self.begin_appearance(true, false);
        self.begin_containment(true);
        self.end_transition();
    }

    /// Finishes any pending transition, then hides and detaches the page.
    pub(crate) fn dismiss(&mut self) {
        self.end_transition();
        self.begin_appearance(false, false);
        self.begin_containment(false);
        self.end_transition();
    }

    /// Whether a pre-phase is waiting for its post-phase.
    #[cfg(test)]
    pub(crate) fn in_transition(&self) -> bool {
        matches!(self.appearance, Appearance::Appearing | Appearance::Disappearing)
            || matches!(self.containment, Containment::Attaching | Containment::Detaching)
    }
}
