// SPDX-License-Identifier: LGPL-3.0-only
//! # Pager
//!
//! A tab strip above a horizontally paging scroll view. The [Pager] keeps
//! three things in sync: the tab strip selection, the scroll offset and the
//! indicator bar under the tabs.
//!
//! Selection changes come from three places:
//! - tab taps, queued by the tab strip's value-changed listener,
//! - drags settling on a page,
//! - [Pager::set_selected_index].
//!
//! All of them end up in the same transition: `will_change_selected_index`
//! first, then the offset animation, then `did_change_selected_index` once the
//! animation's [AnimationTask] resolves. A request that arrives mid-flight
//! retargets the running animation instead of queueing behind it.
//!
//! Only the pages touching the viewport are mounted, never more than
//! [MAX_MOUNTED] at a time.

mod indicator;
mod layout;
mod mounter;
mod viewport;

pub use indicator::indicator_frame;
pub use layout::{LayoutMetrics, PagerGeometry};
pub use mounter::MAX_MOUNTED;
pub use viewport::VisiblePages;

use crate::page::{BoxedPage, Page, PageSlot};
use crate::scroll::{ObserverId, ScrollState, ScrollView};
use crate::segmented::{Icon, SegmentedControl, SegmentedTabs};
use mounter::PageMounter;
use npager_core::animation::{AnimationOutcome, AnimationTask, FrameAnimator, OffsetAnimation, OffsetAnimator};
use npager_core::config::PagerConfig;
use npager_core::error::{ConfigResult, PagerError, PagerResult};
use npager_core::layout::{DirtyFlags, InvalidationTracker};
use npager_core::signal::ListenerId;
use npager_core::update::Update;
use npager_core::vg::kurbo::{Rect, Size};
use npager_core::vg::peniko::Color;
use npager_theme::style::{FontWeight, SegmentState, TabStyle};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::task::Poll;
use std::time::{Duration, Instant};

/// Receives selection and scroll notifications from a [Pager]. Every method is optional.
#[allow(unused_variables)]
pub trait PagerObserver {
    /// A transition towards `to` starts. `from` is the last settled page.
    fn will_change_selected_index(&mut self, to: usize, from: usize) {}

    /// The transition towards `to` completed.
    fn did_change_selected_index(&mut self, to: usize) {}

    /// The scroll offset changed.
    fn scroll_did_update(&mut self, state: &ScrollState) {}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Motion {
    /// Animate with the configured duration.
    Animated,
    /// Jump through a zero-duration animation.
    Immediate,
    /// The offset is already where the user left it. No animation at all.
    Settled,
}

impl Motion {
    fn is_animated(self) -> bool {
        self == Motion::Animated
    }
}

struct Transition {
    from: usize,
    to: usize,
    task: AnimationTask,
    /// Pages whose lifecycle pre-phase ran, in call order.
    touched: Vec<usize>,
}

impl Transition {
    fn touch(&mut self, index: usize) {
        if !self.touched.contains(&index) {
            self.touched.push(index);
        }
    }
}

/// A paginated container: a tab strip on top, one page per tab below.
///
/// The pager is driven by its host:
/// - [layout](Pager::layout) after size or content changes,
/// - [tick](Pager::tick) once per frame,
/// - [begin_drag](Pager::begin_drag), [scroll_did_change](Pager::scroll_did_change),
///   [end_drag](Pager::end_drag) and [end_deceleration](Pager::end_deceleration)
///   for touch input on the scroll view.
///
/// Every entry point returns the [Update] the host has to schedule.
pub struct Pager<T: SegmentedControl = SegmentedTabs> {
    slots: Vec<PageSlot>,
    tab_strip: T,
    scroll: ScrollView,
    scroll_owner: ObserverId,
    tap_listener: ListenerId,
    pending_taps: Rc<RefCell<VecDeque<usize>>>,
    animator: Box<dyn OffsetAnimator>,
    observer: Option<Box<dyn PagerObserver>>,
    config: PagerConfig,
    style: TabStyle,
    style_pending: bool,
    selected: usize,
    previous: usize,
    transition: Option<Transition>,
    mounter: PageMounter,
    geometry: PagerGeometry,
    viewport_size: Size,
    safe_area_top: f64,
    invalidation: InvalidationTracker,
    laid_out: bool,
}

impl Pager<SegmentedTabs> {
    /// Create a pager with the default tab strip.
    pub fn new(pages: Vec<BoxedPage>) -> Self {
        Self::with_tab_strip(SegmentedTabs::new(), PagerConfig::default(), pages)
    }

    /// Create a pager with the default tab strip and `config`.
    ///
    /// The configuration is in place before the first page is presented, so
    /// `lifecycle_propagation: false` keeps page 0 silent from the start.
    pub fn from_config(config: PagerConfig, pages: Vec<BoxedPage>) -> Self {
        Self::with_tab_strip(SegmentedTabs::new(), config, pages)
    }
}

impl<T: SegmentedControl> Pager<T> {
    /// Create a pager driving a custom tab strip.
    ///
    /// The pager becomes the sole observer of its scroll view. An invalid
    /// `config` is logged and replaced by the default.
    pub fn with_tab_strip(tab_strip: T, config: PagerConfig, pages: Vec<BoxedPage>) -> Self {
        let config = match config.validate() {
            Ok(()) => config,
            Err(err) => {
                log::warn!("Pager: ignoring invalid configuration: {}", err);
                PagerConfig::default()
            },
        };
        let scroll_owner = ObserverId::next();
        let mut scroll = ScrollView::new();
        scroll.observe(scroll_owner);

        let mut pager = Self {
            slots: Vec::new(),
            tab_strip,
            scroll,
            scroll_owner,
            tap_listener: ListenerId::next(),
            pending_taps: Rc::new(RefCell::new(VecDeque::new())),
            animator: Box::new(FrameAnimator::new()),
            observer: None,
            config,
            style: TabStyle::default(),
            style_pending: true,
            selected: 0,
            previous: 0,
            transition: None,
            mounter: PageMounter::default(),
            geometry: PagerGeometry::default(),
            viewport_size: Size::ZERO,
            safe_area_top: 0.0,
            invalidation: InvalidationTracker::new(),
            laid_out: false,
        };
        pager.set_pages(pages);
        pager
    }

    /// Replace the configuration. Invalid configurations are logged and ignored.
    ///
    /// Page 0 was already presented under the previous configuration. Use
    /// [from_config](Pager::from_config) to configure it too.
    pub fn with_config(mut self, config: PagerConfig) -> Self {
        if let Err(err) = self.set_config(config) {
            log::warn!("Pager: ignoring invalid configuration: {}", err);
        }
        self
    }

    /// Replace the tab text style.
    pub fn with_style(mut self, style: TabStyle) -> Self {
        self.set_style(style);
        self
    }

    /// Replace the animator driving the scroll offset.
    pub fn with_animator(mut self, animator: impl OffsetAnimator + 'static) -> Self {
        self.animator.stop();
        self.animator = Box::new(animator);
        self
    }

    /// Install the observer receiving selection and scroll notifications.
    pub fn with_observer(mut self, observer: impl PagerObserver + 'static) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    /// Install or remove the observer.
    pub fn set_observer(&mut self, observer: Option<Box<dyn PagerObserver>>) {
        self.observer = observer;
    }

    // ---- pages ----

    /// Replace every page and start over at page 0.
    ///
    /// Old pages are torn down whatever state they are in, including a
    /// transition in flight. No selection notifications are sent.
    pub fn set_pages(&mut self, pages: Vec<BoxedPage>) -> Update {
        self.tear_down_pages();

        log::debug!("Pager: replacing {} pages with {}", self.slots.len(), pages.len());
        self.slots = pages.into_iter().map(PageSlot::new).collect();
        self.selected = 0;
        self.previous = 0;
        self.pending_taps.borrow_mut().clear();

        self.connect_tab_strip();
        self.tab_strip.reset_segments(self.slots.len());
        if !self.slots.is_empty() {
            self.tab_strip.set_selected_index(Some(0));
        }

        self.scroll.set_offset_x(0.0);
        if self.config.lifecycle_propagation {
            if let Some(first) = self.slots.first_mut() {
                first.present();
            }
        }

        self.invalidation.mark_dirty(DirtyFlags::PAGES);
        Update::LAYOUT | Update::DRAW
    }

    /// Number of pages.
    pub fn page_count(&self) -> usize {
        self.slots.len()
    }

    /// The page at `index`.
    pub fn page(&self, index: usize) -> Option<&dyn Page> {
        self.slots.get(index).map(PageSlot::page)
    }

    /// Indexes of the mounted pages, ascending.
    pub fn mounted_indexes(&self) -> Vec<usize> {
        self.mounter.mounted().iter().copied().collect()
    }

    /// Whether the page at `index` is mounted.
    pub fn is_mounted(&self, index: usize) -> bool {
        self.mounter.is_mounted(index)
    }

    // ---- selection ----

    /// The selected page. During a transition this is already its destination.
    ///
    /// Reads 0 without pages.
    pub fn selected_index(&self) -> usize {
        if self.slots.is_empty() {
            0
        } else {
            self.selected
        }
    }

    /// The last page a transition settled on.
    pub fn previous_index(&self) -> usize {
        self.previous
    }

    /// Whether a selection change is in flight.
    pub fn is_transitioning(&self) -> bool {
        self.transition.is_some()
    }

    /// Select the page at `index`.
    ///
    /// Selecting the page the pager already rests on does nothing.
    pub fn set_selected_index(&mut self, index: usize, animated: bool) -> PagerResult<Update> {
        self.check_index("select page", index)?;
        let motion = if animated { Motion::Animated } else { Motion::Immediate };
        Ok(self.commit(index, motion))
    }

    /// Handle tab taps queued by the tab strip.
    pub fn process_pending_input(&mut self) -> Update {
        let mut update = Update::empty();
        loop {
            let Some(index) = self.pending_taps.borrow_mut().pop_front() else {
                break;
            };
            if index >= self.slots.len() {
                log::warn!("Pager: ignoring tap on tab {} of {}", index, self.slots.len());
                continue;
            }
            update |= self.commit(index, Motion::Animated);
        }
        update
    }

    fn commit(&mut self, target: usize, motion: Motion) -> Update {
        if self.transition.is_some() {
            return self.redirect(target, motion);
        }

        let destination = self.geometry.offset_for_index(target);
        if target == self.previous {
            let at_rest = (self.scroll.offset().x - destination).abs() <= f64::EPSILON
                && self.tab_strip.selected_index() == Some(target);
            if motion != Motion::Settled && at_rest {
                return Update::empty();
            }
            // Back onto the settled page, so no selection change.
            let mut update = self.apply_offset(destination);
            update |= self.unmount_stale();
            return update;
        }

        let from = self.previous;
        let animated = motion.is_animated();
        log::debug!("Pager: transition {} -> {} (animated: {})", from, target, animated);
        self.emit_will_change(target, from);

        self.selected = target;
        self.tab_strip.set_selected_index(Some(target));

        let mut transition = Transition {
            from,
            to: target,
            task: AnimationTask::ready(AnimationOutcome::finished(destination)),
            touched: Vec::new(),
        };
        if self.config.lifecycle_propagation {
            self.begin_swap(&mut transition, from, target, animated);
        }

        if motion != Motion::Settled {
            let duration = if animated { self.config.transition_duration() } else { Duration::ZERO };
            transition.task = self.animator.animate(OffsetAnimation::new(
                self.scroll.offset().x,
                destination,
                duration,
                self.config.easing,
            ));
        }

        self.transition = Some(transition);
        Update::DRAW | self.resume_transition()
    }

    /// A new target while a transition is in flight takes over its destination.
    fn redirect(&mut self, target: usize, motion: Motion) -> Update {
        let Some(mut transition) = self.transition.take() else {
            return Update::empty();
        };
        if transition.to == target {
            self.transition = Some(transition);
            return Update::empty();
        }

        let animated = motion.is_animated();
        log::debug!(
            "Pager: redirecting transition {} -> {} towards {}",
            transition.from,
            transition.to,
            target
        );
        self.reroute(&mut transition, target, animated);

        let destination = self.geometry.offset_for_index(target);
        let duration = if animated { self.config.transition_duration() } else { Duration::ZERO };
        if !self.animator.retarget(destination, duration) {
            transition.task = if motion == Motion::Settled {
                AnimationTask::ready(AnimationOutcome::finished(destination))
            } else {
                self.animator.animate(OffsetAnimation::new(
                    self.scroll.offset().x,
                    destination,
                    duration,
                    self.config.easing,
                ))
            };
        }

        self.transition = Some(transition);
        Update::DRAW | self.resume_transition()
    }

    /// Points `transition` at `target`. The animation is left alone.
    ///
    /// Heading back to the settled page announces nothing: the pending
    /// `did_change` for it closes the earlier `will_change`.
    fn reroute(&mut self, transition: &mut Transition, target: usize, animated: bool) {
        if target != self.previous {
            self.emit_will_change(target, self.previous);
        }

        let superseded = transition.to;
        transition.to = target;
        self.selected = target;
        self.tab_strip.set_selected_index(Some(target));
        if self.config.lifecycle_propagation {
            self.begin_swap(transition, superseded, target, animated);
        }
    }

    /// Lifecycle pre-phase: hide `old`, show `new`, detach `old`, attach `new`.
    fn begin_swap(&mut self, transition: &mut Transition, old: usize, new: usize, animated: bool) {
        if let Some(slot) = self.slots.get_mut(old) {
            slot.begin_appearance(false, animated);
        }
        if let Some(slot) = self.slots.get_mut(new) {
            slot.begin_appearance(true, animated);
        }
        if let Some(slot) = self.slots.get_mut(old) {
            slot.begin_containment(false);
        }
        if let Some(slot) = self.slots.get_mut(new) {
            slot.begin_containment(true);
        }
        transition.touch(old);
        transition.touch(new);
    }

    /// Completes the transition once its animation task resolved.
    fn resume_transition(&mut self) -> Update {
        let Some(mut transition) = self.transition.take() else {
            return Update::empty();
        };
        let outcome = match transition.task.poll_now() {
            Poll::Pending => {
                self.transition = Some(transition);
                return Update::ANIMATE;
            },
            Poll::Ready(outcome) => outcome,
        };

        let destination = self.geometry.offset_for_index(transition.to);
        let offset = match outcome {
            Some(outcome) if outcome.finished => destination,
            Some(_) => {
                // Complete on the page the user can see, never on one that was not reached.
                let offset = self.scroll.offset().x;
                let nearest = self.geometry.nearest_index(offset);
                log::debug!(
                    "Pager: transition to {} stopped early, completing on {}",
                    transition.to,
                    nearest
                );
                if nearest != transition.to && nearest < self.slots.len() {
                    self.reroute(&mut transition, nearest, false);
                }
                offset
            },
            None => {
                log::warn!("Pager: animator dropped the transition to {}", transition.to);
                destination
            },
        };

        let mut update = self.apply_offset(offset);
        update |= self.unmount_stale();

        self.emit_did_change(transition.to);

        for &index in &transition.touched {
            if let Some(slot) = self.slots.get_mut(index) {
                slot.end_containment();
            }
        }
        for &index in &transition.touched {
            if let Some(slot) = self.slots.get_mut(index) {
                slot.end_appearance();
            }
        }

        self.previous = transition.to;
        update | Update::DRAW
    }

    // ---- scrolling ----

    /// The scroll view hosting the pages.
    pub fn scroll_view(&self) -> &ScrollView {
        &self.scroll
    }

    /// Mutable access to the scroll view.
    pub fn scroll_view_mut(&mut self) -> &mut ScrollView {
        &mut self.scroll
    }

    /// A snapshot of the scroll state.
    pub fn scroll_state(&self) -> ScrollState {
        self.scroll.state()
    }

    /// The user put a finger on the scroll view. Stops a running animation.
    pub fn begin_drag(&mut self) -> Update {
        self.scroll.set_dragging(true);
        self.scroll.set_decelerating(false);
        if self.animator.is_running() {
            self.animator.stop();
        }
        self.resume_transition()
    }

    /// The scroll view moved to `offset_x`, by drag or deceleration.
    pub fn scroll_did_change(&mut self, offset_x: f64) -> Update {
        self.apply_offset(offset_x)
    }

    /// The user lifted the finger. Without deceleration the drag settles right away.
    pub fn end_drag(&mut self, will_decelerate: bool) -> Update {
        self.scroll.set_dragging(false);
        if will_decelerate {
            self.scroll.set_decelerating(true);
            return Update::empty();
        }
        self.settle()
    }

    /// Deceleration after a drag came to rest.
    pub fn end_deceleration(&mut self) -> Update {
        self.scroll.set_decelerating(false);
        self.settle()
    }

    /// Advance animations and handle queued input. Call once per frame.
    pub fn tick(&mut self, now: Instant) -> Update {
        let mut update = self.process_pending_input();
        if let Some(offset) = self.animator.advance(now) {
            update |= self.apply_offset(offset);
        }
        update | self.resume_transition()
    }

    fn settle(&mut self) -> Update {
        if self.slots.is_empty() {
            return Update::empty();
        }
        let target = self.geometry.nearest_index(self.scroll.offset().x);
        log::debug!("Pager: drag settled on page {}", target);
        self.commit(target, Motion::Settled)
    }

    /// Moves the offset and follows it with mounting, the indicator and the tab strip.
    fn apply_offset(&mut self, offset_x: f64) -> Update {
        let offset_x = self.scroll.set_offset_x(offset_x);

        let required = VisiblePages::at(offset_x, self.geometry.viewport_width(), self.slots.len());
        self.mounter.mount_required(&mut self.slots, required, &self.geometry);
        self.geometry.update_indicator(offset_x);

        let state = self.scroll.state();
        if let Some(observer) = self.observer.as_mut() {
            observer.scroll_did_update(&state);
        }

        if self.transition.is_none() && !self.slots.is_empty() {
            let nearest = self.geometry.nearest_index(offset_x);
            if self.tab_strip.selected_index() != Some(nearest) {
                self.tab_strip.set_selected_index(Some(nearest));
            }
        }
        Update::DRAW
    }

    fn unmount_stale(&mut self) -> Update {
        let keep = VisiblePages::at(
            self.scroll.offset().x,
            self.geometry.viewport_width(),
            self.slots.len(),
        );
        if self.mounter.unmount_except(&mut self.slots, keep) {
            Update::DRAW
        } else {
            Update::empty()
        }
    }

    // ---- layout ----

    /// Geometry of the last layout pass.
    pub fn geometry(&self) -> &PagerGeometry {
        &self.geometry
    }

    /// Frame of the indicator bar.
    pub fn indicator_frame(&self) -> Rect {
        self.geometry.indicator
    }

    /// Resize the pager.
    pub fn set_viewport_size(&mut self, size: Size) -> Update {
        if size == self.viewport_size {
            return Update::empty();
        }
        self.viewport_size = size;
        self.invalidate(DirtyFlags::GEOMETRY)
    }

    /// Set the inset above the tab strip.
    pub fn set_safe_area_top(&mut self, inset: f64) -> Update {
        if !inset.is_finite() || inset < 0.0 {
            log::warn!("Pager: ignoring safe area inset {}", inset);
            return Update::empty();
        }
        self.safe_area_top = inset;
        self.invalidate(DirtyFlags::GEOMETRY)
    }

    /// Recompute the geometry if anything changed since the last pass.
    ///
    /// Order: tab strip, scroll view, mounted pages, indicator. The selected
    /// page stays in view across size changes.
    pub fn layout(&mut self) -> Update {
        if !self.invalidation.needs_layout() {
            return Update::empty();
        }
        let dirty = self.invalidation.take();
        log::debug!("Pager: layout pass {} ({:?})", self.invalidation.passes(), dirty);

        let metrics = LayoutMetrics {
            tab_strip_height: self.config.tab_strip_height,
            indicator_height: self.config.indicator_height,
            safe_area_top: self.safe_area_top,
        };
        self.geometry = PagerGeometry::compute(self.viewport_size, self.slots.len(), metrics, 0.0);

        self.tab_strip.set_frame(self.geometry.tab_strip);
        self.scroll.set_frame(self.geometry.scroll_frame);
        self.scroll.set_content_size(self.geometry.content_size);

        let offset = self.geometry.offset_for_index(self.selected_index());
        if self.transition.is_some() {
            self.animator.retarget(offset, Duration::ZERO);
        }
        self.mounter.relayout(&mut self.slots, &self.geometry);
        let mut update = self.apply_offset(offset);

        if self.style_pending {
            self.apply_style();
        }
        self.laid_out = true;

        update |= self.resume_transition();
        update | Update::DRAW
    }

    fn invalidate(&mut self, flags: DirtyFlags) -> Update {
        self.invalidation.mark_dirty(flags);
        Update::LAYOUT | Update::DRAW
    }

    // ---- configuration ----

    /// The active configuration.
    pub fn config(&self) -> &PagerConfig {
        &self.config
    }

    /// Replace the configuration after validating it.
    pub fn set_config(&mut self, config: PagerConfig) -> ConfigResult<Update> {
        config.validate()?;
        self.config = config;
        Ok(self.invalidate(DirtyFlags::STYLE))
    }

    /// Set the preferred tab strip height. Ignored with at most one page.
    pub fn set_tab_strip_height(&mut self, height: f64) -> Update {
        if !height.is_finite() || height < 0.0 {
            log::warn!("Pager: ignoring tab strip height {}", height);
            return Update::empty();
        }
        self.config.tab_strip_height = height;
        self.invalidate(DirtyFlags::STYLE)
    }

    /// Set the preferred indicator height.
    pub fn set_indicator_height(&mut self, height: f64) -> Update {
        if !height.is_finite() || height < 0.0 {
            log::warn!("Pager: ignoring indicator height {}", height);
            return Update::empty();
        }
        self.config.indicator_height = height;
        self.invalidate(DirtyFlags::STYLE)
    }

    /// Set the duration of animated selection changes.
    pub fn set_transition_duration(&mut self, duration: Duration) {
        self.config.transition_duration_ms = u64::try_from(duration.as_millis()).unwrap_or(u64::MAX);
    }

    /// Turn lifecycle propagation to the pages on or off.
    pub fn set_lifecycle_propagation(&mut self, enabled: bool) {
        self.config.lifecycle_propagation = enabled;
    }

    /// Whether pages receive lifecycle callbacks.
    pub fn lifecycle_propagation(&self) -> bool {
        self.config.lifecycle_propagation
    }

    // ---- tab strip ----

    /// The tab strip.
    pub fn tab_strip(&self) -> &T {
        &self.tab_strip
    }

    /// Mutable access to the tab strip, for input handling.
    ///
    /// Taps are picked up by the next [tick](Pager::tick) or
    /// [process_pending_input](Pager::process_pending_input).
    pub fn tab_strip_mut(&mut self) -> &mut T {
        &mut self.tab_strip
    }

    /// Set the title of the tab at `index`.
    pub fn set_tab_title(&mut self, index: usize, title: &str) -> PagerResult<()> {
        self.check_index("set tab title", index)?;
        self.tab_strip.set_title(index, title);
        Ok(())
    }

    /// Set or clear the icon of the tab at `index`.
    pub fn set_tab_icon(&mut self, index: usize, icon: Option<Icon>) -> PagerResult<()> {
        self.check_index("set tab icon", index)?;
        self.tab_strip.set_icon(index, icon);
        Ok(())
    }

    /// The tab style.
    pub fn style(&self) -> &TabStyle {
        &self.style
    }

    /// Replace the tab style.
    pub fn set_style(&mut self, style: TabStyle) {
        self.style = style;
        self.style_changed();
    }

    /// Set the text color of tabs in `state`.
    pub fn set_text_color(&mut self, state: SegmentState, color: Color) {
        self.style.text_mut(state).color = color;
        self.style_changed();
    }

    /// Set the font weight of tabs in `state`.
    pub fn set_font_weight(&mut self, state: SegmentState, weight: FontWeight) {
        self.style.text_mut(state).weight = weight;
        self.style_changed();
    }

    /// Set the indicator color.
    pub fn set_indicator_color(&mut self, color: Color) {
        self.style.indicator_color = color;
    }

    /// Text styles reach the tab strip at the first layout pass at the earliest.
    fn style_changed(&mut self) {
        if self.laid_out {
            self.apply_style();
        } else {
            self.style_pending = true;
        }
    }

    fn apply_style(&mut self) {
        for state in [SegmentState::Normal, SegmentState::Selected] {
            self.tab_strip.set_text_style(state, *self.style.text(state));
        }
        self.style_pending = false;
    }

    /// Register the tap listener. Repeated calls replace the registration.
    fn connect_tab_strip(&mut self) {
        let taps = self.pending_taps.clone();
        self.tab_strip.add_value_changed_listener(
            self.tap_listener,
            Box::new(move |index: &usize| taps.borrow_mut().push_back(*index)),
        );
    }

    // ---- notifications ----

    fn emit_will_change(&mut self, to: usize, from: usize) {
        if let Some(observer) = self.observer.as_mut() {
            observer.will_change_selected_index(to, from);
        }
    }

    fn emit_did_change(&mut self, to: usize) {
        log::debug!("Pager: selected page {}", to);
        if let Some(observer) = self.observer.as_mut() {
            observer.did_change_selected_index(to);
        }
    }

    fn check_index(&self, action: &str, index: usize) -> PagerResult<()> {
        PagerError::check_index(index, self.slots.len()).inspect_err(|err| {
            log::error!("Pager: cannot {} {}: {}", action, index, err);
        })
    }

    // ---- teardown ----

    /// Release the scroll view and the tab strip, then unmount and drop every page.
    ///
    /// Runs on drop as well.
    pub fn teardown(&mut self) {
        self.scroll.release(self.scroll_owner);
        self.tab_strip.remove_value_changed_listener(self.tap_listener);
        self.pending_taps.borrow_mut().clear();

        self.tear_down_pages();
        self.slots.clear();
        self.mounter.clear();
        self.tab_strip.reset_segments(0);
    }

    fn tear_down_pages(&mut self) {
        if let Some(transition) = self.transition.take() {
            log::debug!("Pager: abandoning transition {} -> {}", transition.from, transition.to);
            self.animator.stop();
        }
        for slot in &mut self.slots {
            slot.dismiss();
        }
        self.mounter.unmount_all(&mut self.slots);
    }
}

impl<T: SegmentedControl> Drop for Pager<T> {
    fn drop(&mut self) {
        self.teardown();
    }
}
