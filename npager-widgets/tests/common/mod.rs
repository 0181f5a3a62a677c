#![allow(dead_code)]

use npager_core::animation::{AnimationCompleter, AnimationOutcome, AnimationTask, OffsetAnimation, OffsetAnimator};
use npager_core::vg::kurbo::{Rect, Size};
use npager_widgets::page::{BoxedPage, Page, PageLifecycle};
use npager_widgets::pager::{Pager, PagerObserver};
use npager_widgets::scroll::ScrollState;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Shared, ordered record of everything the pager called.
pub type EventLog = Rc<RefCell<Vec<String>>>;

pub fn events(log: &EventLog) -> Vec<String> {
    log.borrow().clone()
}

/// Events starting with any of `prefixes`, in order.
pub fn events_matching(log: &EventLog, prefixes: &[&str]) -> Vec<String> {
    log.borrow()
        .iter()
        .filter(|event| prefixes.iter().any(|prefix| event.starts_with(prefix)))
        .cloned()
        .collect()
}

pub fn position(log: &EventLog, event: &str) -> usize {
    log.borrow()
        .iter()
        .position(|e| e == event)
        .unwrap_or_else(|| panic!("{:?} not in {:?}", event, log.borrow()))
}

pub fn count(log: &EventLog, prefix: &str) -> usize {
    log.borrow().iter().filter(|e| e.starts_with(prefix)).count()
}

/// Asserts that every `will_*` callback page `name` received has its `did_*`.
pub fn assert_lifecycle_paired(log: &EventLog, name: &str) {
    for phase in ["show", "hide", "attach", "detach"] {
        let will = count(log, &format!("will_{} {}", phase, name));
        let did = count(log, &format!("did_{} {}", phase, name));
        assert_eq!(will, did, "{} of page {} in {:?}", phase, name, log.borrow());
    }
}

/// The last appearance callback page `name` received.
pub fn last_appearance(log: &EventLog, name: &str) -> Option<String> {
    let names = [format!("did_show {}", name), format!("did_hide {}", name)];
    log.borrow().iter().rev().find(|event| names.contains(*event)).cloned()
}

pub struct RecordingPage {
    name: String,
    log: EventLog,
}

impl RecordingPage {
    pub fn boxed(name: impl Into<String>, log: &EventLog) -> BoxedPage {
        Box::new(Self {
            name: name.into(),
            log: log.clone(),
        })
    }

    fn record(&self, event: &str) {
        self.log.borrow_mut().push(format!("{} {}", event, self.name));
    }
}

impl Page for RecordingPage {
    fn set_frame(&mut self, frame: Rect) {
        self.log.borrow_mut().push(format!("frame {} {}", self.name, frame.x0));
    }

    fn did_mount(&mut self) {
        self.record("mount");
    }

    fn did_unmount(&mut self) {
        self.record("unmount");
    }

    fn lifecycle(&mut self) -> Option<&mut dyn PageLifecycle> {
        Some(self)
    }
}

impl PageLifecycle for RecordingPage {
    fn on_will_show(&mut self, _animated: bool) {
        self.record("will_show");
    }
    fn on_did_show(&mut self, _animated: bool) {
        self.record("did_show");
    }
    fn on_will_hide(&mut self, _animated: bool) {
        self.record("will_hide");
    }
    fn on_did_hide(&mut self, _animated: bool) {
        self.record("did_hide");
    }
    fn on_will_attach(&mut self) {
        self.record("will_attach");
    }
    fn on_did_attach(&mut self) {
        self.record("did_attach");
    }
    fn on_will_detach(&mut self) {
        self.record("will_detach");
    }
    fn on_did_detach(&mut self) {
        self.record("did_detach");
    }
}

pub struct RecordingObserver {
    log: EventLog,
    scrolls: Rc<RefCell<Vec<ScrollState>>>,
}

impl PagerObserver for RecordingObserver {
    fn will_change_selected_index(&mut self, to: usize, from: usize) {
        self.log.borrow_mut().push(format!("will_change {} {}", to, from));
    }

    fn did_change_selected_index(&mut self, to: usize) {
        self.log.borrow_mut().push(format!("did_change {}", to));
    }

    fn scroll_did_update(&mut self, state: &ScrollState) {
        self.scrolls.borrow_mut().push(*state);
    }
}

/// An animator the test completes by hand.
#[derive(Clone)]
pub struct RecordingAnimator {
    log: EventLog,
    running: Rc<RefCell<Option<(OffsetAnimation, AnimationCompleter)>>>,
}

impl RecordingAnimator {
    pub fn new(log: &EventLog) -> Self {
        Self {
            log: log.clone(),
            running: Rc::default(),
        }
    }

    /// Settles the running animation at its destination.
    pub fn finish(&self) {
        if let Some((animation, completer)) = self.running.borrow_mut().take() {
            self.log.borrow_mut().push("animation finished".to_string());
            completer.complete(AnimationOutcome::finished(animation.to));
        }
    }
}

impl OffsetAnimator for RecordingAnimator {
    fn animate(&mut self, animation: OffsetAnimation) -> AnimationTask {
        self.log
            .borrow_mut()
            .push(format!("animate {} -> {}", animation.from, animation.to));
        if animation.duration.is_zero() {
            return AnimationTask::ready(AnimationOutcome::finished(animation.to));
        }
        let (task, completer) = AnimationTask::pending();
        *self.running.borrow_mut() = Some((animation, completer));
        task
    }

    fn retarget(&mut self, to: f64, duration: Duration) -> bool {
        let mut running = self.running.borrow_mut();
        let Some((animation, _)) = running.as_mut() else {
            return false;
        };
        self.log.borrow_mut().push(format!("retarget {}", to));
        animation.to = to;
        animation.duration = duration;
        if duration.is_zero() {
            if let Some((animation, completer)) = running.take() {
                completer.complete(AnimationOutcome::finished(animation.to));
            }
        }
        true
    }

    fn advance(&mut self, _now: Instant) -> Option<f64> {
        None
    }

    fn stop(&mut self) {
        if let Some((animation, completer)) = self.running.borrow_mut().take() {
            self.log.borrow_mut().push("stop".to_string());
            completer.complete(AnimationOutcome::stopped(animation.from));
        }
    }

    fn is_running(&self) -> bool {
        self.running.borrow().is_some()
    }
}

pub struct Harness {
    pub pager: Pager,
    pub log: EventLog,
    pub scrolls: Rc<RefCell<Vec<ScrollState>>>,
    pub animator: RecordingAnimator,
}

pub fn pages(prefix: &str, count: usize, log: &EventLog) -> Vec<BoxedPage> {
    (0..count)
        .map(|index| RecordingPage::boxed(format!("{}{}", prefix, index), log))
        .collect()
}

/// Like [harness], but animated by the built-in frame animator.
pub fn frame_harness(count: usize) -> (Pager, EventLog) {
    let log = EventLog::default();
    let mut pager = Pager::new(pages("", count, &log)).with_observer(RecordingObserver {
        log: log.clone(),
        scrolls: Rc::default(),
    });
    pager.set_viewport_size(Size::new(300.0, 600.0));
    pager.layout();

    log.borrow_mut().clear();
    (pager, log)
}

/// A 300x600 pager with `count` recording pages, laid out, with an empty log.
pub fn harness(count: usize) -> Harness {
    let log = EventLog::default();
    let scrolls = Rc::new(RefCell::new(Vec::new()));
    let animator = RecordingAnimator::new(&log);

    let mut pager = Pager::new(pages("", count, &log))
        .with_animator(animator.clone())
        .with_observer(RecordingObserver {
            log: log.clone(),
            scrolls: scrolls.clone(),
        });
    pager.set_viewport_size(Size::new(300.0, 600.0));
    pager.layout();

    log.borrow_mut().clear();
    scrolls.borrow_mut().clear();
    Harness {
        pager,
        log,
        scrolls,
        animator,
    }
}
