// SPDX-License-Identifier: LGPL-3.0-only
//! # Offset Animations
//!
//! The pager never animates its scroll offset itself. It hands an
//! [OffsetAnimation] to an [OffsetAnimator] and receives an [AnimationTask]: a
//! future that resolves once the animation settles. The pager keeps the task
//! and polls it from its own event loop, so the completion always runs on the
//! same thread as every other state change.
//!
//! [FrameAnimator] is the default animator. It is driven by
//! [OffsetAnimator::advance] once per frame and interpolates with an [Easing]
//! curve. Hosts with their own animation system implement [OffsetAnimator]
//! instead.

use futures::channel::oneshot;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::{Duration, Instant};

/// Easing curve applied to the animation progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Easing {
    /// Constant speed.
    Linear,
    /// Starts slow, ends fast.
    EaseIn,
    /// Starts fast, ends slow.
    EaseOut,
    /// Slow at both ends.
    #[default]
    EaseInOut,
}

impl Easing {
    /// Maps linear progress `t` in `0.0..=1.0` onto the curve.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseIn => t * t * t,
            Easing::EaseOut => 1.0 - (1.0 - t).powi(3),
            Easing::EaseInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            },
        }
    }
}

/// A request to move the horizontal scroll offset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OffsetAnimation {
    /// Offset the animation starts at.
    pub from: f64,
    /// Offset the animation settles at.
    pub to: f64,
    /// Total duration. Zero settles immediately.
    pub duration: Duration,
    /// Easing curve.
    pub easing: Easing,
}

impl OffsetAnimation {
    /// Create a new offset animation.
    pub fn new(from: f64, to: f64, duration: Duration, easing: Easing) -> Self {
        Self {
            from,
            to,
            duration,
            easing,
        }
    }

    /// Samples the offset after `elapsed`.
    pub fn sample(&self, elapsed: Duration) -> f64 {
        if self.duration.is_zero() || elapsed >= self.duration {
            return self.to;
        }
        let t = elapsed.as_secs_f64() / self.duration.as_secs_f64();
        self.from + (self.to - self.from) * self.easing.apply(t)
    }
}

/// How an animation ended.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationOutcome {
    /// The offset the animation settled at.
    pub offset: f64,
    /// `false` if the animation was stopped before reaching its destination.
    pub finished: bool,
}

impl AnimationOutcome {
    /// The animation reached its destination.
    pub fn finished(offset: f64) -> Self {
        Self {
            offset,
            finished: true,
        }
    }

    /// The animation was stopped at `offset`.
    pub fn stopped(offset: f64) -> Self {
        Self {
            offset,
            finished: false,
        }
    }
}

/// Completion signal of an offset animation.
///
/// Resolves to `None` when the animator dropped the animation without settling it.
pub struct AnimationTask {
    inner: TaskInner,
}

enum TaskInner {
    Ready(Option<AnimationOutcome>),
    Pending(oneshot::Receiver<AnimationOutcome>),
}

impl AnimationTask {
    /// A task that is already complete.
    pub fn ready(outcome: AnimationOutcome) -> Self {
        Self {
            inner: TaskInner::Ready(Some(outcome)),
        }
    }

    /// Creates a pending task together with the handle that completes it.
    pub fn pending() -> (Self, AnimationCompleter) {
        let (sender, receiver) = oneshot::channel();
        (
            Self {
                inner: TaskInner::Pending(receiver),
            },
            AnimationCompleter { sender },
        )
    }

    /// Polls the task without a real waker.
    ///
    /// Single-threaded event loops call this once per turn instead of registering a waker.
    pub fn poll_now(&mut self) -> Poll<Option<AnimationOutcome>> {
        let mut cx = Context::from_waker(futures::task::noop_waker_ref());
        Pin::new(self).poll(&mut cx)
    }
}

impl Future for AnimationTask {
    type Output = Option<AnimationOutcome>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match &mut self.get_mut().inner {
            TaskInner::Ready(outcome) => Poll::Ready(outcome.take()),
            TaskInner::Pending(receiver) => match Pin::new(receiver).poll(cx) {
                Poll::Ready(Ok(outcome)) => Poll::Ready(Some(outcome)),
                Poll::Ready(Err(oneshot::Canceled)) => Poll::Ready(None),
                Poll::Pending => Poll::Pending,
            },
        }
    }
}

/// Completes an [AnimationTask].
pub struct AnimationCompleter {
    sender: oneshot::Sender<AnimationOutcome>,
}

impl AnimationCompleter {
    /// Resolves the task. The receiver may already be gone, which is fine.
    pub fn complete(self, outcome: AnimationOutcome) {
        let _ = self.sender.send(outcome);
    }
}

/// Host animation primitive for the pager's scroll offset.
///
/// At most one animation runs at a time: the pager retargets the running one
/// instead of starting a second.
pub trait OffsetAnimator {
    /// Starts `animation`. A zero-duration animation may resolve immediately.
    fn animate(&mut self, animation: OffsetAnimation) -> AnimationTask;

    /// Redirects the running animation to `to`, continuing from the offset
    /// presented right now. Returns `false` when nothing is running.
    fn retarget(&mut self, to: f64, duration: Duration) -> bool;

    /// Advances the running animation to `now` and returns the offset to present.
    fn advance(&mut self, now: Instant) -> Option<f64>;

    /// Stops the running animation where it is, resolving its task.
    fn stop(&mut self);

    /// Whether an animation is in flight.
    fn is_running(&self) -> bool;
}

/// Frame-driven [OffsetAnimator] interpolating with an [Easing] curve.
///
/// The clock starts at the first [advance](OffsetAnimator::advance) after an
/// animation was started or retargeted.
#[derive(Default)]
pub struct FrameAnimator {
    running: Option<Running>,
}

struct Running {
    animation: OffsetAnimation,
    started: Option<Instant>,
    presented: f64,
    completer: AnimationCompleter,
}

impl FrameAnimator {
    /// Create a new idle animator.
    pub fn new() -> Self {
        Self::default()
    }

    /// The offset presented by the running animation.
    pub fn presented_offset(&self) -> Option<f64> {
        self.running.as_ref().map(|running| running.presented)
    }

    fn settle(&mut self, outcome: impl FnOnce(f64) -> AnimationOutcome) {
        if let Some(running) = self.running.take() {
            running.completer.complete(outcome(running.presented));
        }
    }
}

impl OffsetAnimator for FrameAnimator {
    fn animate(&mut self, animation: OffsetAnimation) -> AnimationTask {
        if self.running.is_some() {
            log::warn!("FrameAnimator: starting a new animation while another is running");
            self.settle(AnimationOutcome::stopped);
        }

        if animation.duration.is_zero() {
            return AnimationTask::ready(AnimationOutcome::finished(animation.to));
        }

        let (task, completer) = AnimationTask::pending();
        self.running = Some(Running {
            animation,
            started: None,
            presented: animation.from,
            completer,
        });
        task
    }

    fn retarget(&mut self, to: f64, duration: Duration) -> bool {
        let Some(running) = self.running.as_mut() else {
            return false;
        };

        running.animation = OffsetAnimation::new(running.presented, to, duration, running.animation.easing);
        running.started = None;

        if duration.is_zero() {
            if let Some(running) = self.running.take() {
                running.completer.complete(AnimationOutcome::finished(to));
            }
        }
        true
    }

    fn advance(&mut self, now: Instant) -> Option<f64> {
        let running = self.running.as_mut()?;
        let started = *running.started.get_or_insert(now);
        let elapsed = now.saturating_duration_since(started);

        running.presented = running.animation.sample(elapsed);
        let presented = running.presented;

        if elapsed >= running.animation.duration {
            self.settle(AnimationOutcome::finished);
        }
        Some(presented)
    }

    fn stop(&mut self) {
        self.settle(AnimationOutcome::stopped);
    }

    fn is_running(&self) -> bool {
        self.running.is_some()
    }
}
