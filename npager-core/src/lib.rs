#![warn(missing_docs)]

//! Core library for npager => See `npager` crate.
//!
//! Contains the shared plumbing the pager widgets are built on: update flags,
//! signals, offset animations, configuration and error types.

pub use vello as vg;

/// Contains the [Update](update::Update) flags returned by event handlers.
pub mod update;

/// Contains the signal system used for value-changed notifications.
pub mod signal;

/// Contains offset animations and the [OffsetAnimator](animation::OffsetAnimator) seam.
pub mod animation;

/// Contains the [PagerConfig](config::PagerConfig) struct.
pub mod config;

/// Contains error types.
pub mod error;

/// Contains the fatal-error channel for contract breaches.
pub mod diagnostics;

/// Contains layout invalidation tracking.
pub mod layout;
