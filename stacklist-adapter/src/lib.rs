//! Adapter utilities for the `stacklist` crate.
//!
//! The `stacklist` crate is UI-agnostic and focuses on the chain engine and the visual model.
//! This crate provides small, framework-neutral helpers commonly needed by adapters:
//!
//! - A data source that keeps caller items in lockstep with the list and edits by identifier
//! - Keyboard avoidance for vertical lists (bottom inset plus scrolling the focused item into
//!   view)
//! - Tween-based smooth scrolling driven by a controller, following the content as it shrinks
//!
//! This crate is intentionally framework-agnostic (no widget toolkit bindings).
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod controller;
mod data_source;
mod keyboard;
mod scroll_tween;

#[cfg(test)]
mod tests;

pub use controller::{Align, Controller, KEYBOARD_SCROLL_DURATION_MS};
pub use data_source::DataSource;
pub use keyboard::{KEYBOARD_HIDE_DURATION_MS, KeyboardAvoidance};
pub use scroll_tween::ScrollTween;
