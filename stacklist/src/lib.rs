//! A headless stacked list engine.
//!
//! For host-level utilities (keyboard avoidance, identifier-keyed editing, scroll tweens), see
//! the `stacklist-adapter` crate.
//!
//! Items are stacked along one axis and held together by a chain of links running from a
//! leading boundary anchor, through every managed item in order, to a trailing boundary anchor.
//! Edits (replace, insert, append, remove, move) re-stick the chain locally, so the list's
//! order and its layout constraints can never disagree.
//!
//! It is UI-agnostic. A TUI/GUI layer is expected to provide:
//! - the visible size of the list and its scroll offset
//! - each item's intrinsic size along the stacking axis
//! - a clock, through `StackList::tick`, while transitions are running
//!
//! and to mirror each item's frame, alpha, transform and z-order onto real widgets.
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod animation;
mod chain;
mod item;
mod key;
mod nested;
mod options;
mod orientation;
mod stack;
mod types;


pub use animation::{
    AnimationSpec, Animator, Completion, Easing, Fade, SlideFromLeading, Stage, Transition,
};
pub use chain::{ChainFault, ChainStore, Link, Spaces};
pub use item::{Item, ItemPhase, ManagedItem, Positioning};
pub use key::{ItemId, LinkId};
pub use nested::{NestedScroll, NestedScrollState};
pub use options::{OnChangeCallback, StackOptions};
pub use orientation::{CrossBinding, Horizontal, Orientation, Vertical};
pub use stack::StackList;
pub use types::{Axis, Edge, EdgeInsets, Point, Rect, Size, Transform, Visual};
