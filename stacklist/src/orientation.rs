//! Orientation strategies: which axis is chained and how items bind across it.

use core::fmt;

use crate::{Axis, Edge, ItemId, Link};

/// A full-bleed binding of an item to the head anchor across the stacking axis.
///
/// Vertical lists pin `left`/`right`; horizontal lists pin `top`/`bottom`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CrossBinding {
    pub item: ItemId,
    pub anchor: ItemId,
    pub edges: (Edge, Edge),
}

/// Decides which geometric axis is chained and which edges a link connects.
///
/// The two provided strategies, [`Vertical`] and [`Horizontal`], are mirror images. Only the
/// vertical strategy supports nested scroll regions.
pub trait Orientation: Copy + Default + fmt::Debug {
    fn axis(&self) -> Axis;

    /// The edge a link arrives at (`top` or `left`).
    fn leading_edge(&self) -> Edge {
        match self.axis() {
            Axis::Vertical => Edge::Top,
            Axis::Horizontal => Edge::Left,
        }
    }

    /// The edge a link leaves from (`bottom` or `right`).
    fn trailing_edge(&self) -> Edge {
        match self.axis() {
            Axis::Vertical => Edge::Bottom,
            Axis::Horizontal => Edge::Right,
        }
    }

    /// The two edges bound to the container across the stacking axis.
    fn cross_edges(&self) -> (Edge, Edge) {
        match self.axis() {
            Axis::Vertical => (Edge::Left, Edge::Right),
            Axis::Horizontal => (Edge::Top, Edge::Bottom),
        }
    }

    /// Builds the link expressing "`a`'s trailing edge meets `b`'s leading edge".
    fn link(&self, a: ItemId, b: ItemId, spacing: f32) -> Link {
        Link {
            from: a,
            from_edge: self.trailing_edge(),
            to: b,
            to_edge: self.leading_edge(),
            spacing,
        }
    }

    /// Builds the cross-axis binding of `item` against the head anchor.
    fn bind_cross_axis(&self, item: ItemId, head: ItemId) -> CrossBinding {
        CrossBinding {
            item,
            anchor: head,
            edges: self.cross_edges(),
        }
    }

    fn supports_nested_scroll(&self) -> bool {
        false
    }
}

/// Stacks items top to bottom.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vertical;

/// Stacks items left to right.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Horizontal;

impl Orientation for Vertical {
    fn axis(&self) -> Axis {
        Axis::Vertical
    }

    fn supports_nested_scroll(&self) -> bool {
        true
    }
}

impl Orientation for Horizontal {
    fn axis(&self) -> Axis {
        Axis::Horizontal
    }
}
