use alloc::string::String;

use crate::{EdgeInsets, NestedScroll};

/// A caller payload plus the metadata the list needs to manage it.
#[derive(Clone, Debug, PartialEq)]
pub struct ManagedItem<V> {
    pub payload: V,
    /// Space reserved around the payload inside its container.
    pub margins: EdgeInsets,
    /// Optional stable identifier. Must be unique among managed items.
    pub identifier: Option<String>,
    /// Intrinsic size along the stacking axis (excluding margins).
    pub extent: f32,
    /// Marks the payload as a nested scroll region (vertical lists only).
    pub nested_scroll: Option<NestedScroll>,
}

impl<V> ManagedItem<V> {
    pub fn new(payload: V) -> Self {
        Self {
            payload,
            margins: EdgeInsets::ZERO,
            identifier: None,
            extent: 0.0,
            nested_scroll: None,
        }
    }

    pub fn with_margins(mut self, margins: EdgeInsets) -> Self {
        self.margins = margins;
        self
    }

    pub fn with_identifier(mut self, identifier: impl Into<String>) -> Self {
        self.identifier = Some(identifier.into());
        self
    }

    pub fn with_extent(mut self, extent: f32) -> Self {
        self.extent = extent;
        self
    }

    pub fn with_nested_scroll(mut self, nested_scroll: NestedScroll) -> Self {
        self.nested_scroll = Some(nested_scroll);
        self
    }
}

/// Anything that can describe a managed item: a raw payload wrapper or a richer descriptor.
pub trait Item<V> {
    fn stable_identifier(&self) -> Option<&str> {
        None
    }

    fn make_managed(&self) -> ManagedItem<V>;
}

impl<V: Clone> Item<V> for ManagedItem<V> {
    fn stable_identifier(&self) -> Option<&str> {
        self.identifier.as_deref()
    }

    fn make_managed(&self) -> ManagedItem<V> {
        self.clone()
    }
}

/// Where an item is in its lifecycle.
///
/// `unattached` and `removed` items have no record in the list at all.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ItemPhase {
    /// In the view tree with a chain entry, no links yet.
    Attached,
    /// Part of the chain with both links active.
    Linked,
    /// Out of the sequence, links deactivated, waiting for its transition to finish.
    Detaching,
}

/// How an item's frame is decided.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Positioning {
    /// Placed by layout along the chain.
    Constrained,
    /// Left wherever its frame currently is; layout does not touch it.
    FreeForm,
}
