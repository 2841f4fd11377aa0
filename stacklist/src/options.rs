use alloc::rc::Rc;

use crate::stack::StackList;
use crate::{EdgeInsets, Orientation, Size, Vertical};

/// A callback fired after edits, layout passes and scroll-state updates.
pub type OnChangeCallback<V, O> = Rc<dyn Fn(&StackList<V, O>)>;

/// Configuration for [`crate::StackList`].
pub struct StackOptions<V, O = Vertical> {
    /// Which axis items are chained along.
    pub orientation: O,

    /// Initial size of the visible area.
    pub bounds: Size,

    /// Initial content inset of the scroll container.
    pub content_inset: EdgeInsets,

    /// Space between two managed items. The boundary anchors always sit flush.
    pub spacing: f32,

    /// Optional callback fired when the list's state changes.
    ///
    /// Several updates inside `StackList::batch_update` coalesce into one call.
    pub on_change: Option<OnChangeCallback<V, O>>,
}

impl<V, O: Clone> Clone for StackOptions<V, O> {
    fn clone(&self) -> Self {
        Self {
            orientation: self.orientation.clone(),
            bounds: self.bounds,
            content_inset: self.content_inset,
            spacing: self.spacing,
            on_change: self.on_change.clone(),
        }
    }
}

impl<V> StackOptions<V, Vertical> {
    /// Options for a top-to-bottom list.
    pub fn new() -> Self {
        Self::new_with_orientation(Vertical)
    }
}

impl<V> Default for StackOptions<V, Vertical> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V, O: Orientation> StackOptions<V, O> {
    pub fn new_with_orientation(orientation: O) -> Self {
        Self {
            orientation,
            bounds: Size::ZERO,
            content_inset: EdgeInsets::ZERO,
            spacing: 0.0,
            on_change: None,
        }
    }

    pub fn with_bounds(mut self, bounds: Size) -> Self {
        self.bounds = bounds;
        self
    }

    pub fn with_content_inset(mut self, content_inset: EdgeInsets) -> Self {
        self.content_inset = content_inset;
        self
    }

    pub fn with_spacing(mut self, spacing: f32) -> Self {
        self.spacing = spacing;
        self
    }

    pub fn with_on_change(
        mut self,
        on_change: Option<impl Fn(&StackList<V, O>) + 'static>,
    ) -> Self {
        self.on_change = on_change.map(|f| Rc::new(f) as _);
        self
    }
}

impl<V, O: core::fmt::Debug> core::fmt::Debug for StackOptions<V, O> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("StackOptions")
            .field("orientation", &self.orientation)
            .field("bounds", &self.bounds)
            .field("content_inset", &self.content_inset)
            .field("spacing", &self.spacing)
            .finish_non_exhaustive()
    }
}
