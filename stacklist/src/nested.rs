//! Sticky hand-off between the list's scrolling and a nested scroll region's scrolling.

use crate::{EdgeInsets, Size};

/// Content geometry of a nested scroll region, as reported by the host.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NestedScroll {
    pub content_size: Size,
    pub content_inset: EdgeInsets,
}

impl NestedScroll {
    pub fn new(content_size: Size, content_inset: EdgeInsets) -> Self {
        Self {
            content_size,
            content_inset,
        }
    }

    /// Full extent of the nested content including its insets.
    pub fn content_extent(&self) -> f32 {
        self.content_inset.top + self.content_size.height + self.content_inset.bottom
    }
}

/// The derived state the list keeps for a nested scroll region.
///
/// `height` drives the item's size, `trailing_spacing` is written into the item's `next` link,
/// and `content_offset`/`translation` describe how far the region has scrolled internally and
/// how far it is shifted to stay pinned while the outer list scrolls past it.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NestedScrollState {
    pub scroll: NestedScroll,
    pub height: f32,
    pub trailing_spacing: f32,
    pub content_offset: f32,
    pub translation: f32,
}

impl NestedScrollState {
    pub(crate) fn new(scroll: NestedScroll) -> Self {
        Self {
            scroll,
            height: 0.0,
            trailing_spacing: 0.0,
            content_offset: -scroll.content_inset.top,
            translation: 0.0,
        }
    }

    /// Recomputes the derived state.
    ///
    /// - `container_height`: the list's visible height.
    /// - `outer_offset`: the list's content offset along the stacking axis.
    /// - `top`: the item's laid-out leading edge (without translation).
    ///
    /// Every field is only written when its value changes, so redundant notifications are
    /// harmless. Returns whether `height` or `trailing_spacing` changed (i.e. layout is needed).
    pub(crate) fn refresh(&mut self, container_height: f32, outer_offset: f32, top: f32) -> bool {
        let max_height = self.scroll.content_extent();
        let mut geometry_changed = false;

        if max_height <= container_height {
            if self.height != max_height {
                self.height = max_height;
                geometry_changed = true;
            }
            if self.trailing_spacing != 0.0 {
                self.trailing_spacing = 0.0;
                geometry_changed = true;
            }
            return geometry_changed;
        }

        if self.height != container_height {
            self.height = container_height;
            geometry_changed = true;
        }
        let spacing = max_height - container_height;
        if self.trailing_spacing != spacing {
            self.trailing_spacing = spacing;
            geometry_changed = true;
        }

        let inset_top = self.scroll.content_inset.top;
        if outer_offset <= top {
            self.content_offset = -inset_top;
            self.translation = 0.0;
        } else {
            let metric = (outer_offset - top).min(max_height - container_height);
            if metric != self.translation {
                self.content_offset = -inset_top + metric;
                self.translation = metric;
            }
        }
        geometry_changed
    }
}
