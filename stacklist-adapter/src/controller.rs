use stacklist::{AnimationSpec, ItemId, Orientation, Rect, Size, StackList, StackOptions, Vertical};

use crate::{KeyboardAvoidance, ScrollTween};

/// How long the controller scrolls towards a focused item when the keyboard appears.
pub const KEYBOARD_SCROLL_DURATION_MS: u64 = 250;

/// Where an item should land inside the visible area.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Align {
    Start,
    Center,
    End,
    /// Keep the current offset when the item is fully visible, otherwise scroll the least.
    #[default]
    Auto,
}

/// A framework-neutral controller that wraps a [`StackList`] and provides common adapter
/// workflows (tween-driven scrolling, and keyboard avoidance for vertical lists).
///
/// This type does not hold any UI objects. Adapters drive it by calling:
/// - `on_viewport_size` / `on_scroll` when UI events occur
/// - `tick(now_ms)` each frame while [`Controller::is_animating`] is true
///
/// For UI scroll containers, use the offset returned from `tick()` to set the real scroll
/// position; the list's own content offset is kept in sync.
#[derive(Debug)]
pub struct Controller<V, O = Vertical> {
    list: StackList<V, O>,
    tween: Option<ScrollTween>,
    keyboard: KeyboardAvoidance,
}

impl<V, O: Orientation> Controller<V, O> {
    pub fn new(options: StackOptions<V, O>) -> Self {
        Self::from_list(StackList::new(options))
    }

    pub fn from_list(list: StackList<V, O>) -> Self {
        Self {
            list,
            tween: None,
            keyboard: KeyboardAvoidance::new(),
        }
    }

    pub fn list(&self) -> &StackList<V, O> {
        &self.list
    }

    pub fn list_mut(&mut self) -> &mut StackList<V, O> {
        &mut self.list
    }

    pub fn into_list(self) -> StackList<V, O> {
        self.list
    }

    pub fn keyboard(&self) -> &KeyboardAvoidance {
        &self.keyboard
    }

    /// Whether a scroll tween or any item transition is still running.
    pub fn is_animating(&self) -> bool {
        self.tween.is_some() || self.list.is_animating()
    }

    pub fn is_scroll_animating(&self) -> bool {
        self.tween.is_some()
    }

    pub fn cancel_animation(&mut self) {
        self.tween = None;
    }

    pub fn on_viewport_size(&mut self, bounds: Size) {
        self.list.set_bounds(bounds);
    }

    /// Call this when the UI reports a scroll offset change (e.g. user wheel/drag).
    ///
    /// This cancels any active tween.
    pub fn on_scroll(&mut self, offset: f32) {
        self.cancel_animation();
        self.set_offset(offset);
    }

    fn offset(&self) -> f32 {
        self.list.axis().main_of(self.list.content_offset())
    }

    fn set_offset(&mut self, offset: f32) {
        let axis = self.list.axis();
        self.list.set_content_offset(axis.point(offset, 0.0));
    }

    /// The scrollable range along the stacking axis, content insets included.
    pub fn offset_range(&self) -> (f32, f32) {
        let (leading, _) = self.list.axis().main_insets(self.list.content_inset());
        (-leading, self.list.max_content_offset())
    }

    /// Clamps `offset` to [`Controller::offset_range`].
    pub fn clamp_offset(&self, offset: f32) -> f32 {
        let (min, max) = self.offset_range();
        offset.min(max).max(min)
    }

    /// Advances the list's transitions and the scroll tween.
    ///
    /// When layout shrank the scrollable range, the tween is retargeted to the new end so it
    /// keeps easing instead of stopping short. Returns the new offset while a tween is active,
    /// `None` otherwise.
    pub fn tick(&mut self, now_ms: u64) -> Option<f32> {
        self.list.tick(now_ms);
        self.list.layout_if_needed();

        let mut tween = self.tween?;
        let (min, max) = self.offset_range();
        if tween.clamp_target(now_ms, min, max) {
            adebug!(to = tween.to, "scroll target clamped to content");
        }
        let offset = self.clamp_offset(tween.sample(now_ms));
        self.set_offset(offset);
        self.tween = (!tween.is_done(now_ms)).then_some(tween);
        Some(offset)
    }

    /// Applies a scroll-to-offset immediately (no animation).
    ///
    /// Returns the applied (clamped) offset.
    pub fn scroll_to_offset(&mut self, offset: f32) -> f32 {
        self.cancel_animation();
        let offset = self.clamp_offset(offset);
        self.set_offset(offset);
        offset
    }

    /// The (unclamped) offset that shows `item` with the given alignment.
    pub fn offset_for_item(&mut self, item: ItemId, align: Align) -> Option<f32> {
        self.list.layout_if_needed();
        let axis = self.list.axis();
        let frame: Rect = self.list.frame(item)?;
        let (leading, trailing) = axis.main_insets(self.list.content_inset());
        let view = axis.main(self.list.bounds());
        let start = axis.start(frame);
        let end = axis.end(frame);

        let to_start = start - leading;
        let to_end = end - (view - trailing);
        let current = self.offset();
        Some(match align {
            Align::Start => to_start,
            Align::End => to_end,
            Align::Center => start + axis.extent(frame) / 2.0 - view / 2.0,
            Align::Auto => {
                if start >= current + leading && end <= current + view - trailing {
                    current
                } else if start < current + leading {
                    to_start
                } else {
                    to_end
                }
            }
        })
    }

    /// Scrolls so `item` is shown with the given alignment, immediately.
    ///
    /// Returns the applied (clamped) offset, or `None` if `item` is not managed.
    pub fn scroll_to_item(&mut self, item: ItemId, align: Align) -> Option<f32> {
        let offset = self.offset_for_item(item, align)?;
        Some(self.scroll_to_offset(offset))
    }

    /// Starts a tween to an item (adapter-driven).
    ///
    /// Returns the clamped target offset.
    pub fn start_tween_to_item(
        &mut self,
        item: ItemId,
        align: Align,
        now_ms: u64,
        spec: AnimationSpec,
    ) -> Option<f32> {
        let offset = self.offset_for_item(item, align)?;
        Some(self.start_tween_to_offset(offset, now_ms, spec))
    }

    /// Starts a tween to an offset (adapter-driven).
    ///
    /// Returns the clamped target offset.
    pub fn start_tween_to_offset(&mut self, offset: f32, now_ms: u64, spec: AnimationSpec) -> f32 {
        let to = self.clamp_offset(offset);
        let from = self.offset();
        self.tween = Some(ScrollTween::new(from, to, now_ms, spec));
        to
    }
}

impl<V> Controller<V, Vertical> {
    /// Convenience for a vertical list of the given size.
    pub fn with_bounds(bounds: Size) -> Self {
        Self::new(StackOptions::new().with_bounds(bounds))
    }

    /// Forwards a keyboard-show event and scrolls the focused item into view.
    ///
    /// `keyboard_frame` is relative to the list's visible area. Returns the target offset when
    /// a scroll was started.
    pub fn keyboard_will_show(
        &mut self,
        keyboard_frame: Rect,
        now_ms: u64,
        is_focused: impl FnMut(&V) -> bool,
    ) -> Option<f32> {
        self.list.layout_if_needed();
        let target = self
            .keyboard
            .keyboard_will_show(&mut self.list, keyboard_frame, is_focused)?;
        Some(self.start_tween_to_offset(
            target,
            now_ms,
            AnimationSpec::new(KEYBOARD_SCROLL_DURATION_MS),
        ))
    }

    /// Forwards a keyboard-hide event. See [`KeyboardAvoidance::keyboard_will_hide`].
    pub fn keyboard_will_hide(&mut self, animated: bool) -> Option<u64> {
        let duration = self.keyboard.keyboard_will_hide(&mut self.list, animated)?;
        let clamped = self.clamp_offset(self.offset());
        if clamped != self.offset() && self.tween.is_none() {
            self.set_offset(clamped);
        }
        Some(duration)
    }
}

impl<V> Default for Controller<V, Vertical> {
    fn default() -> Self {
        Self::new(StackOptions::new())
    }
}
