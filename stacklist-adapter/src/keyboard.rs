use stacklist::{Rect, StackList, Vertical};

/// How long the host should animate inset changes when the keyboard hides.
pub const KEYBOARD_HIDE_DURATION_MS: u64 = 250;

/// Keeps the focused item visible while an on-screen keyboard covers the bottom of the list.
///
/// The list's bottom content inset and scroll indicator inset grow by the keyboard's height
/// while it is shown; the amount is remembered so hiding can undo exactly that much.
///
/// The keyboard covers the bottom of the screen, so only vertical lists can scroll away from
/// it:
///
/// ```compile_fail
/// use stacklist::{Horizontal, Rect, StackList, StackOptions};
/// use stacklist_adapter::KeyboardAvoidance;
///
/// let mut list: StackList<u32, Horizontal> =
///     StackList::new(StackOptions::new_with_orientation(Horizontal));
/// let keyboard = Rect::new(0.0, 300.0, 100.0, 100.0);
/// KeyboardAvoidance::new().keyboard_will_show(&mut list, keyboard, |_| true);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KeyboardAvoidance {
    adjusting_insets_bottom: f32,
}

impl KeyboardAvoidance {
    pub fn new() -> Self {
        Self::default()
    }

    /// The bottom inset currently added on behalf of the keyboard.
    pub fn adjusting_insets_bottom(&self) -> f32 {
        self.adjusting_insets_bottom
    }

    pub fn is_adjusted(&self) -> bool {
        self.adjusting_insets_bottom != 0.0
    }

    /// Reacts to the keyboard appearing.
    ///
    /// `keyboard_frame` is relative to the list's visible area. The first managed item whose
    /// payload `is_focused` is kept in view; when there is none, nothing changes.
    ///
    /// Returns the content offset the host should scroll to (animated), if any.
    pub fn keyboard_will_show<V>(
        &mut self,
        list: &mut StackList<V, Vertical>,
        keyboard_frame: Rect,
        mut is_focused: impl FnMut(&V) -> bool,
    ) -> Option<f32> {
        let focused = list
            .items()
            .iter()
            .copied()
            .find(|&id| list.payload(id).is_some_and(&mut is_focused))?;
        let frame = list.frame(focused)?;

        let delta = keyboard_frame.height() - self.adjusting_insets_bottom;
        let mut inset = list.content_inset();
        inset.bottom += delta;
        list.set_content_inset(inset);
        let mut indicator = list.scroll_indicator_insets();
        indicator.bottom += delta;
        list.set_scroll_indicator_insets(indicator);
        self.adjusting_insets_bottom = keyboard_frame.height();

        let offset = list.content_offset().y;
        let keyboard_top = offset + keyboard_frame.min_y();
        let bottom_diff = frame.max_y() - keyboard_top;
        let top_diff = offset + list.content_inset().top - frame.min_y();
        adebug!(?focused, bottom_diff, top_diff, "keyboard_will_show");
        if bottom_diff > 0.0 {
            Some(offset + bottom_diff)
        } else if top_diff > 0.0 {
            Some(offset - top_diff)
        } else {
            None
        }
    }

    /// Reacts to the keyboard hiding by removing the inset it added.
    ///
    /// Returns the duration the host should animate the inset change over, or `None` when
    /// nothing was adjusted.
    pub fn keyboard_will_hide<V>(
        &mut self,
        list: &mut StackList<V, Vertical>,
        animated: bool,
    ) -> Option<u64> {
        if !self.is_adjusted() {
            return None;
        }
        let adjusted = self.adjusting_insets_bottom;
        let mut inset = list.content_inset();
        inset.bottom -= adjusted;
        list.set_content_inset(inset);
        let mut indicator = list.scroll_indicator_insets();
        indicator.bottom -= adjusted;
        list.set_scroll_indicator_insets(indicator);
        self.adjusting_insets_bottom = 0.0;
        adebug!(adjusted, "keyboard_will_hide");
        Some(if animated { KEYBOARD_HIDE_DURATION_MS } else { 0 })
    }
}
