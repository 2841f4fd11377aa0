use crate::*;

use alloc::string::{String, ToString};
use alloc::vec;
use alloc::vec::Vec;
use stacklist::{
    AnimationSpec, Easing, EdgeInsets, Fade, Item, ManagedItem, Rect, Size, StackList,
    StackOptions,
};

#[derive(Clone, Debug, PartialEq)]
struct Row {
    id: &'static str,
    label: String,
}

fn row(id: &'static str) -> Row {
    Row {
        id,
        label: id.to_uppercase(),
    }
}

impl Item<String> for Row {
    fn stable_identifier(&self) -> Option<&str> {
        Some(self.id)
    }

    fn make_managed(&self) -> ManagedItem<String> {
        ManagedItem::new(self.label.clone()).with_extent(20.0)
    }
}

fn labels(list: &StackList<String>) -> Vec<&str> {
    list.payloads().map(String::as_str).collect()
}

fn ids(ds: &DataSource<Row, String>) -> Vec<&'static str> {
    ds.items().iter().map(|r| r.id).collect()
}

fn tall_list(count: u32, bounds: Size) -> Controller<u32> {
    let mut c = Controller::with_bounds(bounds);
    c.list_mut().append(
        (0..count).map(|i| ManagedItem::new(i).with_extent(50.0)),
        None,
    );
    c.list_mut().layout_if_needed();
    c
}

fn linear(duration_ms: u64) -> AnimationSpec {
    AnimationSpec::new(duration_ms).with_easing(Easing::Linear)
}

#[test]
fn scroll_tween_waits_for_delay_and_retargets_within_remaining_time() {
    let mut t = ScrollTween::new(0.0, 100.0, 0, linear(100).with_delay(20));
    assert_eq!(t.sample(10), 0.0);
    assert_eq!(t.sample(70), 50.0);
    assert!(!t.is_done(119));
    assert!(t.is_done(120));

    t.retarget(70, -20.0);
    assert_eq!(t.from, 50.0);
    assert_eq!(t.sample(70), 50.0);
    assert_eq!(t.sample(95), 15.0);
    assert!(!t.is_done(119));
    assert!(t.is_done(120));
}

#[test]
fn scroll_tween_target_is_pulled_into_range() {
    let mut t = ScrollTween::new(0.0, 400.0, 0, linear(100));
    assert!(!t.clamp_target(0, 0.0, 500.0));
    assert_eq!(t.to, 400.0);

    assert!(t.clamp_target(50, 0.0, 300.0));
    assert_eq!((t.from, t.to), (200.0, 300.0));
    assert_eq!(t.sample(75), 250.0);
    assert!(t.is_done(100));
}

#[test]
fn controller_tween_drives_scroll_offset() {
    let mut c = tall_list(10, Size::new(100.0, 100.0));
    let target = c.list().items()[8];

    let to = c
        .start_tween_to_item(
            target,
            Align::Start,
            0,
            AnimationSpec::new(100).with_easing(Easing::SmoothStep),
        )
        .expect("managed item");
    assert_eq!(to, 400.0);

    let mut last = 0.0f32;
    for now_ms in [0u64, 10, 20, 40, 80, 100, 120] {
        if let Some(off) = c.tick(now_ms) {
            assert!(off >= last);
            last = off;
        }
    }
    assert!(!c.is_animating());
    assert_eq!(c.list().content_offset().y, 400.0);
}

#[test]
fn controller_tween_follows_shrinking_content() {
    let mut c = tall_list(10, Size::new(100.0, 100.0));
    assert_eq!(c.start_tween_to_offset(400.0, 0, linear(100)), 400.0);
    assert_eq!(c.tick(25), Some(100.0));

    // Content shrinks to 450: the end of the list is now at 350.
    c.list_mut().remove_at(9, None);
    assert_eq!(c.tick(50), Some(200.0));
    assert_eq!(c.tick(75), Some(275.0));
    assert_eq!(c.tick(100), Some(350.0));
    assert!(!c.is_animating());
    assert_eq!(c.list().content_offset().y, 350.0);
}

#[test]
fn scroll_to_item_alignments() {
    let mut c = tall_list(10, Size::new(100.0, 100.0));
    let items = c.list().items().to_vec();

    assert_eq!(c.scroll_to_item(items[0], Align::Auto), Some(0.0));
    assert_eq!(c.scroll_to_item(items[5], Align::Auto), Some(200.0));
    assert_eq!(c.scroll_to_item(items[4], Align::Auto), Some(200.0));
    assert_eq!(c.scroll_to_item(items[4], Align::Center), Some(175.0));
    assert_eq!(c.scroll_to_item(items[9], Align::Start), Some(400.0));
    assert_eq!(c.scroll_to_item(items[1], Align::End), Some(0.0));

    c.list_mut().remove_at(9, None);
    assert_eq!(c.scroll_to_item(items[9], Align::Start), None);
}

#[test]
fn on_scroll_cancels_tween() {
    let mut c = tall_list(10, Size::new(100.0, 100.0));
    c.start_tween_to_offset(300.0, 0, linear(100));
    assert!(c.is_scroll_animating());

    c.on_scroll(42.0);
    assert!(!c.is_scroll_animating());
    assert_eq!(c.tick(50), None);
    assert_eq!(c.list().content_offset().y, 42.0);
}

#[test]
fn keyboard_scrolls_focused_item_above_keyboard() {
    let mut c = tall_list(10, Size::new(100.0, 400.0));
    let keyboard = Rect::new(0.0, 300.0, 100.0, 100.0);

    let to = c.keyboard_will_show(keyboard, 0, |&v| v == 7);
    assert_eq!(to, Some(100.0));
    assert_eq!(c.list().content_inset().bottom, 100.0);
    assert_eq!(c.list().scroll_indicator_insets().bottom, 100.0);
    assert_eq!(c.keyboard().adjusting_insets_bottom(), 100.0);

    c.tick(KEYBOARD_SCROLL_DURATION_MS);
    assert_eq!(c.list().content_offset().y, 100.0);

    // Same keyboard again: no extra inset, item already visible.
    assert_eq!(c.keyboard_will_show(keyboard, 300, |&v| v == 7), None);
    assert_eq!(c.list().content_inset().bottom, 100.0);

    assert_eq!(c.keyboard_will_hide(true), Some(KEYBOARD_HIDE_DURATION_MS));
    assert_eq!(c.list().content_inset().bottom, 0.0);
    assert_eq!(c.list().scroll_indicator_insets().bottom, 0.0);
    assert!(!c.keyboard().is_adjusted());
    assert_eq!(c.list().content_offset().y, 100.0);

    assert_eq!(c.keyboard_will_hide(true), None);
}

#[test]
fn keyboard_scrolls_back_to_item_above_viewport() {
    let mut c = tall_list(10, Size::new(100.0, 400.0));
    assert_eq!(c.scroll_to_offset(100.0), 100.0);

    let to = c.keyboard_will_show(Rect::new(0.0, 300.0, 100.0, 100.0), 0, |&v| v == 0);
    assert_eq!(to, Some(0.0));
}

#[test]
fn keyboard_without_focus_changes_nothing() {
    let mut list: StackList<u32> =
        StackList::new(StackOptions::new().with_bounds(Size::new(100.0, 400.0)));
    list.append_payloads([1, 2, 3], None);
    list.set_content_inset(EdgeInsets::new(10.0, 0.0, 5.0, 0.0));

    let mut keyboard = KeyboardAvoidance::new();
    let to = keyboard.keyboard_will_show(&mut list, Rect::new(0.0, 300.0, 100.0, 100.0), |_| false);

    assert_eq!(to, None);
    assert_eq!(list.content_inset().bottom, 5.0);
    assert_eq!(keyboard.keyboard_will_hide(&mut list, false), None);
}

#[test]
fn keyboard_hide_restores_existing_inset() {
    let mut list: StackList<u32> =
        StackList::new(StackOptions::new().with_bounds(Size::new(100.0, 400.0)));
    list.append_payloads([1], None);
    list.set_content_inset(EdgeInsets::new(0.0, 0.0, 5.0, 0.0));

    let mut keyboard = KeyboardAvoidance::new();
    keyboard.keyboard_will_show(&mut list, Rect::new(0.0, 350.0, 100.0, 50.0), |&v| v == 1);
    assert_eq!(list.content_inset().bottom, 55.0);

    // A taller keyboard only adds the difference.
    keyboard.keyboard_will_show(&mut list, Rect::new(0.0, 300.0, 100.0, 100.0), |&v| v == 1);
    assert_eq!(list.content_inset().bottom, 105.0);

    assert_eq!(keyboard.keyboard_will_hide(&mut list, false), Some(0));
    assert_eq!(list.content_inset().bottom, 5.0);
}

#[test]
fn data_source_tracks_identifiers() {
    let mut list = StackList::new(StackOptions::new());
    let mut ds: DataSource<Row, String> = DataSource::new();

    ds.append(&mut list, vec![row("a"), row("b"), row("c")], None);
    assert_eq!(ds.len(), 3);
    assert_eq!(labels(&list), vec!["A", "B", "C"]);
    assert_eq!(ds.item_by_identifier(&list, "b"), Some(&row("b")));
    assert_eq!(
        ds.view_by_identifier(&list, "c").map(String::as_str),
        Some("C")
    );
    assert_eq!(ds.item_by_identifier(&list, "zzz"), None);

    ds.move_identifier(&mut list, "a", 2, None);
    assert_eq!(ids(&ds), vec!["b", "c", "a"]);
    assert_eq!(labels(&list), vec!["B", "C", "A"]);

    ds.remove_identifiers(&mut list, &["b", "zzz"], None);
    assert_eq!(ids(&ds), vec!["c", "a"]);
    assert_eq!(labels(&list), vec!["C", "A"]);

    ds.remove_identifier(&mut list, "missing", None);
    assert_eq!(ds.len(), 2);
    assert_eq!(list.validate_chain(), Ok(()));
}

#[test]
fn data_source_index_operations_stay_in_lockstep() {
    let mut list = StackList::new(StackOptions::new());
    let mut ds: DataSource<Row, String> = DataSource::new();

    ds.reset(&mut list, vec![row("a"), row("b")]);
    ds.insert_one(&mut list, row("x"), 1, None);
    ds.append_one(&mut list, row("z"), None);
    ds.insert(&mut list, vec![row("p"), row("q")], 0, None);
    assert_eq!(ids(&ds), vec!["p", "q", "a", "x", "b", "z"]);

    ds.replace(&mut list, vec![row("r")], 0..2, None);
    ds.replace_one(&mut list, row("a"), 1, None);
    assert_eq!(ids(&ds), vec!["r", "a", "x", "b", "z"]);

    ds.remove_indexes(&mut list, &[4, 0, 4], None);
    ds.move_item(&mut list, 0, 2, None);
    assert_eq!(ids(&ds), vec!["x", "b", "a"]);

    ds.remove_first_where(&mut list, |r| r.id != "x", None);
    assert_eq!(ids(&ds), vec!["x", "a"]);
    ds.remove_last_where(&mut list, |r| r.id.len() == 1, None);
    assert_eq!(ids(&ds), vec!["x"]);
    ds.remove_at(&mut list, 0, None);
    assert!(ds.is_empty());
    assert!(list.is_empty());

    ds.reset(&mut list, vec![row("k")]);
    assert_eq!(labels(&list), vec!["K"]);
}

#[test]
fn data_source_animated_remove_finishes_on_tick() {
    let mut list = StackList::new(StackOptions::new().with_bounds(Size::new(100.0, 100.0)));
    let mut ds: DataSource<Row, String> = DataSource::new();
    ds.append(&mut list, vec![row("a"), row("b")], None);
    list.layout_if_needed();

    let t = ds.remove_identifier(&mut list, "a", Some(&Fade::default()));
    assert_eq!(ids(&ds), vec!["b"]);
    assert!(!t.is_complete());
    assert_eq!(list.subviews().len(), 2);

    list.tick(300);
    assert!(t.is_complete());
    assert_eq!(list.take_detached(), vec!["A".to_string()]);
}

#[test]
fn data_source_accepts_managed_items() {
    let mut list = StackList::new(StackOptions::new());
    let mut ds: DataSource<ManagedItem<u32>, u32> = DataSource::new();
    ds.append(
        &mut list,
        vec![ManagedItem::new(1).with_identifier("one"), ManagedItem::new(2)],
        None,
    );
    assert_eq!(ds.view_by_identifier(&list, "one"), Some(&1));
    assert_eq!(list.len(), 2);
}

#[cfg(debug_assertions)]
#[test]
#[should_panic(expected = "unique identifier")]
fn data_source_rejects_duplicate_identifiers() {
    let mut list = StackList::new(StackOptions::new());
    let mut ds: DataSource<Row, String> = DataSource::new();
    ds.append(&mut list, vec![row("a")], None);
    ds.append_one(&mut list, row("a"), None);
}

#[cfg(not(debug_assertions))]
#[test]
fn data_source_skips_duplicate_identifiers() {
    let mut list = StackList::new(StackOptions::new());
    let mut ds: DataSource<Row, String> = DataSource::new();
    ds.append(&mut list, vec![row("a")], None);
    let t = ds.append(&mut list, vec![row("b"), row("a")], None);
    assert!(t.is_complete());
    assert_eq!(ids(&ds), vec!["a"]);
    assert_eq!(list.len(), 1);
}
