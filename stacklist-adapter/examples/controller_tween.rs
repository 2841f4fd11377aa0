use stacklist::{AnimationSpec, Easing, ManagedItem, Size};
use stacklist_adapter::{Align, Controller};

fn main() {
    // Example: controller driving tween scrolling without holding any UI objects.
    //
    // An adapter would:
    // - start a tween (e.g. in response to a "scroll to item" command)
    // - call tick(now_ms) in a frame loop / timer
    // - apply the returned offset to the real scroll container (if any)
    // - render frames from the list's visual model
    let mut c = Controller::with_bounds(Size::new(320.0, 480.0));
    c.list_mut()
        .append((0..200).map(|i| ManagedItem::new(i).with_extent(44.0)), None);

    let item = c.list().items()[150];
    let spec = AnimationSpec::new(240).with_easing(Easing::SmoothStep);
    let target = c.start_tween_to_item(item, Align::Center, 0, spec);
    println!("target_offset={target:?}");

    let mut now_ms = 0u64;
    loop {
        now_ms += 16;
        if let Some(off) = c.tick(now_ms) {
            if now_ms % 80 == 0 {
                println!("t={now_ms} off={off}");
            }
        } else {
            break;
        }
    }

    println!("done: off={:?}", c.list().content_offset());
}
