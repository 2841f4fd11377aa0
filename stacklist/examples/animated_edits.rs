// Example: hook-driven transitions sampled by a frame loop.
use stacklist::{Fade, ManagedItem, SlideFromLeading, Size, StackList, StackOptions};

fn main() {
    let mut list = StackList::new(StackOptions::new().with_bounds(Size::new(320.0, 480.0)));
    list.append((0..4).map(|i| ManagedItem::new(i).with_extent(60.0)), None);
    list.layout_if_needed();

    // Removed items stay in the view tree until their transition completes.
    let second = list.items()[1];
    let removal = list.remove_one(second, Some(&Fade::default()));
    list.append_one(ManagedItem::new(9).with_extent(60.0), Some(&SlideFromLeading::default()));

    let mut now_ms = 0u64;
    while list.is_animating() {
        now_ms += 16;
        list.tick(now_ms);
        if now_ms % 96 == 0 {
            for &id in list.subviews() {
                let shown = list.presentation(id).unwrap_or_default();
                println!(
                    "t={now_ms} {:?} y={:.1} alpha={:.2} tx={:.1}",
                    list.payload(id),
                    shown.frame.origin.y,
                    shown.alpha,
                    shown.transform.tx
                );
            }
        }
    }

    println!("removal complete={}", removal.is_complete());
    println!("detached={:?}", list.take_detached());
}
