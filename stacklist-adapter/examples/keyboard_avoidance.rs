use stacklist::{ManagedItem, Rect, Size};
use stacklist_adapter::Controller;

#[derive(Debug)]
struct Field {
    name: &'static str,
    focused: bool,
}

fn main() {
    // Example: keep the focused field above an on-screen keyboard.
    let mut c = Controller::with_bounds(Size::new(320.0, 480.0));
    c.list_mut().append(
        (0..12).map(|i| {
            ManagedItem::new(Field {
                name: "field",
                focused: i == 9,
            })
            .with_extent(56.0)
        }),
        None,
    );

    let keyboard = Rect::new(0.0, 180.0, 320.0, 300.0);
    let target = c.keyboard_will_show(keyboard, 0, |f: &Field| f.focused);
    println!("scroll target={target:?} inset={:?}", c.list().content_inset());

    let mut now_ms = 0;
    while c.is_animating() {
        now_ms += 16;
        c.tick(now_ms);
    }
    println!("offset={:?}", c.list().content_offset());

    let focused = c.list().payloads().find(|f: &&Field| f.focused);
    println!("focused={:?}", focused.map(|f| f.name));

    let duration = c.keyboard_will_hide(true);
    println!("hide over {duration:?}ms inset={:?}", c.list().content_inset());
}
