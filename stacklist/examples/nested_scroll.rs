// Example: a nested scroll region that pins while the outer list scrolls through it.
use stacklist::{EdgeInsets, ManagedItem, NestedScroll, Point, Size, StackList, StackOptions};

fn main() {
    let mut list = StackList::new(StackOptions::new().with_bounds(Size::new(320.0, 400.0)));
    list.append(
        [
            ManagedItem::new("header").with_extent(80.0),
            ManagedItem::new("web").with_nested_scroll(NestedScroll::new(
                Size::new(320.0, 1_500.0),
                EdgeInsets::ZERO,
            )),
            ManagedItem::new("comments").with_extent(300.0),
        ],
        None,
    );
    list.layout_if_needed();
    let web = list.items()[1];
    println!("content_size={:?}", list.content_size());

    for offset in [0.0, 40.0, 80.0, 600.0, 1_180.0, 1_400.0] {
        list.set_content_offset(Point::new(0.0, offset));
        let state = list.nested_scroll(web).expect("web is a nested scroll region");
        println!(
            "outer={offset} inner={} translation={} height={}",
            state.content_offset, state.translation, state.height
        );
    }
}
