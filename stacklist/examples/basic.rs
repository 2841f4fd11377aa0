// Example: minimal usage, edits and the head-to-tail chain.
use stacklist::{ManagedItem, Size, StackList, StackOptions};

fn main() {
    let mut list = StackList::new(
        StackOptions::new()
            .with_bounds(Size::new(320.0, 480.0))
            .with_spacing(8.0),
    );
    list.append(
        ["title", "body", "footer"].map(|name| ManagedItem::new(name).with_extent(44.0)),
        None,
    );
    list.insert_one(ManagedItem::new("banner").with_extent(120.0), 1, None);
    list.move_item(3, 0, None);
    list.remove_at(2, None);

    list.layout_if_needed();
    for &id in list.items() {
        println!("{:?} {:?} frame={:?}", id, list.payload(id), list.frame(id));
    }
    println!("content_size={:?}", list.content_size());
    println!("chain={:?}", list.chain_path());
    println!("valid={:?}", list.validate_chain());
    println!("detached={:?}", list.take_detached());
}
