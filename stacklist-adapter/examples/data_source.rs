use stacklist::{Fade, Item, ManagedItem, Size, StackList, StackOptions};
use stacklist_adapter::DataSource;

#[derive(Clone, Debug)]
struct Message {
    id: String,
    text: String,
}

impl Item<String> for Message {
    fn stable_identifier(&self) -> Option<&str> {
        Some(&self.id)
    }

    fn make_managed(&self) -> ManagedItem<String> {
        ManagedItem::new(self.text.clone()).with_extent(40.0)
    }
}

fn message(id: &str, text: &str) -> Message {
    Message {
        id: id.to_string(),
        text: text.to_string(),
    }
}

fn main() {
    // Example: edit a list by stable identifiers while the caller keeps its own models.
    let mut list = StackList::new(StackOptions::new().with_bounds(Size::new(320.0, 480.0)));
    let mut ds: DataSource<Message, String> = DataSource::new();

    ds.reset(
        &mut list,
        vec![message("m1", "hello"), message("m2", "how are you?")],
    );
    ds.append_one(&mut list, message("m3", "fine, thanks"), Some(&Fade::default()));
    ds.move_identifier(&mut list, "m3", 0, None);
    let removal = ds.remove_identifier(&mut list, "m2", Some(&Fade::default()));

    list.tick(1_000);
    println!("removal complete={}", removal.is_complete());
    println!(
        "items={:?}",
        ds.items().iter().map(|m| m.id.as_str()).collect::<Vec<_>>()
    );
    println!("m1 view={:?}", ds.view_by_identifier(&list, "m1"));
    println!("payloads={:?}", list.payloads().collect::<Vec<_>>());
}
