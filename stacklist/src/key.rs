use slotmap::new_key_type;

new_key_type! {
    /// Stable identity of a managed item (or boundary anchor) inside a `StackList`.
    ///
    /// Handles outlive their items harmlessly: once an item is detached its handle resolves
    /// to nothing, even after the slot is reused.
    pub struct ItemId;

    /// Identity of a chain link stored in the `ChainStore`.
    pub struct LinkId;
}
