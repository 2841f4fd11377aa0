use alloc::string::String;
use alloc::vec::Vec;
use core::marker::PhantomData;
use core::ops::Range;

use stacklist::{Animator, Item, ManagedItem, Orientation, StackList, Transition, Vertical};

/// Keeps a caller-side `Vec<T>` in lockstep with a [`StackList`] and adds identifier-keyed
/// editing on top of the list's index-based operations.
///
/// The data source does not own the list; every operation takes it explicitly so the same
/// list can also be driven by a [`crate::Controller`].
pub struct DataSource<T, V, O = Vertical> {
    items: Vec<T>,
    _list: PhantomData<fn(&StackList<V, O>)>,
}

impl<T: core::fmt::Debug, V, O> core::fmt::Debug for DataSource<T, V, O> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DataSource")
            .field("items", &self.items)
            .finish()
    }
}

impl<T, V, O> Default for DataSource<T, V, O> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            _list: PhantomData,
        }
    }
}

impl<T: Item<V>, V, O: Orientation> DataSource<T, V, O> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    fn managed(item: &T) -> ManagedItem<V> {
        let mut managed = item.make_managed();
        managed.identifier = item.stable_identifier().map(String::from);
        managed
    }

    /// Whether inserting `items` (in place of `replacing`) would duplicate an identifier.
    fn has_duplicate(&self, list: &StackList<V, O>, items: &[T], replacing: Range<usize>) -> bool {
        let mut seen: Vec<&str> = Vec::new();
        for identifier in items.iter().filter_map(|item| item.stable_identifier()) {
            if seen.contains(&identifier) {
                return true;
            }
            seen.push(identifier);
            let existing = list
                .find_identifier(identifier)
                .and_then(|id| list.index_of(id));
            if existing.is_some_and(|index| !replacing.contains(&index)) {
                return true;
            }
        }
        false
    }

    fn reject_duplicate(&self) -> Transition {
        awarn!("every item must have a unique identifier; nothing inserted");
        debug_assert!(false, "every item must have a unique identifier");
        Transition::ready()
    }

    fn debug_assert_lockstep(&self, list: &StackList<V, O>) {
        debug_assert_eq!(
            self.items.len(),
            list.len(),
            "data source and list went out of sync"
        );
    }

    /// Replaces every item without animation.
    pub fn reset(&mut self, list: &mut StackList<V, O>, items: Vec<T>) -> Transition {
        let len = self.items.len();
        if self.has_duplicate(list, &items, 0..len) {
            return self.reject_duplicate();
        }
        let transition = list.reset(items.iter().map(Self::managed));
        self.items = items;
        self.debug_assert_lockstep(list);
        transition
    }

    pub fn insert(
        &mut self,
        list: &mut StackList<V, O>,
        items: Vec<T>,
        at: usize,
        animator: Option<&dyn Animator>,
    ) -> Transition {
        if self.has_duplicate(list, &items, 0..0) {
            return self.reject_duplicate();
        }
        let transition = list.insert(items.iter().map(Self::managed), at, animator);
        self.items.splice(at..at, items);
        self.debug_assert_lockstep(list);
        transition
    }

    pub fn insert_one(
        &mut self,
        list: &mut StackList<V, O>,
        item: T,
        at: usize,
        animator: Option<&dyn Animator>,
    ) -> Transition {
        self.insert(list, alloc::vec![item], at, animator)
    }

    pub fn append(
        &mut self,
        list: &mut StackList<V, O>,
        items: Vec<T>,
        animator: Option<&dyn Animator>,
    ) -> Transition {
        let len = self.items.len();
        self.insert(list, items, len, animator)
    }

    pub fn append_one(
        &mut self,
        list: &mut StackList<V, O>,
        item: T,
        animator: Option<&dyn Animator>,
    ) -> Transition {
        let len = self.items.len();
        self.insert_one(list, item, len, animator)
    }

    pub fn replace(
        &mut self,
        list: &mut StackList<V, O>,
        items: Vec<T>,
        range: Range<usize>,
        animator: Option<&dyn Animator>,
    ) -> Transition {
        if self.has_duplicate(list, &items, range.clone()) {
            return self.reject_duplicate();
        }
        let transition = list.replace(items.iter().map(Self::managed), range.clone(), animator);
        self.items.splice(range, items);
        self.debug_assert_lockstep(list);
        transition
    }

    pub fn replace_one(
        &mut self,
        list: &mut StackList<V, O>,
        item: T,
        at: usize,
        animator: Option<&dyn Animator>,
    ) -> Transition {
        self.replace(list, alloc::vec![item], at..at + 1, animator)
    }

    pub fn remove_at(
        &mut self,
        list: &mut StackList<V, O>,
        index: usize,
        animator: Option<&dyn Animator>,
    ) -> Transition {
        let transition = list.remove_at(index, animator);
        self.items.remove(index);
        self.debug_assert_lockstep(list);
        transition
    }

    /// Removes the items at `indexes`. Duplicate indexes count once.
    pub fn remove_indexes(
        &mut self,
        list: &mut StackList<V, O>,
        indexes: &[usize],
        animator: Option<&dyn Animator>,
    ) -> Transition {
        let transition = list.remove_indexes(indexes, animator);
        let mut sorted = indexes.to_vec();
        sorted.sort_unstable();
        sorted.dedup();
        for &index in sorted.iter().rev() {
            self.items.remove(index);
        }
        self.debug_assert_lockstep(list);
        transition
    }

    pub fn move_item(
        &mut self,
        list: &mut StackList<V, O>,
        from: usize,
        to: usize,
        animator: Option<&dyn Animator>,
    ) -> Transition {
        let transition = list.move_item(from, to, animator);
        if from != to {
            let item = self.items.remove(from);
            self.items.insert(to, item);
        }
        self.debug_assert_lockstep(list);
        transition
    }

    /// Removes the first item matching `predicate`. Nothing happens when none matches.
    pub fn remove_first_where(
        &mut self,
        list: &mut StackList<V, O>,
        predicate: impl FnMut(&T) -> bool,
        animator: Option<&dyn Animator>,
    ) -> Transition {
        match self.items.iter().position(predicate) {
            Some(index) => self.remove_at(list, index, animator),
            None => Transition::ready(),
        }
    }

    /// Removes the last item matching `predicate`. Nothing happens when none matches.
    pub fn remove_last_where(
        &mut self,
        list: &mut StackList<V, O>,
        predicate: impl FnMut(&T) -> bool,
        animator: Option<&dyn Animator>,
    ) -> Transition {
        match self.items.iter().rposition(predicate) {
            Some(index) => self.remove_at(list, index, animator),
            None => Transition::ready(),
        }
    }

    fn index_of_identifier(list: &StackList<V, O>, identifier: &str) -> Option<usize> {
        list.index_of(list.find_identifier(identifier)?)
    }

    /// Removes the item carrying `identifier`, if any.
    pub fn remove_identifier(
        &mut self,
        list: &mut StackList<V, O>,
        identifier: &str,
        animator: Option<&dyn Animator>,
    ) -> Transition {
        match Self::index_of_identifier(list, identifier) {
            Some(index) => self.remove_at(list, index, animator),
            None => Transition::ready(),
        }
    }

    /// Removes every item carrying one of `identifiers`. Unknown identifiers are skipped.
    pub fn remove_identifiers(
        &mut self,
        list: &mut StackList<V, O>,
        identifiers: &[&str],
        animator: Option<&dyn Animator>,
    ) -> Transition {
        let indexes: Vec<usize> = identifiers
            .iter()
            .filter_map(|identifier| Self::index_of_identifier(list, identifier))
            .collect();
        if indexes.is_empty() {
            return Transition::ready();
        }
        self.remove_indexes(list, &indexes, animator)
    }

    /// Moves the item carrying `identifier` to index `to`.
    pub fn move_identifier(
        &mut self,
        list: &mut StackList<V, O>,
        identifier: &str,
        to: usize,
        animator: Option<&dyn Animator>,
    ) -> Transition {
        match Self::index_of_identifier(list, identifier) {
            Some(from) => self.move_item(list, from, to, animator),
            None => Transition::ready(),
        }
    }

    pub fn item_by_identifier(&self, list: &StackList<V, O>, identifier: &str) -> Option<&T> {
        self.items.get(Self::index_of_identifier(list, identifier)?)
    }

    /// The list payload of the item carrying `identifier`.
    pub fn view_by_identifier<'a>(
        &self,
        list: &'a StackList<V, O>,
        identifier: &str,
    ) -> Option<&'a V> {
        list.payload(list.find_identifier(identifier)?)
    }
}
