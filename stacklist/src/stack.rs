use alloc::collections::BTreeSet;
use alloc::string::String;
use alloc::vec::Vec;
use core::cell::Cell;
use core::ops::Range;

use slotmap::SlotMap;

use crate::animation::{Property, Timeline, Tween};
use crate::chain::{ChainFault, ChainStore};
use crate::orientation::CrossBinding;
use crate::{
    AnimationSpec, Animator, Axis, Completion, EdgeInsets, ItemId, ItemPhase, ManagedItem,
    NestedScrollState, Orientation, Point, Positioning, Rect, Size, Stage, StackOptions,
    Transform, Transition, Vertical, Visual,
};

#[derive(Debug)]
struct Node<V> {
    /// `None` for the two boundary anchors.
    payload: Option<V>,
    identifier: Option<String>,
    margins: EdgeInsets,
    extent: f32,
    phase: ItemPhase,
    positioning: Positioning,
    visual: Visual,
    cross: Option<CrossBinding>,
    nested: Option<NestedScrollState>,
}

impl<V> Node<V> {
    fn anchor() -> Self {
        Self {
            payload: None,
            identifier: None,
            margins: EdgeInsets::ZERO,
            extent: 0.0,
            phase: ItemPhase::Linked,
            positioning: Positioning::Constrained,
            visual: Visual::default(),
            cross: None,
            nested: None,
        }
    }

    /// Size along the stacking axis including margins.
    fn main_extent(&self, axis: Axis) -> f32 {
        let (leading, trailing) = axis.main_insets(self.margins);
        let body = match &self.nested {
            Some(state) => state.height,
            None => self.extent,
        };
        leading + body + trailing
    }
}

#[derive(Debug)]
struct PendingDetach {
    transition: Transition,
    items: Vec<ItemId>,
}

/// Forwards `on_replace` to `on_insert` and completes right away: pure insertions have
/// nothing to detach.
struct InsertOnly<'a>(&'a dyn Animator);

impl Animator for InsertOnly<'_> {
    fn on_replace(
        &self,
        stage: &mut dyn Stage,
        _removed: &[ItemId],
        inserted: &[ItemId],
        completion: Completion,
    ) {
        self.0.on_insert(stage, inserted);
        completion.complete();
    }

    fn on_remove(&self, stage: &mut dyn Stage, removed: &[ItemId], completion: Completion) {
        self.0.on_remove(stage, removed, completion);
    }

    fn on_insert(&self, stage: &mut dyn Stage, inserted: &[ItemId]) {
        self.0.on_insert(stage, inserted);
    }

    fn on_move(&self, stage: &mut dyn Stage, item: ItemId, from: Rect, to: Rect) {
        self.0.on_move(stage, item, from, to);
    }
}

/// An ordered stack of managed items chained head to tail along one axis.
///
/// Between every two neighbours of `[head] + items + [tail]` there is exactly one active link
/// in the [`ChainStore`]. Every edit keeps that invariant: it breaks the links at the edges
/// of the affected range and re-sticks the chain through whatever now sits there.
///
/// The list is headless. It keeps a model of each item's frame, alpha, transform and z-order
/// plus the scroll container's offset and insets; a UI layer mirrors that model onto real
/// widgets and drives time through [`StackList::tick`].
///
/// Edits are not queued. Topology changes commit immediately, so when two animated edits must
/// not overlap, wait for the first one's [`Transition`] before starting the second.
#[derive(Debug)]
pub struct StackList<V, O = Vertical> {
    options: StackOptions<V, O>,
    nodes: SlotMap<ItemId, Node<V>>,
    chain: ChainStore,
    sequence: Vec<ItemId>,
    subviews: Vec<ItemId>,
    head: ItemId,
    tail: ItemId,

    bounds: Size,
    content_offset: Point,
    content_inset: EdgeInsets,
    scroll_indicator_insets: EdgeInsets,
    content_size: Size,
    needs_layout: bool,

    now_ms: u64,
    timeline: Timeline,
    pending: Vec<PendingDetach>,
    detached: Vec<V>,

    notify_depth: Cell<usize>,
    notify_pending: Cell<bool>,
}

impl<V> Default for StackList<V, Vertical> {
    fn default() -> Self {
        Self::new(StackOptions::new())
    }
}

impl<V, O: Orientation> StackList<V, O> {
    /// Creates an empty list with its two boundary anchors already chained together.
    pub fn new(options: StackOptions<V, O>) -> Self {
        let mut nodes = SlotMap::with_key();
        let head = nodes.insert(Node::anchor());
        let tail = nodes.insert(Node::anchor());
        sdebug!(axis = ?options.orientation.axis(), "StackList::new");
        let mut list = Self {
            bounds: options.bounds,
            content_inset: options.content_inset,
            options,
            nodes,
            chain: ChainStore::new(),
            sequence: Vec::new(),
            subviews: Vec::new(),
            head,
            tail,
            content_offset: Point::ZERO,
            scroll_indicator_insets: EdgeInsets::ZERO,
            content_size: Size::ZERO,
            needs_layout: true,
            now_ms: 0,
            timeline: Timeline::default(),
            pending: Vec::new(),
            detached: Vec::new(),
            notify_depth: Cell::new(0),
            notify_pending: Cell::new(false),
        };
        list.chain.register(head);
        list.chain.register(tail);
        list.stick(head, tail, &[]);
        list
    }

    pub fn options(&self) -> &StackOptions<V, O> {
        &self.options
    }

    pub fn orientation(&self) -> O {
        self.options.orientation
    }

    pub fn axis(&self) -> Axis {
        self.options.orientation.axis()
    }

    pub fn set_on_change(&mut self, on_change: Option<impl Fn(&StackList<V, O>) + 'static>) {
        self.options.on_change = on_change.map(|f| alloc::rc::Rc::new(f) as _);
    }

    pub fn spacing(&self) -> f32 {
        self.options.spacing
    }

    /// Changes the space between managed items and refreshes every existing link.
    pub fn set_spacing(&mut self, spacing: f32) {
        if self.options.spacing == spacing {
            return;
        }
        self.options.spacing = spacing;
        let mut cur = self.head;
        for _ in 0..=self.sequence.len() {
            let Some(link_id) = self.chain.get(cur).next else {
                break;
            };
            let Some(to) = self.chain.link(link_id).map(|l| l.to) else {
                break;
            };
            let spacing = self.link_spacing(cur, to);
            if let Some(link) = self.chain.link_mut(link_id) {
                link.spacing = spacing;
            }
            cur = to;
        }
        self.needs_layout = true;
        self.notify();
    }

    fn notify_now(&self) {
        if let Some(cb) = &self.options.on_change {
            cb(self);
        }
    }

    fn notify(&self) {
        if self.notify_depth.get() > 0 {
            self.notify_pending.set(true);
            return;
        }
        self.notify_now();
    }

    /// Batches multiple updates into a single `on_change` notification.
    pub fn batch_update(&mut self, f: impl FnOnce(&mut Self)) {
        let depth = self.notify_depth.get();
        self.notify_depth.set(depth.saturating_add(1));

        f(self);

        let depth = self.notify_depth.get();
        debug_assert!(depth > 0, "notify_depth underflow");
        let next = depth.saturating_sub(1);
        self.notify_depth.set(next);

        if next == 0 && self.notify_pending.replace(false) {
            self.notify_now();
        }
    }

    // Sequence queries.

    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    /// Managed items in order.
    pub fn items(&self) -> &[ItemId] {
        &self.sequence
    }

    pub fn item_at(&self, index: usize) -> Option<ItemId> {
        self.sequence.get(index).copied()
    }

    pub fn index_of(&self, item: ItemId) -> Option<usize> {
        self.sequence.iter().position(|&id| id == item)
    }

    pub fn contains(&self, item: ItemId) -> bool {
        self.index_of(item).is_some()
    }

    pub fn head(&self) -> ItemId {
        self.head
    }

    pub fn tail(&self) -> ItemId {
        self.tail
    }

    /// Entry `position` of `[head] + items + [tail]`.
    ///
    /// Panics when `position > len + 1`.
    pub fn bracketed_at(&self, position: usize) -> ItemId {
        let len = self.sequence.len();
        assert!(
            position <= len + 1,
            "bracketed position {position} out of bounds (len={len})"
        );
        if position == 0 {
            self.head
        } else if position == len + 1 {
            self.tail
        } else {
            self.sequence[position - 1]
        }
    }

    pub fn payload(&self, item: ItemId) -> Option<&V> {
        self.nodes.get(item)?.payload.as_ref()
    }

    pub fn payload_mut(&mut self, item: ItemId) -> Option<&mut V> {
        self.nodes.get_mut(item)?.payload.as_mut()
    }

    /// Payloads of the managed items in order.
    pub fn payloads(&self) -> impl Iterator<Item = &V> + '_ {
        self.sequence.iter().filter_map(|&id| self.payload(id))
    }

    pub fn identifier(&self, item: ItemId) -> Option<&str> {
        self.nodes.get(item)?.identifier.as_deref()
    }

    /// Changes the identifier of `item`. An identifier another managed item already carries
    /// is refused.
    pub fn set_identifier(&mut self, item: ItemId, identifier: Option<String>) {
        let taken = identifier
            .as_deref()
            .filter(|&name| self.find_identifier(name).is_some_and(|owner| owner != item));
        if let Some(taken) = taken {
            swarn!(identifier = taken, "duplicate stable identifier, rename dropped");
            debug_assert!(
                false,
                "every managed item must have a unique identifier: {taken:?}"
            );
            return;
        }
        if let Some(node) = self.nodes.get_mut(item) {
            node.identifier = identifier;
        }
    }

    /// The managed item carrying `identifier`, if any.
    pub fn find_identifier(&self, identifier: &str) -> Option<ItemId> {
        self.sequence
            .iter()
            .copied()
            .find(|&id| self.identifier(id) == Some(identifier))
    }

    pub fn phase(&self, item: ItemId) -> Option<ItemPhase> {
        self.nodes.get(item).map(|n| n.phase)
    }

    pub fn positioning(&self, item: ItemId) -> Option<Positioning> {
        self.nodes.get(item).map(|n| n.positioning)
    }

    pub fn cross_binding(&self, item: ItemId) -> Option<CrossBinding> {
        self.nodes.get(item)?.cross
    }

    pub fn margins(&self, item: ItemId) -> Option<EdgeInsets> {
        self.nodes.get(item).map(|n| n.margins)
    }

    pub fn set_margins(&mut self, item: ItemId, margins: EdgeInsets) {
        let Some(node) = self.nodes.get_mut(item) else {
            return;
        };
        if node.margins == margins {
            return;
        }
        node.margins = margins;
        self.needs_layout = true;
        self.notify();
    }

    /// Records the intrinsic size of `item` along the stacking axis (margins excluded).
    pub fn measure(&mut self, item: ItemId, extent: f32) {
        if item == self.head || item == self.tail {
            return;
        }
        let Some(node) = self.nodes.get_mut(item) else {
            return;
        };
        if node.extent == extent {
            return;
        }
        strace!(?item, extent, "measure");
        node.extent = extent;
        self.needs_layout = true;
        self.notify();
    }

    pub fn chain(&self) -> &ChainStore {
        &self.chain
    }

    /// Items visited walking `next` links from the head anchor (anchors included).
    pub fn chain_path(&self) -> Vec<ItemId> {
        self.chain.walk(self.head, self.nodes.len())
    }

    pub fn validate_chain(&self) -> Result<(), ChainFault> {
        self.chain.validate(self.head, &self.sequence, self.tail)
    }

    // Visual model.

    /// Model frame of `item` (where layout last put it, or where it was left if free-form).
    pub fn frame(&self, item: ItemId) -> Option<Rect> {
        self.nodes.get(item).map(|n| n.visual.frame)
    }

    /// Frame of the payload inside its container, i.e. the frame minus margins.
    pub fn content_frame(&self, item: ItemId) -> Option<Rect> {
        self.nodes
            .get(item)
            .map(|n| n.visual.frame.inset_by(n.margins))
    }

    pub fn visual(&self, item: ItemId) -> Option<Visual> {
        self.nodes.get(item).map(|n| n.visual)
    }

    /// What is on screen for `item` right now: the model value overridden by running tweens.
    pub fn presentation(&self, item: ItemId) -> Option<Visual> {
        let node = self.nodes.get(item)?;
        Some(self.timeline.present(item, node.visual, self.now_ms))
    }

    /// Items in the view tree, back to front. Includes items that are still detaching.
    pub fn subviews(&self) -> &[ItemId] {
        &self.subviews
    }

    /// Payloads whose items have fully left the view tree since the last call.
    pub fn take_detached(&mut self) -> Vec<V> {
        core::mem::take(&mut self.detached)
    }

    // Scroll container.

    pub fn bounds(&self) -> Size {
        self.bounds
    }

    pub fn set_bounds(&mut self, bounds: Size) {
        if self.bounds == bounds {
            return;
        }
        strace!(width = bounds.width, height = bounds.height, "set_bounds");
        self.bounds = bounds;
        self.needs_layout = true;
        self.refresh_all_nested();
        self.notify();
    }

    pub fn content_offset(&self) -> Point {
        self.content_offset
    }

    pub fn set_content_offset(&mut self, offset: Point) {
        if self.content_offset == offset {
            return;
        }
        self.content_offset = offset;
        self.refresh_all_nested();
        self.notify();
    }

    pub fn content_inset(&self) -> EdgeInsets {
        self.content_inset
    }

    pub fn set_content_inset(&mut self, inset: EdgeInsets) {
        if self.content_inset == inset {
            return;
        }
        self.content_inset = inset;
        self.notify();
    }

    pub fn scroll_indicator_insets(&self) -> EdgeInsets {
        self.scroll_indicator_insets
    }

    pub fn set_scroll_indicator_insets(&mut self, insets: EdgeInsets) {
        if self.scroll_indicator_insets == insets {
            return;
        }
        self.scroll_indicator_insets = insets;
        self.notify();
    }

    /// Total size of the chained content, as of the last layout pass.
    pub fn content_size(&self) -> Size {
        self.content_size
    }

    /// Largest content offset along the stacking axis, taking insets into account.
    pub fn max_content_offset(&self) -> f32 {
        let axis = self.axis();
        let (leading, trailing) = axis.main_insets(self.content_inset);
        let max = axis.main(self.content_size) + trailing - axis.main(self.bounds);
        max.max(-leading)
    }

    // Nested scroll regions.

    pub fn nested_scroll(&self, item: ItemId) -> Option<NestedScrollState> {
        self.nodes.get(item)?.nested
    }

    /// Call when a nested scroll region's content size changes.
    pub fn set_nested_content_size(&mut self, item: ItemId, content_size: Size) {
        let Some(state) = self.nodes.get_mut(item).and_then(|n| n.nested.as_mut()) else {
            return;
        };
        if state.scroll.content_size == content_size {
            return;
        }
        state.scroll.content_size = content_size;
        self.refresh_nested(item);
        self.notify();
    }

    /// Call when a nested scroll region's content inset changes.
    pub fn set_nested_content_inset(&mut self, item: ItemId, content_inset: EdgeInsets) {
        let Some(state) = self.nodes.get_mut(item).and_then(|n| n.nested.as_mut()) else {
            return;
        };
        if state.scroll.content_inset == content_inset {
            return;
        }
        state.scroll.content_inset = content_inset;
        self.refresh_nested(item);
        self.notify();
    }

    fn refresh_all_nested(&mut self) {
        let nested: Vec<ItemId> = self
            .sequence
            .iter()
            .copied()
            .filter(|&id| self.nodes.get(id).is_some_and(|n| n.nested.is_some()))
            .collect();
        for id in nested {
            self.refresh_nested(id);
        }
    }

    fn refresh_nested(&mut self, item: ItemId) {
        let axis = self.axis();
        let container = axis.main(self.bounds);
        let offset = axis.main_of(self.content_offset);
        let Some(node) = self.nodes.get_mut(item) else {
            return;
        };
        let top = axis.start(node.visual.frame);
        let Some(state) = node.nested.as_mut() else {
            return;
        };
        let geometry_changed = state.refresh(container, offset, top);
        let translation = axis.translation(state.translation);
        if node.visual.transform != translation {
            node.visual.transform = translation;
        }
        if !geometry_changed {
            return;
        }
        strace!(?item, container, offset, "nested scroll geometry changed");
        if let Some(link_id) = self.chain.get(item).next {
            if let Some(to) = self.chain.link(link_id).map(|l| l.to) {
                let spacing = self.link_spacing(item, to);
                if let Some(link) = self.chain.link_mut(link_id) {
                    link.spacing = spacing;
                }
            }
        }
        self.needs_layout = true;
    }

    // Chain maintenance.

    fn link_spacing(&self, a: ItemId, b: ItemId) -> f32 {
        let base = if a != self.head && b != self.tail {
            self.options.spacing
        } else {
            0.0
        };
        let nested = self
            .nodes
            .get(a)
            .and_then(|n| n.nested)
            .map_or(0.0, |s| s.trailing_spacing);
        base + nested
    }

    /// Breaks `a.next` and `b.prev`, then links `[a] + inner + [b]` pairwise.
    fn stick(&mut self, a: ItemId, b: ItemId, inner: &[ItemId]) {
        let stale_next = self.chain.get(a).next;
        self.chain.deactivate(stale_next);
        let stale_prev = self.chain.get(b).prev;
        self.chain.deactivate(stale_prev);

        let mut prev = a;
        for next in inner.iter().copied().chain(core::iter::once(b)) {
            let spacing = self.link_spacing(prev, next);
            let link = self.options.orientation.link(prev, next, spacing);
            let id = self.chain.activate(link);
            self.chain.set_next(prev, Some(id));
            self.chain.set_prev(next, Some(id));
            prev = next;
        }
        strace!(?a, ?b, inner = inner.len(), "stick");
    }

    fn attach(&mut self, item: ManagedItem<V>) -> ItemId {
        let nested = match item.nested_scroll {
            Some(scroll) if self.options.orientation.supports_nested_scroll() => {
                Some(NestedScrollState::new(scroll))
            }
            Some(_) => {
                swarn!("nested scroll regions are only tracked by vertical lists");
                None
            }
            None => None,
        };
        let id = self.nodes.insert(Node {
            payload: Some(item.payload),
            identifier: item.identifier,
            margins: item.margins,
            extent: item.extent,
            phase: ItemPhase::Attached,
            positioning: Positioning::Constrained,
            visual: Visual::default(),
            cross: None,
            nested,
        });
        let binding = self.options.orientation.bind_cross_axis(id, self.head);
        if let Some(node) = self.nodes.get_mut(id) {
            node.cross = Some(binding);
        }
        self.chain.register(id);
        self.subviews.push(id);
        if nested.is_some() {
            self.refresh_nested(id);
        }
        strace!(?id, "attach");
        id
    }

    /// Deactivates both links of an item leaving the sequence.
    fn unlink(&mut self, item: ItemId) {
        let spaces = self.chain.get(item);
        self.chain.deactivate(spaces.prev);
        self.chain.deactivate(spaces.next);
        if let Some(node) = self.nodes.get_mut(item) {
            node.phase = ItemPhase::Detaching;
        }
    }

    fn set_phase(&mut self, item: ItemId, phase: ItemPhase) {
        if let Some(node) = self.nodes.get_mut(item) {
            node.phase = phase;
        }
    }

    /// Hands an item over to free-form positioning so it stays put while it animates out.
    fn begin_detaching(&mut self, item: ItemId) {
        if let Some(node) = self.nodes.get_mut(item) {
            node.positioning = Positioning::FreeForm;
        }
    }

    /// Removes an item from the view tree and drops its chain entry.
    fn detach(&mut self, item: ItemId) {
        if !self.nodes.contains_key(item) {
            return;
        }
        let spaces = self.chain.get(item);
        self.chain.deactivate(spaces.prev);
        self.chain.deactivate(spaces.next);
        self.chain.unregister(item);
        self.subviews.retain(|&id| id != item);
        self.timeline.forget(item);
        if let Some(payload) = self.nodes.remove(item).and_then(|n| n.payload) {
            self.detached.push(payload);
        }
        strace!(?item, "detach");
    }

    /// Places freshly inserted items one after another right behind `after`'s current frame,
    /// so an animated layout pass moves them in from there.
    fn preposition(&mut self, after: ItemId, inserted: &[ItemId]) {
        let axis = self.axis();
        let cross = axis.cross(self.bounds);
        let mut cursor = self.nodes.get(after).map_or(0.0, |n| axis.end(n.visual.frame));
        for &id in inserted {
            let Some(node) = self.nodes.get_mut(id) else {
                continue;
            };
            let frame = axis.rect(cursor, node.main_extent(axis), 0.0, cross);
            node.visual.frame = frame;
            cursor = axis.end(frame);
        }
    }

    fn debug_assert_chain(&self) {
        if !cfg!(debug_assertions) {
            return;
        }
        if let Err(fault) = self.validate_chain() {
            panic!("chain invariant violated: {fault}");
        }
    }

    /// The first identifier among `items` that is repeated, or that is already carried by a
    /// managed item outside `replacing`.
    fn duplicate_identifier<'a>(
        &'a self,
        items: &'a [ManagedItem<V>],
        replacing: Range<usize>,
    ) -> Option<&'a str> {
        let mut seen = BTreeSet::new();
        for identifier in items.iter().filter_map(|item| item.identifier.as_deref()) {
            if !seen.insert(identifier) {
                return Some(identifier);
            }
            let taken = self.sequence.iter().enumerate().any(|(i, &id)| {
                !replacing.contains(&i) && self.identifier(id) == Some(identifier)
            });
            if taken {
                return Some(identifier);
            }
        }
        None
    }

    // Edits.

    /// Replaces the items in `range` with `items`.
    ///
    /// With an animator, removed items switch to free-form positioning and stay in the view
    /// tree until the animator's completion fires; inserted items start right behind their
    /// predecessor. Without one, removed items are detached immediately.
    ///
    /// Panics when `range` is out of bounds.
    pub fn replace<I>(
        &mut self,
        items: I,
        range: Range<usize>,
        animator: Option<&dyn Animator>,
    ) -> Transition
    where
        I: IntoIterator<Item = ManagedItem<V>>,
    {
        let len = self.sequence.len();
        assert!(
            range.start <= range.end && range.end <= len,
            "replace range {}..{} out of bounds (len={len})",
            range.start,
            range.end
        );

        let items: Vec<ManagedItem<V>> = items.into_iter().collect();
        if let Some(identifier) = self.duplicate_identifier(&items, range.clone()) {
            swarn!(identifier, "duplicate stable identifier, replace dropped");
            debug_assert!(
                false,
                "every managed item must have a unique identifier: {identifier:?}"
            );
            return Transition::ready();
        }

        let inserted: Vec<ItemId> = items.into_iter().map(|item| self.attach(item)).collect();
        let removed: Vec<ItemId> = self
            .sequence
            .splice(range.clone(), inserted.iter().copied())
            .collect();
        sdebug!(
            start = range.start,
            end = range.end,
            inserted = inserted.len(),
            removed = removed.len(),
            "replace"
        );

        if inserted.is_empty() && removed.is_empty() {
            let (completion, transition) = Completion::pair();
            match animator {
                Some(animator) => animator.on_replace(self, &[], &[], completion),
                None => completion.complete(),
            }
            return transition;
        }

        for &id in &removed {
            self.unlink(id);
        }
        let up = self.bracketed_at(range.start);
        let down = self.bracketed_at(range.start + inserted.len() + 1);
        self.stick(up, down, &inserted);
        for &id in &inserted {
            self.set_phase(id, ItemPhase::Linked);
        }
        self.needs_layout = true;
        self.debug_assert_chain();

        let transition = match animator {
            Some(animator) => {
                for &id in &removed {
                    self.begin_detaching(id);
                }
                self.preposition(up, &inserted);
                let (completion, transition) = Completion::pair();
                self.pending.push(PendingDetach {
                    transition: transition.clone(),
                    items: removed.clone(),
                });
                animator.on_replace(self, &removed, &inserted, completion);
                self.finish_transitions();
                transition
            }
            None => {
                for &id in &removed {
                    self.detach(id);
                }
                Transition::ready()
            }
        };
        self.notify();
        transition
    }

    /// Replaces every item without animation.
    pub fn reset<I>(&mut self, items: I) -> Transition
    where
        I: IntoIterator<Item = ManagedItem<V>>,
    {
        let len = self.sequence.len();
        self.replace(items, 0..len, None)
    }

    /// Inserts `items` before position `index` (`index == len` appends).
    pub fn insert<I>(&mut self, items: I, index: usize, animator: Option<&dyn Animator>) -> Transition
    where
        I: IntoIterator<Item = ManagedItem<V>>,
    {
        match animator {
            Some(animator) => self.replace(items, index..index, Some(&InsertOnly(animator))),
            None => self.replace(items, index..index, None),
        }
    }

    pub fn insert_one(
        &mut self,
        item: ManagedItem<V>,
        index: usize,
        animator: Option<&dyn Animator>,
    ) -> Transition {
        self.insert(core::iter::once(item), index, animator)
    }

    pub fn append<I>(&mut self, items: I, animator: Option<&dyn Animator>) -> Transition
    where
        I: IntoIterator<Item = ManagedItem<V>>,
    {
        let len = self.sequence.len();
        self.insert(items, len, animator)
    }

    pub fn append_one(
        &mut self,
        item: ManagedItem<V>,
        animator: Option<&dyn Animator>,
    ) -> Transition {
        let len = self.sequence.len();
        self.insert_one(item, len, animator)
    }

    /// Appends bare payloads with default metadata.
    pub fn append_payloads<I>(&mut self, payloads: I, animator: Option<&dyn Animator>) -> Transition
    where
        I: IntoIterator<Item = V>,
    {
        self.append(payloads.into_iter().map(ManagedItem::new), animator)
    }

    /// Replaces every item with bare payloads, without animation.
    pub fn reset_payloads<I>(&mut self, payloads: I) -> Transition
    where
        I: IntoIterator<Item = V>,
    {
        self.reset(payloads.into_iter().map(ManagedItem::new))
    }

    /// Replaces the single item at `index`.
    pub fn replace_one(
        &mut self,
        item: ManagedItem<V>,
        index: usize,
        animator: Option<&dyn Animator>,
    ) -> Transition {
        self.replace(core::iter::once(item), index..index + 1, animator)
    }

    /// Removes `items` from the list. Items that are not managed are ignored; duplicates count
    /// once.
    pub fn remove(&mut self, items: &[ItemId], animator: Option<&dyn Animator>) -> Transition {
        let mut indexes: Vec<usize> = items.iter().filter_map(|&id| self.index_of(id)).collect();
        indexes.sort_unstable();
        indexes.dedup();
        if indexes.is_empty() {
            return Transition::ready();
        }

        let removed: Vec<ItemId> = indexes.iter().map(|&i| self.sequence[i]).collect();
        sdebug!(count = removed.len(), first = indexes[0], "remove");
        for &id in &removed {
            self.unlink(id);
        }

        // Re-stick across every maximal run of consecutive removed indexes. Sequence index `i`
        // is bracketed position `i + 1`, so a run `s..=e` sits between positions `s` and
        // `e + 2`.
        let mut run_start = 0;
        while run_start < indexes.len() {
            let mut run_end = run_start;
            while run_end + 1 < indexes.len() && indexes[run_end + 1] == indexes[run_end] + 1 {
                run_end += 1;
            }
            let up = self.bracketed_at(indexes[run_start]);
            let down = self.bracketed_at(indexes[run_end] + 2);
            self.stick(up, down, &[]);
            run_start = run_end + 1;
        }

        for &i in indexes.iter().rev() {
            self.sequence.remove(i);
        }
        self.needs_layout = true;
        self.debug_assert_chain();

        let transition = match animator {
            Some(animator) => {
                for &id in &removed {
                    self.begin_detaching(id);
                }
                let (completion, transition) = Completion::pair();
                self.pending.push(PendingDetach {
                    transition: transition.clone(),
                    items: removed.clone(),
                });
                animator.on_remove(self, &removed, completion);
                self.finish_transitions();
                transition
            }
            None => {
                for &id in &removed {
                    self.detach(id);
                }
                Transition::ready()
            }
        };
        self.notify();
        transition
    }

    pub fn remove_one(&mut self, item: ItemId, animator: Option<&dyn Animator>) -> Transition {
        self.remove(&[item], animator)
    }

    /// Panics when `index` is out of bounds.
    pub fn remove_at(&mut self, index: usize, animator: Option<&dyn Animator>) -> Transition {
        let len = self.sequence.len();
        assert!(index < len, "remove index {index} out of bounds (len={len})");
        let item = self.sequence[index];
        self.remove(&[item], animator)
    }

    /// Panics when any index is out of bounds.
    pub fn remove_indexes(
        &mut self,
        indexes: &[usize],
        animator: Option<&dyn Animator>,
    ) -> Transition {
        let len = self.sequence.len();
        let items: Vec<ItemId> = indexes
            .iter()
            .map(|&i| {
                assert!(i < len, "remove index {i} out of bounds (len={len})");
                self.sequence[i]
            })
            .collect();
        self.remove(&items, animator)
    }

    /// Moves the item at `from` so it ends up at index `to`.
    ///
    /// The animator receives the item's frame before the move and the frame it will occupy
    /// afterwards, computed from the pre-move geometry.
    ///
    /// Panics when either index is out of bounds.
    pub fn move_item(
        &mut self,
        from: usize,
        to: usize,
        animator: Option<&dyn Animator>,
    ) -> Transition {
        let len = self.sequence.len();
        assert!(
            from < len && to < len,
            "move {from} -> {to} out of bounds (len={len})"
        );
        let item = self.sequence[from];
        let target = self.sequence[to];
        if from == to || item == target {
            return Transition::ready();
        }
        sdebug!(from, to, "move_item");

        let from_frame = self.frame(item).unwrap_or_default();
        let target_frame = self.frame(target).unwrap_or_default();

        // Take it out and close the gap.
        let up = self.bracketed_at(from);
        let down = self.bracketed_at(from + 2);
        let spaces = self.chain.get(item);
        self.chain.deactivate(spaces.prev);
        self.chain.deactivate(spaces.next);
        self.sequence.remove(from);
        self.stick(up, down, &[]);

        // Put it back at the target.
        self.sequence.insert(to, item);
        let up = self.bracketed_at(to);
        let down = self.bracketed_at(to + 2);
        self.stick(up, down, &[item]);
        self.needs_layout = true;
        self.debug_assert_chain();

        if let Some(animator) = animator {
            let axis = self.axis();
            let from_start = axis.start(from_frame);
            let target_start = axis.start(target_frame);
            // Moving forward, the item ends flush with the target's trailing edge.
            let diff = if target_start <= from_start {
                0.0
            } else {
                axis.extent(from_frame) - axis.extent(target_frame)
            };
            let to_frame = axis.offset(from_frame, target_start - from_start - diff);
            animator.on_move(self, item, from_frame, to_frame);
            self.finish_transitions();
        }
        self.notify();
        Transition::ready()
    }

    // Layout and time.

    pub fn set_needs_layout(&mut self) {
        self.needs_layout = true;
    }

    pub fn needs_layout(&self) -> bool {
        self.needs_layout
    }

    /// Walks the chain from the head anchor and places every constrained item.
    pub fn layout_if_needed(&mut self) {
        if !self.needs_layout {
            return;
        }
        let axis = self.axis();
        let cross = axis.cross(self.bounds);
        let limit = self.nodes.len();

        if let Some(head) = self.nodes.get_mut(self.head) {
            head.visual.frame = axis.rect(0.0, 0.0, 0.0, cross);
        }
        let mut cursor = 0.0f32;
        let mut cur = self.head;
        for _ in 0..limit {
            if cur == self.tail {
                break;
            }
            let Some(link) = self.chain.get(cur).next.and_then(|l| self.chain.link(l)) else {
                break;
            };
            let (next, start) = (link.to, cursor + link.spacing);
            let Some(node) = self.nodes.get_mut(next) else {
                break;
            };
            let extent = node.main_extent(axis);
            if node.positioning == Positioning::Constrained {
                node.visual.frame = axis.rect(start, extent, 0.0, cross);
            }
            cursor = start + extent;
            cur = next;
        }
        debug_assert!(cur == self.tail, "layout did not reach the tail anchor");

        self.content_size = axis.size(cursor, cross);
        self.needs_layout = false;
        strace!(content = cursor, "layout");
        self.notify();
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    pub fn is_animating(&self) -> bool {
        self.timeline.is_animating()
    }

    /// Advances the animation clock, fires finished completions and detaches the items they
    /// were holding. Returns whether anything is still animating.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        self.now_ms = self.now_ms.max(now_ms);
        self.timeline.advance(self.now_ms);
        self.finish_transitions();
        self.timeline.is_animating()
    }

    /// Detaches items whose transition has completed.
    ///
    /// Called by every edit and by `tick`; call it directly when a custom animator completes
    /// outside of either.
    pub fn finish_transitions(&mut self) {
        while let Some(pos) = self
            .pending
            .iter()
            .position(|p| p.transition.is_complete())
        {
            let done = self.pending.remove(pos);
            for id in done.items {
                self.detach(id);
            }
        }
    }

    fn record(&mut self, item: ItemId, property: Property, spec: AnimationSpec, group: Option<u64>) {
        let tween = Tween::new(item, property, self.now_ms, spec);
        match group {
            Some(group) => self.timeline.push_grouped(tween, group),
            None => self.timeline.push(tween),
        }
    }
}

impl<V, O: Orientation> Stage for StackList<V, O> {
    fn axis(&self) -> Axis {
        self.options.orientation.axis()
    }

    fn bounds(&self) -> Size {
        self.bounds
    }

    fn now_ms(&self) -> u64 {
        self.now_ms
    }

    fn frame(&self, item: ItemId) -> Option<Rect> {
        StackList::frame(self, item)
    }

    fn set_frame(&mut self, item: ItemId, frame: Rect) {
        if let Some(node) = self.nodes.get_mut(item) {
            node.visual.frame = frame;
        }
    }

    fn alpha(&self, item: ItemId) -> Option<f32> {
        self.nodes.get(item).map(|n| n.visual.alpha)
    }

    fn set_alpha(&mut self, item: ItemId, alpha: f32) {
        if let Some(node) = self.nodes.get_mut(item) {
            node.visual.alpha = alpha;
        }
    }

    fn transform(&self, item: ItemId) -> Option<Transform> {
        self.nodes.get(item).map(|n| n.visual.transform)
    }

    fn set_transform(&mut self, item: ItemId, transform: Transform) {
        if let Some(node) = self.nodes.get_mut(item) {
            node.visual.transform = transform;
        }
    }

    fn bring_to_front(&mut self, item: ItemId) {
        if let Some(pos) = self.subviews.iter().position(|&id| id == item) {
            let id = self.subviews.remove(pos);
            self.subviews.push(id);
        }
    }

    fn send_to_back(&mut self, item: ItemId) {
        if let Some(pos) = self.subviews.iter().position(|&id| id == item) {
            let id = self.subviews.remove(pos);
            self.subviews.insert(0, id);
        }
    }

    fn layout_if_needed(&mut self) {
        StackList::layout_if_needed(self);
    }

    fn animate(
        &mut self,
        spec: AnimationSpec,
        changes: &mut dyn FnMut(&mut dyn Stage),
        completion: Option<Completion>,
    ) {
        let now = self.now_ms;
        let before: Vec<(ItemId, Visual, Visual)> = self
            .subviews
            .iter()
            .filter_map(|&id| {
                let model = self.nodes.get(id)?.visual;
                Some((id, model, self.timeline.present(id, model, now)))
            })
            .collect();

        changes(&mut *self);

        if spec.is_instant() {
            if let Some(completion) = completion {
                completion.complete();
            }
            return;
        }

        let group = completion.map(|c| self.timeline.open_group(c));
        for (id, model, shown) in before {
            let Some(after) = self.nodes.get(id).map(|n| n.visual) else {
                continue;
            };
            if after.frame != model.frame {
                self.record(id, Property::Frame(shown.frame, after.frame), spec, group);
            }
            if after.alpha != model.alpha {
                self.record(id, Property::Alpha(shown.alpha, after.alpha), spec, group);
            }
            if after.transform != model.transform {
                self.record(
                    id,
                    Property::Transform(shown.transform, after.transform),
                    spec,
                    group,
                );
            }
        }
        if group.is_some() {
            // Nothing to animate: complete right away.
            self.timeline.settle();
        }
    }

    fn animate_frame(&mut self, item: ItemId, from: Rect, to: Rect, spec: AnimationSpec) {
        let Some(node) = self.nodes.get_mut(item) else {
            return;
        };
        node.visual.frame = to;
        if spec.is_instant() {
            return;
        }
        self.record(item, Property::Frame(from, to), spec, None);
    }
}
