use alloc::vec::Vec;
use core::fmt;

use slotmap::{SecondaryMap, SlotMap};

use crate::{Edge, ItemId, LinkId};

/// A single "space" link: `to.to_edge == from.from_edge + spacing`.
///
/// Exactly one active link exists between any two neighbours of the bracketed list.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Link {
    pub from: ItemId,
    pub from_edge: Edge,
    pub to: ItemId,
    pub to_edge: Edge,
    /// Distance between `from`'s trailing edge and `to`'s leading edge.
    pub spacing: f32,
}

/// The pair of links stored for one item.
///
/// Either side may reference a link that has since been deactivated; such stale references
/// resolve to nothing in [`ChainStore::link`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Spaces {
    pub prev: Option<LinkId>,
    pub next: Option<LinkId>,
}

/// The first violation found by [`ChainStore::validate`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChainFault {
    /// `at` has no entry in the store.
    Unregistered { at: ItemId },
    /// `at` has no active `next` link although it is not the tail.
    MissingNext { at: ItemId },
    /// `at.next` leads to `found` instead of `expected`.
    Misrouted {
        at: ItemId,
        expected: ItemId,
        found: ItemId,
    },
    /// `at.prev` is not the link that reached it.
    Asymmetric { at: ItemId },
    /// More links are active than the chain accounts for.
    Dangling { expected: usize, found: usize },
}

impl fmt::Display for ChainFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unregistered { at } => write!(f, "{at:?} has no chain entry"),
            Self::MissingNext { at } => write!(f, "{at:?} has no active next link"),
            Self::Misrouted {
                at,
                expected,
                found,
            } => write!(f, "{at:?}.next leads to {found:?}, expected {expected:?}"),
            Self::Asymmetric { at } => {
                write!(f, "{at:?}.prev does not match the link that reached it")
            }
            Self::Dangling { expected, found } => {
                write!(f, "{found} active links, expected {expected}")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ChainFault {}

/// Per-item link bookkeeping plus the slot map the links live in.
///
/// Deactivating a link frees its slot. Entries that still name it then resolve to nothing,
/// even once the slot is reused for a new link.
#[derive(Clone, Debug)]
pub struct ChainStore {
    entries: SecondaryMap<ItemId, Spaces>,
    links: SlotMap<LinkId, Link>,
}

impl Default for ChainStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ChainStore {
    pub fn new() -> Self {
        Self {
            entries: SecondaryMap::new(),
            links: SlotMap::with_key(),
        }
    }

    /// Creates an empty entry for `item`. Existing entries are left untouched.
    pub fn register(&mut self, item: ItemId) {
        if let Some(entry) = self.entries.entry(item) {
            entry.or_default();
        }
    }

    /// Drops the entry for `item`. Both links must already be inactive.
    pub fn unregister(&mut self, item: ItemId) -> Option<Spaces> {
        let spaces = self.entries.remove(item)?;
        debug_assert!(
            spaces.prev.is_none_or(|l| !self.is_active(l))
                && spaces.next.is_none_or(|l| !self.is_active(l)),
            "unregistering {item:?} while it still holds an active link"
        );
        Some(spaces)
    }

    pub fn is_registered(&self, item: ItemId) -> bool {
        self.entries.contains_key(item)
    }

    /// Returns the stored pair for `item` (empty if the item is unknown).
    pub fn get(&self, item: ItemId) -> Spaces {
        self.entries.get(item).copied().unwrap_or_default()
    }

    /// Overwrites `item.prev`. Unknown items are ignored.
    pub fn set_prev(&mut self, item: ItemId, link: Option<LinkId>) {
        if let Some(spaces) = self.entries.get_mut(item) {
            spaces.prev = link;
        }
    }

    /// Overwrites `item.next`. Unknown items are ignored.
    pub fn set_next(&mut self, item: ItemId, link: Option<LinkId>) {
        if let Some(spaces) = self.entries.get_mut(item) {
            spaces.next = link;
        }
    }

    /// Stores and activates `link`.
    pub fn activate(&mut self, link: Link) -> LinkId {
        self.links.insert(link)
    }

    /// Deactivates `link`, returning whether anything was active.
    ///
    /// Absent and already-deactivated links are a no-op: during re-sticking, an endpoint often
    /// still references a link that a previous step already broke.
    pub fn deactivate(&mut self, link: Option<LinkId>) -> bool {
        match link {
            Some(id) => self.links.remove(id).is_some(),
            None => false,
        }
    }

    pub fn is_active(&self, link: LinkId) -> bool {
        self.links.contains_key(link)
    }

    pub fn link(&self, link: LinkId) -> Option<&Link> {
        self.links.get(link)
    }

    pub(crate) fn link_mut(&mut self, link: LinkId) -> Option<&mut Link> {
        self.links.get_mut(link)
    }

    /// Number of currently active links.
    pub fn active_links(&self) -> usize {
        self.links.len()
    }

    pub fn links(&self) -> impl Iterator<Item = (LinkId, &Link)> + '_ {
        self.links.iter()
    }

    /// The item reached through `item`'s active `next` link.
    pub fn next_of(&self, item: ItemId) -> Option<ItemId> {
        let link = self.get(item).next?;
        self.link(link).map(|l| l.to)
    }

    /// Follows active `next` links from `start`, returning every item visited (including
    /// `start`). Stops after `limit` hops so a corrupted chain cannot loop forever.
    pub fn walk(&self, start: ItemId, limit: usize) -> Vec<ItemId> {
        let mut out = Vec::new();
        out.push(start);
        let mut cur = start;
        for _ in 0..limit {
            let Some(next) = self.next_of(cur) else {
                break;
            };
            out.push(next);
            cur = next;
        }
        out
    }

    /// Checks that the chain runs `head → sequence… → tail` with symmetric link references
    /// and no extra active links.
    pub fn validate(
        &self,
        head: ItemId,
        sequence: &[ItemId],
        tail: ItemId,
    ) -> Result<(), ChainFault> {
        let mut cur = head;
        if !self.is_registered(head) {
            return Err(ChainFault::Unregistered { at: head });
        }
        for &expected in sequence.iter().chain(core::iter::once(&tail)) {
            if !self.is_registered(expected) {
                return Err(ChainFault::Unregistered { at: expected });
            }
            let Some(link_id) = self.get(cur).next.filter(|&l| self.is_active(l)) else {
                return Err(ChainFault::MissingNext { at: cur });
            };
            let Some(link) = self.link(link_id) else {
                return Err(ChainFault::MissingNext { at: cur });
            };
            if link.from != cur || link.to != expected {
                return Err(ChainFault::Misrouted {
                    at: cur,
                    expected,
                    found: link.to,
                });
            }
            if self.get(expected).prev != Some(link_id) {
                return Err(ChainFault::Asymmetric { at: expected });
            }
            cur = expected;
        }

        let expected = sequence.len() + 1;
        if self.active_links() != expected {
            return Err(ChainFault::Dangling {
                expected,
                found: self.active_links(),
            });
        }
        Ok(())
    }
}
