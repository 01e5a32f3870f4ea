//! Intrusive doubly linked lists backed by `SlotArena`.
//!
//! Nodes live in a [`SlotArena`] and are linked by [`SlotId`], so a node keeps
//! its handle for its whole life no matter which list it is attached to.
//! [`ListArena`] stores any number of list headers next to one node arena:
//! a node can be detached from one list and attached to another without being
//! reallocated, which is what keeps counter promotion in the stream summary
//! O(1).
//!
//! ## Architecture
//!
//! ```text
//!   nodes (SlotArena<Node<T>>)                    lists (SlotArena<ListHeader>)
//!   ┌────────┬──────────────────────────────────┐ ┌──────┬──────────────────────┐
//!   │ SlotId │ Node { value, prev, next, owner }│ │ List │ head   tail   len     │
//!   ├────────┼──────────────────────────────────┤ ├──────┼──────────────────────┤
//!   │ id_0   │ { A, None,   id_1, L0 }          │ │ L0   │ id_0   id_1   2       │
//!   │ id_1   │ { B, id_0,   None, L0 }          │ │ L1   │ id_2   id_2   1       │
//!   │ id_2   │ { C, None,   None, L1 }          │ └──────┴──────────────────────┘
//!   │ id_3   │ { D, None,   None, - }  detached │
//!   └────────┴──────────────────────────────────┘
//!
//!   L0: head ─► [id_0] ◄──► [id_1] ◄── tail
//!   L1: head ─► [id_2] ◄── tail
//!
//!   push_tail_node(L1, id_0):
//!   L0: head ─► [id_1] ◄── tail
//!   L1: head ─► [id_2] ◄──► [id_0] ◄── tail
//! ```
//!
//! ## Operations
//!
//! | Operation                           | Time | Notes                               |
//! |-------------------------------------|------|-------------------------------------|
//! | `push_head` / `push_tail`           | O(1) | Allocates a node                    |
//! | `push_head_node` / `push_tail_node` | O(1) | Relinks an existing node            |
//! | `remove_head` / `remove_tail`       | O(1) | Pops and frees                      |
//! | `insert_previous` / `insert_next`   | O(1) | Relative to an attached node        |
//! | `remove_self`                       | O(1) | Detaches, node stays allocated      |
//! | `free`                              | O(1) | Detaches and releases the node      |
//! | `iter`                              | O(n) | Head to tail                        |
//!
//! [`IntrusiveList`] is the single-list form used when only one list is
//! needed (the bucket ledger of the stream summary).
//!
//! `debug_validate_invariants()` is available in debug/test builds.

use crate::ds::slot_arena::{SlotArena, SlotId};

/// Handle to one list header inside a [`ListArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListId(SlotId);

#[derive(Debug, Clone)]
struct Node<T> {
    prev: Option<SlotId>,
    next: Option<SlotId>,
    owner: Option<ListId>,
    value: T,
}

#[derive(Debug, Clone, Copy, Default)]
struct ListHeader {
    head: Option<SlotId>,
    tail: Option<SlotId>,
    len: usize,
}

/// A node arena shared by any number of doubly linked lists.
///
/// Every node belongs to at most one list at a time. Detaching a node clears
/// its links and owner, after which it can be attached anywhere again.
///
/// # Example
///
/// ```
/// use hitkit::ds::ListArena;
///
/// let mut arena = ListArena::new();
/// let low = arena.new_list();
/// let high = arena.new_list();
///
/// let a = arena.push_tail(low, "a").unwrap();
/// arena.push_tail(low, "b");
///
/// // Move "a" to the other list without reallocating it.
/// assert!(arena.push_tail_node(high, a));
/// assert_eq!(arena.owner(a), Some(high));
/// assert_eq!(arena.len(low), 1);
/// assert_eq!(arena.iter(high).copied().collect::<Vec<_>>(), vec!["a"]);
/// ```
#[derive(Debug, Clone)]
pub struct ListArena<T> {
    nodes: SlotArena<Node<T>>,
    lists: SlotArena<ListHeader>,
}

impl<T> ListArena<T> {
    /// Creates an arena with no lists and no nodes.
    pub fn new() -> Self {
        Self {
            nodes: SlotArena::new(),
            lists: SlotArena::new(),
        }
    }

    /// Creates an arena with room for `capacity` nodes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: SlotArena::with_capacity(capacity),
            lists: SlotArena::new(),
        }
    }

    /// Creates a new empty list and returns its handle.
    pub fn new_list(&mut self) -> ListId {
        ListId(self.lists.insert(ListHeader::default()))
    }

    /// Releases an empty list header; returns `false` if the list is unknown
    /// or still has nodes attached.
    pub fn drop_list(&mut self, list: ListId) -> bool {
        match self.lists.get(list.0) {
            Some(header) if header.len == 0 => {
                self.lists.remove(list.0);
                true
            },
            _ => false,
        }
    }

    /// Returns `true` if `list` names a live list.
    pub fn has_list(&self, list: ListId) -> bool {
        self.lists.contains(list.0)
    }

    /// Number of live lists.
    pub fn list_count(&self) -> usize {
        self.lists.len()
    }

    /// Number of allocated nodes, attached or not.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of nodes attached to `list` (0 for an unknown list).
    pub fn len(&self, list: ListId) -> usize {
        self.lists.get(list.0).map_or(0, |header| header.len)
    }

    pub fn is_empty(&self, list: ListId) -> bool {
        self.len(list) == 0
    }

    /// Peeks the head node of `list`.
    pub fn head(&self, list: ListId) -> Option<SlotId> {
        self.lists.get(list.0)?.head
    }

    /// Peeks the tail node of `list`.
    pub fn tail(&self, list: ListId) -> Option<SlotId> {
        self.lists.get(list.0)?.tail
    }

    /// Returns `true` if `id` is an allocated node.
    pub fn contains(&self, id: SlotId) -> bool {
        self.nodes.contains(id)
    }

    pub fn get(&self, id: SlotId) -> Option<&T> {
        self.nodes.get(id).map(|node| &node.value)
    }

    pub fn get_mut(&mut self, id: SlotId) -> Option<&mut T> {
        self.nodes.get_mut(id).map(|node| &mut node.value)
    }

    /// The list `id` is attached to, if any.
    pub fn owner(&self, id: SlotId) -> Option<ListId> {
        self.nodes.get(id)?.owner
    }

    /// Neighbour towards the head.
    pub fn previous(&self, id: SlotId) -> Option<SlotId> {
        self.nodes.get(id)?.prev
    }

    /// Neighbour towards the tail.
    pub fn next(&self, id: SlotId) -> Option<SlotId> {
        self.nodes.get(id)?.next
    }

    /// Allocates `value` as the new head of `list`.
    ///
    /// Returns `None` if `list` does not exist.
    pub fn push_head(&mut self, list: ListId, value: T) -> Option<SlotId> {
        if !self.lists.contains(list.0) {
            return None;
        }
        let id = self.alloc(value);
        self.attach_head(list, id)?;
        Some(id)
    }

    /// Allocates `value` as the new tail of `list`.
    ///
    /// Returns `None` if `list` does not exist.
    pub fn push_tail(&mut self, list: ListId, value: T) -> Option<SlotId> {
        if !self.lists.contains(list.0) {
            return None;
        }
        let id = self.alloc(value);
        self.attach_tail(list, id)?;
        Some(id)
    }

    /// Makes an existing node the head of `list`, detaching it from its
    /// current list first (which may be `list` itself).
    ///
    /// Returns `false` if either the node or the list does not exist.
    pub fn push_head_node(&mut self, list: ListId, id: SlotId) -> bool {
        if !self.lists.contains(list.0) || self.detach(id).is_none() {
            return false;
        }
        self.attach_head(list, id).is_some()
    }

    /// Makes an existing node the tail of `list`, detaching it from its
    /// current list first (which may be `list` itself).
    ///
    /// Returns `false` if either the node or the list does not exist.
    pub fn push_tail_node(&mut self, list: ListId, id: SlotId) -> bool {
        if !self.lists.contains(list.0) || self.detach(id).is_none() {
            return false;
        }
        self.attach_tail(list, id).is_some()
    }

    /// Pops and frees the head of `list`.
    pub fn remove_head(&mut self, list: ListId) -> Option<T> {
        let id = self.head(list)?;
        self.free(id)
    }

    /// Pops and frees the tail of `list`.
    pub fn remove_tail(&mut self, list: ListId) -> Option<T> {
        let id = self.tail(list)?;
        self.free(id)
    }

    /// Inserts `value` immediately before `id` (towards the head) in the list
    /// `id` is attached to.
    ///
    /// Returns `None` if `id` is missing or detached.
    pub fn insert_previous(&mut self, id: SlotId, value: T) -> Option<SlotId> {
        let (owner, prev) = {
            let node = self.nodes.get(id)?;
            (node.owner?, node.prev)
        };
        let new_id = self.nodes.insert(Node {
            prev,
            next: Some(id),
            owner: Some(owner),
            value,
        });
        if let Some(node) = self.nodes.get_mut(id) {
            node.prev = Some(new_id);
        }
        if let Some(prev) = prev {
            if let Some(node) = self.nodes.get_mut(prev) {
                node.next = Some(new_id);
            }
        }
        let header = self.lists.get_mut(owner.0)?;
        if prev.is_none() {
            header.head = Some(new_id);
        }
        header.len += 1;
        Some(new_id)
    }

    /// Inserts `value` immediately after `id` (towards the tail) in the list
    /// `id` is attached to.
    ///
    /// Returns `None` if `id` is missing or detached.
    pub fn insert_next(&mut self, id: SlotId, value: T) -> Option<SlotId> {
        let (owner, next) = {
            let node = self.nodes.get(id)?;
            (node.owner?, node.next)
        };
        let new_id = self.nodes.insert(Node {
            prev: Some(id),
            next,
            owner: Some(owner),
            value,
        });
        if let Some(node) = self.nodes.get_mut(id) {
            node.next = Some(new_id);
        }
        if let Some(next) = next {
            if let Some(node) = self.nodes.get_mut(next) {
                node.prev = Some(new_id);
            }
        }
        let header = self.lists.get_mut(owner.0)?;
        if next.is_none() {
            header.tail = Some(new_id);
        }
        header.len += 1;
        Some(new_id)
    }

    /// Detaches `id` from whatever list owns it. The node stays allocated and
    /// can be pushed onto any list afterwards.
    ///
    /// Returns `true` if the node was attached.
    pub fn remove_self(&mut self, id: SlotId) -> bool {
        if self.owner(id).is_none() {
            return false;
        }
        self.detach(id).is_some()
    }

    /// Detaches `id` (if attached) and releases it, returning its value.
    pub fn free(&mut self, id: SlotId) -> Option<T> {
        self.detach(id)?;
        self.nodes.remove(id).map(|node| node.value)
    }

    /// Iterates the values of `list` from head to tail.
    pub fn iter(&self, list: ListId) -> ListIter<'_, T> {
        ListIter {
            arena: self,
            current: self.head(list),
        }
    }

    /// Iterates the node ids of `list` from head to tail.
    pub fn iter_ids(&self, list: ListId) -> ListIdIter<'_, T> {
        ListIdIter {
            arena: self,
            current: self.head(list),
        }
    }

    /// Iterates `(SlotId, &T)` of `list` from head to tail.
    pub fn iter_entries(&self, list: ListId) -> ListEntryIter<'_, T> {
        ListEntryIter {
            arena: self,
            current: self.head(list),
        }
    }

    /// Drops every node and every list. All handles become invalid.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.lists.clear();
    }

    /// Approximate heap footprint in bytes.
    pub fn approx_bytes(&self) -> usize {
        std::mem::size_of::<Self>() + self.nodes.approx_bytes() + self.lists.approx_bytes()
    }

    fn alloc(&mut self, value: T) -> SlotId {
        self.nodes.insert(Node {
            prev: None,
            next: None,
            owner: None,
            value,
        })
    }

    /// Unlinks `id` from its owner. `None` only if the node does not exist.
    fn detach(&mut self, id: SlotId) -> Option<()> {
        let (prev, next, owner) = {
            let node = self.nodes.get(id)?;
            (node.prev, node.next, node.owner)
        };
        let Some(list) = owner else {
            return Some(());
        };

        if let Some(prev) = prev {
            if let Some(node) = self.nodes.get_mut(prev) {
                node.next = next;
            }
        }
        if let Some(next) = next {
            if let Some(node) = self.nodes.get_mut(next) {
                node.prev = prev;
            }
        }
        if let Some(header) = self.lists.get_mut(list.0) {
            if prev.is_none() {
                header.head = next;
            }
            if next.is_none() {
                header.tail = prev;
            }
            header.len -= 1;
        }
        if let Some(node) = self.nodes.get_mut(id) {
            node.prev = None;
            node.next = None;
            node.owner = None;
        }
        Some(())
    }

    fn attach_head(&mut self, list: ListId, id: SlotId) -> Option<()> {
        let old_head = self.lists.get(list.0)?.head;
        {
            let node = self.nodes.get_mut(id)?;
            node.prev = None;
            node.next = old_head;
            node.owner = Some(list);
        }
        if let Some(old_head) = old_head {
            if let Some(node) = self.nodes.get_mut(old_head) {
                node.prev = Some(id);
            }
        }
        let header = self.lists.get_mut(list.0)?;
        if old_head.is_none() {
            header.tail = Some(id);
        }
        header.head = Some(id);
        header.len += 1;
        Some(())
    }

    fn attach_tail(&mut self, list: ListId, id: SlotId) -> Option<()> {
        let old_tail = self.lists.get(list.0)?.tail;
        {
            let node = self.nodes.get_mut(id)?;
            node.prev = old_tail;
            node.next = None;
            node.owner = Some(list);
        }
        if let Some(old_tail) = old_tail {
            if let Some(node) = self.nodes.get_mut(old_tail) {
                node.next = Some(id);
            }
        }
        let header = self.lists.get_mut(list.0)?;
        if old_tail.is_none() {
            header.head = Some(id);
        }
        header.tail = Some(id);
        header.len += 1;
        Some(())
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        let mut attached = 0usize;
        for (list_slot, header) in self.lists.iter() {
            let list = ListId(list_slot);
            if header.head.is_none() || header.tail.is_none() {
                assert!(header.head.is_none());
                assert!(header.tail.is_none());
                assert_eq!(header.len, 0);
                continue;
            }

            let mut seen = std::collections::HashSet::new();
            let mut count = 0usize;
            let mut current = header.head;
            let mut prev = None;
            while let Some(id) = current {
                assert!(seen.insert(id), "cycle in list");
                let node = self.nodes.get(id).expect("linked node missing");
                assert_eq!(node.owner, Some(list));
                assert_eq!(node.prev, prev);
                if node.next.is_none() {
                    assert_eq!(header.tail, Some(id));
                }
                prev = Some(id);
                current = node.next;
                count += 1;
                assert!(count <= self.nodes.len());
            }
            assert_eq!(count, header.len);
            attached += count;
        }

        let owned = self
            .nodes
            .iter()
            .filter(|(_, node)| node.owner.is_some())
            .count();
        assert_eq!(owned, attached);
        for (_, node) in self.nodes.iter() {
            if node.owner.is_none() {
                assert!(node.prev.is_none());
                assert!(node.next.is_none());
            }
        }
    }
}

impl<T> Default for ListArena<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over the values of one list, head to tail.
pub struct ListIter<'a, T> {
    arena: &'a ListArena<T>,
    current: Option<SlotId>,
}

impl<'a, T> Iterator for ListIter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        let node = self.arena.nodes.get(id)?;
        self.current = node.next;
        Some(&node.value)
    }
}

/// Iterator over the node ids of one list, head to tail.
pub struct ListIdIter<'a, T> {
    arena: &'a ListArena<T>,
    current: Option<SlotId>,
}

impl<'a, T> Iterator for ListIdIter<'a, T> {
    type Item = SlotId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        let node = self.arena.nodes.get(id)?;
        self.current = node.next;
        Some(id)
    }
}

/// Iterator over `(SlotId, &T)` of one list, head to tail.
pub struct ListEntryIter<'a, T> {
    arena: &'a ListArena<T>,
    current: Option<SlotId>,
}

impl<'a, T> Iterator for ListEntryIter<'a, T> {
    type Item = (SlotId, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        let node = self.arena.nodes.get(id)?;
        self.current = node.next;
        Some((id, &node.value))
    }
}

/// A single intrusive list that owns its node arena.
///
/// # Example
///
/// ```
/// use hitkit::ds::IntrusiveList;
///
/// let mut list = IntrusiveList::new();
/// let b = list.push_head(2);
/// list.insert_previous(b, 1);
/// list.insert_next(b, 3);
///
/// assert_eq!(list.iter().copied().collect::<Vec<_>>(), vec![1, 2, 3]);
///
/// list.remove_self(b);
/// assert_eq!(list.len(), 2);
/// list.push_tail_node(b);
/// assert_eq!(list.iter().copied().collect::<Vec<_>>(), vec![1, 3, 2]);
/// ```
#[derive(Debug, Clone)]
pub struct IntrusiveList<T> {
    arena: ListArena<T>,
    list: ListId,
}

impl<T> IntrusiveList<T> {
    pub fn new() -> Self {
        let mut arena = ListArena::new();
        let list = arena.new_list();
        Self { arena, list }
    }

    /// Creates an empty list with reserved node capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        let mut arena = ListArena::with_capacity(capacity);
        let list = arena.new_list();
        Self { arena, list }
    }

    /// Number of attached nodes.
    pub fn len(&self) -> usize {
        self.arena.len(self.list)
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty(self.list)
    }

    pub fn head(&self) -> Option<SlotId> {
        self.arena.head(self.list)
    }

    pub fn tail(&self) -> Option<SlotId> {
        self.arena.tail(self.list)
    }

    /// Returns `true` if `id` is allocated (attached or detached).
    pub fn contains(&self, id: SlotId) -> bool {
        self.arena.contains(id)
    }

    /// Returns `true` if `id` is currently linked into the list.
    pub fn is_attached(&self, id: SlotId) -> bool {
        self.arena.owner(id).is_some()
    }

    pub fn get(&self, id: SlotId) -> Option<&T> {
        self.arena.get(id)
    }

    pub fn get_mut(&mut self, id: SlotId) -> Option<&mut T> {
        self.arena.get_mut(id)
    }

    pub fn previous(&self, id: SlotId) -> Option<SlotId> {
        self.arena.previous(id)
    }

    pub fn next(&self, id: SlotId) -> Option<SlotId> {
        self.arena.next(id)
    }

    pub fn push_head(&mut self, value: T) -> SlotId {
        let id = self.arena.alloc(value);
        self.arena.attach_head(self.list, id);
        id
    }

    pub fn push_tail(&mut self, value: T) -> SlotId {
        let id = self.arena.alloc(value);
        self.arena.attach_tail(self.list, id);
        id
    }

    /// Re-attaches an existing node at the head; `false` if `id` is unknown.
    pub fn push_head_node(&mut self, id: SlotId) -> bool {
        self.arena.push_head_node(self.list, id)
    }

    /// Re-attaches an existing node at the tail; `false` if `id` is unknown.
    pub fn push_tail_node(&mut self, id: SlotId) -> bool {
        self.arena.push_tail_node(self.list, id)
    }

    pub fn remove_head(&mut self) -> Option<T> {
        self.arena.remove_head(self.list)
    }

    pub fn remove_tail(&mut self) -> Option<T> {
        self.arena.remove_tail(self.list)
    }

    pub fn insert_previous(&mut self, id: SlotId, value: T) -> Option<SlotId> {
        self.arena.insert_previous(id, value)
    }

    pub fn insert_next(&mut self, id: SlotId, value: T) -> Option<SlotId> {
        self.arena.insert_next(id, value)
    }

    /// Detaches `id` but keeps it allocated for a later `push_*_node`.
    pub fn remove_self(&mut self, id: SlotId) -> bool {
        self.arena.remove_self(id)
    }

    /// Detaches and frees `id`, returning its value.
    pub fn remove(&mut self, id: SlotId) -> Option<T> {
        self.arena.free(id)
    }

    pub fn iter(&self) -> ListIter<'_, T> {
        self.arena.iter(self.list)
    }

    pub fn iter_ids(&self) -> ListIdIter<'_, T> {
        self.arena.iter_ids(self.list)
    }

    pub fn iter_entries(&self) -> ListEntryIter<'_, T> {
        self.arena.iter_entries(self.list)
    }

    /// Frees every node, attached or detached.
    pub fn clear(&mut self) {
        self.arena.clear();
        self.list = self.arena.new_list();
    }

    pub fn approx_bytes(&self) -> usize {
        self.arena.approx_bytes()
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        assert_eq!(self.arena.list_count(), 1);
        self.arena.debug_validate_invariants();
    }
}

impl<T> Default for IntrusiveList<T> {
    fn default() -> Self {
        Self::new()
    }
}
