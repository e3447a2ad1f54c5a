//! Doubly linked recency list backed by [`SlotArena`].
//!
//! Nodes live in a `SlotArena` and link to each other by [`SlotId`], so a map
//! can hold a node's id and reach it in O(1) without shared mutable pointers.
//!
//! ## Architecture
//!
//! ```text
//!   arena (SlotArena<Node<T>>)
//!   ┌────────┬──────────────────────────────────────────────┐
//!   │ SlotId │ Node { value, prev, next }                   │
//!   ├────────┼──────────────────────────────────────────────┤
//!   │ id_0   │ { value: A, prev: None,       next: id_2 }   │
//!   │ id_2   │ { value: B, prev: id_0,       next: id_1 }   │
//!   │ id_1   │ { value: C, prev: id_2,       next: None }   │
//!   └────────┴──────────────────────────────────────────────┘
//!
//!   front (LRU) ─► [id_0] ◄──► [id_2] ◄──► [id_1] ◄── back (MRU)
//! ```
//!
//! The front is the least recently used node and the back is the most
//! recently used one. `touch` moves a node to the back; `pop_front` evicts.
//!
//! ## Performance
//! - `push_back` / `pop_front` / `touch` / `remove`: O(1)
//! - `iter`: O(n), front to back

use crate::ds::slot_arena::{SlotArena, SlotId};

#[derive(Debug)]
struct Node<T> {
    value: T,
    prev: Option<SlotId>,
    next: Option<SlotId>,
}

/// Arena-backed recency ordering; front = LRU, back = MRU.
#[derive(Debug)]
pub struct RecencyList<T> {
    arena: SlotArena<Node<T>>,
    front: Option<SlotId>,
    back: Option<SlotId>,
}

impl<T> RecencyList<T> {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            arena: SlotArena::with_capacity(capacity),
            front: None,
            back: None,
        }
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    pub fn contains(&self, id: SlotId) -> bool {
        self.arena.contains(id)
    }

    pub fn get(&self, id: SlotId) -> Option<&T> {
        self.arena.get(id).map(|node| &node.value)
    }

    pub fn get_mut(&mut self, id: SlotId) -> Option<&mut T> {
        self.arena.get_mut(id).map(|node| &mut node.value)
    }

    /// Returns the least recently used value.
    pub fn front(&self) -> Option<&T> {
        self.front.and_then(|id| self.get(id))
    }

    /// Returns the most recently used value.
    pub fn back(&self) -> Option<&T> {
        self.back.and_then(|id| self.get(id))
    }

    /// Appends `value` at the MRU end and returns its id.
    pub fn push_back(&mut self, value: T) -> SlotId {
        let id = self.arena.insert(Node {
            value,
            prev: self.back,
            next: None,
        });
        match self.back.and_then(|back| self.arena.get_mut(back)) {
            Some(node) => node.next = Some(id),
            None => self.front = Some(id),
        }
        self.back = Some(id);
        id
    }

    /// Removes and returns the LRU value.
    pub fn pop_front(&mut self) -> Option<T> {
        let id = self.front?;
        self.remove(id)
    }

    /// Unlinks `id` and returns its value.
    pub fn remove(&mut self, id: SlotId) -> Option<T> {
        self.unlink(id)?;
        self.arena.remove(id).map(|node| node.value)
    }

    /// Moves `id` to the MRU end; returns `false` if `id` is not in the list.
    pub fn touch(&mut self, id: SlotId) -> bool {
        if !self.arena.contains(id) {
            return false;
        }
        if self.back == Some(id) {
            return true;
        }
        self.unlink(id);
        self.link_back(id);
        true
    }

    pub fn clear(&mut self) {
        self.arena.clear();
        self.front = None;
        self.back = None;
    }

    /// Iterates values from LRU to MRU.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            list: self,
            cursor: self.front,
        }
    }

    fn unlink(&mut self, id: SlotId) -> Option<()> {
        let (prev, next) = {
            let node = self.arena.get(id)?;
            (node.prev, node.next)
        };

        match prev.and_then(|p| self.arena.get_mut(p)) {
            Some(prev_node) => prev_node.next = next,
            None => self.front = next,
        }
        match next.and_then(|n| self.arena.get_mut(n)) {
            Some(next_node) => next_node.prev = prev,
            None => self.back = prev,
        }

        let node = self.arena.get_mut(id)?;
        node.prev = None;
        node.next = None;
        Some(())
    }

    fn link_back(&mut self, id: SlotId) {
        let old_back = self.back;
        if let Some(node) = self.arena.get_mut(id) {
            node.prev = old_back;
            node.next = None;
        } else {
            return;
        }
        match old_back.and_then(|b| self.arena.get_mut(b)) {
            Some(back_node) => back_node.next = Some(id),
            None => self.front = Some(id),
        }
        self.back = Some(id);
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        if self.front.is_none() || self.back.is_none() {
            assert!(self.front.is_none() && self.back.is_none());
            assert_eq!(self.len(), 0);
            return;
        }

        let mut seen = std::collections::HashSet::new();
        let mut prev = None;
        let mut cursor = self.front;
        while let Some(id) = cursor {
            assert!(seen.insert(id), "cycle at slot {}", id.index());
            let node = self.arena.get(id).expect("linked slot is vacant");
            assert_eq!(node.prev, prev);
            if node.next.is_none() {
                assert_eq!(self.back, Some(id));
            }
            prev = Some(id);
            cursor = node.next;
        }
        assert_eq!(seen.len(), self.len());
    }
}

impl<T> Default for RecencyList<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Front-to-back (LRU to MRU) iterator over a [`RecencyList`].
pub struct Iter<'a, T> {
    list: &'a RecencyList<T>,
    cursor: Option<SlotId>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.list.arena.get(self.cursor?)?;
        self.cursor = node.next;
        Some(&node.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order<T: Copy>(list: &RecencyList<T>) -> Vec<T> {
        list.iter().copied().collect()
    }

    #[test]
    fn push_back_orders_lru_to_mru() {
        let mut list = RecencyList::new();
        list.push_back(1);
        list.push_back(2);
        list.push_back(3);
        assert_eq!(order(&list), vec![1, 2, 3]);
        assert_eq!(list.front(), Some(&1));
        assert_eq!(list.back(), Some(&3));
        list.debug_validate_invariants();
    }

    #[test]
    fn touch_moves_to_back() {
        let mut list = RecencyList::new();
        let a = list.push_back('a');
        let b = list.push_back('b');
        list.push_back('c');

        assert!(list.touch(a));
        assert_eq!(order(&list), vec!['b', 'c', 'a']);
        assert!(list.touch(b));
        assert_eq!(order(&list), vec!['c', 'a', 'b']);
        // already MRU
        assert!(list.touch(b));
        assert_eq!(order(&list), vec!['c', 'a', 'b']);
        list.debug_validate_invariants();
    }

    #[test]
    fn pop_front_and_remove_middle() {
        let mut list = RecencyList::new();
        list.push_back(10);
        let mid = list.push_back(20);
        list.push_back(30);

        assert_eq!(list.remove(mid), Some(20));
        assert_eq!(order(&list), vec![10, 30]);
        assert_eq!(list.pop_front(), Some(10));
        assert_eq!(list.pop_front(), Some(30));
        assert_eq!(list.pop_front(), None);
        assert!(list.is_empty());
        list.debug_validate_invariants();
    }

    #[test]
    fn stale_id_is_rejected() {
        let mut list = RecencyList::new();
        let id = list.push_back(1);
        assert_eq!(list.remove(id), Some(1));
        assert!(!list.touch(id));
        assert_eq!(list.remove(id), None);
        assert_eq!(list.get(id), None);
    }

    #[test]
    fn slots_are_reused_after_removal() {
        let mut list = RecencyList::with_capacity(2);
        let a = list.push_back("a");
        list.push_back("b");
        list.pop_front();
        let c = list.push_back("c");
        assert_eq!(a.index(), c.index());
        assert_eq!(list.iter().copied().collect::<Vec<_>>(), vec!["b", "c"]);

        if let Some(v) = list.get_mut(c) {
            *v = "C";
        }
        assert_eq!(list.back(), Some(&"C"));

        list.clear();
        assert!(list.is_empty());
        assert_eq!(list.front(), None);
    }
}
