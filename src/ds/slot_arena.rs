//! Index-addressed arena with free-slot reuse.
//!
//! Values live in a dense `Vec` and are addressed by [`SlotId`]. Vacated slots
//! are threaded into an intrusive free chain, so `insert` after `remove` reuses
//! storage without allocating and without disturbing any other live id.
//!
//! ```text
//!   slots: [Occupied(a)] [Vacant(next: None)] [Occupied(c)] [Vacant(next: 1)]
//!                                 ▲                               │
//!                                 └───────────────────────────────┘
//!   free_head ─► 3
//! ```
//!
//! Ids are not generational: a `SlotId` is only meaningful while the value it
//! was returned for is still present. Callers (the recency list) own that
//! bookkeeping.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotId(pub(crate) usize);

impl SlotId {
    /// Returns the raw slot index.
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug)]
enum Slot<T> {
    Occupied(T),
    Vacant { next_free: Option<usize> },
}

/// Dense storage for values addressed by [`SlotId`].
#[derive(Debug)]
pub struct SlotArena<T> {
    slots: Vec<Slot<T>>,
    free_head: Option<usize>,
    len: usize,
}

impl<T> SlotArena<T> {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an arena with room for `capacity` values before reallocating.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free_head: None,
            len: 0,
        }
    }

    /// Stores `value`, reusing the most recently vacated slot if one exists.
    pub fn insert(&mut self, value: T) -> SlotId {
        self.len += 1;
        if let Some(idx) = self.free_head
            && let Slot::Vacant { next_free } = self.slots[idx]
        {
            self.free_head = next_free;
            self.slots[idx] = Slot::Occupied(value);
            return SlotId(idx);
        }
        self.slots.push(Slot::Occupied(value));
        SlotId(self.slots.len() - 1)
    }

    /// Removes and returns the value at `id`, or `None` if the slot is vacant.
    pub fn remove(&mut self, id: SlotId) -> Option<T> {
        let slot = self.slots.get_mut(id.0)?;
        if matches!(slot, Slot::Vacant { .. }) {
            return None;
        }
        let vacated = std::mem::replace(
            slot,
            Slot::Vacant {
                next_free: self.free_head,
            },
        );
        self.free_head = Some(id.0);
        self.len -= 1;
        match vacated {
            Slot::Occupied(value) => Some(value),
            Slot::Vacant { .. } => None,
        }
    }

    pub fn get(&self, id: SlotId) -> Option<&T> {
        match self.slots.get(id.0)? {
            Slot::Occupied(value) => Some(value),
            Slot::Vacant { .. } => None,
        }
    }

    pub fn get_mut(&mut self, id: SlotId) -> Option<&mut T> {
        match self.slots.get_mut(id.0)? {
            Slot::Occupied(value) => Some(value),
            Slot::Vacant { .. } => None,
        }
    }

    pub fn contains(&self, id: SlotId) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Drops every value and forgets the free chain. Allocated capacity is kept.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.free_head = None;
        self.len = 0;
    }
}

impl<T> Default for SlotArena<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_remove_reuses_vacated_slot() {
        let mut arena = SlotArena::new();
        let a = arena.insert("a");
        let b = arena.insert("b");
        assert_eq!(arena.len(), 2);
        assert_eq!(arena.get(a), Some(&"a"));
        assert_eq!(arena.get(b), Some(&"b"));

        assert_eq!(arena.remove(a), Some("a"));
        assert_eq!(arena.len(), 1);
        assert!(!arena.contains(a));

        let c = arena.insert("c");
        assert_eq!(c.index(), a.index());
        assert_eq!(arena.get(c), Some(&"c"));
        assert_eq!(arena.get(b), Some(&"b"));
    }

    #[test]
    fn free_chain_is_lifo() {
        let mut arena = SlotArena::new();
        let ids: Vec<_> = (0..4).map(|i| arena.insert(i)).collect();
        arena.remove(ids[1]);
        arena.remove(ids[3]);

        assert_eq!(arena.insert(10).index(), ids[3].index());
        assert_eq!(arena.insert(11).index(), ids[1].index());
        assert_eq!(arena.insert(12).index(), 4);
        assert_eq!(arena.len(), 5);
    }

    #[test]
    fn double_remove_is_noop() {
        let mut arena = SlotArena::new();
        let id = arena.insert(7u32);
        assert_eq!(arena.remove(id), Some(7));
        assert_eq!(arena.remove(id), None);
        assert!(arena.is_empty());
        assert_eq!(arena.remove(SlotId(99)), None);
    }

    #[test]
    fn get_mut_and_clear() {
        let mut arena = SlotArena::with_capacity(2);
        let id = arena.insert(vec![1u8]);
        if let Some(v) = arena.get_mut(id) {
            v.push(2);
        }
        assert_eq!(arena.get(id), Some(&vec![1, 2]));

        arena.clear();
        assert!(arena.is_empty());
        assert_eq!(arena.get(id), None);
        assert_eq!(arena.insert(vec![]).index(), 0);
    }
}
