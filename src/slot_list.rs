//! SlotList: a doubly linked list stored in a growable slab of slots.
//!
//! Elements live in a `Vec` of [`Node`]s and reference each other through
//! integer [`Slot`] indices instead of pointers. Removal frees a slot in
//! place; the next append reuses the first free slot it finds, so slot
//! indices handed out by [`SlotList::push_back`] stay valid until their
//! element is removed, across any number of slab doublings.

use core::fmt;

/// Stable index of a slot in the slab.
///
/// Slots are minted by [`SlotList::push_back`] and remain valid until the
/// element is removed. They are plain indices with no generation counter:
/// after a removal the same `Slot` value can come back for a new element.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Slot(usize);

impl Slot {
    pub(crate) fn new(index: usize) -> Self {
        Slot(index)
    }

    /// Position of this slot in the slab.
    pub fn index(self) -> usize {
        self.0
    }
}

/// One slab record: a payload plus the links to its list neighbors.
///
/// A free slot holds `None` for the payload and both links; an occupied
/// slot holds the value and whatever links its list position requires. The
/// slot's own index is deliberately not stored here; see
/// [`SlotList::position`].
#[derive(Debug)]
pub struct Node<T> {
    value: Option<T>,
    next: Option<Slot>,
    previous: Option<Slot>,
}

impl<T> Node<T> {
    /// The payload, or `None` for a free slot.
    pub fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }

    /// Link to the following element in list order.
    pub fn next(&self) -> Option<Slot> {
        self.next
    }

    /// Link to the preceding element in list order.
    pub fn previous(&self) -> Option<Slot> {
        self.previous
    }

    /// Whether the slot currently holds an element.
    pub fn is_occupied(&self) -> bool {
        self.value.is_some()
    }

    // Frees the slot in place and hands back the payload.
    fn take(&mut self) -> Option<T> {
        self.next = None;
        self.previous = None;
        self.value.take()
    }
}

impl<T> Default for Node<T> {
    fn default() -> Self {
        Node {
            value: None,
            next: None,
            previous: None,
        }
    }
}

/// Array-backed doubly linked list with slot reuse.
///
/// The slab starts at length 1 and doubles whenever an append would fill
/// it; it never shrinks, and existing indices are preserved across growth.
/// Element order is maintained purely through the `next`/`previous` links,
/// so removing from the middle never moves other elements.
pub struct SlotList<T> {
    slots: Vec<Node<T>>,
    first: Option<Slot>,
    last: Option<Slot>,
    len: usize,
    // True once the list has held at least one element since construction
    // or the last clear(); gates the seed path in push_back.
    initialized: bool,
}

impl<T> SlotList<T> {
    /// Create an empty list with a slab of length 1.
    pub fn new() -> Self {
        SlotList {
            slots: vec![Node::default()],
            first: None,
            last: None,
            len: 0,
            initialized: false,
        }
    }

    /// Number of elements currently in the list.
    pub fn len(&self) -> usize {
        self.len
    }

    /// True if the list holds no elements.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Current slab length. Grows by doubling, never shrinks.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Slot of the first element in list order, if any.
    pub fn first(&self) -> Option<Slot> {
        self.first
    }

    /// Slot of the last element in list order, if any.
    pub fn last(&self) -> Option<Slot> {
        self.last
    }

    /// Append a value at the end of the list and return the slot it
    /// landed in.
    ///
    /// The slab is doubled first when the append would fill it, so there
    /// is always at least one free slot afterwards. The free slot itself
    /// is found by a linear scan from index 0, an O(capacity) cost that
    /// keeps freed slots dense at the front instead of maintaining a
    /// free list.
    pub fn push_back(&mut self, value: T) -> Slot {
        if self.len + 1 >= self.capacity() {
            self.grow();
        }
        let slot = self
            .first_free()
            .expect("slab must have a free slot after growth");
        if self.initialized {
            let last = self.last.expect("initialized list must have a last slot");
            self.slots[slot.index()].previous = Some(last);
            self.slots[last.index()].next = Some(slot);
        } else {
            // Seed path: first element since construction or the last
            // clear(). Establishes the head without touching the slab.
            self.first = Some(slot);
            self.len = 0;
            self.initialized = true;
        }
        let node = &mut self.slots[slot.index()];
        node.value = Some(value);
        self.last = Some(slot);
        self.len += 1;
        slot
    }

    /// Double the slab length. Existing slots keep their indices; the new
    /// upper half starts out free.
    pub fn grow(&mut self) {
        let doubled = self
            .capacity()
            .checked_mul(2)
            .expect("slab capacity overflow");
        self.slots.resize_with(doubled, Node::default);
    }

    /// Remove the element at `slot`, preserving the order of the rest,
    /// and return its value.
    ///
    /// Returns `None` if `slot` is out of range or already free; both are
    /// caller errors and additionally fail a debug assertion.
    pub fn remove(&mut self, slot: Slot) -> Option<T> {
        let index = slot.index();
        if index >= self.slots.len() {
            debug_assert!(false, "slot {index} is outside the slab");
            return None;
        }
        if !self.slots[index].is_occupied() {
            debug_assert!(false, "slot {index} is already free");
            return None;
        }
        // Link reciprocity check: the neighbors must agree on where this
        // node lives.
        debug_assert_eq!(self.position(&self.slots[index]), slot);

        let previous = self.slots[index].previous;
        let next = self.slots[index].next;
        if self.first == Some(slot) {
            self.first = next;
        }
        if self.last == Some(slot) {
            self.last = previous;
        }
        if previous.is_none() && next.is_none() {
            // Sole element: the list is empty again and the next append
            // takes the seed path.
            self.first = None;
            self.last = None;
            self.len = 0;
            self.initialized = false;
        } else {
            if let Some(previous) = previous {
                self.slots[previous.index()].next = next;
            }
            if let Some(next) = next {
                self.slots[next.index()].previous = previous;
            }
            self.len -= 1;
        }
        self.slots[index].take()
    }

    /// Recover a node's own slab position from its neighbors.
    ///
    /// Nodes do not store their own index; it is reconstructed from the
    /// reciprocal links: the previous node's `next` (or, for the head,
    /// the next node's `previous`) is exactly this node's slot. A node
    /// with both links `None` is the sole element, whose position is
    /// `first`.
    ///
    /// `node` must be borrowed from this list; feeding in a node from
    /// another list or a corrupted link panics or reports an unrelated
    /// slot.
    pub fn position(&self, node: &Node<T>) -> Slot {
        if let Some(previous) = node.previous {
            return self.slots[previous.index()]
                .next
                .expect("previous neighbor must link back");
        }
        if let Some(next) = node.next {
            return self.slots[next.index()]
                .previous
                .expect("next neighbor must link back");
        }
        self.first.unwrap_or(Slot(0))
    }

    /// The node stored at `slot`, free or occupied. `None` if `slot` is
    /// outside the slab.
    pub fn node(&self, slot: Slot) -> Option<&Node<T>> {
        self.slots.get(slot.index())
    }

    /// The value at `slot`, or `None` for a free or out-of-range slot.
    pub fn get(&self, slot: Slot) -> Option<&T> {
        self.node(slot)?.value.as_ref()
    }

    /// Mutable access to the value at `slot`.
    pub fn get_mut(&mut self, slot: Slot) -> Option<&mut T> {
        self.slots.get_mut(slot.index())?.value.as_mut()
    }

    /// Remove every element. The slab keeps its current length; every
    /// slot is freed in place so the free-slot scan starts fresh.
    pub fn clear(&mut self) {
        for node in &mut self.slots {
            node.take();
        }
        self.first = None;
        self.last = None;
        self.len = 0;
        self.initialized = false;
    }

    /// Iterate over values in list order. The iterator is lazy and
    /// restartable (call `iter` again); it walks `next` links from
    /// `first` and stops early if a link ever reaches a free slot.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            list: self,
            front: self.first,
            back: self.last,
            exhausted: self.len == 0,
        }
    }

    /// Iterate over the occupied nodes in list order, exposing their
    /// links. Used by callers that need to recombine nodes with their
    /// slab positions via [`SlotList::position`].
    pub fn raw_iter(&self) -> RawIter<'_, T> {
        RawIter {
            list: self,
            cursor: self.first,
        }
    }

    // First free slot, scanning from index 0.
    fn first_free(&self) -> Option<Slot> {
        self.slots
            .iter()
            .position(|node| !node.is_occupied())
            .map(Slot::new)
    }
}

impl<T> Default for SlotList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for SlotList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// Double-ended iterator over values in list order.
pub struct Iter<'a, T> {
    list: &'a SlotList<T>,
    front: Option<Slot>,
    back: Option<Slot>,
    exhausted: bool,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.exhausted {
            return None;
        }
        let Some(slot) = self.front else {
            self.exhausted = true;
            return None;
        };
        let Some(node) = self.list.node(slot) else {
            self.exhausted = true;
            return None;
        };
        let Some(value) = node.value() else {
            // Stale link into a freed slot: stop rather than yield junk.
            self.exhausted = true;
            return None;
        };
        if Some(slot) == self.back {
            self.exhausted = true;
        } else {
            self.front = node.next;
        }
        Some(value)
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<&'a T> {
        if self.exhausted {
            return None;
        }
        let Some(slot) = self.back else {
            self.exhausted = true;
            return None;
        };
        let Some(node) = self.list.node(slot) else {
            self.exhausted = true;
            return None;
        };
        let Some(value) = node.value() else {
            self.exhausted = true;
            return None;
        };
        if Some(slot) == self.front {
            self.exhausted = true;
        } else {
            self.back = node.previous;
        }
        Some(value)
    }
}

impl<'a, T> IntoIterator for &'a SlotList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Forward iterator over occupied nodes in list order.
pub struct RawIter<'a, T> {
    list: &'a SlotList<T>,
    cursor: Option<Slot>,
}

impl<'a, T> Iterator for RawIter<'a, T> {
    type Item = &'a Node<T>;

    fn next(&mut self) -> Option<&'a Node<T>> {
        let slot = self.cursor.take()?;
        let node = self.list.node(slot)?;
        if !node.is_occupied() {
            return None;
        }
        self.cursor = node.next;
        Some(node)
    }
}
